//! Command-line surface: argument parsing and command dispatch.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::engine::{Matcher, ScoringRules, inspect};
use crate::error::MediMatchError;
use crate::render::{json, markdown};
use crate::sources::catalog::Catalog;

pub mod health;

#[derive(Parser, Debug)]
#[command(
    name = "medimatch",
    version,
    about = "Match free-text symptoms against a disease catalog"
)]
pub struct Cli {
    /// Print JSON instead of Markdown
    #[arg(long, global = true)]
    pub json: bool,

    /// Directory holding the three catalog CSV sources
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// JSON file overriding the scoring rules
    #[arg(long, global = true, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rank catalog diseases for a symptom description
    Match {
        /// Free-text symptoms (e.g. "fever and cough")
        #[arg(required = true, num_args = 1..)]
        symptoms: Vec<String>,

        /// How long the symptoms have lasted (e.g. "3 days")
        #[arg(short, long, default_value = "")]
        duration: String,
    },
    /// Show how a symptom description is tokenized
    Tokens {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        #[arg(short, long, default_value = "")]
        duration: String,
    },
    /// Browse the disease catalog
    Catalog {
        #[command(subcommand)]
        command: CatalogCommand,
    },
    /// Check the loaded catalog for data problems
    Health,
    /// Run the MCP server over stdio
    Serve,
    /// Run the MCP server over HTTP (SSE transport)
    ServeHttp {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
    /// Print version information
    Version,
}

#[derive(Subcommand, Debug)]
pub enum CatalogCommand {
    /// List every disease with severity and typical duration
    List,
    /// Show one disease by name (case-insensitive)
    Get {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
}

/// Loads the catalog and scoring rules selected by the global flags.
///
/// # Errors
///
/// Returns an error when a catalog source or the rules file cannot be read.
pub fn build_matcher(data_dir: Option<&Path>, rules: Option<&Path>) -> anyhow::Result<Matcher> {
    let catalog = Catalog::load(data_dir)?;
    let rules = match rules {
        Some(path) => ScoringRules::from_json_file(path)?,
        None => ScoringRules::default(),
    };
    Ok(Matcher::new(catalog, rules))
}

fn render<T: serde::Serialize>(
    json_out: bool,
    value: &T,
    markdown: impl FnOnce(&T) -> Result<String, MediMatchError>,
) -> anyhow::Result<String> {
    if json_out {
        Ok(json::to_pretty(value)?)
    } else {
        Ok(markdown(value)?)
    }
}

/// Runs a non-server command and returns its rendered output.
///
/// # Errors
///
/// Returns an error when loading, lookup, or rendering fails.
pub async fn run(cli: Cli) -> anyhow::Result<String> {
    let Cli {
        json: json_out,
        data_dir,
        rules,
        command,
    } = cli;
    let load = || build_matcher(data_dir.as_deref(), rules.as_deref());

    match command {
        Commands::Version => Ok(format!("medimatch {}", env!("CARGO_PKG_VERSION"))),
        Commands::Tokens { text, duration } => {
            let report = inspect(&text.join(" "), &duration);
            render(json_out, &report, markdown::tokens_markdown)
        }
        Commands::Match { symptoms, duration } => {
            let matcher = load()?;
            let query = symptoms.join(" ");
            let result = matcher.match_symptoms(&query, &duration);
            render(json_out, &result, |r| markdown::match_markdown(&query, r))
        }
        Commands::Catalog { command } => {
            let matcher = load()?;
            match command {
                CatalogCommand::List => {
                    if json_out {
                        Ok(json::to_pretty(&matcher.catalog().records())?)
                    } else {
                        Ok(markdown::catalog_markdown(matcher.catalog())?)
                    }
                }
                CatalogCommand::Get { name } => {
                    let record = matcher.catalog().find(&name.join(" "))?;
                    render(json_out, record, markdown::disease_markdown)
                }
            }
        }
        Commands::Health => {
            let matcher = load()?;
            let report = health::check(matcher.catalog());
            render(json_out, &report, |r| Ok(r.to_markdown()))
        }
        Commands::Serve | Commands::ServeHttp { .. } => Err(MediMatchError::InvalidArgument(
            "server commands are not run as one-shot commands".into(),
        )
        .into()),
    }
}

use clap::Parser;
use tracing_subscriber::EnvFilter;

use medimatch::cli::{Cli, Commands, build_matcher};
use medimatch::error::MediMatchError;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn report(err: &anyhow::Error) -> std::process::ExitCode {
    if let Some(mm_err) = err.downcast_ref::<MediMatchError>() {
        eprintln!("Error: {mm_err}");
    } else {
        eprintln!("Error: {err}");
    }
    std::process::ExitCode::from(1)
}

async fn serve(cli: &Cli) -> anyhow::Result<()> {
    let matcher = build_matcher(cli.data_dir.as_deref(), cli.rules.as_deref())?;
    match &cli.command {
        Commands::ServeHttp { host, port } => {
            medimatch::mcp::run_http(matcher, host, *port).await
        }
        _ => medimatch::mcp::run_stdio(matcher).await,
    }
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Commands::Serve | Commands::ServeHttp { .. } => match serve(&cli).await {
            Ok(()) => std::process::ExitCode::SUCCESS,
            Err(err) => report(&err),
        },
        _ => match medimatch::cli::run(cli).await {
            Ok(output) => {
                println!("{output}");
                std::process::ExitCode::SUCCESS
            }
            Err(err) => report(&err),
        },
    }
}

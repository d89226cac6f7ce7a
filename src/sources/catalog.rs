use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::entities::disease::{
    DEFAULT_MAX_DURATION, DEFAULT_MIN_DURATION, DiseaseRecord, Severity, fallback_description,
    split_symptoms,
};
use crate::error::MediMatchError;
use crate::sources::table::Table;
use crate::sources::{DESCRIPTION_SOURCE, MAPPING_SOURCE, PRECAUTION_SOURCE, bundled};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum CatalogOrigin {
    Directory(PathBuf),
    Bundled,
    InMemory,
}

impl std::fmt::Display for CatalogOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Directory(path) => write!(f, "{}", path.display()),
            Self::Bundled => f.write_str("bundled dataset"),
            Self::InMemory => f.write_str("in-memory"),
        }
    }
}

/// Read-only disease table, built once and shared by every query.
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<DiseaseRecord>,
    origin: CatalogOrigin,
    skipped_rows: usize,
}

fn parse_day_bound(raw: &str, default: i64) -> i64 {
    let value = raw.trim();
    if let Ok(days) = value.parse::<i64>() {
        return days;
    }
    match value.parse::<f64>() {
        Ok(days) if days.is_finite() && days.abs() < i64::MAX as f64 => days.trunc() as i64,
        _ => default,
    }
}

fn cell<'a>(row: &'a [String], column: Option<usize>) -> &'a str {
    column
        .and_then(|i| row.get(i))
        .map(|s| s.trim())
        .unwrap_or_default()
}

struct Lookups<'a> {
    description: &'a Table,
    description_key: Option<usize>,
    description_col: Option<usize>,
    precaution: &'a Table,
    precaution_key: Option<usize>,
    precaution_cols: Vec<usize>,
}

impl<'a> Lookups<'a> {
    fn new(description: &'a Table, precaution: &'a Table) -> Self {
        let description_key = description.column("Disease");
        let precaution_key = precaution.column("Disease");
        if description_key.is_none() {
            warn!(source = %description.source_name, "no Disease column; descriptions unavailable");
        }
        if precaution_key.is_none() {
            warn!(source = %precaution.source_name, "no Disease column; precautions unavailable");
        }
        Self {
            description,
            description_key,
            description_col: description.column("Description"),
            precaution,
            precaution_key,
            precaution_cols: precaution.columns_with_prefix("precaution"),
        }
    }

    fn description(&self, disease: &str) -> String {
        let found = match (self.description_key, self.description_col) {
            (Some(key), Some(col)) => self
                .description
                .find_row(key, disease)
                .map(|row| cell(row, Some(col)).to_string())
                .unwrap_or_default(),
            _ => String::new(),
        };
        if found.is_empty() {
            return fallback_description(disease)
                .map(str::to_string)
                .unwrap_or_default();
        }
        found
    }

    fn precautions(&self, disease: &str) -> Vec<String> {
        let Some(key) = self.precaution_key else {
            return Vec::new();
        };
        let Some(row) = self.precaution.find_row(key, disease) else {
            return Vec::new();
        };
        self.precaution_cols
            .iter()
            .map(|&col| cell(row, Some(col)))
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl Catalog {
    pub fn from_records(records: Vec<DiseaseRecord>) -> Self {
        Self {
            records,
            origin: CatalogOrigin::InMemory,
            skipped_rows: 0,
        }
    }

    /// Joins the mapping source with descriptions and precautions by disease name.
    pub(crate) fn from_tables(
        mapping: &Table,
        description: &Table,
        precaution: &Table,
        origin: CatalogOrigin,
    ) -> Self {
        let disease_col = mapping.column("Disease");
        let symptoms_col = mapping.column("Symptoms");
        let min_col = mapping.column("Min_Duration");
        let max_col = mapping.column("Max_Duration");
        let severity_col = mapping.column("Severity");
        if disease_col.is_none() {
            warn!(source = %mapping.source_name, "no Disease column; catalog will be empty");
        }

        let lookups = Lookups::new(description, precaution);
        let mut skipped_rows = mapping.skipped + description.skipped + precaution.skipped;
        let mut records = Vec::with_capacity(mapping.rows.len());

        for (index, row) in mapping.rows.iter().enumerate() {
            let disease = cell(row, disease_col);
            if disease.is_empty() {
                debug!(
                    source = %mapping.source_name,
                    row = index + 1,
                    "skipping row without disease name"
                );
                skipped_rows += 1;
                continue;
            }

            let record = DiseaseRecord {
                disease: disease.to_string(),
                symptoms: split_symptoms(cell(row, symptoms_col)),
                min_duration: parse_day_bound(cell(row, min_col), DEFAULT_MIN_DURATION),
                max_duration: parse_day_bound(cell(row, max_col), DEFAULT_MAX_DURATION),
                severity: Severity::from_label(cell(row, severity_col)),
                description: lookups.description(disease),
                precautions: lookups.precautions(disease),
            };
            if record.has_inverted_range() {
                warn!(
                    disease = %record.disease,
                    min = record.min_duration,
                    max = record.max_duration,
                    "duration range is inverted; only queries without a duration will fit it"
                );
            }
            records.push(record);
        }

        info!(
            origin = %origin,
            records = records.len(),
            skipped_rows,
            "disease catalog loaded"
        );
        Self {
            records,
            origin,
            skipped_rows,
        }
    }

    /// Loads the three CSV sources from `dir`. Every source is required.
    ///
    /// # Errors
    ///
    /// Returns [`MediMatchError::MissingSource`] when a source file is absent,
    /// or an IO/CSV error when one cannot be opened or its header read.
    pub fn load_dir(dir: &Path) -> Result<Self, MediMatchError> {
        let mapping = read_source(dir, MAPPING_SOURCE)?;
        let description = read_source(dir, DESCRIPTION_SOURCE)?;
        let precaution = read_source(dir, PRECAUTION_SOURCE)?;
        Ok(Self::from_tables(
            &mapping,
            &description,
            &precaution,
            CatalogOrigin::Directory(dir.to_path_buf()),
        ))
    }

    /// Loads the dataset compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns an error when an embedded source is missing or unreadable.
    pub fn bundled() -> Result<Self, MediMatchError> {
        let mapping = bundled::table(MAPPING_SOURCE)?;
        let description = bundled::table(DESCRIPTION_SOURCE)?;
        let precaution = bundled::table(PRECAUTION_SOURCE)?;
        Ok(Self::from_tables(
            &mapping,
            &description,
            &precaution,
            CatalogOrigin::Bundled,
        ))
    }

    /// Resolves the catalog location: an explicit directory, then the per-user
    /// data directory when it holds a mapping source, then the bundled dataset.
    ///
    /// # Errors
    ///
    /// Returns an error when the chosen sources cannot be loaded.
    pub fn load(data_dir: Option<&Path>) -> Result<Self, MediMatchError> {
        if let Some(dir) = data_dir {
            return Self::load_dir(dir);
        }
        match crate::utils::paths::medimatch_data_dir() {
            Some(dir) if dir.join(MAPPING_SOURCE).is_file() => Self::load_dir(&dir),
            _ => Self::bundled(),
        }
    }

    pub fn records(&self) -> &[DiseaseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn origin(&self) -> &CatalogOrigin {
        &self.origin
    }

    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    pub fn get(&self, name: &str) -> Option<&DiseaseRecord> {
        self.records.iter().find(|r| r.name_matches(name))
    }

    /// Like [`Catalog::get`], but unknown names become a `NotFound` error.
    ///
    /// # Errors
    ///
    /// Returns [`MediMatchError::NotFound`] when no record has that name.
    pub fn find(&self, name: &str) -> Result<&DiseaseRecord, MediMatchError> {
        if let Some(record) = self.get(name) {
            return Ok(record);
        }
        let needle = name.trim().to_lowercase();
        let close: Vec<&str> = self
            .records
            .iter()
            .filter(|r| {
                let lower = r.disease.to_lowercase();
                !needle.is_empty() && (lower.contains(&needle) || needle.contains(&lower))
            })
            .map(|r| r.disease.as_str())
            .take(3)
            .collect();
        let suggestion = if close.is_empty() {
            "Try: medimatch catalog list".to_string()
        } else {
            format!("Did you mean: {}?", close.join(", "))
        };
        Err(MediMatchError::NotFound {
            entity: "disease".into(),
            id: name.trim().to_string(),
            suggestion,
        })
    }
}

fn read_source(dir: &Path, source_name: &str) -> Result<Table, MediMatchError> {
    let path = dir.join(source_name);
    if !path.is_file() {
        return Err(MediMatchError::MissingSource {
            source_name: source_name.to_string(),
            path: path.display().to_string(),
        });
    }
    let file = File::open(&path)?;
    Table::from_reader(source_name, file)
}

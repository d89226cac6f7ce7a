use std::path::Path;

use crate::sources::catalog::{Catalog, CatalogOrigin};
use crate::sources::{REQUIRED_SOURCES, bundled};

#[derive(Debug, Clone, serde::Serialize)]
pub struct HealthRow {
    pub check: String,
    pub status: String,
    pub detail: String,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct HealthReport {
    pub healthy: usize,
    pub total: usize,
    pub rows: Vec<HealthRow>,
}

impl HealthReport {
    pub fn all_healthy(&self) -> bool {
        self.healthy == self.total
    }

    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str("# MediMatch Health Check\n\n");
        out.push_str("| Check | Status | Detail |\n");
        out.push_str("|-------|--------|--------|\n");
        for row in &self.rows {
            out.push_str(&format!(
                "| {} | {} | {} |\n",
                row.check, row.status, row.detail
            ));
        }
        out.push_str(&format!(
            "\nStatus: {}/{} checks passed\n",
            self.healthy, self.total
        ));
        out
    }
}

fn row(check: impl Into<String>, ok: bool, detail: impl Into<String>) -> HealthRow {
    HealthRow {
        check: check.into(),
        status: if ok { "ok" } else { "warn" }.into(),
        detail: detail.into(),
    }
}

fn preview(names: &[&str]) -> String {
    const MAX: usize = 5;
    let mut out = names
        .iter()
        .take(MAX)
        .copied()
        .collect::<Vec<_>>()
        .join(", ");
    if names.len() > MAX {
        out.push_str(&format!(" (+{} more)", names.len() - MAX));
    }
    out
}

fn source_rows(origin: &CatalogOrigin) -> Vec<HealthRow> {
    match origin {
        CatalogOrigin::Directory(dir) => REQUIRED_SOURCES
            .iter()
            .map(|name| source_file_row(dir, name))
            .collect(),
        CatalogOrigin::Bundled => {
            let shipped = bundled::source_names();
            REQUIRED_SOURCES
                .iter()
                .map(|name| {
                    let ok = shipped.iter().any(|s| s == name);
                    row(
                        format!("Source {name}"),
                        ok,
                        if ok { "bundled" } else { "not bundled" },
                    )
                })
                .collect()
        }
        CatalogOrigin::InMemory => Vec::new(),
    }
}

fn source_file_row(dir: &Path, name: &str) -> HealthRow {
    let path = dir.join(name);
    match std::fs::metadata(&path) {
        Ok(meta) => row(format!("Source {name}"), true, format!("{} bytes", meta.len())),
        Err(err) => row(format!("Source {name}"), false, format!("{:?}", err.kind())),
    }
}

/// Inspects a loaded catalog for data problems that do not stop loading.
pub fn check(catalog: &Catalog) -> HealthReport {
    let mut rows = source_rows(catalog.origin());

    rows.push(row(
        "Records",
        !catalog.is_empty(),
        format!("{} diseases from {}", catalog.len(), catalog.origin()),
    ));
    rows.push(row(
        "Skipped rows",
        catalog.skipped_rows() == 0,
        catalog.skipped_rows().to_string(),
    ));

    let records = catalog.records();
    let without_symptoms: Vec<&str> = records
        .iter()
        .filter(|r| r.symptoms.is_empty())
        .map(|r| r.disease.as_str())
        .collect();
    rows.push(row(
        "Records without symptoms",
        without_symptoms.is_empty(),
        if without_symptoms.is_empty() {
            "none".to_string()
        } else {
            preview(&without_symptoms)
        },
    ));

    let inverted: Vec<&str> = records
        .iter()
        .filter(|r| r.has_inverted_range())
        .map(|r| r.disease.as_str())
        .collect();
    rows.push(row(
        "Inverted duration ranges",
        inverted.is_empty(),
        if inverted.is_empty() {
            "none".to_string()
        } else {
            preview(&inverted)
        },
    ));

    let undescribed: Vec<&str> = records
        .iter()
        .filter(|r| r.description.is_empty())
        .map(|r| r.disease.as_str())
        .collect();
    rows.push(row(
        "Missing descriptions",
        undescribed.is_empty(),
        if undescribed.is_empty() {
            "none".to_string()
        } else {
            preview(&undescribed)
        },
    ));

    let no_precautions = records.iter().filter(|r| r.precautions.is_empty()).count();
    rows.push(row(
        "Missing precautions",
        no_precautions == 0,
        no_precautions.to_string(),
    ));

    let healthy = rows.iter().filter(|r| r.status == "ok").count();
    HealthReport {
        healthy,
        total: rows.len(),
        rows,
    }
}

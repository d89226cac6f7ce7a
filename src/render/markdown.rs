use std::sync::OnceLock;

use minijinja::{Environment, context};

use crate::engine::TokenReport;
use crate::entities::diagnosis::QueryResult;
use crate::entities::disease::DiseaseRecord;
use crate::error::MediMatchError;
use crate::sources::catalog::Catalog;

static ENV: OnceLock<Environment<'static>> = OnceLock::new();

#[derive(serde::Serialize)]
struct CatalogRow<'a> {
    disease: &'a str,
    severity: &'static str,
    duration_range: String,
    symptom_count: usize,
}

fn env() -> Result<&'static Environment<'static>, MediMatchError> {
    if let Some(env) = ENV.get() {
        return Ok(env);
    }

    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.add_filter("score", |v: f64| -> String {
        let mut out = format!("{v:.4}");
        while out.contains('.') && out.ends_with('0') {
            out.pop();
        }
        if out.ends_with('.') {
            out.pop();
        }
        if out == "-0" { "0".to_string() } else { out }
    });
    env.add_template("match.md.j2", include_str!("../../templates/match.md.j2"))?;
    env.add_template(
        "disease.md.j2",
        include_str!("../../templates/disease.md.j2"),
    )?;
    env.add_template(
        "catalog.md.j2",
        include_str!("../../templates/catalog.md.j2"),
    )?;
    env.add_template("tokens.md.j2", include_str!("../../templates/tokens.md.j2"))?;

    let _ = ENV.set(env);
    Ok(ENV
        .get()
        .expect("ENV should be initialized by the time this is reached"))
}

pub(crate) fn duration_range(record: &DiseaseRecord) -> String {
    if record.max_duration >= crate::entities::disease::DEFAULT_MAX_DURATION {
        format!("{}+ days", record.min_duration)
    } else {
        format!("{}-{} days", record.min_duration, record.max_duration)
    }
}

pub fn match_markdown(query: &str, result: &QueryResult) -> Result<String, MediMatchError> {
    let tmpl = env()?.get_template("match.md.j2")?;
    Ok(tmpl.render(context! {
        query => query,
        duration_days => result.duration_days,
        duration_bucket => result.duration_bucket.as_str(),
        primary => &result.primary,
        secondary => &result.secondary,
        other => &result.other,
        emergency => result.emergency,
        emergency_reasons => &result.emergency_reasons,
        doctor_advice => &result.doctor_advice,
    })?)
}

pub fn disease_markdown(record: &DiseaseRecord) -> Result<String, MediMatchError> {
    let tmpl = env()?.get_template("disease.md.j2")?;
    Ok(tmpl.render(context! {
        disease => &record.disease,
        severity => record.severity.as_str(),
        duration_range => duration_range(record),
        symptoms => &record.symptoms,
        description => &record.description,
        precautions => &record.precautions,
    })?)
}

pub fn catalog_markdown(catalog: &Catalog) -> Result<String, MediMatchError> {
    let rows: Vec<CatalogRow<'_>> = catalog
        .records()
        .iter()
        .map(|r| CatalogRow {
            disease: &r.disease,
            severity: r.severity.as_str(),
            duration_range: duration_range(r),
            symptom_count: r.symptoms.len(),
        })
        .collect();

    let tmpl = env()?.get_template("catalog.md.j2")?;
    Ok(tmpl.render(context! {
        origin => catalog.origin().to_string(),
        records => rows,
        count => catalog.len(),
    })?)
}

pub fn tokens_markdown(report: &TokenReport) -> Result<String, MediMatchError> {
    let tmpl = env()?.get_template("tokens.md.j2")?;
    Ok(tmpl.render(context! {
        tokens => &report.tokens,
        duration_days => report.duration_days,
        duration_bucket => report.duration_bucket.as_str(),
    })?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{ScoringRules, inspect, match_symptoms};
    use crate::entities::disease::Severity;

    fn record() -> DiseaseRecord {
        DiseaseRecord {
            disease: "Viral Fever".into(),
            symptoms: vec!["fever".into(), "body ache".into(), "mild cough".into()],
            min_duration: 1,
            max_duration: 7,
            severity: Severity::Mild,
            description: "Short-lived fever.".into(),
            precautions: vec!["rest well".into(), "drink fluids".into()],
        }
    }

    #[test]
    fn match_markdown_shows_primary_and_advice() {
        let catalog = Catalog::from_records(vec![record()]);
        let result = match_symptoms(&catalog, &ScoringRules::default(), "fever", "2 days");
        let markdown = match_markdown("fever", &result).expect("markdown");
        assert!(markdown.contains("# Symptom Check: fever"));
        assert!(markdown.contains("Duration: 2 days (short)"));
        assert!(markdown.contains("## Most Likely: Viral Fever"));
        assert!(markdown.contains("Matched symptoms: fever"));
        assert!(markdown.contains("- rest well"));
        assert!(markdown.contains("## Advice"));
        assert!(!markdown.contains("## Emergency"));
    }

    #[test]
    fn match_markdown_for_empty_result() {
        let markdown = match_markdown("???", &QueryResult::empty(0)).expect("markdown");
        assert!(markdown.contains("No matching conditions found"));
        assert!(markdown.contains("Duration: not given"));
        assert!(!markdown.contains("## Advice"));
    }

    #[test]
    fn match_markdown_lists_emergency_reasons() {
        let catalog = Catalog::from_records(vec![record()]);
        let result = match_symptoms(
            &catalog,
            &ScoringRules::default(),
            "fever and chest tightness",
            "",
        );
        let markdown = match_markdown("fever and chest tightness", &result).expect("markdown");
        assert!(markdown.contains("## Emergency"));
        assert!(markdown.contains("- Red flag: 'chest' mentioned"));
        assert!(markdown.contains("- Seek immediate medical care or emergency services."));
    }

    #[test]
    fn disease_markdown_renders_record() {
        let markdown = disease_markdown(&record()).expect("markdown");
        assert!(markdown.contains("# Viral Fever"));
        assert!(markdown.contains("| Mild | 1-7 days |"));
        assert!(markdown.contains("Symptoms: fever, body ache, mild cough"));
        assert!(markdown.contains("- drink fluids"));
    }

    #[test]
    fn catalog_markdown_counts_records() {
        let mut open_ended = record();
        open_ended.disease = "Diabetes".into();
        open_ended.min_duration = 30;
        open_ended.max_duration = 9999;
        let catalog = Catalog::from_records(vec![record(), open_ended]);
        let markdown = catalog_markdown(&catalog).expect("markdown");
        assert!(markdown.contains("Source: in-memory"));
        assert!(markdown.contains("| Viral Fever | Mild | 1-7 days | 3 |"));
        assert!(markdown.contains("| Diabetes | Mild | 30+ days | 3 |"));
        assert!(markdown.contains("2 diseases."));
    }

    #[test]
    fn tokens_markdown_lists_tokens() {
        let report = inspect("Sneezing, runny nose", "1 day");
        let markdown = tokens_markdown(&report).expect("markdown");
        assert!(markdown.contains("- `sneez`"));
        assert!(markdown.contains("- `runny`"));
        assert!(markdown.contains("Duration: 1 day (short)"));
    }
}

//! Rule-based matching: tokenize, score every catalog record, rank, flag
//! emergencies, and attach generic advice.

pub mod advice;
pub mod categorize;
pub mod duration;
pub mod emergency;
pub mod rules;
pub mod score;
pub mod tokenize;

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::entities::diagnosis::{DurationBucket, QueryResult};
use crate::sources::catalog::Catalog;

pub use duration::parse_duration_days;
pub use rules::ScoringRules;
pub use tokenize::extract_tokens;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenReport {
    pub tokens: Vec<String>,
    pub duration_days: u32,
    pub duration_bucket: DurationBucket,
}

/// Shows what the matcher sees for a query without scoring it.
pub fn inspect(symptoms_text: &str, duration_text: &str) -> TokenReport {
    let duration_days = parse_duration_days(duration_text);
    TokenReport {
        tokens: extract_tokens(symptoms_text),
        duration_days,
        duration_bucket: DurationBucket::from_days(duration_days),
    }
}

/// A catalog and rule set bundled for repeated queries. Cloning is cheap and
/// clones share the same read-only data.
#[derive(Debug, Clone)]
pub struct Matcher {
    catalog: Arc<Catalog>,
    rules: Arc<ScoringRules>,
}

impl Matcher {
    pub fn new(catalog: Catalog, rules: ScoringRules) -> Self {
        Self {
            catalog: Arc::new(catalog),
            rules: Arc::new(rules),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn rules(&self) -> &ScoringRules {
        &self.rules
    }

    pub fn match_symptoms(&self, symptoms_text: &str, duration_text: &str) -> QueryResult {
        match_symptoms(&self.catalog, &self.rules, symptoms_text, duration_text)
    }
}

/// Matches free-text symptoms and a duration against the catalog.
///
/// Input with no tokens, or tokens that overlap no record, yields
/// [`QueryResult::empty`]. The result depends only on the arguments.
pub fn match_symptoms(
    catalog: &Catalog,
    rules: &ScoringRules,
    symptoms_text: &str,
    duration_text: &str,
) -> QueryResult {
    let tokens = extract_tokens(symptoms_text);
    let days = parse_duration_days(duration_text);

    if tokens.is_empty() {
        debug!("no tokens in symptom text");
        return QueryResult::empty(days);
    }

    let candidates: Vec<_> = catalog
        .records()
        .iter()
        .filter_map(|record| score::score_record(&tokens, days, record, rules))
        .collect();
    debug!(
        tokens = tokens.len(),
        days,
        candidates = candidates.len(),
        "scored catalog"
    );

    let Some(ranked) = categorize::categorize(candidates, rules.secondary_ratio) else {
        return QueryResult::empty(days);
    };

    let assessment = emergency::detect_emergency(symptoms_text, days, rules);
    let doctor_advice =
        advice::doctor_advice(assessment.emergency, &ranked.primary, &rules.advice);

    QueryResult {
        primary: Some(ranked.primary),
        secondary: ranked.secondary,
        other: ranked.other,
        emergency: assessment.emergency,
        emergency_reasons: assessment.reasons,
        doctor_advice,
        duration_days: days,
        duration_bucket: DurationBucket::from_days(days),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::disease::{DiseaseRecord, Severity};

    fn record(
        name: &str,
        symptoms: &[&str],
        range: (i64, i64),
        severity: Severity,
    ) -> DiseaseRecord {
        DiseaseRecord {
            disease: name.to_string(),
            symptoms: symptoms.iter().map(|s| s.to_string()).collect(),
            min_duration: range.0,
            max_duration: range.1,
            severity,
            description: String::new(),
            precautions: Vec::new(),
        }
    }

    fn catalog() -> Catalog {
        Catalog::from_records(vec![
            record(
                "Viral Fever",
                &["fever", "body ache", "fatigue", "headache", "mild cough"],
                (1, 7),
                Severity::Mild,
            ),
            record(
                "Common Cold",
                &["runny nose", "sneezing", "cough", "sore throat", "mild fever"],
                (1, 10),
                Severity::Mild,
            ),
            record(
                "Heart Attack",
                &["chest pain", "shortness of breath", "sweating", "nausea"],
                (0, 1),
                Severity::Severe,
            ),
            record(
                "Tuberculosis",
                &["persistent cough", "weight loss", "night sweats", "fever"],
                (21, 365),
                Severity::Severe,
            ),
        ])
    }

    #[test]
    fn fever_and_cough_picks_viral_fever() {
        let result = match_symptoms(
            &catalog(),
            &ScoringRules::default(),
            "fever and cough",
            "2 days",
        );
        let primary = result.primary.as_ref().expect("primary");
        assert_eq!(primary.disease, "Viral Fever");
        assert_eq!(primary.matched, vec!["fever", "mild cough"]);
        assert!(primary.duration_ok);
        assert!(!result.emergency);
        assert_eq!(result.doctor_advice.len(), 1);
        assert_eq!(result.duration_bucket, DurationBucket::Short);
        // cold 0.7 and tuberculosis stay below 0.7 * 1.2
        assert!(result.secondary.is_empty());
        assert_eq!(result.other.len(), 2);
        assert_eq!(result.other[0].disease, "Common Cold");
    }

    #[test]
    fn empty_input_short_circuits() {
        let result = match_symptoms(&catalog(), &ScoringRules::default(), "  ?!  ", "3 days");
        assert_eq!(result, QueryResult::empty(3));
    }

    #[test]
    fn unmatched_input_has_no_emergency_even_with_flags() {
        // "chest" is a red flag but "chested" shares no word with any symptom
        let result = match_symptoms(&catalog(), &ScoringRules::default(), "chested", "");
        assert!(result.is_empty());
        assert!(!result.emergency);
        assert!(result.emergency_reasons.is_empty());
    }

    #[test]
    fn red_flags_force_emergency_advice() {
        let result = match_symptoms(
            &catalog(),
            &ScoringRules::default(),
            "I can't breathe, chest pain",
            "",
        );
        assert!(result.emergency);
        assert_eq!(
            result.primary.as_ref().expect("primary").disease,
            "Heart Attack"
        );
        assert!(result.emergency_reasons.iter().any(|r| r.contains("breath")));
        assert!(result.emergency_reasons.iter().any(|r| r.contains("chest")));
        assert_eq!(
            result.doctor_advice,
            vec!["Seek immediate medical care or emergency services."]
        );
    }

    #[test]
    fn every_candidate_overlaps_the_query() {
        let tokens = extract_tokens("night sweats and sneezing");
        let result = match_symptoms(
            &catalog(),
            &ScoringRules::default(),
            "night sweats and sneezing",
            "",
        );
        let all = result
            .primary
            .iter()
            .chain(result.secondary.iter())
            .chain(result.other.iter());
        for cand in all {
            assert!(!cand.matched.is_empty());
            for phrase in &cand.matched {
                assert!(
                    tokenize::phrase_words(phrase)
                        .iter()
                        .any(|w| tokens.contains(w))
                );
            }
        }
    }

    #[test]
    fn repeated_queries_are_identical() {
        let catalog = catalog();
        let rules = ScoringRules::default();
        let first = match_symptoms(&catalog, &rules, "persistent cough, fever", "40 days");
        let second = match_symptoms(&catalog, &rules, "persistent cough, fever", "40 days");
        assert_eq!(
            serde_json::to_string(&first).expect("json"),
            serde_json::to_string(&second).expect("json")
        );
        assert!(!first.emergency);
        assert!(
            first
                .emergency_reasons
                .iter()
                .any(|r| r.contains("> 30 days"))
        );
    }

    #[test]
    fn matcher_clones_share_state() {
        let matcher = Matcher::new(catalog(), ScoringRules::default());
        let clone = matcher.clone();
        assert!(std::ptr::eq(matcher.catalog(), clone.catalog()));
        assert_eq!(
            matcher.match_symptoms("sneezing, runny nose", "3"),
            clone.match_symptoms("sneezing, runny nose", "3")
        );
    }

    #[test]
    fn inspect_reports_tokens_and_bucket() {
        let report = inspect("Coughing fits", "20 days");
        assert_eq!(report.tokens, vec!["cough", "fit"]);
        assert_eq!(report.duration_days, 20);
        assert_eq!(report.duration_bucket, DurationBucket::Long);
    }
}

use std::collections::HashSet;

use crate::engine::rules::ScoringRules;
use crate::engine::tokenize::phrase_words;
use crate::entities::diagnosis::ScoredCandidate;
use crate::entities::disease::DiseaseRecord;

/// Rounds to four decimals from the exact binary value, so a printed half
/// like 0.85625 (stored just below the half) becomes 0.8562.
pub(crate) fn round4(value: f64) -> f64 {
    format!("{value:.4}").parse().unwrap_or(value)
}

fn phrase_overlaps(phrase: &str, tokens: &HashSet<&str>) -> bool {
    phrase_words(phrase)
        .iter()
        .any(|word| tokens.contains(word.as_str()))
}

/// Symptom phrases of `record` sharing at least one word with the query.
pub fn matched_symptoms(tokens: &[String], record: &DiseaseRecord) -> Vec<String> {
    let token_set: HashSet<&str> = tokens.iter().map(String::as_str).collect();
    record
        .symptoms
        .iter()
        .filter(|phrase| phrase_overlaps(phrase, &token_set))
        .cloned()
        .collect()
}

pub(crate) fn duration_ok(days: u32, record: &DiseaseRecord) -> bool {
    days == 0 || record.duration_contains(days)
}

fn severity_penalty(days: u32, record: &DiseaseRecord, rules: &ScoringRules) -> f64 {
    let base = rules.base_severity_penalty(record.severity);
    if days <= rules.short_duration_days {
        base * rules.short_duration_multiplier
    } else {
        base
    }
}

fn missing_penalty(total: usize, base_frac: f64, rules: &ScoringRules) -> f64 {
    if total >= rules.missing_min_symptoms && base_frac < rules.missing_frac_below {
        rules.missing_weight * (1.0 - base_frac)
    } else {
        0.0
    }
}

fn viral_boost(tokens: &[String], days: u32, record: &DiseaseRecord, rules: &ScoringRules) -> f64 {
    let boost = &rules.viral_boost;
    let has_token = tokens.iter().any(|t| *t == boost.token);
    if has_token && record.is_viral_fever_like() && days <= boost.max_days {
        boost.boost
    } else {
        0.0
    }
}

/// Scores one catalog record against the query.
///
/// Returns `None` when no symptom phrase overlaps the query tokens; such a
/// record is not a candidate at all. Scores are rounded to four decimals and
/// may be negative.
pub fn score_record(
    tokens: &[String],
    days: u32,
    record: &DiseaseRecord,
    rules: &ScoringRules,
) -> Option<ScoredCandidate> {
    if record.symptoms.is_empty() {
        return None;
    }
    let matched = matched_symptoms(tokens, record);
    if matched.is_empty() {
        return None;
    }

    let match_count = matched.len();
    let total_symptoms = record.symptoms.len().max(1);
    let base_frac = match_count as f64 / total_symptoms as f64;

    let duration_ok = duration_ok(days, record);
    let duration_bonus = if duration_ok { rules.duration_bonus } else { 0.0 };

    let score = base_frac + duration_bonus
        - severity_penalty(days, record, rules)
        - missing_penalty(total_symptoms, base_frac, rules)
        + viral_boost(tokens, days, record, rules);

    Some(ScoredCandidate {
        disease: record.disease.clone(),
        matched,
        score: round4(score),
        severity: record.severity,
        description: record.description.clone(),
        precautions: record.precautions.clone(),
        duration_ok,
        duration_days: days,
        match_count,
        total_symptoms,
    })
}

/// Convenience form of [`score_record`] that yields only the number.
pub fn score(
    tokens: &[String],
    days: u32,
    record: &DiseaseRecord,
    rules: &ScoringRules,
) -> Option<f64> {
    score_record(tokens, days, record, rules).map(|c| c.score)
}

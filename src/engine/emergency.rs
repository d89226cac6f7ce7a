use serde::Serialize;

use crate::engine::rules::ScoringRules;
use crate::utils::text::clean_text;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EmergencyAssessment {
    pub emergency: bool,
    pub reasons: Vec<String>,
}

/// Looks for red-flag phrases in the cleaned raw text.
///
/// Each flag is a substring test, so "breath" fires on "breathe". A duration
/// above `long_duration_days` adds an advisory reason but leaves
/// `emergency` untouched.
pub fn detect_emergency(raw_text: &str, days: u32, rules: &ScoringRules) -> EmergencyAssessment {
    let text = clean_text(raw_text);
    let mut out = EmergencyAssessment::default();

    for flag in &rules.red_flags {
        if text.contains(flag.as_str()) {
            out.emergency = true;
            out.reasons.push(format!("Red flag: '{flag}' mentioned"));
        }
    }

    if days > rules.long_duration_days {
        out.reasons.push(rules.long_duration_reason.clone());
    }

    out
}

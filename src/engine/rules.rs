use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::entities::disease::Severity;
use crate::error::MediMatchError;
use crate::utils::text::clean_text;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeverityPenalty {
    pub severity: Severity,
    pub penalty: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViralBoost {
    /// Query token that must be present.
    pub token: String,
    pub boost: f64,
    pub max_days: u32,
}

impl Default for ViralBoost {
    fn default() -> Self {
        Self {
            token: "fever".to_string(),
            boost: 0.5,
            max_days: 7,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdviceText {
    pub emergency: String,
    pub consult: String,
    pub monitor: String,
    /// Primary durations above this many days get the consult message.
    pub consult_after_days: u32,
}

impl Default for AdviceText {
    fn default() -> Self {
        Self {
            emergency: "Seek immediate medical care or emergency services.".to_string(),
            consult: "Consult a doctor for evaluation and tests as needed.".to_string(),
            monitor: "Monitor symptoms at home; follow precautions. See a doctor if symptoms worsen or persist.".to_string(),
            consult_after_days: 14,
        }
    }
}

/// Every constant the scoring, categorizing, emergency and advice steps use.
///
/// `ScoringRules::default()` is the stock rule set. A JSON file passed via
/// `--rules` may override any subset of fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringRules {
    pub duration_bonus: f64,
    pub severity_penalties: Vec<SeverityPenalty>,
    pub short_duration_days: u32,
    pub short_duration_multiplier: f64,
    pub missing_min_symptoms: usize,
    pub missing_frac_below: f64,
    pub missing_weight: f64,
    pub viral_boost: ViralBoost,
    pub secondary_ratio: f64,
    pub red_flags: Vec<String>,
    pub long_duration_days: u32,
    pub long_duration_reason: String,
    pub advice: AdviceText,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            duration_bonus: 0.45,
            severity_penalties: vec![
                SeverityPenalty {
                    severity: Severity::Severe,
                    penalty: 0.35,
                },
                SeverityPenalty {
                    severity: Severity::Moderate,
                    penalty: 0.15,
                },
            ],
            short_duration_days: 3,
            short_duration_multiplier: 1.2,
            missing_min_symptoms: 3,
            missing_frac_below: 0.5,
            missing_weight: 0.25,
            viral_boost: ViralBoost::default(),
            secondary_ratio: 0.7,
            red_flags: [
                "breath",
                "shortness",
                "chest",
                "severe pain",
                "loss of consciousness",
                "bleeding",
                "bleed",
                "unconscious",
                "paralysis",
                "weakness in limb",
                "vision loss",
            ]
            .into_iter()
            .map(str::to_string)
            .collect(),
            long_duration_days: 30,
            long_duration_reason: "Symptom duration > 30 days - consider specialist evaluation"
                .to_string(),
            advice: AdviceText::default(),
        }
    }
}

impl ScoringRules {
    /// Loads overrides from a JSON file; absent fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or is not a valid rules document.
    pub fn from_json_file(path: &Path) -> Result<Self, MediMatchError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, MediMatchError> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        if !value.is_object() {
            return Err(MediMatchError::InvalidArgument(
                "rules file must be a JSON object".into(),
            ));
        }
        let mut rules: Self = serde_json::from_value(value)?;
        // flags are matched against cleaned text, so clean them the same way
        rules.red_flags = rules.red_flags.iter().map(|f| clean_text(f)).collect();
        rules.validate()?;
        Ok(rules)
    }

    fn validate(&self) -> Result<(), MediMatchError> {
        if self.red_flags.iter().any(String::is_empty) {
            return Err(MediMatchError::InvalidArgument(
                "red_flags must not contain empty phrases".into(),
            ));
        }
        let finite = [
            self.duration_bonus,
            self.short_duration_multiplier,
            self.missing_frac_below,
            self.missing_weight,
            self.viral_boost.boost,
            self.secondary_ratio,
        ]
        .into_iter()
        .chain(self.severity_penalties.iter().map(|p| p.penalty))
        .all(f64::is_finite);
        if !finite {
            return Err(MediMatchError::InvalidArgument(
                "rule weights must be finite numbers".into(),
            ));
        }
        Ok(())
    }

    pub fn base_severity_penalty(&self, severity: Severity) -> f64 {
        self.severity_penalties
            .iter()
            .find(|p| p.severity == severity)
            .map_or(0.0, |p| p.penalty)
    }
}

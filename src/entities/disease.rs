use serde::{Deserialize, Serialize};

pub const DEFAULT_MIN_DURATION: i64 = 0;
pub const DEFAULT_MAX_DURATION: i64 = 9999;

const VIRAL_FEVER_NAMES: &[&str] = &["viral fever", "fever"];

const VIRAL_FEVER_DESCRIPTION: &str = "A viral fever is usually caused by common viruses and typically \
causes short-term fever, body ache and fatigue. Most viral fevers \
resolve within a few days with rest and fluids.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Severity {
    Severe,
    Moderate,
    Mild,
    #[default]
    Unknown,
}

impl Severity {
    /// Classifies a raw severity cell by substring, so "Very severe" is `Severe`.
    pub fn from_label(raw: &str) -> Self {
        let label = raw.trim().to_ascii_lowercase();
        if label.contains("severe") {
            Self::Severe
        } else if label.contains("moderate") {
            Self::Moderate
        } else if label.contains("mild") {
            Self::Mild
        } else {
            Self::Unknown
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Severe => "Severe",
            Self::Moderate => "Moderate",
            Self::Mild => "Mild",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseRecord {
    pub disease: String,
    pub symptoms: Vec<String>,
    pub min_duration: i64,
    pub max_duration: i64,
    pub severity: Severity,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub precautions: Vec<String>,
}

impl DiseaseRecord {
    pub fn name_matches(&self, name: &str) -> bool {
        self.disease.trim().eq_ignore_ascii_case(name.trim())
    }

    /// Viral-fever-like names get the fallback description and the fever boost.
    pub fn is_viral_fever_like(&self) -> bool {
        is_viral_fever_name(&self.disease)
    }

    pub fn duration_contains(&self, days: u32) -> bool {
        let days = i64::from(days);
        self.min_duration <= days && days <= self.max_duration
    }

    pub fn has_inverted_range(&self) -> bool {
        self.min_duration > self.max_duration
    }
}

pub fn is_viral_fever_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower.contains("viral") || VIRAL_FEVER_NAMES.contains(&lower.as_str())
}

pub fn fallback_description(name: &str) -> Option<&'static str> {
    is_viral_fever_name(name).then_some(VIRAL_FEVER_DESCRIPTION)
}

/// Splits a symptoms cell on `;` or `,`, lowercasing and dropping empty entries.
pub fn split_symptoms(raw: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for part in raw.split([';', ',']) {
        let symptom = part.trim().to_lowercase();
        if symptom.is_empty() || out.contains(&symptom) {
            continue;
        }
        out.push(symptom);
    }
    out
}

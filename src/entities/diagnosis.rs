use serde::{Deserialize, Serialize};

use crate::entities::disease::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationBucket {
    Short,
    Medium,
    Long,
    Chronic,
}

impl DurationBucket {
    pub fn from_days(days: u32) -> Self {
        match days {
            0..=3 => Self::Short,
            4..=14 => Self::Medium,
            15..=45 => Self::Long,
            _ => Self::Chronic,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
            Self::Chronic => "chronic",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub disease: String,
    pub matched: Vec<String>,
    pub score: f64,
    pub severity: Severity,
    pub description: String,
    pub precautions: Vec<String>,
    pub duration_ok: bool,
    pub duration_days: u32,
    pub match_count: usize,
    pub total_symptoms: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub primary: Option<ScoredCandidate>,
    pub secondary: Vec<ScoredCandidate>,
    pub other: Vec<ScoredCandidate>,
    pub emergency: bool,
    pub emergency_reasons: Vec<String>,
    pub doctor_advice: Vec<String>,
    pub duration_days: u32,
    pub duration_bucket: DurationBucket,
}

impl QueryResult {
    /// The explicit no-match shape: no candidates, no emergency, no advice.
    pub fn empty(duration_days: u32) -> Self {
        Self {
            primary: None,
            secondary: Vec::new(),
            other: Vec::new(),
            emergency: false,
            emergency_reasons: Vec::new(),
            doctor_advice: Vec::new(),
            duration_days,
            duration_bucket: DurationBucket::from_days(duration_days),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_none()
    }

    pub fn candidate_count(&self) -> usize {
        usize::from(self.primary.is_some()) + self.secondary.len() + self.other.len()
    }
}

use crate::engine::rules::AdviceText;
use crate::entities::diagnosis::ScoredCandidate;
use crate::entities::disease::Severity;

/// Picks the single generic advice line for a result.
pub fn doctor_advice(
    emergency: bool,
    primary: &ScoredCandidate,
    text: &AdviceText,
) -> Vec<String> {
    let line = if emergency {
        &text.emergency
    } else if primary.severity == Severity::Severe
        || primary.duration_days > text.consult_after_days
    {
        &text.consult
    } else {
        &text.monitor
    };
    vec![line.clone()]
}

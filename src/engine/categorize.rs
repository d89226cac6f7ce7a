use std::cmp::Ordering;

use crate::entities::diagnosis::ScoredCandidate;

#[derive(Debug, Clone, PartialEq)]
pub struct Categorized {
    pub primary: ScoredCandidate,
    pub secondary: Vec<ScoredCandidate>,
    pub other: Vec<ScoredCandidate>,
}

fn rank(a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| b.match_count.cmp(&a.match_count))
}

/// Sorts by descending `(score, match_count)`; equal keys keep catalog order.
pub fn sort_candidates(candidates: &mut [ScoredCandidate]) {
    candidates.sort_by(rank);
}

/// Ranks candidates and splits them into primary, secondary and other.
///
/// A runner-up is secondary when its score reaches `secondary_ratio` times the
/// primary score, or when it fits the duration and the primary does not. The
/// threshold is literal arithmetic: with a negative primary score it sits above
/// the primary, so only the duration rule can promote.
/// Returns `None` for an empty candidate list.
pub fn categorize(
    mut candidates: Vec<ScoredCandidate>,
    secondary_ratio: f64,
) -> Option<Categorized> {
    sort_candidates(&mut candidates);
    let mut iter = candidates.into_iter();
    let primary = iter.next()?;
    let threshold = secondary_ratio * primary.score;

    let mut secondary = Vec::new();
    let mut other = Vec::new();
    for cand in iter {
        if cand.score >= threshold || (cand.duration_ok && !primary.duration_ok) {
            secondary.push(cand);
        } else {
            other.push(cand);
        }
    }

    Some(Categorized {
        primary,
        secondary,
        other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::disease::Severity;

    fn cand(name: &str, score: f64, match_count: usize, duration_ok: bool) -> ScoredCandidate {
        ScoredCandidate {
            disease: name.to_string(),
            matched: Vec::new(),
            score,
            severity: Severity::Unknown,
            description: String::new(),
            precautions: Vec::new(),
            duration_ok,
            duration_days: 0,
            match_count,
            total_symptoms: match_count.max(1),
        }
    }

    fn names(list: &[ScoredCandidate]) -> Vec<&str> {
        list.iter().map(|c| c.disease.as_str()).collect()
    }

    #[test]
    fn empty_input_has_no_primary() {
        assert!(categorize(Vec::new(), 0.7).is_none());
    }

    #[test]
    fn highest_score_becomes_primary() {
        let out = categorize(
            vec![
                cand("A", 0.5, 1, true),
                cand("B", 1.2, 2, true),
                cand("C", 0.9, 3, true),
            ],
            0.7,
        )
        .expect("categorized");
        assert_eq!(out.primary.disease, "B");
        // 0.7 * 1.2 = 0.84
        assert_eq!(names(&out.secondary), vec!["C"]);
        assert_eq!(names(&out.other), vec!["A"]);
    }

    #[test]
    fn score_exactly_at_threshold_is_secondary() {
        let out = categorize(
            vec![
                cand("Top", 1.0, 2, true),
                cand("Edge", 0.7, 1, true),
                cand("Under", 0.6999, 1, true),
            ],
            0.7,
        )
        .expect("categorized");
        assert_eq!(names(&out.secondary), vec!["Edge"]);
        assert_eq!(names(&out.other), vec!["Under"]);
    }

    #[test]
    fn match_count_breaks_score_ties() {
        let out = categorize(
            vec![
                cand("Few", 1.0, 1, true),
                cand("Many", 1.0, 3, true),
                cand("Mid", 1.0, 2, true),
            ],
            0.7,
        )
        .expect("categorized");
        assert_eq!(out.primary.disease, "Many");
        assert_eq!(names(&out.secondary), vec!["Mid", "Few"]);
    }

    #[test]
    fn full_ties_keep_input_order() {
        let mut list = vec![cand("First", 0.8, 2, true), cand("Second", 0.8, 2, true)];
        sort_candidates(&mut list);
        assert_eq!(names(&list), vec!["First", "Second"]);
    }

    #[test]
    fn duration_fit_promotes_when_primary_does_not_fit() {
        let out = categorize(
            vec![
                cand("Top", 1.0, 2, false),
                cand("Fits", 0.2, 1, true),
                cand("Neither", 0.2, 1, false),
            ],
            0.7,
        )
        .expect("categorized");
        assert_eq!(names(&out.secondary), vec!["Fits"]);
        assert_eq!(names(&out.other), vec!["Neither"]);
    }

    #[test]
    fn duration_fit_does_not_promote_when_primary_fits() {
        let out = categorize(
            vec![cand("Top", 1.0, 2, true), cand("Low", 0.2, 1, true)],
            0.7,
        )
        .expect("categorized");
        assert!(out.secondary.is_empty());
        assert_eq!(names(&out.other), vec!["Low"]);
    }

    #[test]
    fn negative_primary_uses_literal_threshold() {
        // threshold = 0.7 * -0.5 = -0.35; -0.6 falls below it
        let out = categorize(
            vec![
                cand("Top", -0.5, 1, true),
                cand("Below", -0.6, 1, true),
            ],
            0.7,
        )
        .expect("categorized");
        assert_eq!(out.primary.disease, "Top");
        assert!(out.secondary.is_empty());
        assert_eq!(names(&out.other), vec!["Below"]);
    }

    #[test]
    fn partition_is_exhaustive_and_disjoint() {
        let input: Vec<ScoredCandidate> = (0..9)
            .map(|i| cand(&format!("D{i}"), f64::from(i) / 10.0 - 0.3, i as usize % 3, i % 2 == 0))
            .collect();
        let out = categorize(input, 0.7).expect("categorized");
        let mut all: Vec<&str> = names(&out.secondary);
        all.extend(names(&out.other));
        all.push(out.primary.disease.as_str());
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), 9);
        assert_eq!(out.secondary.len() + out.other.len(), 8);
    }
}

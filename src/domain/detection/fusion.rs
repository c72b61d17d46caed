//! Signal fusion.
//!
//! All adapters emit `Candidate`s into one pool; fusion groups them by label,
//! averages confidences, boosts labels corroborated by more than one source,
//! and keeps the strongest few.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use super::entities::{Candidate, DetectionSource, FusedIngredient};

const MULTI_SOURCE_BOOST: f64 = 1.2;
const CONFIDENCE_FLOOR: f64 = 0.6;
const MAX_RESULTS: usize = 5;

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

/// Fuses raw candidates into the final ingredient list.
///
/// Labels are grouped case-insensitively. Confidence is the arithmetic mean
/// of the group's observations, multiplied by 1.2 when more than one distinct
/// source contributed, capped at 1.0. Results below 0.6 are dropped, the rest
/// are sorted by confidence (descending) then label, and at most five are
/// kept. The origin note comes from the highest-priority source in the group.
pub fn fuse_candidates(candidates: Vec<Candidate>) -> Vec<FusedIngredient> {
    struct Group {
        label: String,
        confidences: Vec<f64>,
        sources: BTreeSet<DetectionSource>,
        best: (DetectionSource, String),
    }

    let mut groups: BTreeMap<String, Group> = BTreeMap::new();

    for candidate in candidates {
        let key = candidate.label.to_lowercase();
        match groups.get_mut(&key) {
            Some(group) => {
                group.confidences.push(candidate.confidence);
                group.sources.insert(candidate.source);
                // lexicographic tie-break keeps the note order-insensitive
                // when one source observes the same label twice
                if candidate.source > group.best.0
                    || (candidate.source == group.best.0
                        && candidate.origin_note < group.best.1)
                {
                    group.best = (candidate.source, candidate.origin_note);
                }
            }
            None => {
                groups.insert(
                    key.clone(),
                    Group {
                        label: key,
                        confidences: vec![candidate.confidence],
                        sources: BTreeSet::from([candidate.source]),
                        best: (candidate.source, candidate.origin_note),
                    },
                );
            }
        }
    }

    let mut fused: Vec<FusedIngredient> = groups
        .into_values()
        .map(|group| {
            let mean =
                group.confidences.iter().sum::<f64>() / group.confidences.len() as f64;
            let boosted = if group.sources.len() > 1 {
                (mean * MULTI_SOURCE_BOOST).min(1.0)
            } else {
                mean
            };

            FusedIngredient {
                label: group.label,
                confidence: round3(boosted),
                method_count: group.sources.len(),
                contributing_sources: group.sources,
                origin_note: group.best.1,
            }
        })
        .filter(|f| f.confidence >= CONFIDENCE_FLOOR)
        .collect();

    fused.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.label.cmp(&b.label))
    });
    fused.truncate(MAX_RESULTS);
    fused
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cand(label: &str, confidence: f64, source: DetectionSource) -> Candidate {
        Candidate::new(label, confidence, source, format!("{label} via {source:?}"))
    }

    #[test]
    fn corroborated_labels_get_boosted() {
        let fused = fuse_candidates(vec![
            cand("spinach", 0.7, DetectionSource::Vision),
            cand("Spinach", 0.8, DetectionSource::AiVision),
        ]);

        assert_eq!(fused.len(), 1);
        assert_eq!(fused[0].label, "spinach");
        // mean 0.75 * 1.2 = 0.9
        assert_eq!(fused[0].confidence, 0.9);
        assert_eq!(fused[0].method_count, 2);
        assert_eq!(fused[0].contributing_sources.len(), 2);
    }

    #[test]
    fn same_source_twice_is_not_corroboration() {
        let fused = fuse_candidates(vec![
            cand("tomato", 0.7, DetectionSource::Vision),
            cand("tomato", 0.9, DetectionSource::Vision),
        ]);

        assert_eq!(fused.len(), 1);
        assert_eq!(fused[0].confidence, 0.8);
        assert_eq!(fused[0].contributing_sources.len(), 1);
        assert_eq!(fused[0].method_count, 1);
    }

    #[test]
    fn method_count_equals_distinct_sources() {
        let fused = fuse_candidates(vec![
            cand("tomato", 0.7, DetectionSource::Vision),
            cand("tomato", 0.9, DetectionSource::Vision),
            cand("tomato", 0.8, DetectionSource::AiVision),
        ]);

        assert_eq!(fused[0].method_count, fused[0].contributing_sources.len());
        assert_eq!(fused[0].method_count, 2);
    }

    #[test]
    fn boost_never_exceeds_one() {
        let fused = fuse_candidates(vec![
            cand("paneer", 0.95, DetectionSource::Text),
            cand("paneer", 0.95, DetectionSource::AiVision),
        ]);
        assert_eq!(fused[0].confidence, 1.0);
    }

    #[test]
    fn low_confidence_results_are_dropped() {
        let fused = fuse_candidates(vec![
            cand("celery", 0.55, DetectionSource::Vision),
            cand("onion", 0.6, DetectionSource::Vision),
        ]);

        assert_eq!(fused.len(), 1);
        assert_eq!(fused[0].label, "onion");
    }

    #[test]
    fn boost_can_lift_a_label_exactly_onto_the_floor() {
        let fused = fuse_candidates(vec![
            cand("okra", 0.5, DetectionSource::Vision),
            cand("okra", 0.5, DetectionSource::AiVision),
        ]);
        // mean 0.5 * 1.2 = 0.6, kept by the inclusive floor
        assert_eq!(fused.len(), 1);
        assert_eq!(fused[0].confidence, 0.6);
    }

    #[test]
    fn results_are_sorted_and_capped_at_five() {
        let labels = ["a", "b", "c", "d", "e", "f", "g"];
        let candidates = labels
            .iter()
            .enumerate()
            .map(|(i, l)| cand(l, 0.65 + i as f64 * 0.01, DetectionSource::Vision))
            .collect();

        let fused = fuse_candidates(candidates);
        assert_eq!(fused.len(), 5);
        assert_eq!(fused[0].label, "g");
        assert!(fused.windows(2).all(|w| w[0].confidence >= w[1].confidence));
    }

    #[test]
    fn ties_break_alphabetically() {
        let fused = fuse_candidates(vec![
            cand("zucchini", 0.8, DetectionSource::Vision),
            cand("apple", 0.8, DetectionSource::Vision),
        ]);
        assert_eq!(fused[0].label, "apple");
        assert_eq!(fused[1].label, "zucchini");
    }

    #[test]
    fn origin_note_comes_from_highest_priority_source() {
        let fused = fuse_candidates(vec![
            cand("spinach", 0.7, DetectionSource::Text),
            cand("spinach", 0.7, DetectionSource::AiVision),
            cand("spinach", 0.7, DetectionSource::Vision),
        ]);
        assert_eq!(fused[0].origin_note, "spinach via AiVision");
    }

    #[test]
    fn fusion_is_order_insensitive() {
        let a = vec![
            cand("spinach", 0.7, DetectionSource::Vision),
            cand("paneer", 0.9, DetectionSource::Text),
            cand("spinach", 0.8, DetectionSource::AiText),
        ];
        let mut b = a.clone();
        b.reverse();

        assert_eq!(fuse_candidates(a), fuse_candidates(b));
    }

    #[test]
    fn origin_note_is_order_insensitive_within_one_source() {
        let a = vec![
            Candidate::new("spinach", 0.8, DetectionSource::Vision, "vision label 'Spinach'"),
            Candidate::new("spinach", 0.7, DetectionSource::Vision, "vision label 'Greens'"),
        ];
        let mut b = a.clone();
        b.reverse();

        let fused_a = fuse_candidates(a);
        let fused_b = fuse_candidates(b);
        assert_eq!(fused_a, fused_b);
        assert_eq!(fused_a[0].origin_note, "vision label 'Greens'");
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(fuse_candidates(vec![]).is_empty());
    }

    #[test]
    fn confidence_is_rounded_to_three_decimals() {
        let fused = fuse_candidates(vec![
            cand("okra", 0.7, DetectionSource::Vision),
            cand("okra", 0.71, DetectionSource::Vision),
            cand("okra", 0.71, DetectionSource::Vision),
        ]);
        assert_eq!(fused[0].confidence, 0.707);
    }
}

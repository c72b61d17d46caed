//! Label normalization.
//!
//! Raw detections arrive as free-form English ("Coriander leaves", "COTTAGE
//! CHEESE", "Leafy Greens"). Downstream matching needs one canonical,
//! lowercase name per ingredient. Deterministic tables resolve the common
//! cases; the AI fallback is only consulted when they cannot, and its answer
//! is only trusted when it looks like an ingredient name.

/// Regional names mapped to the canonical form used for food-data search.
const SYNONYMS: &[(&str, &str)] = &[
    ("coriander", "cilantro"),
    ("spring onion", "green onion"),
    ("scallion", "green onion"),
    ("bell pepper", "sweet pepper"),
    ("capsicum", "sweet pepper"),
    ("chicken breast", "chicken"),
    ("aubergine", "eggplant"),
    ("courgette", "zucchini"),
    ("garbanzo", "chickpeas"),
    ("curd", "yogurt"),
    ("brinjal", "eggplant"),
    ("lady finger", "okra"),
    ("palak", "spinach"),
];

/// Overrides for labels that western vision models get culturally wrong.
/// Fresh white cheeses in an Indian kitchen context are almost always paneer,
/// and unspecified leafy greens are treated as spinach.
const CULTURAL_OVERRIDES: &[(&str, &str)] = &[
    ("cottage cheese", "paneer"),
    ("white cheese", "paneer"),
    ("fresh cheese", "paneer"),
    ("leafy greens", "spinach"),
    ("leafy green", "spinach"),
    ("leafy vegetable", "spinach"),
];

/// Deterministic normalization: lowercase, trim, cultural overrides, then
/// synonyms. Returns `None` when no table resolves the label.
pub fn normalize_deterministic(raw: &str) -> Option<String> {
    let label = raw.trim().to_lowercase();

    // Bare "cheese" with no qualifier defaults to paneer.
    if label == "cheese" {
        return Some("paneer".to_string());
    }

    for (term, canonical) in CULTURAL_OVERRIDES {
        if label.contains(term) {
            return Some((*canonical).to_string());
        }
    }

    for (term, canonical) in SYNONYMS {
        if label.contains(term) {
            return Some((*canonical).to_string());
        }
    }

    None
}

/// Gate on AI-suggested canonical names. A trustworthy suggestion is a short
/// ingredient name, not a sentence or an apology.
pub fn accept_ai_suggestion(suggestion: &str) -> bool {
    let s = suggestion.trim();
    if s.is_empty() || s.split_whitespace().count() > 2 {
        return false;
    }
    s.chars().all(|c| c.is_ascii_alphabetic() || c == ' ')
}

/// Normalizes an already-detected label, without the AI fallback. Used
/// everywhere a plain lookup key is needed.
pub fn normalize_for_search(raw: &str) -> String {
    normalize_deterministic(raw).unwrap_or_else(|| raw.trim().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synonyms_resolve_to_canonical_names() {
        assert_eq!(normalize_deterministic("Coriander"), Some("cilantro".into()));
        assert_eq!(
            normalize_deterministic("Spring Onion"),
            Some("green onion".into())
        );
        assert_eq!(
            normalize_deterministic("bell pepper"),
            Some("sweet pepper".into())
        );
        assert_eq!(
            normalize_deterministic("chicken breast"),
            Some("chicken".into())
        );
    }

    #[test]
    fn cultural_overrides_win_over_synonyms() {
        assert_eq!(
            normalize_deterministic("Cottage Cheese"),
            Some("paneer".into())
        );
        assert_eq!(
            normalize_deterministic("leafy greens"),
            Some("spinach".into())
        );
    }

    #[test]
    fn bare_cheese_defaults_to_paneer() {
        assert_eq!(normalize_deterministic("cheese"), Some("paneer".into()));
        assert_eq!(normalize_deterministic("Cheese "), Some("paneer".into()));
    }

    #[test]
    fn unknown_labels_are_not_resolved() {
        assert_eq!(normalize_deterministic("dragon fruit"), None);
        assert_eq!(normalize_deterministic("tomato"), None);
    }

    #[test]
    fn ai_suggestions_are_gated() {
        assert!(accept_ai_suggestion("paneer"));
        assert!(accept_ai_suggestion("green onion"));
        assert!(!accept_ai_suggestion(""));
        assert!(!accept_ai_suggestion("this looks like fresh spinach"));
        assert!(!accept_ai_suggestion("spinach!"));
        assert!(!accept_ai_suggestion("item 42"));
    }

    #[test]
    fn search_normalization_falls_back_to_lowercase() {
        assert_eq!(normalize_for_search("  Dragon Fruit "), "dragon fruit");
        assert_eq!(normalize_for_search("Capsicum"), "sweet pepper");
    }
}

//! Food vocabulary used to filter raw vision labels down to plausible
//! ingredients before normalization and fusion.

/// Specific food items the vision source is trusted to report.
pub const FOOD_LABELS: &[&str] = &[
    // Fruits
    "apple",
    "banana",
    "orange",
    "grape",
    "strawberry",
    "blueberry",
    "raspberry",
    "lemon",
    "lime",
    "pineapple",
    "mango",
    "avocado",
    "peach",
    "pear",
    "cherry",
    "watermelon",
    "cantaloupe",
    "kiwi",
    "papaya",
    "coconut",
    // Vegetables
    "tomato",
    "onion",
    "garlic",
    "carrot",
    "potato",
    "broccoli",
    "spinach",
    "lettuce",
    "cucumber",
    "bell pepper",
    "mushroom",
    "corn",
    "peas",
    "celery",
    "cabbage",
    "cauliflower",
    "zucchini",
    "eggplant",
    // Proteins
    "chicken",
    "beef",
    "pork",
    "fish",
    "salmon",
    "tuna",
    "shrimp",
    "egg",
    "turkey",
    "lamb",
    "bacon",
    "sausage",
    "tofu",
    "tempeh",
    "seitan",
    // Dairy
    "milk",
    "cheese",
    "butter",
    "yogurt",
    "cream",
    "paneer",
    "cottage cheese",
    // Grains and legumes
    "rice",
    "bread",
    "pasta",
    "beans",
    "lentils",
    "quinoa",
    "oats",
    "dal",
    "chickpeas",
    // Herbs and spices
    "basil",
    "cilantro",
    "parsley",
    "mint",
    "rosemary",
    "thyme",
    // Nuts and seeds
    "almond",
    "walnut",
    "peanut",
    "cashew",
    "pistachio",
];

/// Generic categories too broad to be useful as ingredients.
const GENERIC_CATEGORIES: &[&str] = &[
    "food",
    "produce",
    "vegetable",
    "fruit",
    "meat",
    "seafood",
    "plant",
    "organic",
    "fresh",
    "natural",
    "ingredient",
    "nutrition",
    "diet",
    "healthy",
    "eating",
    "cooking",
    "kitchen",
    "meal",
];

/// Looser keyword set used when collecting context for the AI adapter, where
/// over-inclusion is acceptable because the model filters again.
const CONTEXT_KEYWORDS: &[&str] = &[
    "food",
    "ingredient",
    "vegetable",
    "fruit",
    "meat",
    "dairy",
    "cheese",
    "leaf",
    "green",
    "white",
    "fresh",
    "organic",
    "produce",
    "plant",
    "bean",
    "grain",
    "seed",
    "nut",
    "herb",
    "spice",
    "leafy",
    "spinach",
    "paneer",
    "tofu",
    "dal",
    "palak",
    "greens",
];

/// True when the label names a specific food item (generic categories like
/// "produce" are rejected).
pub fn is_food_related(label: &str) -> bool {
    let label_lower = label.to_lowercase();

    if GENERIC_CATEGORIES.contains(&label_lower.as_str()) {
        return false;
    }

    FOOD_LABELS.iter().any(|item| label_lower.contains(item))
}

/// True when the label could plausibly carry food context for the AI adapter.
pub fn is_potentially_food_related(label: &str) -> bool {
    let label_lower = label.to_lowercase();
    CONTEXT_KEYWORDS.iter().any(|kw| label_lower.contains(kw))
}

/// True when the normalized label is still a generic term that slipped
/// through normalization.
pub fn is_generic_term(label: &str) -> bool {
    matches!(
        label,
        "food" | "produce" | "vegetable" | "fruit" | "plant" | "organic" | "fresh"
    )
}

const COMMON_FRUITS: &[&str] = &["apple", "banana", "orange", "pear", "peach"];

/// Penalty applied to fruit detections that are frequently confused with each
/// other. Bananas in particular are misidentified often enough that a
/// sub-0.95 detection gets its confidence reduced when other fruit is present.
pub fn fruit_confidence_penalty(label: &str, confidence: f64, fruit_count: usize) -> f64 {
    if fruit_count > 1 && label == "banana" && confidence < 0.95 {
        confidence * 0.8
    } else {
        confidence
    }
}

pub fn is_common_fruit(label: &str) -> bool {
    let label_lower = label.to_lowercase();
    COMMON_FRUITS.iter().any(|f| label_lower.contains(f))
}

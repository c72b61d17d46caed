//! Static fallbacks used when the food-data search comes up empty.

use super::entities::NutrientProfile;

/// Placeholder id returned when nothing matched at all.
pub const PLACEHOLDER_FDC_ID: &str = "99999";
pub const PLACEHOLDER_SCORE: f64 = 0.1;
pub const FALLBACK_SCORE: f64 = 0.8;

/// Known-good food-data ids for common ingredients.
const FALLBACK_MAPPINGS: &[(&str, &str)] = &[
    ("apple", "09003"),
    ("banana", "09040"),
    ("egg", "01123"),
    ("chicken", "05064"),
    ("onion", "11282"),
    ("tomato", "11529"),
    ("potato", "11352"),
    ("carrot", "11124"),
];

pub fn fallback_fdc_id(label: &str) -> Option<&'static str> {
    FALLBACK_MAPPINGS
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, id)| *id)
}

/// Rough per-100g estimates for when no nutrient data is available at all.
/// Unknown ingredients get a generic vegetable profile.
pub fn estimate_profile(label: &str) -> NutrientProfile {
    if label.contains("paneer") {
        NutrientProfile {
            kcal: 265.0,
            protein_g: 18.0,
            fat_g: 20.0,
            carb_g: 1.2,
            ..Default::default()
        }
    } else if label.contains("spinach") {
        NutrientProfile {
            kcal: 23.0,
            protein_g: 2.9,
            fat_g: 0.4,
            carb_g: 3.6,
            ..Default::default()
        }
    } else if label.contains("chicken") {
        NutrientProfile {
            kcal: 165.0,
            protein_g: 31.0,
            fat_g: 3.6,
            ..Default::default()
        }
    } else if label.contains("egg") {
        NutrientProfile {
            kcal: 155.0,
            protein_g: 13.0,
            fat_g: 11.0,
            carb_g: 1.1,
            ..Default::default()
        }
    } else if label.contains("yogurt") || label.contains("milk") {
        NutrientProfile {
            kcal: 61.0,
            protein_g: 3.5,
            fat_g: 3.3,
            carb_g: 4.7,
            ..Default::default()
        }
    } else if label.contains("banana") || label.contains("apple") || label.contains("mango") {
        NutrientProfile {
            kcal: 70.0,
            protein_g: 0.7,
            fat_g: 0.3,
            carb_g: 18.0,
            ..Default::default()
        }
    } else {
        NutrientProfile {
            kcal: 25.0,
            protein_g: 2.0,
            fat_g: 0.3,
            carb_g: 5.0,
            ..Default::default()
        }
    }
}

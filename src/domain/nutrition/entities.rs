use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// How long a cached label mapping stays valid.
pub const MAPPING_TTL_DAYS: i64 = 30;

/// USDA data tiers, in order of preference for ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataTier {
    Foundation,
    SrLegacy,
    Survey,
    Other,
}

impl DataTier {
    /// Base ranking score contributed by the tier alone.
    pub fn base_score(self) -> f64 {
        match self {
            DataTier::Foundation => 0.4,
            DataTier::SrLegacy => 0.3,
            DataTier::Survey => 0.2,
            DataTier::Other => 0.0,
        }
    }
}

/// A cached label-to-food-data mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FdcMapping {
    pub label: String,
    pub fdc_id: String,
    pub description: String,
    pub score: f64,
    pub options: Vec<String>,
    pub cached_at: DateTime<Utc>,
}

impl FdcMapping {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.cached_at > Duration::days(MAPPING_TTL_DAYS)
    }
}

/// Nutrient amounts per 100 g of a food. Nutrients the source did not report
/// stay at zero and contribute nothing to totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientProfile {
    #[serde(default)]
    pub kcal: f64,
    #[serde(default)]
    pub protein_g: f64,
    #[serde(default)]
    pub fat_g: f64,
    #[serde(default)]
    pub carb_g: f64,
    #[serde(default)]
    pub fiber_g: f64,
    #[serde(default)]
    pub sugar_g: f64,
    #[serde(default)]
    pub sodium_mg: f64,
    #[serde(default)]
    pub calcium_mg: f64,
    #[serde(default)]
    pub iron_mg: f64,
    #[serde(default)]
    pub vit_c_mg: f64,
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

impl NutrientProfile {
    /// Adds `other` scaled from per-100g to the given portion weight.
    pub fn add_scaled(&mut self, other: &NutrientProfile, grams: f64) {
        self.kcal += other.kcal * grams / 100.0;
        self.protein_g += other.protein_g * grams / 100.0;
        self.fat_g += other.fat_g * grams / 100.0;
        self.carb_g += other.carb_g * grams / 100.0;
        self.fiber_g += other.fiber_g * grams / 100.0;
        self.sugar_g += other.sugar_g * grams / 100.0;
        self.sodium_mg += other.sodium_mg * grams / 100.0;
        self.calcium_mg += other.calcium_mg * grams / 100.0;
        self.iron_mg += other.iron_mg * grams / 100.0;
        self.vit_c_mg += other.vit_c_mg * grams / 100.0;
    }

    pub fn rounded(&self) -> NutrientProfile {
        NutrientProfile {
            kcal: round1(self.kcal),
            protein_g: round1(self.protein_g),
            fat_g: round1(self.fat_g),
            carb_g: round1(self.carb_g),
            fiber_g: round1(self.fiber_g),
            sugar_g: round1(self.sugar_g),
            sodium_mg: round1(self.sodium_mg),
            calcium_mg: round1(self.calcium_mg),
            iron_mg: round1(self.iron_mg),
            vit_c_mg: round1(self.vit_c_mg),
        }
    }

    /// Per-serving values are derived from the already-rounded totals.
    pub fn divided_by(&self, servings: u32) -> NutrientProfile {
        let s = servings as f64;
        NutrientProfile {
            kcal: round1(self.kcal / s),
            protein_g: round1(self.protein_g / s),
            fat_g: round1(self.fat_g / s),
            carb_g: round1(self.carb_g / s),
            fiber_g: round1(self.fiber_g / s),
            sugar_g: round1(self.sugar_g / s),
            sodium_mg: round1(self.sodium_mg / s),
            calcium_mg: round1(self.calcium_mg / s),
            iron_mg: round1(self.iron_mg / s),
            vit_c_mg: round1(self.vit_c_mg / s),
        }
    }
}

/// Computed nutrition for a whole recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionFacts {
    pub totals_per_recipe: NutrientProfile,
    pub per_serving: NutrientProfile,
    /// True when no nutrient data was available and category estimates were
    /// used instead.
    pub estimated: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_expires_after_ttl() {
        let mapping = FdcMapping {
            label: "spinach".into(),
            fdc_id: "11457".into(),
            description: "spinach, raw".into(),
            score: 0.9,
            options: vec!["11457".into()],
            cached_at: Utc::now() - Duration::days(31),
        };
        assert!(mapping.is_expired(Utc::now()));

        let fresh = FdcMapping {
            cached_at: Utc::now() - Duration::days(29),
            ..mapping
        };
        assert!(!fresh.is_expired(Utc::now()));
    }

    #[test]
    fn scaling_is_proportional_to_grams() {
        let per_100g = NutrientProfile {
            kcal: 50.0,
            protein_g: 2.0,
            ..Default::default()
        };
        let mut totals = NutrientProfile::default();
        totals.add_scaled(&per_100g, 250.0);

        assert_eq!(totals.kcal, 125.0);
        assert_eq!(totals.protein_g, 5.0);
    }

    #[test]
    fn per_serving_divides_rounded_totals() {
        let totals = NutrientProfile {
            kcal: 333.3,
            ..Default::default()
        };
        let per_serving = totals.divided_by(2);
        assert_eq!(per_serving.kcal, 166.7);
    }
}

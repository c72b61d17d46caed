use serde::{Deserialize, Serialize};

/// A detected label resolved to a food-data id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedMapping {
    pub label: String,
    pub fdc_id: String,
    pub score: f64,
    pub options: Vec<String>,
}

/// An ingredient with a portion weight, ready for nutrition aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortionedIngredient {
    pub label: String,
    pub fdc_id: String,
    pub grams: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputeNutritionInput {
    pub items: Vec<PortionedIngredient>,
    pub servings: u32,
}

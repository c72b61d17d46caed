use serde::{Deserialize, Serialize};

use crate::domain::nutrition::entities::NutritionFacts;
use crate::domain::nutrition::value_objects::PortionedIngredient;

use super::entities::{
    Cuisine, GenerationAttempt, GenerationStrategy, MealType, Recipe, RecipeCategory, SkillLevel,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipePreferences {
    pub cuisine: Cuisine,
    pub skill_level: SkillLevel,
    pub meal_type: MealType,
    pub recipe_category: RecipeCategory,
    pub dietary_restrictions: Vec<String>,
}

impl Default for RecipePreferences {
    fn default() -> Self {
        Self {
            cuisine: Cuisine::Unknown,
            skill_level: SkillLevel::Intermediate,
            meal_type: MealType::Lunch,
            recipe_category: RecipeCategory::Cuisine,
            dietary_restrictions: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesizeRecipesInput {
    pub ingredients: Vec<PortionedIngredient>,
    pub servings: u32,
    pub preferences: RecipePreferences,
    /// Aggregated nutrition for the scanned ingredients, embedded in the
    /// generated recipes when present.
    pub nutrition: Option<NutritionFacts>,
}

/// The synthesized recipes plus diagnostics about how they were produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeSynthesis {
    pub recipes: Vec<Recipe>,
    pub strategy: GenerationStrategy,
    pub attempts: Vec<GenerationAttempt>,
}

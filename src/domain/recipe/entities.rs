use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::generate_uuid_v7;
use crate::domain::nutrition::entities::NutritionFacts;

/// Cuisine requested for generated recipes. `Unknown` gets a neutral
/// international treatment rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cuisine {
    Indian,
    Mediterranean,
    Italian,
    Mexican,
    Asian,
    Unknown,
}

impl Cuisine {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "indian" => Cuisine::Indian,
            "mediterranean" => Cuisine::Mediterranean,
            "italian" => Cuisine::Italian,
            "mexican" => Cuisine::Mexican,
            "asian" => Cuisine::Asian,
            _ => Cuisine::Unknown,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Cuisine::Indian => "Indian",
            Cuisine::Mediterranean => "Mediterranean",
            Cuisine::Italian => "Italian",
            Cuisine::Mexican => "Mexican",
            Cuisine::Asian => "Asian",
            Cuisine::Unknown => "International",
        }
    }
}

/// What kind of recipes to generate. `Unknown` is treated as `Cuisine`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipeCategory {
    Cuisine,
    Smoothie,
    Dessert,
    Unknown,
}

impl RecipeCategory {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "cuisine" => RecipeCategory::Cuisine,
            "smoothie" => RecipeCategory::Smoothie,
            "dessert" => RecipeCategory::Dessert,
            _ => RecipeCategory::Unknown,
        }
    }

    /// `Unknown` behaves like `Cuisine` everywhere downstream.
    pub fn effective(&self) -> RecipeCategory {
        match self {
            RecipeCategory::Unknown => RecipeCategory::Cuisine,
            other => *other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillLevel {
    Easy,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    pub fn display_name(&self) -> &'static str {
        match self {
            SkillLevel::Easy => "easy",
            SkillLevel::Intermediate => "intermediate",
            SkillLevel::Advanced => "advanced",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
    Dessert,
}

impl MealType {
    pub fn display_name(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
            MealType::Dessert => "dessert",
        }
    }
}

/// Which generation strategy produced a result, in fallback order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStrategy {
    Agent,
    Direct,
    Deterministic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub name: String,
    pub quantity: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: Uuid,
    pub title: String,
    pub servings: u32,
    pub estimated_time: String,
    pub difficulty: String,
    pub cuisine: String,
    pub meal_type: String,
    pub cooking_method: String,
    pub recipe_category: RecipeCategory,
    pub ingredients: Vec<RecipeIngredient>,
    pub steps: Vec<String>,
    pub tags: Vec<String>,
    pub description: String,
    pub ai_generated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nutrition: Option<NutritionFacts>,
}

impl Recipe {
    pub fn new(
        title: impl Into<String>,
        servings: u32,
        recipe_category: RecipeCategory,
        ai_generated: bool,
    ) -> Self {
        Self {
            id: generate_uuid_v7(),
            title: title.into(),
            servings,
            estimated_time: String::new(),
            difficulty: String::new(),
            cuisine: String::new(),
            meal_type: String::new(),
            cooking_method: String::new(),
            recipe_category,
            ingredients: Vec::new(),
            steps: Vec::new(),
            tags: Vec::new(),
            description: String::new(),
            ai_generated,
            nutrition: None,
        }
    }
}

/// Diagnostic record of one generation attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationAttempt {
    pub strategy: GenerationStrategy,
    pub success: bool,
    pub latency_ms: u64,
    /// First part of the raw model output, for debugging bad parses.
    pub response_excerpt: String,
    pub parsed_count: usize,
}

//! Prompt construction for the recipe generation strategies.

use super::value_objects::RecipePreferences;

/// Prompt sent to the managed agent. The agent carries its own system
/// instructions, so this spells out the full task including output format.
pub fn agent_prompt(
    ingredient_names: &[String],
    servings: u32,
    preferences: &RecipePreferences,
) -> String {
    let names = ingredient_names.join(", ");
    let primary = ingredient_names
        .first()
        .map(String::as_str)
        .unwrap_or("ingredient");

    let mut prompt = format!(
        "Create exactly 3 professional, restaurant-quality recipes using ALL \
         these ingredients: {names}.\n\n\
         TITLE REQUIREMENTS:\n\
         - Create specific, appealing titles that combine cuisine style, main \
         ingredients and cooking method\n\
         - NOT generic titles like \"{primary} Recipe\" or \"Simple {primary}\"\n\n\
         STEP REQUIREMENTS:\n\
         - Provide detailed steps with specific temperatures, timing, and \
         techniques\n\n\
         Each recipe must use a different cooking method.\n\
         Cuisine: {cuisine}\n\
         Skill level: {skill}\n\
         Meal type: {meal}\n\
         Servings: {servings}\n\n\
         If the ingredients include paneer and spinach, the first recipe must \
         be Palak Paneer.\n\n\
         Return the recipes as JSON with a top-level \"recipes\" array, where \
         each recipe has recipe_name, cuisine_type, cooking_method, \
         preparation_time, cooking_time, difficulty, ingredients \
         (name/quantity/notes) and instructions.",
        cuisine = preferences.cuisine.display_name(),
        skill = preferences.skill_level.display_name(),
        meal = preferences.meal_type.display_name(),
    );

    if !preferences.dietary_restrictions.is_empty() {
        prompt.push_str(&format!(
            "\nAccommodate these dietary restrictions: {}",
            preferences.dietary_restrictions.join(", ")
        ));
    }

    prompt
}

/// Prompt for the direct-model cooking path.
pub fn cooking_prompt(
    ingredient_names: &[String],
    servings: u32,
    preferences: &RecipePreferences,
) -> String {
    let cuisine = preferences.cuisine.display_name();
    let mut prompt = format!(
        "You are an expert chef specializing in {cuisine} cuisine. Create 3 \
         authentic {cuisine} recipes using these main ingredients: {}.\n\n\
         Requirements:\n\
         - Each recipe must have a proper {cuisine} dish name, not a generic \
         \"style\" name\n\
         - Use authentic {cuisine} spices, techniques, and cooking methods\n\
         - Make each recipe distinctly different (different dish types or \
         cooking methods)\n\
         - Suitable for {}\n\
         - {} difficulty level\n\
         - Servings: {servings}",
        ingredient_names.join(", "),
        preferences.meal_type.display_name(),
        preferences.skill_level.display_name(),
    );

    if !preferences.dietary_restrictions.is_empty() {
        prompt.push_str(&format!(
            "\n- Accommodate these dietary restrictions: {}",
            preferences.dietary_restrictions.join(", ")
        ));
    }

    prompt
}

/// Prompt for the direct-model smoothie path. No cooking, only blending.
pub fn smoothie_prompt(
    ingredient_names: &[String],
    servings: u32,
    preferences: &RecipePreferences,
) -> String {
    let mut prompt = format!(
        "You are a nutrition expert and smoothie specialist. Create 3 unique \
         smoothie recipes using these main ingredients: {}.\n\n\
         Requirements:\n\
         - Each smoothie should have a different style (green smoothie, \
         protein smoothie, dessert smoothie)\n\
         - Use appropriate liquid bases (milk, coconut water, juice)\n\
         - Include natural sweeteners if needed (honey, dates, banana)\n\
         - NO COOKING, only blending\n\
         - Make each smoothie nutritionally balanced\n\
         - Servings: {servings}",
        ingredient_names.join(", "),
    );

    if !preferences.dietary_restrictions.is_empty() {
        prompt.push_str(&format!(
            "\n- Accommodate: {}",
            preferences.dietary_restrictions.join(", ")
        ));
    }

    prompt
}

/// Prompt for the direct-model dessert path.
pub fn dessert_prompt(
    ingredient_names: &[String],
    servings: u32,
    preferences: &RecipePreferences,
) -> String {
    let mut prompt = format!(
        "You are a pastry chef. Create 3 simple dessert recipes built around \
         these main ingredients: {}.\n\n\
         Requirements:\n\
         - Favor no-bake or lightly baked preparations\n\
         - Each dessert should have a different texture (layered, baked, \
         frozen)\n\
         - Keep added sugar moderate\n\
         - Servings: {servings}",
        ingredient_names.join(", "),
    );

    if !preferences.dietary_restrictions.is_empty() {
        prompt.push_str(&format!(
            "\n- Accommodate: {}",
            preferences.dietary_restrictions.join(", ")
        ));
    }

    prompt
}

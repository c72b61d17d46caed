//! Recipe validation.
//!
//! Generated recipes are only accepted when they look like something a person
//! could actually cook from the scanned ingredients.

use super::entities::Recipe;

/// Titles the parser fabricates when it cannot find a real one.
const PLACEHOLDER_TITLES: &[&str] = &[
    "ai recipe",
    "ai-generated recipe",
    "recipe",
    "untitled",
    "test recipe",
];

fn has_real_title(title: &str) -> bool {
    let t = title.trim().to_lowercase();
    if t.is_empty() {
        return false;
    }
    !PLACEHOLDER_TITLES
        .iter()
        .any(|p| t == *p || t.starts_with(&format!("{p} ")))
}

/// True when the recipe has a real title, at least one step, and uses at
/// least one of the supplied ingredients.
pub fn validate_recipe(recipe: &Recipe, supplied: &[String]) -> bool {
    if !has_real_title(&recipe.title) {
        return false;
    }

    if recipe.steps.is_empty() {
        return false;
    }

    recipe.ingredients.iter().any(|ingredient| {
        let name = ingredient.name.to_lowercase();
        supplied.iter().any(|s| {
            let s = s.to_lowercase();
            name.contains(&s) || s.contains(&name)
        })
    })
}

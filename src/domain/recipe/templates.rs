//! Deterministic recipe generation.
//!
//! The last line of defense: when both AI strategies fail, recipes are built
//! from cuisine profiles and step templates. Always produces three valid
//! recipes.

use crate::domain::recipe::entities::{
    Cuisine, Recipe, RecipeCategory, RecipeIngredient, SkillLevel,
};
use crate::domain::recipe::value_objects::RecipePreferences;

struct CuisineProfile {
    cooking_fat: &'static str,
    cookware: &'static str,
    tempering: Option<&'static str>,
    aromatics: &'static str,
    aromatics_doneness: &'static str,
    spice_or_herb: &'static str,
    liquid: &'static str,
    simmer_time: &'static str,
    finishing: &'static str,
    resting: &'static str,
    accompaniments: &'static str,
    garnish: &'static str,
}

const INDIAN: CuisineProfile = CuisineProfile {
    cooking_fat: "2-3 tablespoons ghee or oil",
    cookware: "heavy-bottomed pan",
    tempering: Some("1 tsp cumin seeds"),
    aromatics: "1 finely chopped onion and 1 tbsp ginger-garlic paste",
    aromatics_doneness: "golden brown",
    spice_or_herb: "1/2 tsp turmeric, 1 tsp coriander powder, 1/2 tsp red chili powder",
    liquid: "1/2 cup water or broth",
    simmer_time: "10-12 minutes",
    finishing: "2 tbsp cream and fresh coriander",
    resting: "Let rest for 2 minutes",
    accompaniments: "basmati rice, naan, or roti",
    garnish: "fresh coriander and lemon wedges",
};

const MEDITERRANEAN: CuisineProfile = CuisineProfile {
    cooking_fat: "3 tablespoons extra virgin olive oil",
    cookware: "large skillet",
    tempering: None,
    aromatics: "3 cloves minced garlic and 1 sliced onion",
    aromatics_doneness: "translucent",
    spice_or_herb: "1 tsp oregano and 1/2 tsp basil",
    liquid: "1/4 cup white wine or broth",
    simmer_time: "3-5 minutes",
    finishing: "fresh lemon juice and chopped herbs",
    resting: "Taste and adjust seasoning",
    accompaniments: "crusty bread, pasta, or rice",
    garnish: "fresh herbs and a drizzle of olive oil",
};

fn profile(cuisine: Cuisine) -> &'static CuisineProfile {
    match cuisine {
        Cuisine::Indian => &INDIAN,
        // the neutral profile doubles as the international default
        _ => &MEDITERRANEAN,
    }
}

struct PrepData {
    cut_style: &'static str,
    cooking_time: &'static str,
    doneness: &'static str,
    technique_note: &'static str,
}

fn prep_data(ingredient: &str) -> PrepData {
    match ingredient {
        "paneer" => PrepData {
            cut_style: "1-inch cubes",
            cooking_time: "2-3 minutes per side",
            doneness: "lightly golden",
            technique_note: "Handle gently to prevent breaking",
        },
        "chicken" => PrepData {
            cut_style: "bite-sized pieces",
            cooking_time: "6-8 minutes",
            doneness: "golden brown and cooked through",
            technique_note: "Ensure internal temperature reaches 165F (74C)",
        },
        "spinach" => PrepData {
            cut_style: "roughly chopped",
            cooking_time: "2-3 minutes",
            doneness: "wilted but still bright green",
            technique_note: "Add last to prevent overcooking",
        },
        _ => PrepData {
            cut_style: "appropriate pieces",
            cooking_time: "5-7 minutes",
            doneness: "cooked through",
            technique_note: "Cook until tender",
        },
    }
}

fn ingredient_notes(ingredient: &str) -> &'static str {
    match ingredient {
        "apple" => "washed and cored",
        "banana" => "ripe, peeled and sliced",
        "egg" => "room temperature works best",
        "potato" => "washed and peeled if desired",
        "tomato" => "ripe and fresh",
        "chicken" => "boneless, skinless",
        "onion" => "peeled and diced",
        "spinach" => "washed and trimmed",
        "paneer" => "cut into cubes",
        "avocado" => "ripe and pitted",
        _ => "prepared as needed",
    }
}

fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn supplied_ingredients(names: &[String]) -> Vec<RecipeIngredient> {
    names
        .iter()
        .map(|name| RecipeIngredient {
            name: name.clone(),
            quantity: "100g".to_string(),
            notes: ingredient_notes(name).to_string(),
        })
        .collect()
}

/// Step sequence built from the cuisine profile, in the order the cuisine
/// layers its flavors.
fn sauteed_steps(names: &[String], cuisine: Cuisine) -> Vec<String> {
    let p = profile(cuisine);
    let main = names.first().map(String::as_str).unwrap_or("main ingredient");
    let prep = prep_data(main);

    let mut steps = vec![
        format!(
            "Wash and prepare {}. Cut {main} into {}.",
            names.join(", "),
            prep.cut_style
        ),
        match p.tempering {
            Some(spices) => format!(
                "Heat {} in a {} over medium heat. Add {spices} and let splutter for 30 seconds.",
                p.cooking_fat, p.cookware
            ),
            None => format!(
                "Heat {} in a {} over medium heat until shimmering.",
                p.cooking_fat, p.cookware
            ),
        },
        format!(
            "Add {} and cook until {}. This forms the flavor base.",
            p.aromatics, p.aromatics_doneness
        ),
        format!(
            "Add {main} and cook for {} until {}. {}.",
            prep.cooking_time, prep.doneness, prep.technique_note
        ),
        format!(
            "Add {} and cook briefly until fragrant.",
            p.spice_or_herb
        ),
        format!(
            "Add {} and bring to a gentle simmer. Cook for {}.",
            p.liquid, p.simmer_time
        ),
        format!("Finish with {}. {}.", p.finishing, p.resting),
        format!(
            "Serve hot with {}. Garnish with {}.",
            p.accompaniments, p.garnish
        ),
    ];

    // Leafy greens go in at the end regardless of template position.
    if names.iter().any(|n| n == "spinach") && main != "spinach" {
        steps.insert(
            6,
            "Stir in the spinach and cook just until wilted, 2-3 minutes.".to_string(),
        );
    }

    steps
}

fn baked_steps(names: &[String]) -> Vec<String> {
    let main = names.first().map(String::as_str).unwrap_or("main ingredient");
    vec![
        "Preheat oven to 400F (200C) and line a baking sheet with parchment paper.".to_string(),
        format!(
            "Pat {main} dry and season with salt and pepper on both sides."
        ),
        "Combine 1/2 cup breadcrumbs, 2 tbsp olive oil, 2 cloves minced garlic, and mixed herbs in a bowl.".to_string(),
        format!("Press the herb mixture onto the {main} to form an even crust."),
        format!(
            "Arrange {} on the prepared sheet and drizzle with olive oil.",
            names.join(", ")
        ),
        format!("Bake for 15-20 minutes until the crust is golden and the {main} is cooked through."),
        "Let rest for 5 minutes before serving.".to_string(),
    ]
}

fn fresh_steps(names: &[String]) -> Vec<String> {
    let main = names.first().map(String::as_str).unwrap_or("main ingredient");
    vec![
        format!("Wash {} thoroughly and pat dry.", names.join(", ")),
        format!("Cut the {main} into bite-sized pieces."),
        "Whisk 3 tablespoons olive oil with 1 tablespoon lemon juice, salt, and pepper.".to_string(),
        "Toss everything together in a large bowl with the dressing.".to_string(),
        "Chill for 10 minutes and serve cold.".to_string(),
    ]
}

fn cooking_recipes(
    names: &[String],
    servings: u32,
    preferences: &RecipePreferences,
) -> Vec<Recipe> {
    let cuisine = preferences.cuisine;
    let cuisine_name = cuisine.display_name();
    let primary = names.first().map(String::as_str).unwrap_or("ingredient");
    let primary_title = title_case(primary);

    let has_palak_paneer = cuisine == Cuisine::Indian
        && names.iter().any(|n| n.contains("paneer"))
        && names.iter().any(|n| n.contains("spinach"));

    let first_title = if has_palak_paneer {
        "Palak Paneer".to_string()
    } else {
        format!("{cuisine_name} Pan-Seared {primary_title} with Aromatics")
    };

    let variants: [(String, &str, Vec<String>, &str); 3] = [
        (
            first_title,
            "sautéed",
            sauteed_steps(names, cuisine),
            "30 minutes",
        ),
        (
            format!("Herb-Crusted Baked {primary_title}"),
            "baked",
            baked_steps(names),
            "35 minutes",
        ),
        (
            format!("Fresh {primary_title} Salad with Lemon Dressing"),
            "fresh",
            fresh_steps(names),
            "15 minutes",
        ),
    ];

    variants
        .into_iter()
        .map(|(title, method, steps, time)| {
            let mut recipe = Recipe::new(title, servings, RecipeCategory::Cuisine, false);
            recipe.estimated_time = time.to_string();
            recipe.difficulty = SkillLevel::Easy.display_name().to_string();
            recipe.cuisine = cuisine_name.to_string();
            recipe.meal_type = preferences.meal_type.display_name().to_string();
            recipe.cooking_method = method.to_string();
            recipe.ingredients = supplied_ingredients(names);
            recipe.steps = steps;
            recipe.tags = vec![
                cuisine_name.to_lowercase(),
                method.to_string(),
                "simple".to_string(),
            ];
            recipe.description = format!("A reliable {method} preparation of {primary}");
            recipe
        })
        .collect()
}

fn smoothie_recipes(names: &[String], servings: u32) -> Vec<Recipe> {
    let primary = names.first().map(String::as_str).unwrap_or("fruit");
    let primary_title = title_case(primary);

    let variants: [(String, &str, &str, &str); 3] = [
        (
            format!("Fresh {primary_title} Smoothie"),
            "milk",
            "honey",
            "creamy and classic",
        ),
        (
            format!("Green {primary_title} Power Smoothie"),
            "coconut water",
            "a handful of spinach",
            "light and refreshing",
        ),
        (
            format!("{primary_title} Protein Smoothie"),
            "Greek yogurt and milk",
            "a spoonful of peanut butter",
            "filling enough for breakfast",
        ),
    ];

    variants
        .into_iter()
        .map(|(title, base, booster, note)| {
            let mut recipe = Recipe::new(title, servings, RecipeCategory::Smoothie, false);
            recipe.estimated_time = "5 minutes".to_string();
            recipe.difficulty = SkillLevel::Easy.display_name().to_string();
            recipe.cuisine = "Healthy".to_string();
            recipe.meal_type = "breakfast".to_string();
            recipe.cooking_method = "blended".to_string();
            recipe.ingredients = supplied_ingredients(names);
            recipe.steps = vec![
                format!("Add {base} to the blender first."),
                format!("Add {} and {booster}.", names.join(", ")),
                "Add 4-6 ice cubes for thickness.".to_string(),
                "Blend until completely smooth, about 60 seconds.".to_string(),
                "Serve immediately.".to_string(),
            ];
            recipe.tags = vec![
                "smoothie".to_string(),
                "no-cook".to_string(),
                "quick".to_string(),
            ];
            recipe.description = format!("A {note} {primary} smoothie");
            recipe
        })
        .collect()
}

fn dessert_recipes(names: &[String], servings: u32) -> Vec<Recipe> {
    let primary = names.first().map(String::as_str).unwrap_or("fruit");
    let primary_title = title_case(primary);

    let parfait_steps = vec![
        format!("Prepare the {primary} as needed."),
        "Mix 1 cup Greek yogurt with 2 tablespoons honey.".to_string(),
        format!("Layer {primary}, the yogurt mixture, and granola in glasses."),
        "Repeat the layers, ending with granola on top.".to_string(),
        "Chill for 15 minutes before serving.".to_string(),
    ];
    let crumble_steps = vec![
        "Preheat oven to 375F (190C).".to_string(),
        format!("Place the {primary} in a small baking dish with 1 tablespoon sugar."),
        "Rub together 1/2 cup oats, 1/4 cup flour, 3 tablespoons butter, and a pinch of cinnamon.".to_string(),
        format!("Scatter the crumble over the {primary}."),
        "Bake for 25 minutes until golden and bubbling.".to_string(),
        "Cool slightly and serve warm.".to_string(),
    ];
    let frozen_steps = vec![
        format!("Blend the {primary} with 1 cup yogurt and 1 tablespoon honey."),
        "Pour into molds or an ice cube tray.".to_string(),
        "Freeze for at least 3 hours.".to_string(),
        "Unmold and serve straight from the freezer.".to_string(),
    ];

    let variants: [(String, &str, Vec<String>, &str); 3] = [
        (
            format!("Simple {primary_title} Parfait"),
            "no-bake",
            parfait_steps,
            "15 minutes",
        ),
        (
            format!("Warm {primary_title} Crumble"),
            "baked",
            crumble_steps,
            "35 minutes",
        ),
        (
            format!("Frozen {primary_title} Yogurt Pops"),
            "frozen",
            frozen_steps,
            "10 minutes + freezing",
        ),
    ];

    variants
        .into_iter()
        .map(|(title, method, steps, time)| {
            let mut recipe = Recipe::new(title, servings, RecipeCategory::Dessert, false);
            recipe.estimated_time = time.to_string();
            recipe.difficulty = SkillLevel::Easy.display_name().to_string();
            recipe.cuisine = "Dessert".to_string();
            recipe.meal_type = "dessert".to_string();
            recipe.cooking_method = method.to_string();
            recipe.ingredients = supplied_ingredients(names);
            recipe.steps = steps;
            recipe.tags = vec![
                "dessert".to_string(),
                method.to_string(),
                "simple".to_string(),
            ];
            recipe.description = format!("A simple {primary} dessert");
            recipe
        })
        .collect()
}

/// Builds exactly three recipes without any model involvement.
pub fn deterministic_recipes(
    ingredient_names: &[String],
    servings: u32,
    preferences: &RecipePreferences,
) -> Vec<Recipe> {
    match preferences.recipe_category.effective() {
        RecipeCategory::Smoothie => smoothie_recipes(ingredient_names, servings),
        RecipeCategory::Dessert => dessert_recipes(ingredient_names, servings),
        _ => cooking_recipes(ingredient_names, servings, preferences),
    }
}

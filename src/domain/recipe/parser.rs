//! Recipe response parsing.
//!
//! Model output arrives in three decreasing levels of discipline: clean JSON,
//! JSON buried in prose, and free text. The pipeline tries each stage in that
//! order and hands whatever it recovers to validation.

use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

use super::entities::RecipeIngredient;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("no json object found in response")]
    NoJson,

    #[error("response did not match the recipe shape: {0}")]
    InvalidShape(String),

    #[error("no recipes found in response")]
    NoRecipes,
}

/// A recipe as recovered from model output, before validation and conversion
/// into a domain `Recipe`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRecipe {
    pub title: String,
    pub cooking_method: String,
    pub estimated_time: String,
    pub difficulty: Option<String>,
    pub cuisine: Option<String>,
    pub tags: Vec<String>,
    pub ingredients: Vec<RecipeIngredient>,
    pub steps: Vec<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireIngredient {
    Item {
        name: String,
        #[serde(default)]
        quantity: String,
        #[serde(default)]
        notes: String,
    },
    Text(String),
}

impl From<WireIngredient> for RecipeIngredient {
    fn from(wire: WireIngredient) -> Self {
        match wire {
            WireIngredient::Item {
                name,
                quantity,
                notes,
            } => RecipeIngredient {
                name,
                quantity,
                notes,
            },
            WireIngredient::Text(name) => RecipeIngredient {
                name,
                quantity: String::new(),
                notes: String::new(),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireRecipe {
    #[serde(alias = "recipe_name", alias = "name")]
    title: String,
    #[serde(default, alias = "cuisine_type")]
    cuisine: Option<String>,
    #[serde(default)]
    dish_type: Option<String>,
    #[serde(default)]
    preparation_time: Option<String>,
    #[serde(default)]
    cooking_time: Option<String>,
    #[serde(default)]
    estimated_time: Option<String>,
    #[serde(default)]
    ingredients: Vec<WireIngredient>,
    #[serde(default, alias = "instructions")]
    steps: Vec<String>,
    #[serde(default)]
    cooking_method: Option<String>,
    #[serde(default)]
    chefs_tip: Option<String>,
    #[serde(default)]
    difficulty: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireResponse {
    Envelope { recipes: Vec<WireRecipe> },
    Bare(Vec<WireRecipe>),
}

impl From<WireRecipe> for ParsedRecipe {
    fn from(wire: WireRecipe) -> Self {
        let estimated_time = wire.estimated_time.unwrap_or_else(|| {
            match (wire.preparation_time, wire.cooking_time) {
                (Some(prep), Some(cook)) => format!("{prep} + {cook}"),
                (Some(prep), None) => prep,
                (None, Some(cook)) => cook,
                (None, None) => "25 minutes".to_string(),
            }
        });

        ParsedRecipe {
            title: wire.title,
            cooking_method: wire
                .cooking_method
                .or(wire.dish_type)
                .unwrap_or_else(|| "mixed".to_string()),
            estimated_time,
            difficulty: wire.difficulty,
            cuisine: wire.cuisine,
            tags: wire.tags,
            ingredients: wire.ingredients.into_iter().map(Into::into).collect(),
            steps: wire.steps,
            description: wire.chefs_tip,
        }
    }
}

/// Removes markdown code fences so fenced JSON parses like bare JSON.
pub fn strip_code_fences(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim_start().starts_with("```"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Stage 1: the whole response is a JSON document, either a `recipes`
/// envelope or a bare array.
pub fn parse_structured(text: &str) -> Result<Vec<ParsedRecipe>, ParseError> {
    let wire: WireResponse = serde_json::from_str(text.trim())
        .map_err(|e| ParseError::InvalidShape(e.to_string()))?;

    let recipes = match wire {
        WireResponse::Envelope { recipes } => recipes,
        WireResponse::Bare(recipes) => recipes,
    };

    if recipes.is_empty() {
        return Err(ParseError::NoRecipes);
    }
    Ok(recipes.into_iter().map(Into::into).collect())
}

/// Stage 2: JSON surrounded by prose. Takes the span from the first `{` to
/// the last `}` and parses that.
pub fn parse_delimited(text: &str) -> Result<Vec<ParsedRecipe>, ParseError> {
    let start = text.find('{').ok_or(ParseError::NoJson)?;
    let end = text.rfind('}').ok_or(ParseError::NoJson)?;
    if end < start {
        return Err(ParseError::NoJson);
    }

    parse_structured(&text[start..=end])
}

const BLOCK_PATTERNS: &[&str] = &[
    r"(?i)Recipe \d+[:\-\s]+",
    r"(?m)^\s*\d+\.\s+",
    r"(?i)Title:\s*",
];

/// Stage 3: free text. Splits the response into recipe blocks on numbering
/// markers and scrapes a title and steps out of each.
pub fn parse_heuristic(text: &str) -> Result<Vec<ParsedRecipe>, ParseError> {
    for pattern in BLOCK_PATTERNS {
        let Ok(re) = Regex::new(pattern) else {
            continue;
        };
        if re.find(text).is_none() {
            continue;
        }

        let recipes: Vec<ParsedRecipe> = re
            .split(text)
            .skip(1)
            .filter(|block| !block.trim().is_empty())
            .take(3)
            .map(parse_text_block)
            .collect();

        if !recipes.is_empty() {
            return Ok(recipes);
        }
    }

    Err(ParseError::NoRecipes)
}

fn parse_text_block(block: &str) -> ParsedRecipe {
    let mut title = String::new();
    for line in block.lines() {
        let line = line.trim();
        if !line.is_empty()
            && !line.starts_with("Recipe")
            && !line.starts_with("Ingredients:")
            && !line.starts_with("Steps:")
            && !line.starts_with("Instructions:")
        {
            title = line.trim_end_matches(':').to_string();
            break;
        }
    }

    let mut steps = Vec::new();
    let mut in_steps = false;
    for line in block.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let lower = line.to_lowercase();
        if lower.starts_with("steps:")
            || lower.starts_with("instructions:")
            || lower.starts_with("method:")
        {
            in_steps = true;
            continue;
        }

        if in_steps {
            if let Some(step) = strip_list_marker(line) {
                steps.push(step);
            }
        }
    }

    // A block without an explicit step section still often is a recipe; the
    // list lines themselves are the steps then.
    if steps.is_empty() {
        steps = block
            .lines()
            .map(str::trim)
            .filter_map(strip_list_marker)
            .collect();
    }

    ParsedRecipe {
        title,
        cooking_method: "mixed".to_string(),
        estimated_time: "25 minutes".to_string(),
        difficulty: None,
        cuisine: None,
        tags: Vec::new(),
        ingredients: Vec::new(),
        steps,
        description: None,
    }
}

fn strip_list_marker(line: &str) -> Option<String> {
    if let Some(rest) = line
        .strip_prefix('-')
        .or_else(|| line.strip_prefix('*'))
        .or_else(|| line.strip_prefix('\u{2022}'))
    {
        let rest = rest.trim();
        return (!rest.is_empty()).then(|| rest.to_string());
    }

    if line.starts_with(|c: char| c.is_ascii_digit()) {
        if let Some((_, rest)) = line.split_once('.') {
            let rest = rest.trim();
            return (!rest.is_empty()).then(|| rest.to_string());
        }
    }

    None
}

/// Runs the full pipeline over a raw model response.
pub fn parse_response(raw: &str) -> Result<Vec<ParsedRecipe>, ParseError> {
    let text = strip_code_fences(raw);

    parse_structured(&text)
        .or_else(|_| parse_delimited(&text))
        .or_else(|_| parse_heuristic(&text))
}

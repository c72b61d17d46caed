//! Detection adapters.
//!
//! Each adapter turns one raw signal (vision labels, recognized text, AI
//! interpretation) into normalized `Candidate`s for the fusion pass.

use serde::Deserialize;
use tracing::warn;

use crate::domain::common::entities::app_errors::CoreError;
use crate::domain::common::ports::LlmClient;

use super::entities::{Candidate, DetectionSource};
use super::normalizer;
use super::ports::{DetectedText, VisionLabel};
use super::schema::{get_ingredient_interpretation_schema, get_normalization_schema};
use super::vocabulary;

/// Text terms that identify a product on their own, at moderate OCR
/// confidence.
const EXACT_TEXT_TERMS: &[&str] = &["paneer", "spinach", "tofu", "dal", "palak"];
const EXACT_TEXT_THRESHOLD: f64 = 0.5;

/// Ambiguous terms that only count at higher OCR confidence, mapped to the
/// ingredient they most likely indicate on a package.
const PARTIAL_TEXT_TERMS: &[(&str, &str, f64)] = &[
    ("cheese", "paneer", 0.7),
    ("leafy", "spinach", 0.75),
    ("greens", "spinach", 0.75),
];

const TEXT_MATCH_BOOST: f64 = 1.1;

/// Filters raw vision labels down to food candidates.
///
/// Generic category labels are dropped, and common-fruit detections get a
/// confidence penalty when several fruits are present, since the vision
/// backend confuses them with each other.
pub fn candidates_from_labels(labels: Vec<VisionLabel>) -> Vec<Candidate> {
    let food_labels: Vec<VisionLabel> = labels
        .into_iter()
        .filter(|l| vocabulary::is_food_related(&l.name))
        .collect();

    let fruit_count = food_labels
        .iter()
        .filter(|l| vocabulary::is_common_fruit(&l.name))
        .count();

    food_labels
        .into_iter()
        .map(|l| {
            let canonical = normalizer::normalize_for_search(&l.name);
            let confidence =
                vocabulary::fruit_confidence_penalty(&canonical, l.confidence, fruit_count);
            Candidate::new(
                canonical,
                confidence,
                DetectionSource::Vision,
                format!("vision label '{}'", l.name),
            )
        })
        .collect()
}

/// Extracts candidates from text recognized on the image.
///
/// A term match lifts the OCR confidence by 1.1 (capped at 1.0) because text
/// printed on a package is stronger evidence than a visual guess.
pub fn candidates_from_text(lines: Vec<DetectedText>) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    for line in &lines {
        let line_lower = line.text.to_lowercase();

        for term in EXACT_TEXT_TERMS {
            if line_lower.contains(term) && line.confidence >= EXACT_TEXT_THRESHOLD {
                candidates.push(Candidate::new(
                    normalizer::normalize_for_search(term),
                    (line.confidence * TEXT_MATCH_BOOST).min(1.0),
                    DetectionSource::Text,
                    format!("package text '{}'", line.text.trim()),
                ));
            }
        }

        for (term, canonical, threshold) in PARTIAL_TEXT_TERMS {
            if line_lower.contains(term) && line.confidence >= *threshold {
                candidates.push(Candidate::new(
                    *canonical,
                    (line.confidence * TEXT_MATCH_BOOST).min(1.0),
                    DetectionSource::Text,
                    format!("package text '{}'", line.text.trim()),
                ));
            }
        }
    }

    candidates
}

#[derive(Debug, Deserialize)]
struct InterpretationResponse {
    ingredients: Vec<InterpretedItem>,
}

#[derive(Debug, Deserialize)]
struct InterpretedItem {
    name: String,
    confidence: f64,
    #[serde(default)]
    reasoning: Option<String>,
}

fn interpretation_prompt(label_context: &[String], text_context: &[String]) -> String {
    format!(
        "You are identifying food ingredients in a grocery or kitchen photo.\n\
         Vision labels already detected: {}.\n\
         Text visible on packaging: {}.\n\
         List only ingredients you are confident are present. Prefer specific \
         names over categories (say 'paneer', not 'cheese'; 'spinach', not \
         'leafy greens'). Consider that the photo may show Indian groceries \
         where fresh white cheese is paneer. If unsure about an item, omit it \
         rather than guess. Give a confidence between 0 and 1 for each.",
        if label_context.is_empty() {
            "none".to_string()
        } else {
            label_context.join(", ")
        },
        if text_context.is_empty() {
            "none".to_string()
        } else {
            text_context.join(" | ")
        },
    )
}

fn candidates_from_interpretation(raw: &str, source: DetectionSource) -> Vec<Candidate> {
    let parsed: InterpretationResponse = match serde_json::from_str(raw) {
        Ok(parsed) => parsed,
        Err(err) => {
            warn!("unparseable ingredient interpretation: {err}");
            return Vec::new();
        }
    };

    parsed
        .ingredients
        .into_iter()
        .filter(|item| !item.name.trim().is_empty())
        .map(|item| {
            let canonical = normalizer::normalize_for_search(&item.name);
            let note = item
                .reasoning
                .filter(|r| !r.trim().is_empty())
                .unwrap_or_else(|| format!("ai interpretation of '{}'", item.name));
            Candidate::new(canonical, item.confidence, source, note)
        })
        .filter(|c| !vocabulary::is_generic_term(&c.label))
        .collect()
}

/// Runs AI interpretation over the image itself, with the other signals as
/// context.
pub async fn interpret_with_image<L: LlmClient>(
    llm: &L,
    image_data: Vec<u8>,
    label_context: Vec<String>,
    text_context: Vec<String>,
) -> Result<Vec<Candidate>, CoreError> {
    let prompt = interpretation_prompt(&label_context, &text_context);
    let raw = llm
        .generate_with_image(prompt, image_data, get_ingredient_interpretation_schema())
        .await?;

    Ok(candidates_from_interpretation(&raw, DetectionSource::AiVision))
}

/// Runs AI interpretation over the collected label and text context alone,
/// when the image cannot be sent.
pub async fn interpret_with_text<L: LlmClient>(
    llm: &L,
    label_context: Vec<String>,
    text_context: Vec<String>,
) -> Result<Vec<Candidate>, CoreError> {
    let prompt = interpretation_prompt(&label_context, &text_context);
    let raw = llm
        .generate_with_text(prompt, get_ingredient_interpretation_schema())
        .await?;

    Ok(candidates_from_interpretation(&raw, DetectionSource::AiText))
}

#[derive(Debug, Deserialize)]
struct NormalizationResponse {
    canonical_name: String,
}

/// AI fallback for labels the deterministic tables cannot resolve. The
/// suggestion is only used when it looks like a plain ingredient name.
pub async fn normalize_with_ai<L: LlmClient>(llm: &L, raw_label: &str) -> Option<String> {
    let prompt = format!(
        "Give the canonical ingredient name for '{raw_label}', as used in a \
         nutrition database. Answer with one or two plain words."
    );

    let response = match llm
        .generate_with_text(prompt, get_normalization_schema())
        .await
    {
        Ok(response) => response,
        Err(err) => {
            warn!("ai normalization failed for '{raw_label}': {err}");
            return None;
        }
    };

    let parsed: NormalizationResponse = match serde_json::from_str(&response) {
        Ok(parsed) => parsed,
        Err(err) => {
            warn!("unparseable ai normalization for '{raw_label}': {err}");
            return None;
        }
    };

    let suggestion = parsed.canonical_name.trim().to_lowercase();
    if normalizer::accept_ai_suggestion(&suggestion) {
        Some(suggestion)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(name: &str, confidence: f64) -> VisionLabel {
        VisionLabel {
            name: name.to_string(),
            confidence,
        }
    }

    fn text(text: &str, confidence: f64) -> DetectedText {
        DetectedText {
            text: text.to_string(),
            confidence,
        }
    }

    #[test]
    fn vision_adapter_filters_and_normalizes() {
        let candidates = candidates_from_labels(vec![
            label("Tomato", 0.9),
            label("Food", 0.99),
            label("Coriander", 0.8),
            label("Table", 0.95),
        ]);

        let labels: Vec<&str> = candidates.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["tomato", "cilantro"]);
        assert!(candidates.iter().all(|c| c.source == DetectionSource::Vision));
    }

    #[test]
    fn vision_adapter_penalizes_ambiguous_bananas() {
        let candidates =
            candidates_from_labels(vec![label("Banana", 0.9), label("Apple", 0.92)]);

        let banana = candidates.iter().find(|c| c.label == "banana").unwrap();
        assert!((banana.confidence - 0.72).abs() < 1e-9);

        let alone = candidates_from_labels(vec![label("Banana", 0.9)]);
        assert_eq!(alone[0].confidence, 0.9);
    }

    #[test]
    fn text_adapter_matches_exact_terms_with_boost() {
        let candidates = candidates_from_text(vec![text("FRESH PALAK 500g", 0.8)]);

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].label, "spinach");
        assert!((candidates[0].confidence - 0.88).abs() < 1e-9);
        assert_eq!(candidates[0].source, DetectionSource::Text);
    }

    #[test]
    fn text_adapter_requires_higher_confidence_for_partial_terms() {
        assert!(candidates_from_text(vec![text("cheese block", 0.6)]).is_empty());

        let candidates = candidates_from_text(vec![text("cheese block", 0.8)]);
        assert_eq!(candidates[0].label, "paneer");
    }

    #[test]
    fn text_boost_is_capped() {
        let candidates = candidates_from_text(vec![text("TOFU", 0.97)]);
        assert_eq!(candidates[0].confidence, 1.0);
    }

    #[test]
    fn interpretation_parsing_drops_generic_and_empty_names() {
        let raw = r#"{"ingredients":[
            {"name":"Paneer","confidence":0.9,"reasoning":"white cubes in tray"},
            {"name":"food","confidence":0.8},
            {"name":"  ","confidence":0.7}
        ]}"#;

        let candidates = candidates_from_interpretation(raw, DetectionSource::AiVision);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].label, "paneer");
        assert_eq!(candidates[0].origin_note, "white cubes in tray");
    }

    #[test]
    fn garbage_interpretation_yields_no_candidates() {
        assert!(candidates_from_interpretation("not json", DetectionSource::AiText).is_empty());
    }

    #[tokio::test]
    async fn ai_normalization_rejects_sentences() {
        let mut llm = crate::domain::common::ports::MockLlmClient::new();
        llm.expect_generate_with_text().returning(|_, _| {
            Box::pin(async {
                Ok(r#"{"canonical_name":"that appears to be fresh spinach"}"#.to_string())
            })
        });

        assert_eq!(normalize_with_ai(&llm, "mystery greens").await, None);
    }

    #[tokio::test]
    async fn ai_normalization_accepts_short_names() {
        let mut llm = crate::domain::common::ports::MockLlmClient::new();
        llm.expect_generate_with_text().returning(|_, _| {
            Box::pin(async { Ok(r#"{"canonical_name":"Green Onion"}"#.to_string()) })
        });

        assert_eq!(
            normalize_with_ai(&llm, "salad onion").await,
            Some("green onion".to_string())
        );
    }
}

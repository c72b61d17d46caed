use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::entities::{DetectionSource, FusedIngredient, ImageRef};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectIngredientsInput {
    pub image: ImageRef,
}

/// Final output of the detection pipeline for one image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionResult {
    pub ingredients: Vec<FusedIngredient>,
    pub sources_used: BTreeSet<DetectionSource>,
}

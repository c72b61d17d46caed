use serde::{Deserialize, Serialize};

use crate::domain::detection::entities::{FusedIngredient, ImageRef};
use crate::domain::nutrition::value_objects::ResolvedMapping;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessScanInput {
    pub image: ImageRef,
}

/// Everything a scan produces: what was seen, and what it maps to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanOutcome {
    pub ingredients: Vec<FusedIngredient>,
    pub mappings: Vec<ResolvedMapping>,
}

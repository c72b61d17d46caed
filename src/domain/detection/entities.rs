use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Opaque handle to an uploaded scan image in object storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub bucket: String,
    pub key: String,
}

/// Which adapter produced an observation.
///
/// Ordering encodes provenance priority: when the same label is seen by
/// several adapters, the origin note from the highest-priority source is
/// kept on the fused result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionSource {
    Text,
    Vision,
    AiText,
    AiVision,
}

/// A single raw (label, confidence) observation from one adapter, before
/// fusion. Labels are already canonical (normalizer output).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub label: String,
    pub confidence: f64,
    pub source: DetectionSource,
    pub origin_note: String,
}

impl Candidate {
    pub fn new(
        label: impl Into<String>,
        confidence: f64,
        source: DetectionSource,
        origin_note: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            confidence: confidence.clamp(0.0, 1.0),
            source,
            origin_note: origin_note.into(),
        }
    }
}

/// A deduplicated, confidence-combined detection result. Immutable once the
/// fusion pass has produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusedIngredient {
    pub label: String,
    pub confidence: f64,
    pub contributing_sources: BTreeSet<DetectionSource>,
    pub method_count: usize,
    pub origin_note: String,
}

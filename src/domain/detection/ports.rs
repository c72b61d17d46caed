use std::future::Future;

use crate::domain::common::entities::app_errors::CoreError;

/// A raw label from the vision backend, before food filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct VisionLabel {
    pub name: String,
    pub confidence: f64,
}

/// A line of text recognized on the image (package labels, stickers).
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedText {
    pub text: String,
    pub confidence: f64,
}

/// Port for the computer-vision backend (label and text detection on a scan
/// image). Confidence values are normalized to [0, 1].
#[cfg_attr(test, mockall::automock)]
pub trait VisionPort: Send + Sync {
    fn detect_labels(
        &self,
        image_data: Vec<u8>,
    ) -> impl Future<Output = Result<Vec<VisionLabel>, CoreError>> + Send;

    fn detect_text(
        &self,
        image_data: Vec<u8>,
    ) -> impl Future<Output = Result<Vec<DetectedText>, CoreError>> + Send;
}

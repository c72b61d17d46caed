use std::time::Duration;

use base64::{Engine as _, engine::general_purpose};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::common::VisionConfig;
use crate::domain::common::entities::app_errors::CoreError;
use crate::domain::detection::ports::{DetectedText, VisionLabel, VisionPort};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const MAX_LABELS: u32 = 20;

/// Confidence assigned to recognized text lines when the service reports no
/// per-line score.
const DEFAULT_TEXT_CONFIDENCE: f64 = 0.9;

#[derive(Debug, Clone)]
pub struct GoogleVisionClient {
    api_key: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct AnnotateRequest {
    requests: Vec<ImageRequest>,
}

#[derive(Debug, Serialize)]
struct ImageRequest {
    image: ImagePayload,
    features: Vec<Feature>,
}

#[derive(Debug, Serialize)]
struct ImagePayload {
    content: String,
}

#[derive(Debug, Serialize)]
struct Feature {
    #[serde(rename = "type")]
    feature_type: String,
    #[serde(rename = "maxResults", skip_serializing_if = "Option::is_none")]
    max_results: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct AnnotateResponse {
    responses: Vec<ImageResponse>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ImageResponse {
    #[serde(default)]
    label_annotations: Vec<LabelAnnotation>,
    #[serde(default)]
    text_annotations: Vec<TextAnnotation>,
}

#[derive(Debug, Deserialize)]
struct LabelAnnotation {
    description: String,
    score: f64,
}

#[derive(Debug, Deserialize)]
struct TextAnnotation {
    description: String,
    #[serde(default)]
    score: Option<f64>,
}

impl GoogleVisionClient {
    pub fn new(config: VisionConfig) -> Self {
        Self {
            api_key: config.api_key,
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
        }
    }

    async fn annotate(
        &self,
        image_data: Vec<u8>,
        feature: Feature,
    ) -> Result<ImageResponse, CoreError> {
        let url = format!(
            "https://vision.googleapis.com/v1/images:annotate?key={}",
            self.api_key
        );

        let request = AnnotateRequest {
            requests: vec![ImageRequest {
                image: ImagePayload {
                    content: general_purpose::STANDARD.encode(&image_data),
                },
                features: vec![feature],
            }],
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Vision API request failed: {}", e);
                CoreError::ExternalServiceError(format!("Vision API error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Vision API error: {} - {}", status, error_text);
            return Err(CoreError::ExternalServiceError(format!(
                "Vision API returned error: {} - {}",
                status, error_text
            )));
        }

        let annotate_response: AnnotateResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Vision response: {}", e);
            CoreError::ExternalServiceError(format!("Failed to parse Vision response: {}", e))
        })?;

        Ok(annotate_response.responses.into_iter().next().unwrap_or_default())
    }
}

impl VisionPort for GoogleVisionClient {
    async fn detect_labels(&self, image_data: Vec<u8>) -> Result<Vec<VisionLabel>, CoreError> {
        let response = self
            .annotate(
                image_data,
                Feature {
                    feature_type: "LABEL_DETECTION".to_string(),
                    max_results: Some(MAX_LABELS),
                },
            )
            .await?;

        Ok(response
            .label_annotations
            .into_iter()
            .map(|a| VisionLabel {
                name: a.description,
                confidence: a.score,
            })
            .collect())
    }

    async fn detect_text(&self, image_data: Vec<u8>) -> Result<Vec<DetectedText>, CoreError> {
        let response = self
            .annotate(
                image_data,
                Feature {
                    feature_type: "TEXT_DETECTION".to_string(),
                    max_results: None,
                },
            )
            .await?;

        // The first annotation is the whole recognized block; the rest are
        // individual words.
        Ok(response
            .text_annotations
            .into_iter()
            .skip(1)
            .map(|a| DetectedText {
                text: a.description,
                confidence: a.score.unwrap_or(DEFAULT_TEXT_CONFIDENCE),
            })
            .collect())
    }
}

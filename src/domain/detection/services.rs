use std::collections::BTreeSet;
use std::future::Future;

use tracing::{info, instrument, warn};

use crate::domain::common::entities::app_errors::CoreError;
use crate::domain::common::ports::LlmClient;
use crate::domain::common::services::Service;
use crate::domain::storage::ports::ObjectStoragePort;

use super::adapters;
use super::entities::Candidate;
use super::fusion::fuse_candidates;
use super::normalizer;
use super::ports::VisionPort;
use super::value_objects::{DetectIngredientsInput, DetectionResult};
use super::vocabulary;

/// Images above this size are not sent to the AI interpreter; text-only
/// interpretation is used instead.
const MAX_AI_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// AI interpretation is skipped when the cheap signals already produced this
/// many distinct labels at this confidence.
const AI_MIN_CANDIDATES: usize = 2;
const AI_CONFIDENCE_TARGET: f64 = 0.7;

pub trait DetectionService: Send + Sync {
    fn detect_ingredients(
        &self,
        input: DetectIngredientsInput,
    ) -> impl Future<Output = Result<DetectionResult, CoreError>> + Send;
}

impl<V, L, A, F, M, O> DetectionService for Service<V, L, A, F, M, O>
where
    V: VisionPort,
    L: LlmClient,
    A: Send + Sync,
    F: Send + Sync,
    M: Send + Sync,
    O: ObjectStoragePort,
{
    #[instrument(skip(self), fields(bucket = %input.image.bucket, key = %input.image.key))]
    async fn detect_ingredients(
        &self,
        input: DetectIngredientsInput,
    ) -> Result<DetectionResult, CoreError> {
        let image_data = self
            .object_storage
            .get_object(input.image.bucket.clone(), input.image.key.clone())
            .await?;
        let image_data = image_data.to_vec();

        // Vision failures degrade the result instead of failing the scan.
        let labels = match self.vision_client.detect_labels(image_data.clone()).await {
            Ok(labels) => labels,
            Err(err) => {
                warn!("label detection failed: {err}");
                Vec::new()
            }
        };
        let text_lines = match self.vision_client.detect_text(image_data.clone()).await {
            Ok(lines) => lines,
            Err(err) => {
                warn!("text detection failed: {err}");
                Vec::new()
            }
        };

        let label_context: Vec<String> = labels
            .iter()
            .filter(|l| vocabulary::is_potentially_food_related(&l.name))
            .map(|l| l.name.clone())
            .collect();
        let text_context: Vec<String> = text_lines
            .iter()
            .map(|t| t.text.trim().to_string())
            .filter(|t| !t.is_empty())
            .take(10)
            .collect();

        let mut candidates = adapters::candidates_from_labels(labels);
        candidates.extend(adapters::candidates_from_text(text_lines));

        if needs_ai_interpretation(&candidates) {
            let ai_candidates = if image_data.len() <= MAX_AI_IMAGE_BYTES {
                adapters::interpret_with_image(
                    &self.llm_client,
                    image_data,
                    label_context,
                    text_context,
                )
                .await
            } else {
                adapters::interpret_with_text(&self.llm_client, label_context, text_context)
                    .await
            };

            match ai_candidates {
                Ok(ai_candidates) => {
                    candidates
                        .extend(self.resolve_unrecognized_labels(ai_candidates).await);
                }
                Err(err) => warn!("ai interpretation failed: {err}"),
            }
        }

        let sources_used: BTreeSet<_> = candidates.iter().map(|c| c.source).collect();
        let ingredients = fuse_candidates(candidates);

        info!(
            ingredient_count = ingredients.len(),
            source_count = sources_used.len(),
            "detection complete"
        );

        Ok(DetectionResult {
            ingredients,
            sources_used,
        })
    }
}

impl<V, L, A, F, M, O> Service<V, L, A, F, M, O>
where
    L: LlmClient,
{
    /// AI interpretation can return names outside the known vocabulary;
    /// those get one normalization attempt before fusion.
    async fn resolve_unrecognized_labels(&self, candidates: Vec<Candidate>) -> Vec<Candidate> {
        let mut resolved = Vec::with_capacity(candidates.len());

        for mut candidate in candidates {
            if !vocabulary::is_food_related(&candidate.label)
                && normalizer::normalize_deterministic(&candidate.label).is_none()
            {
                if let Some(canonical) =
                    adapters::normalize_with_ai(&self.llm_client, &candidate.label).await
                {
                    candidate.label = canonical;
                }
            }
            resolved.push(candidate);
        }

        resolved
    }
}

/// The AI pass is reserved for scans the cheap signals could not settle.
fn needs_ai_interpretation(candidates: &[Candidate]) -> bool {
    let distinct: BTreeSet<&str> = candidates.iter().map(|c| c.label.as_str()).collect();
    let max_confidence = candidates
        .iter()
        .map(|c| c.confidence)
        .fold(0.0_f64, f64::max);

    distinct.len() < AI_MIN_CANDIDATES || max_confidence < AI_CONFIDENCE_TARGET
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use crate::domain::detection::entities::{DetectionSource, ImageRef};
    use crate::domain::detection::ports::{DetectedText, VisionLabel};

    use super::*;

    struct FakeVision {
        labels: Vec<VisionLabel>,
        texts: Vec<DetectedText>,
    }

    impl VisionPort for FakeVision {
        async fn detect_labels(&self, _image: Vec<u8>) -> Result<Vec<VisionLabel>, CoreError> {
            Ok(self.labels.clone())
        }

        async fn detect_text(&self, _image: Vec<u8>) -> Result<Vec<DetectedText>, CoreError> {
            Ok(self.texts.clone())
        }
    }

    struct FailingVision;

    impl VisionPort for FailingVision {
        async fn detect_labels(&self, _image: Vec<u8>) -> Result<Vec<VisionLabel>, CoreError> {
            Err(CoreError::ExternalServiceError("vision down".into()))
        }

        async fn detect_text(&self, _image: Vec<u8>) -> Result<Vec<DetectedText>, CoreError> {
            Err(CoreError::ExternalServiceError("vision down".into()))
        }
    }

    struct FakeLlm {
        response: String,
        calls: std::sync::atomic::AtomicUsize,
    }

    impl FakeLlm {
        fn new(response: &str) -> Self {
            Self {
                response: response.to_string(),
                calls: std::sync::atomic::AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(std::sync::atomic::Ordering::SeqCst)
        }
    }

    impl LlmClient for FakeLlm {
        async fn generate_with_image(
            &self,
            _prompt: String,
            _image: Vec<u8>,
            _schema: serde_json::Value,
        ) -> Result<String, CoreError> {
            self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Ok(self.response.clone())
        }

        async fn generate_with_text(
            &self,
            _prompt: String,
            _schema: serde_json::Value,
        ) -> Result<String, CoreError> {
            self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Ok(self.response.clone())
        }
    }

    struct FakeStorage;

    impl ObjectStoragePort for FakeStorage {
        async fn get_object(&self, _bucket: String, _key: String) -> Result<Bytes, CoreError> {
            Ok(Bytes::from_static(b"imagebytes"))
        }
    }

    fn input() -> DetectIngredientsInput {
        DetectIngredientsInput {
            image: ImageRef {
                bucket: "scans".into(),
                key: "img.jpg".into(),
            },
        }
    }

    fn label(name: &str, confidence: f64) -> VisionLabel {
        VisionLabel {
            name: name.into(),
            confidence,
        }
    }

    #[tokio::test]
    async fn confident_vision_results_skip_the_ai_pass() {
        let vision = FakeVision {
            labels: vec![label("Tomato", 0.95), label("Onion", 0.9)],
            texts: vec![],
        };
        let llm = FakeLlm::new(r#"{"ingredients":[]}"#);
        let service = Service::new(vision, llm, (), (), (), FakeStorage);

        let result = service.detect_ingredients(input()).await.unwrap();

        let labels: Vec<&str> = result
            .ingredients
            .iter()
            .map(|i| i.label.as_str())
            .collect();
        assert_eq!(labels, vec!["tomato", "onion"]);
        assert_eq!(service.llm_client.call_count(), 0);
    }

    #[tokio::test]
    async fn sparse_results_trigger_ai_interpretation() {
        let vision = FakeVision {
            labels: vec![label("Cheese", 0.65)],
            texts: vec![],
        };
        let llm = FakeLlm::new(
            r#"{"ingredients":[{"name":"paneer","confidence":0.85,"reasoning":"white cubes"}]}"#,
        );
        let service = Service::new(vision, llm, (), (), (), FakeStorage);

        let result = service.detect_ingredients(input()).await.unwrap();

        assert_eq!(service.llm_client.call_count(), 1);
        assert_eq!(result.ingredients.len(), 1);
        assert_eq!(result.ingredients[0].label, "paneer");
        // cheese normalizes to paneer too, so both sources corroborate
        assert!(result
            .ingredients[0]
            .contributing_sources
            .contains(&DetectionSource::AiVision));
        assert!(result
            .ingredients[0]
            .contributing_sources
            .contains(&DetectionSource::Vision));
    }

    #[tokio::test]
    async fn vision_outage_still_yields_a_result() {
        let llm = FakeLlm::new(
            r#"{"ingredients":[{"name":"spinach","confidence":0.8,"reasoning":"leaves"}]}"#,
        );
        let service = Service::new(FailingVision, llm, (), (), (), FakeStorage);

        let result = service.detect_ingredients(input()).await.unwrap();

        assert_eq!(result.ingredients.len(), 1);
        assert_eq!(result.ingredients[0].label, "spinach");
    }

    #[tokio::test]
    async fn package_text_identifies_the_product() {
        let vision = FakeVision {
            labels: vec![],
            texts: vec![DetectedText {
                text: "FRESH PALAK".into(),
                confidence: 0.9,
            }],
        };
        // AI pass runs (only one candidate) but adds nothing
        let llm = FakeLlm::new(r#"{"ingredients":[]}"#);
        let service = Service::new(vision, llm, (), (), (), FakeStorage);

        let result = service.detect_ingredients(input()).await.unwrap();

        assert_eq!(result.ingredients.len(), 1);
        assert_eq!(result.ingredients[0].label, "spinach");
        assert!(result.sources_used.contains(&DetectionSource::Text));
    }

    #[tokio::test]
    async fn storage_failure_fails_the_detection() {
        struct NoStorage;
        impl ObjectStoragePort for NoStorage {
            async fn get_object(
                &self,
                _bucket: String,
                _key: String,
            ) -> Result<Bytes, CoreError> {
                Err(CoreError::ObjectStorageError("missing object".into()))
            }
        }

        let vision = FakeVision {
            labels: vec![],
            texts: vec![],
        };
        let llm = FakeLlm::new("{}");
        let service = Service::new(vision, llm, (), (), (), NoStorage);

        assert!(service.detect_ingredients(input()).await.is_err());
    }
}

use std::future::Future;

use tracing::{info, instrument};

use crate::domain::common::entities::app_errors::CoreError;
use crate::domain::common::ports::LlmClient;
use crate::domain::common::services::Service;
use crate::domain::detection::ports::VisionPort;
use crate::domain::detection::services::DetectionService;
use crate::domain::detection::value_objects::DetectIngredientsInput;
use crate::domain::nutrition::ports::{FoodDataPort, MappingCachePort};
use crate::domain::nutrition::services::NutritionService;
use crate::domain::storage::ports::ObjectStoragePort;

use super::value_objects::{ProcessScanInput, ScanOutcome};

/// End-to-end scan processing: detect ingredients on the image, then map
/// each fused label to a food-data id.
pub trait ScanService: Send + Sync {
    fn process_scan(
        &self,
        input: ProcessScanInput,
    ) -> impl Future<Output = Result<ScanOutcome, CoreError>> + Send;
}

impl<V, L, A, F, M, O> ScanService for Service<V, L, A, F, M, O>
where
    V: VisionPort,
    L: LlmClient,
    A: Send + Sync,
    F: FoodDataPort,
    M: MappingCachePort,
    O: ObjectStoragePort,
{
    #[instrument(skip(self), fields(bucket = %input.image.bucket, key = %input.image.key))]
    async fn process_scan(&self, input: ProcessScanInput) -> Result<ScanOutcome, CoreError> {
        let detection = self
            .detect_ingredients(DetectIngredientsInput { image: input.image })
            .await?;

        let labels: Vec<String> = detection
            .ingredients
            .iter()
            .map(|i| i.label.clone())
            .collect();
        let mappings = self.resolve_labels(labels).await?;

        info!(
            ingredient_count = detection.ingredients.len(),
            mapping_count = mappings.len(),
            "scan processed"
        );

        Ok(ScanOutcome {
            ingredients: detection.ingredients,
            mappings,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use bytes::Bytes;

    use crate::domain::detection::entities::ImageRef;
    use crate::domain::detection::ports::{DetectedText, VisionLabel};
    use crate::domain::nutrition::entities::{FdcMapping, NutrientProfile};
    use crate::domain::nutrition::ports::FoodSearchHit;

    use super::*;

    struct FakeVision;

    impl VisionPort for FakeVision {
        async fn detect_labels(&self, _image: Vec<u8>) -> Result<Vec<VisionLabel>, CoreError> {
            Ok(vec![
                VisionLabel {
                    name: "Tomato".into(),
                    confidence: 0.95,
                },
                VisionLabel {
                    name: "Onion".into(),
                    confidence: 0.9,
                },
            ])
        }

        async fn detect_text(&self, _image: Vec<u8>) -> Result<Vec<DetectedText>, CoreError> {
            Ok(vec![])
        }
    }

    struct NoLlm;

    impl LlmClient for NoLlm {
        async fn generate_with_image(
            &self,
            _prompt: String,
            _image: Vec<u8>,
            _schema: serde_json::Value,
        ) -> Result<String, CoreError> {
            Err(CoreError::InternalServerError)
        }

        async fn generate_with_text(
            &self,
            _prompt: String,
            _schema: serde_json::Value,
        ) -> Result<String, CoreError> {
            Err(CoreError::InternalServerError)
        }
    }

    struct EmptyFoodData;

    impl FoodDataPort for EmptyFoodData {
        async fn search_foods(&self, _query: String) -> Result<Vec<FoodSearchHit>, CoreError> {
            Ok(vec![])
        }

        async fn fetch_nutrient_profiles(
            &self,
            _fdc_ids: Vec<String>,
        ) -> Result<HashMap<String, NutrientProfile>, CoreError> {
            Ok(HashMap::new())
        }
    }

    struct NoCache;

    impl MappingCachePort for NoCache {
        async fn get_mapping(&self, _label: String) -> Result<Option<FdcMapping>, CoreError> {
            Ok(None)
        }

        async fn put_mapping(&self, _mapping: FdcMapping) -> Result<(), CoreError> {
            Ok(())
        }
    }

    struct FakeStorage;

    impl ObjectStoragePort for FakeStorage {
        async fn get_object(&self, _bucket: String, _key: String) -> Result<Bytes, CoreError> {
            Ok(Bytes::from_static(b"imagebytes"))
        }
    }

    #[tokio::test]
    async fn scan_yields_one_mapping_per_fused_ingredient() {
        let svc = Service::new(FakeVision, NoLlm, (), EmptyFoodData, NoCache, FakeStorage);

        let outcome = svc
            .process_scan(ProcessScanInput {
                image: ImageRef {
                    bucket: "scans".into(),
                    key: "img.jpg".into(),
                },
            })
            .await
            .unwrap();

        assert_eq!(outcome.ingredients.len(), 2);
        assert_eq!(outcome.mappings.len(), 2);
        // both labels land in the static fallback table
        let tomato = outcome.mappings.iter().find(|m| m.label == "tomato").unwrap();
        assert_eq!(tomato.fdc_id, "11529");
    }
}

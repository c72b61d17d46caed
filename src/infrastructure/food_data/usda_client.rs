use std::collections::HashMap;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domain::common::FoodDataConfig;
use crate::domain::common::entities::app_errors::CoreError;
use crate::domain::nutrition::entities::{DataTier, NutrientProfile};
use crate::domain::nutrition::ports::{FoodDataPort, FoodSearchHit};

const BASE_URL: &str = "https://api.nal.usda.gov/fdc/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const SEARCH_PAGE_SIZE: u32 = 5;

// FoodData Central nutrient numbers.
const NUTRIENT_KCAL: i64 = 1008;
const NUTRIENT_PROTEIN: i64 = 1003;
const NUTRIENT_FAT: i64 = 1004;
const NUTRIENT_CARB: i64 = 1005;
const NUTRIENT_FIBER: i64 = 1079;
const NUTRIENT_SUGAR: i64 = 1063;
const NUTRIENT_SODIUM: i64 = 1093;
const NUTRIENT_CALCIUM: i64 = 1087;
const NUTRIENT_IRON: i64 = 1089;
const NUTRIENT_VIT_C: i64 = 1162;

#[derive(Debug, Clone)]
pub struct UsdaFoodDataClient {
    api_key: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    foods: Vec<SearchFood>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchFood {
    fdc_id: i64,
    description: String,
    #[serde(default)]
    data_type: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FoodsRequest {
    fdc_ids: Vec<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FoodDetail {
    fdc_id: i64,
    #[serde(default)]
    food_nutrients: Vec<FoodNutrient>,
}

#[derive(Debug, Deserialize)]
struct FoodNutrient {
    nutrient: NutrientRef,
    #[serde(default)]
    amount: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct NutrientRef {
    id: i64,
}

fn tier_from_data_type(data_type: &str) -> DataTier {
    match data_type {
        "Foundation" => DataTier::Foundation,
        "SR Legacy" => DataTier::SrLegacy,
        "Survey (FNDDS)" => DataTier::Survey,
        _ => DataTier::Other,
    }
}

fn profile_from_nutrients(nutrients: &[FoodNutrient]) -> NutrientProfile {
    let mut profile = NutrientProfile::default();
    for entry in nutrients {
        let Some(amount) = entry.amount else { continue };
        match entry.nutrient.id {
            NUTRIENT_KCAL => profile.kcal = amount,
            NUTRIENT_PROTEIN => profile.protein_g = amount,
            NUTRIENT_FAT => profile.fat_g = amount,
            NUTRIENT_CARB => profile.carb_g = amount,
            NUTRIENT_FIBER => profile.fiber_g = amount,
            NUTRIENT_SUGAR => profile.sugar_g = amount,
            NUTRIENT_SODIUM => profile.sodium_mg = amount,
            NUTRIENT_CALCIUM => profile.calcium_mg = amount,
            NUTRIENT_IRON => profile.iron_mg = amount,
            NUTRIENT_VIT_C => profile.vit_c_mg = amount,
            _ => {}
        }
    }
    profile
}

impl UsdaFoodDataClient {
    pub fn new(config: FoodDataConfig) -> Self {
        Self {
            api_key: config.api_key,
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
        }
    }
}

impl FoodDataPort for UsdaFoodDataClient {
    #[instrument(skip(self))]
    async fn search_foods(&self, query: String) -> Result<Vec<FoodSearchHit>, CoreError> {
        let url = format!("{}/foods/search", BASE_URL);
        let page_size = SEARCH_PAGE_SIZE.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[
                ("query", query.as_str()),
                ("dataType", "Foundation,SR Legacy,Survey (FNDDS)"),
                ("pageSize", page_size.as_str()),
                ("requireAllWords", "true"),
                ("api_key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Food data search failed: {}", e);
                CoreError::ExternalServiceError(format!("Food data search failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!("Food data search error: {}", status);
            return Err(CoreError::ExternalServiceError(format!(
                "Food data search returned error: {}",
                status
            )));
        }

        let search: SearchResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse food search response: {}", e);
            CoreError::ExternalServiceError(format!(
                "Failed to parse food search response: {}",
                e
            ))
        })?;

        Ok(search
            .foods
            .into_iter()
            .map(|f| FoodSearchHit {
                fdc_id: f.fdc_id.to_string(),
                description: f.description,
                data_type: tier_from_data_type(&f.data_type),
            })
            .collect())
    }

    #[instrument(skip(self), fields(id_count = fdc_ids.len()))]
    async fn fetch_nutrient_profiles(
        &self,
        fdc_ids: Vec<String>,
    ) -> Result<HashMap<String, NutrientProfile>, CoreError> {
        // Non-numeric ids (placeholders) are not real records and are left
        // out of the request.
        let numeric_ids: Vec<i64> = fdc_ids.iter().filter_map(|id| id.parse().ok()).collect();
        if numeric_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let url = format!("{}/foods?api_key={}", BASE_URL, self.api_key);
        let response = self
            .client
            .post(&url)
            .json(&FoodsRequest {
                fdc_ids: numeric_ids,
            })
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Nutrient lookup failed: {}", e);
                CoreError::ExternalServiceError(format!("Nutrient lookup failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!("Nutrient lookup error: {}", status);
            return Err(CoreError::ExternalServiceError(format!(
                "Nutrient lookup returned error: {}",
                status
            )));
        }

        let foods: Vec<FoodDetail> = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse nutrient response: {}", e);
            CoreError::ExternalServiceError(format!("Failed to parse nutrient response: {}", e))
        })?;

        Ok(foods
            .into_iter()
            .map(|f| {
                (
                    f.fdc_id.to_string(),
                    profile_from_nutrients(&f.food_nutrients),
                )
            })
            .collect())
    }
}

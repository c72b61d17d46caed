use std::collections::HashMap;
use std::future::Future;

use crate::domain::common::entities::app_errors::CoreError;

use super::entities::{DataTier, FdcMapping, NutrientProfile};

/// One result from a food-data search, before ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodSearchHit {
    pub fdc_id: String,
    pub description: String,
    pub data_type: DataTier,
}

/// Port for the external food-data service (search and nutrient lookup).
#[cfg_attr(test, mockall::automock)]
pub trait FoodDataPort: Send + Sync {
    fn search_foods(
        &self,
        query: String,
    ) -> impl Future<Output = Result<Vec<FoodSearchHit>, CoreError>> + Send;

    /// Fetches per-100g nutrient profiles, keyed by food-data id. Ids the
    /// service does not know are simply absent from the map.
    fn fetch_nutrient_profiles(
        &self,
        fdc_ids: Vec<String>,
    ) -> impl Future<Output = Result<HashMap<String, NutrientProfile>, CoreError>> + Send;
}

/// Port for the label-mapping cache.
#[cfg_attr(test, mockall::automock)]
pub trait MappingCachePort: Send + Sync {
    fn get_mapping(
        &self,
        label: String,
    ) -> impl Future<Output = Result<Option<FdcMapping>, CoreError>> + Send;

    fn put_mapping(
        &self,
        mapping: FdcMapping,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}

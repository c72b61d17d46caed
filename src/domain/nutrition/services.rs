use std::collections::HashMap;
use std::future::Future;

use chrono::Utc;
use tracing::{info, instrument, warn};

use crate::domain::common::entities::app_errors::CoreError;
use crate::domain::common::services::Service;
use crate::domain::detection::normalizer;

use super::entities::{FdcMapping, NutrientProfile, NutritionFacts};
use super::fallback;
use super::ports::{FoodDataPort, MappingCachePort};
use super::ranking::rank_search_hits;
use super::value_objects::{ComputeNutritionInput, ResolvedMapping};

pub trait NutritionService: Send + Sync {
    /// Resolves a detected label to a food-data id. Every non-blank label
    /// resolves to something, even if only the generic placeholder.
    fn resolve_label(
        &self,
        label: String,
    ) -> impl Future<Output = Result<ResolvedMapping, CoreError>> + Send;

    fn resolve_labels(
        &self,
        labels: Vec<String>,
    ) -> impl Future<Output = Result<Vec<ResolvedMapping>, CoreError>> + Send;

    fn compute_nutrition(
        &self,
        input: ComputeNutritionInput,
    ) -> impl Future<Output = Result<NutritionFacts, CoreError>> + Send;
}

impl<V, L, A, F, M, O> NutritionService for Service<V, L, A, F, M, O>
where
    V: Send + Sync,
    L: Send + Sync,
    A: Send + Sync,
    F: FoodDataPort,
    M: MappingCachePort,
    O: Send + Sync,
{
    #[instrument(skip(self))]
    async fn resolve_label(&self, label: String) -> Result<ResolvedMapping, CoreError> {
        if label.trim().is_empty() {
            return Err(CoreError::Invalid("label must not be blank".to_string()));
        }

        let normalized = normalizer::normalize_for_search(&label);

        // Cache errors degrade to a miss.
        match self.mapping_cache.get_mapping(normalized.clone()).await {
            Ok(Some(mapping)) if !mapping.is_expired(Utc::now()) => {
                info!(fdc_id = %mapping.fdc_id, "cache hit");
                return Ok(ResolvedMapping {
                    label,
                    fdc_id: mapping.fdc_id,
                    score: mapping.score,
                    options: mapping.options,
                });
            }
            Ok(_) => {}
            Err(err) => warn!("cache lookup failed for '{normalized}': {err}"),
        }

        let hits = match self.food_data_client.search_foods(normalized.clone()).await {
            Ok(hits) => hits,
            Err(err) => {
                warn!("food search failed for '{normalized}': {err}");
                Vec::new()
            }
        };

        if let Some(ranked) = rank_search_hits(&normalized, hits) {
            let mapping = FdcMapping {
                label: normalized.clone(),
                fdc_id: ranked.fdc_id.clone(),
                description: ranked.description,
                score: ranked.score,
                options: ranked.options.clone(),
                cached_at: Utc::now(),
            };
            if let Err(err) = self.mapping_cache.put_mapping(mapping).await {
                warn!("cache write failed for '{normalized}': {err}");
            }

            info!(fdc_id = %ranked.fdc_id, score = ranked.score, "resolved from search");
            return Ok(ResolvedMapping {
                label,
                fdc_id: ranked.fdc_id,
                score: ranked.score,
                options: ranked.options,
            });
        }

        if let Some(fdc_id) = fallback::fallback_fdc_id(&normalized) {
            info!(fdc_id, "resolved from fallback table");
            return Ok(ResolvedMapping {
                label,
                fdc_id: fdc_id.to_string(),
                score: fallback::FALLBACK_SCORE,
                options: vec![fdc_id.to_string()],
            });
        }

        warn!("no mapping found for '{normalized}', using placeholder");
        Ok(ResolvedMapping {
            label,
            fdc_id: fallback::PLACEHOLDER_FDC_ID.to_string(),
            score: fallback::PLACEHOLDER_SCORE,
            options: vec![fallback::PLACEHOLDER_FDC_ID.to_string()],
        })
    }

    #[instrument(skip(self), fields(label_count = labels.len()))]
    async fn resolve_labels(
        &self,
        labels: Vec<String>,
    ) -> Result<Vec<ResolvedMapping>, CoreError> {
        let mut resolved = Vec::with_capacity(labels.len());
        for label in labels {
            resolved.push(self.resolve_label(label).await?);
        }
        Ok(resolved)
    }

    #[instrument(skip(self, input), fields(item_count = input.items.len(), servings = input.servings))]
    async fn compute_nutrition(
        &self,
        input: ComputeNutritionInput,
    ) -> Result<NutritionFacts, CoreError> {
        if input.servings == 0 {
            return Err(CoreError::Invalid(
                "servings must be at least 1".to_string(),
            ));
        }

        let mut fdc_ids: Vec<String> = Vec::new();
        for item in &input.items {
            if !fdc_ids.contains(&item.fdc_id) {
                fdc_ids.push(item.fdc_id.clone());
            }
        }

        let profiles: HashMap<String, NutrientProfile> = if fdc_ids.is_empty() {
            HashMap::new()
        } else {
            match self.food_data_client.fetch_nutrient_profiles(fdc_ids).await {
                Ok(profiles) => profiles,
                Err(err) => {
                    warn!("nutrient fetch failed: {err}");
                    HashMap::new()
                }
            }
        };

        let estimated = profiles.is_empty() && !input.items.is_empty();
        let mut totals = NutrientProfile::default();

        if estimated {
            info!("no nutrient data available, using category estimates");
            for item in &input.items {
                let profile = fallback::estimate_profile(&item.label.to_lowercase());
                totals.add_scaled(&profile, item.grams);
            }
        } else {
            for item in &input.items {
                if let Some(profile) = profiles.get(&item.fdc_id) {
                    totals.add_scaled(profile, item.grams);
                } else {
                    warn!(label = %item.label, fdc_id = %item.fdc_id, "no profile for item");
                }
            }
        }

        let totals = totals.rounded();
        Ok(NutritionFacts {
            per_serving: totals.divided_by(input.servings),
            totals_per_recipe: totals,
            estimated,
        })
    }
}

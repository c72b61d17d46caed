use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::common::entities::app_errors::CoreError;
use crate::domain::nutrition::entities::FdcMapping;
use crate::domain::nutrition::ports::MappingCachePort;

/// Process-local mapping cache. Entries past their TTL read as misses.
#[derive(Debug, Default)]
pub struct InMemoryMappingCache {
    entries: RwLock<HashMap<String, FdcMapping>>,
}

impl InMemoryMappingCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MappingCachePort for InMemoryMappingCache {
    async fn get_mapping(&self, label: String) -> Result<Option<FdcMapping>, CoreError> {
        let entries = self.entries.read().await;
        match entries.get(&label) {
            Some(mapping) if !mapping.is_expired(Utc::now()) => Ok(Some(mapping.clone())),
            _ => Ok(None),
        }
    }

    async fn put_mapping(&self, mapping: FdcMapping) -> Result<(), CoreError> {
        let mut entries = self.entries.write().await;
        entries.insert(mapping.label.clone(), mapping);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn mapping(label: &str, fdc_id: &str, age_days: i64) -> FdcMapping {
        FdcMapping {
            label: label.into(),
            fdc_id: fdc_id.into(),
            description: format!("{}, raw", label),
            score: 0.9,
            options: vec![fdc_id.into()],
            cached_at: Utc::now() - Duration::days(age_days),
        }
    }

    #[tokio::test]
    async fn stores_and_returns_fresh_mappings() {
        let cache = InMemoryMappingCache::new();
        cache.put_mapping(mapping("spinach", "11457", 0)).await.unwrap();

        let found = cache.get_mapping("spinach".into()).await.unwrap().unwrap();
        assert_eq!(found.fdc_id, "11457");
    }

    #[tokio::test]
    async fn expired_entries_read_as_misses() {
        let cache = InMemoryMappingCache::new();
        cache.put_mapping(mapping("paneer", "01026", 31)).await.unwrap();

        assert!(cache.get_mapping("paneer".into()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn overwrite_replaces_the_entry() {
        let cache = InMemoryMappingCache::new();
        cache.put_mapping(mapping("tomato", "11529", 31)).await.unwrap();
        cache.put_mapping(mapping("tomato", "11530", 0)).await.unwrap();

        let found = cache.get_mapping("tomato".into()).await.unwrap().unwrap();
        assert_eq!(found.fdc_id, "11530");
    }

    #[tokio::test]
    async fn unknown_label_is_a_miss() {
        let cache = InMemoryMappingCache::new();
        assert!(cache.get_mapping("okra".into()).await.unwrap().is_none());
    }
}

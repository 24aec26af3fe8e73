use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use lariat_core::error::Result;
use lariat_core::{ReadRepository, Repository, ShortCode, StorageError, UrlMapping, UrlRecord};

/// In-memory implementation of the repository contract using DashMap.
///
/// Insert-if-absent goes through the map's entry API, so two concurrent
/// inserts of the same code can never both succeed or corrupt a record:
/// the entry holds the shard lock across the occupancy check and the
/// write.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    storage: DashMap<String, UrlRecord>,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
        }
    }
}

fn tag_matches(tag: Option<&str>, filter: &str) -> bool {
    tag.is_some_and(|tag| tag.to_lowercase().contains(&filter.to_lowercase()))
}

#[async_trait]
impl ReadRepository for InMemoryRepository {
    async fn get(&self, code: &ShortCode) -> Result<Option<UrlRecord>> {
        Ok(self.storage.get(code.as_str()).map(|entry| entry.value().clone()))
    }

    async fn list(&self, tag_filter: Option<&str>, limit: usize) -> Result<Vec<UrlMapping>> {
        let mut mappings: Vec<UrlMapping> = self
            .storage
            .iter()
            .filter(|entry| match tag_filter {
                Some(filter) => tag_matches(entry.value().tag.as_deref(), filter),
                None => true,
            })
            .map(|entry| UrlMapping {
                code: ShortCode::new_unchecked(entry.key().clone()),
                original_url: entry.value().original_url.clone(),
                tag: entry.value().tag.clone(),
            })
            .collect();

        // Stable order so pagination-style reads are deterministic.
        mappings.sort_by(|a, b| a.code.as_str().cmp(b.code.as_str()));
        mappings.truncate(limit);
        Ok(mappings)
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn insert(&self, code: &ShortCode, record: UrlRecord) -> Result<()> {
        match self.storage.entry(code.as_str().to_owned()) {
            Entry::Occupied(_) => Err(StorageError::Conflict(code.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(())
            }
        }
    }
}

use crate::error::Result;
use crate::shortcode::ShortCode;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// The value stored under a short code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlRecord {
    /// The original URL that was shortened.
    pub original_url: String,
    /// Optional free-text classification for the mapping.
    pub tag: Option<String>,
}

/// A full mapping row as returned by listing queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlMapping {
    pub code: ShortCode,
    pub original_url: String,
    pub tag: Option<String>,
}

/// A read-only view of a repository.
///
/// This is the part of the store contract the redirect and listing
/// workflows need; they never mutate mappings.
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// Retrieves the URL record for a given short code.
    /// Returns `None` if the code does not exist.
    async fn get(&self, code: &ShortCode) -> Result<Option<UrlRecord>>;

    /// Lists stored mappings, at most `limit` of them, ordered by code.
    ///
    /// When `tag_filter` is given, only mappings whose tag contains the
    /// filter as a case-insensitive substring are returned.
    async fn list(&self, tag_filter: Option<&str>, limit: usize) -> Result<Vec<UrlMapping>>;
}

#[async_trait]
pub trait Repository: ReadRepository {
    /// Inserts a new URL record if the code is absent.
    ///
    /// Atomic under concurrent callers: if two calls present the same
    /// code, exactly one succeeds and the other observes
    /// `StorageError::Conflict`.
    async fn insert(&self, code: &ShortCode, record: UrlRecord) -> Result<()>;
}

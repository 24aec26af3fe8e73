use crate::error::ShortenerError;
use crate::repository::{UrlMapping, UrlRecord};
use crate::shortcode::ShortCode;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortenParams {
    /// The original URL to be shortened.
    pub original_url: String,
    /// Optional free-text classification stored with the mapping.
    pub tag: Option<String>,
}

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Shortens a URL and returns the newly assigned short code.
    async fn shorten(&self, params: ShortenParams) -> Result<ShortCode, ShortenerError>;

    /// Resolves a short code to its stored record.
    /// Returns `None` if no mapping exists for the code.
    async fn resolve(&self, code: &ShortCode) -> Result<Option<UrlRecord>, ShortenerError>;

    /// Lists stored mappings, optionally filtered by a case-insensitive
    /// tag substring, bounded by the configured page limit.
    async fn list(&self, tag_filter: Option<&str>) -> Result<Vec<UrlMapping>, ShortenerError>;
}

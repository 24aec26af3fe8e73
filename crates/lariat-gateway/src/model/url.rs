use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct ShortenRequest {
    /// Optional at the wire level so a missing field reports the same
    /// invalid-input error as an empty one, instead of a decode failure.
    #[serde(default)]
    pub original_url: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
}

#[derive(Serialize)]
pub struct ShortenResponse {
    pub short_url: String,
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub tag: Option<String>,
}

#[derive(Serialize)]
pub struct UrlMappingResponse {
    pub code: String,
    pub original_url: String,
    pub tag: Option<String>,
}

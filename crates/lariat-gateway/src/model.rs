pub mod url;

pub use url::{ListQuery, ShortenRequest, ShortenResponse, UrlMappingResponse};

use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

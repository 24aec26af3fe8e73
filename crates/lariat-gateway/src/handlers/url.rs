use crate::error::{AppError, Result};
use crate::model::{ListQuery, ShortenRequest, ShortenResponse, UrlMappingResponse};
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::response::Redirect;
use axum::Json;
use lariat_core::{ShortCode, ShortenParams};
use tracing::warn;

pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(request): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>> {
    let params = ShortenParams {
        original_url: request.original_url.unwrap_or_default(),
        tag: request.tag,
    };

    let code = state.shortener().shorten(params).await?;

    Ok(Json(ShortenResponse {
        short_url: code.to_url(state.base_url()),
    }))
}

pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect> {
    let Ok(code) = ShortCode::new(code) else {
        return Err(AppError::NotFound);
    };

    match state.shortener().resolve(&code).await? {
        Some(record) => Ok(Redirect::temporary(&record.original_url)),
        None => {
            warn!(code = %code, "no mapping for short code");
            Err(AppError::NotFound)
        }
    }
}

pub async fn list_urls_handler(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<UrlMappingResponse>>> {
    let mappings = state.shortener().list(query.tag.as_deref()).await?;

    let response = mappings
        .into_iter()
        .map(|mapping| UrlMappingResponse {
            code: mapping.code.to_string(),
            original_url: mapping.original_url,
            tag: mapping.tag,
        })
        .collect();

    Ok(Json(response))
}

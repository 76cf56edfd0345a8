//! Handler for listing stored mappings.

use axum::{Json, extract::State};

use crate::api::dto::urls::ShortenedUrlItem;
use crate::error::AppError;
use crate::state::AppState;

/// Lists every stored mapping, newest first.
///
/// # Endpoint
///
/// `GET /urls`
///
/// # Errors
///
/// Returns 503 Service Unavailable if the database is unreachable.
pub async fn list_urls_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<ShortenedUrlItem>>, AppError> {
    let urls = state.listing.list_all().await?;

    Ok(Json(urls.into_iter().map(ShortenedUrlItem::from).collect()))
}

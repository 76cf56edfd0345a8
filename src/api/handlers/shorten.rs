//! Handler for the shortening endpoint.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Allocates a short code for an absolute URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/a" }
/// ```
///
/// # Response
///
/// ```json
/// { "short_code": "aB3dE5gH9k" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the URL is not absolute.
/// Returns 500 Internal Server Error if no unique code was found within the retry budget.
/// Returns 503 Service Unavailable if the database is unreachable.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    payload.validate()?;

    let short_code = state.allocator.shorten(&payload.url).await?;

    Ok(Json(ShortenResponse { short_code }))
}

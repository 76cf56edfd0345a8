//! Handler for short code redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, header},
    response::{IntoResponse, Redirect},
};
use serde_json::json;

use crate::application::services::RequestContext;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// `User-Agent` and `Referer` headers, when present, are attached to the
/// visit recorded in the background.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
/// Returns 503 Service Unavailable if the database is unreachable on a cache miss.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let context = RequestContext::new(
        headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok()),
        headers.get(header::REFERER).and_then(|v| v.to_str().ok()),
    );

    match state.resolver.resolve(&code, &context).await? {
        Some(original_url) => Ok(Redirect::temporary(&original_url)),
        None => Err(AppError::not_found(
            "Short code not found",
            json!({ "short_code": code }),
        )),
    }
}

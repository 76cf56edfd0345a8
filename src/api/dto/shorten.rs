//! DTOs for the shortening endpoint.

use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL to shorten (must be an absolute URL).
    #[validate(
        url(message = "Invalid URL format"),
        custom(function = "validate_location_safe")
    )]
    pub url: String,
}

/// Rejects URLs that cannot be sent back verbatim in a `Location` header.
///
/// The URL parser strips tabs and newlines before checking, so such input
/// passes the `url` rule but would make every later redirect fail.
fn validate_location_safe(url: &str) -> Result<(), ValidationError> {
    if HeaderValue::from_str(url).is_err() {
        return Err(ValidationError::new("location_unsafe")
            .with_message("URL contains characters not allowed in a redirect".into()));
    }
    Ok(())
}

/// Response carrying the allocated short code.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub short_code: String,
}

//! DTOs for the listing endpoint.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::ShortenedUrl;

/// A stored mapping as returned by `GET /urls`.
#[derive(Debug, Serialize)]
pub struct ShortenedUrlItem {
    pub short_code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
}

impl From<ShortenedUrl> for ShortenedUrlItem {
    fn from(url: ShortenedUrl) -> Self {
        Self {
            short_code: url.short_code,
            original_url: url.original_url,
            created_at: url.created_at,
        }
    }
}

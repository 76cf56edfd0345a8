//! Shortened URL entity: the immutable mapping from a short code to its target.

use chrono::{DateTime, Utc};

/// A persisted short code mapping.
///
/// Created exactly once by the allocator and never mutated afterwards. The
/// `short_code` is unique across all time; the durable store enforces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenedUrl {
    pub short_code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
}

impl ShortenedUrl {
    /// Creates a new ShortenedUrl instance.
    pub fn new(short_code: String, original_url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            short_code,
            original_url,
            created_at,
        }
    }
}

/// Input data for inserting a new mapping.
///
/// `created_at` is assigned by the store at insert time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortenedUrl {
    pub short_code: String,
    pub original_url: String,
}

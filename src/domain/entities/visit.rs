//! Visit entity representing a single successful redirect.

use chrono::{DateTime, Utc};

/// An analytics record written once per successful resolution.
#[derive(Debug, Clone)]
pub struct Visit {
    pub id: i32,
    pub short_code: String,
    pub visited_at: DateTime<Utc>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
}

impl Visit {
    /// Creates a new Visit instance.
    ///
    /// Client metadata is optional; requests without the headers still
    /// produce a visit row.
    pub fn new(
        id: i32,
        short_code: String,
        visited_at: DateTime<Utc>,
        user_agent: Option<String>,
        referer: Option<String>,
    ) -> Self {
        Self {
            id,
            short_code,
            visited_at,
            user_agent,
            referer,
        }
    }
}

/// Input data for recording a visit. The timestamp is set by the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVisit {
    pub short_code: String,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
}

//! Repository trait for visit analytics.

use crate::domain::entities::{NewVisit, Visit};
use crate::error::StoreError;
use async_trait::async_trait;

/// Append-only store of visit records.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgVisitRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VisitRepository: Send + Sync {
    /// Records a single visit.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the row cannot be written.
    async fn record(&self, new_visit: NewVisit) -> Result<Visit, StoreError>;

    /// Counts the visits recorded for a short code.
    async fn count_for_code(&self, short_code: &str) -> Result<i64, StoreError>;
}

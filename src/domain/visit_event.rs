//! Visit event model for asynchronous visit recording.

use crate::domain::entities::NewVisit;

/// An in-memory visit passed from the resolver to the background worker.
///
/// Decouples the redirect response from the analytics write: the resolver
/// enqueues with `try_send` and returns immediately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitEvent {
    pub short_code: String,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
}

impl VisitEvent {
    /// Creates a new visit event.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let event = VisitEvent::new("aB3dE5gH9k".to_string(), Some("Mozilla/5.0"), None);
    /// ```
    pub fn new(short_code: String, user_agent: Option<&str>, referer: Option<&str>) -> Self {
        Self {
            short_code,
            user_agent: user_agent.map(|s| s.to_string()),
            referer: referer.map(|s| s.to_string()),
        }
    }
}

impl From<VisitEvent> for NewVisit {
    fn from(event: VisitEvent) -> Self {
        NewVisit {
            short_code: event.short_code,
            user_agent: event.user_agent,
            referer: event.referer,
        }
    }
}

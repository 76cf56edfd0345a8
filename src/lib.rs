//! # snaplink
//!
//! A URL shortener built with Axum, PostgreSQL and Redis.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Entities, repository traits, visit pipeline
//! - **Application Layer** ([`application`]) - Allocation, resolution, metrics abstraction
//! - **Infrastructure Layer** ([`infrastructure`]) - PostgreSQL, Redis and `metrics` integrations
//! - **API Layer** ([`api`]) - HTTP handlers, DTOs and middleware
//!
//! ## Core Guarantees
//!
//! - Short codes are 10 characters from `[a-zA-Z0-9]`, unique across all time.
//!   The database's uniqueness constraint is the only arbiter; collisions are
//!   retried with a fresh code up to 3 times.
//! - Redirects read through a Redis cache. A cache outage degrades to database
//!   reads and never fails a request.
//! - Every successful redirect records a visit asynchronously and bumps a
//!   per-code counter.
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
pub mod prelude {
    pub use crate::application::metrics::{CacheOperation, RedirectMetrics};
    pub use crate::application::services::{Allocator, RequestContext, Resolver, UrlListing};
    pub use crate::domain::entities::{NewShortenedUrl, NewVisit, ShortenedUrl, Visit};
    pub use crate::domain::repositories::{UrlRepository, VisitRepository};
    pub use crate::error::{AppError, ResolveError, ShortenError, StoreError};
    pub use crate::infrastructure::cache::{CacheError, CacheResult, CacheService};
    pub use crate::state::AppState;
    pub use crate::utils::code_generator::ShortCodeGenerator;
}

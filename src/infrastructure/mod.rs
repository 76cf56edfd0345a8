//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain and application
//! layers.
//!
//! # Modules
//!
//! - [`cache`] - Caching abstractions (Redis and no-op implementations)
//! - [`metrics`] - Counters backed by the `metrics` facade
//! - [`persistence`] - PostgreSQL repository implementations

pub mod cache;
pub mod metrics;
pub mod persistence;

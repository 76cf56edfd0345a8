//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx.
//!
//! # Repositories
//!
//! - [`PgUrlRepository`] - Short code mappings
//! - [`PgVisitRepository`] - Visit analytics

pub mod pg_url_repository;
pub mod pg_visit_repository;

pub use pg_url_repository::PgUrlRepository;
pub use pg_visit_repository::PgVisitRepository;

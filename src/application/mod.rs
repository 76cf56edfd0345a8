//! Application layer: short code allocation and resolution.
//!
//! Services consume repository and cache traits and provide a clean API for
//! HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::Allocator`] - Collision-safe short code allocation
//! - [`services::Resolver`] - Read-through resolution with visit recording
//! - [`services::UrlListing`] - Listing of every mapping
//!
//! Outcome counters go through the injected [`metrics::RedirectMetrics`].

pub mod metrics;
pub mod services;

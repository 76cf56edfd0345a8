//! Domain layer containing business entities and repository contracts.
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`visit_event`] - Visit tracking event model
//! - [`visit_worker`] - Asynchronous visit persistence worker
//!
//! # Visit Processing Flow
//!
//! 1. The resolver answers a redirect successfully
//! 2. A [`visit_event::VisitEvent`] is pushed onto a bounded channel
//! 3. [`visit_worker::run_visit_worker`] persists it with retries
//! 4. Visit rows are written via [`repositories::VisitRepository`]

pub mod entities;
pub mod repositories;
pub mod visit_event;
pub mod visit_worker;

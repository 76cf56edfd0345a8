//! Core business entities.
//!
//! - [`ShortenedUrl`] - Short code to original URL mapping
//! - [`Visit`] - Analytics record for a successful redirect

pub mod shortened_url;
pub mod visit;

pub use shortened_url::{NewShortenedUrl, ShortenedUrl};
pub use visit::{NewVisit, Visit};

//! Business logic services for the application layer.

pub mod allocator;
pub mod listing;
pub mod resolver;

pub use allocator::Allocator;
pub use listing::UrlListing;
pub use resolver::{RequestContext, Resolver};

//! HTTP middleware and extractors for request processing.

pub mod json;
pub mod owner;
pub mod tracing;

pub use json::AppJson;
pub use owner::CurrentOwner;

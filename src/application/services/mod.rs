//! Business logic services for the application layer.

pub mod shortener_service;
pub mod user_service;

pub use shortener_service::{DynShortenerService, ShortenerService};
pub use user_service::{StaticUserDirectory, UserService};

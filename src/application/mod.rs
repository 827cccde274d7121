//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a narrow API for the HTTP
//! adapter and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::shortener_service::ShortenerService`] - Shortening, resolution and owner-scoped management
//! - [`services::user_service::UserService`] - Repository-backed user directory
//! - [`services::user_service::StaticUserDirectory`] - Single-tenant user directory

pub mod services;

//! REST API layer for HTTP request/response handling.
//!
//! A thin adapter translating HTTP requests into calls on
//! [`crate::application::services::ShortenerService`].
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects for request/response serialization
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Owner resolution and request tracing
//! - [`routes`] - Route configuration and composition

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

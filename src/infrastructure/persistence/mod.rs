//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx
//! parameterized queries. Schema lives in `migrations/`.
//!
//! # Repositories
//!
//! - [`PgRedirectRepository`] - Redirect storage and retrieval
//! - [`PgUserRepository`] - User records

pub mod pg_redirect_repository;
pub mod pg_user_repository;

pub use pg_redirect_repository::PgRedirectRepository;
pub use pg_user_repository::PgUserRepository;

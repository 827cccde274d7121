//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access. Implementations live in
//! `crate::infrastructure`; mock implementations are generated via `mockall`
//! for testing.
//!
//! # Available Repositories
//!
//! - [`RedirectRepository`] - Owner-scoped redirect storage and global resolution
//! - [`UserRepository`] - User records keyed by internal and provider ids

pub mod redirect_repository;
pub mod user_repository;

pub use redirect_repository::RedirectRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use redirect_repository::MockRedirectRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;

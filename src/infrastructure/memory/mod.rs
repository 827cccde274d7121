//! Process-local repository implementations.
//!
//! Used by tests and by single-process deployments (`STORAGE_BACKEND=memory`).
//! Data does not survive a restart.

pub mod redirect_repository;
pub mod user_repository;

pub use redirect_repository::InMemoryRedirectRepository;
pub use user_repository::InMemoryUserRepository;

//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`memory`] - Process-local stores guarded by async locks
//! - [`persistence`] - PostgreSQL repository implementations

pub mod memory;
pub mod persistence;

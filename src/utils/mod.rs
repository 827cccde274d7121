//! Utility functions used across the application.
//!
//! - [`code_generator`] - Deterministic short code generation and validation

pub mod code_generator;

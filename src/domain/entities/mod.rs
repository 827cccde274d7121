//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without business logic beyond a few
//! ownership helpers.
//!
//! # Entity Types
//!
//! - [`Redirect`] - A short code mapped to a destination URL, owned by a user
//! - [`User`] - An owner, identified internally and by a federated identity

pub mod redirect;
pub mod user;

pub use redirect::Redirect;
pub use user::User;

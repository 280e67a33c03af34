//! Core type system and domain definitions
//!
//! Strongly-typed wrappers for GitLab projects, issues and users, plus the
//! query types that describe an issue listing.

pub mod issue;
pub mod query;
pub mod repository;
pub mod user;

pub use issue::*;
pub use query::*;
pub use repository::*;
pub use user::*;

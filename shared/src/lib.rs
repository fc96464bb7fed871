//! Shared types for the restaurant backend
//!
//! Error codes, the unified [`error::AppError`] type and small utilities
//! used by the server crate and its tests.

pub mod error;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

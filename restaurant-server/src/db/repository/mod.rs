//! Repository Module
//!
//! One repository per collection, each wrapping a typed [`Collection`].
//! Reference checks (menu exists, table exists, order exists) are
//! lookup-before-write; the store does not enforce them.
//!
//! [`Collection`]: crate::db::Collection

pub mod food;
pub mod invoice;
pub mod menu;
pub mod order;
pub mod order_item;
pub mod table;
pub mod user;

// Re-exports
pub use food::FoodRepository;
pub use invoice::InvoiceRepository;
pub use menu::MenuRepository;
pub use order::OrderRepository;
pub use order_item::OrderItemRepository;
pub use table::TableRepository;
pub use user::UserRepository;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Unwrap a field that payload validation already marked as required
pub(crate) fn required<T>(value: Option<T>, field: &str) -> RepoResult<T> {
    value.ok_or_else(|| RepoError::Validation(format!("{field} is required")))
}

//! Dining Table Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Dining table entity (桌台)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Table {
    pub table_id: String,
    pub table_number: i32,
    pub number_of_guests: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create table payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TableCreate {
    #[validate(required, range(min = 1))]
    pub number_of_guests: Option<i32>,
    #[validate(required, range(min = 0))]
    pub table_number: Option<i32>,
}

/// Update table payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct TableUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1))]
    pub number_of_guests: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0))]
    pub table_number: Option<i32>,
}

//! Order Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Order entity (订单)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Order {
    pub order_id: String,
    /// Epoch millis
    pub order_date: i64,
    /// Optional dining table reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_id: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create order payload
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct OrderCreate {
    /// Defaults to now
    pub order_date: Option<i64>,
    #[validate(length(min = 1, max = 100))]
    pub table_id: Option<String>,
}

/// Update order payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct OrderUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_date: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 100))]
    pub table_id: Option<String>,
}

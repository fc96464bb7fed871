//! Food Model

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::validation::validate_not_blank;

/// Food entity (菜品)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Food {
    pub food_id: String,
    pub name: String,
    /// Always stored normalized to 2 decimals
    pub price: f64,
    pub food_image: String,
    pub menu_id: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create food payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FoodCreate {
    #[validate(required, length(min = 2, max = 100), custom(function = "validate_not_blank"))]
    pub name: Option<String>,
    #[validate(required, range(min = 0.0, max = 1000000.0))]
    pub price: Option<f64>,
    #[validate(required, length(min = 1, max = 2048))]
    pub food_image: Option<String>,
    #[validate(required, length(min = 1, max = 100))]
    pub menu_id: Option<String>,
}

/// Update food payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct FoodUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 2, max = 100), custom(function = "validate_not_blank"))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, max = 1000000.0))]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 2048))]
    pub food_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 100))]
    pub menu_id: Option<String>,
}

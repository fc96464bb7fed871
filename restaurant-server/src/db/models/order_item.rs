//! Order Item Model

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::Order;

/// Order item entity (订单明细)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderItem {
    pub order_item_id: String,
    pub order_id: String,
    pub food_id: String,
    pub quantity: i32,
    /// Always stored normalized to 2 decimals
    pub unit_price: f64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// One line of an order-with-items request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderItemInput {
    #[validate(required, length(min = 1, max = 100))]
    pub food_id: Option<String>,
    #[validate(required, range(min = 1))]
    pub quantity: Option<i32>,
    #[validate(required, range(min = 0.0, max = 1000000.0))]
    pub unit_price: Option<f64>,
}

impl OrderItemInput {
    /// Build the stored item once validation has passed
    ///
    /// Returns `None` when a required field is missing.
    pub fn into_item(self, order_id: &str, order_item_id: String, now: i64) -> Option<OrderItem> {
        Some(OrderItem {
            order_item_id,
            order_id: order_id.to_string(),
            food_id: self.food_id?,
            quantity: self.quantity?,
            unit_price: crate::money::normalize_price(self.unit_price?),
            created_at: now,
            updated_at: now,
        })
    }
}

/// Create an order together with its items
///
/// Items are validated one by one by the handler so that the failing index
/// can be reported.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct OrderWithItemsCreate {
    #[validate(length(min = 1, max = 100))]
    pub table_id: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub order_items: Vec<OrderItemInput>,
}

/// Response of the order-with-items flow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderWithItemsCreated {
    pub order_id: String,
    pub inserted_ids: Vec<String>,
}

/// Update order item payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct OrderItemUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 100))]
    pub food_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1))]
    pub quantity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, max = 1000000.0))]
    pub unit_price: Option<f64>,
}

impl OrderWithItemsCreate {
    /// Parent order record for this request
    pub fn to_order(&self, order_id: String, now: i64) -> Order {
        Order {
            order_id,
            order_date: now,
            table_id: self.table_id.clone(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_requires_all_fields() {
        let item: OrderItemInput =
            serde_json::from_value(serde_json::json!({"food_id": "F1", "quantity": 2})).unwrap();
        let errors = item.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("unit_price"));

        let zero: OrderItemInput = serde_json::from_value(
            serde_json::json!({"food_id": "F1", "quantity": 0, "unit_price": 1.0}),
        )
        .unwrap();
        assert!(zero.validate().unwrap_err().field_errors().contains_key("quantity"));
    }

    #[test]
    fn test_into_item_normalizes_price() {
        let input: OrderItemInput = serde_json::from_value(
            serde_json::json!({"food_id": "F1", "quantity": 2, "unit_price": 9.999}),
        )
        .unwrap();
        let item = input.into_item("o1", "i1".into(), 42).unwrap();
        assert_eq!(item.unit_price, 10.0);
        assert_eq!(item.order_id, "o1");
        assert_eq!(item.created_at, 42);
    }
}

//! Invoice Model

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::reports::OrderItemLine;
use crate::utils::validation::{validate_payment_method, validate_payment_status};

pub const DEFAULT_PAYMENT_STATUS: &str = "PENDING";

/// Invoice entity (账单)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Invoice {
    pub invoice_id: String,
    pub order_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    pub payment_status: String,
    /// Creation time plus one day, epoch millis
    pub payment_due_date: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create invoice payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct InvoiceCreate {
    #[validate(required, length(min = 1, max = 100))]
    pub order_id: Option<String>,
    #[validate(custom(function = "validate_payment_method"))]
    pub payment_method: Option<String>,
    #[validate(custom(function = "validate_payment_status"))]
    pub payment_status: Option<String>,
}

/// Update invoice payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct InvoiceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_payment_method"))]
    pub payment_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_payment_status"))]
    pub payment_status: Option<String>,
}

/// Invoice enriched with the order summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceView {
    pub invoice_id: String,
    pub payment_method: Option<String>,
    pub order_id: String,
    pub payment_status: String,
    pub payment_due: f64,
    pub table_number: Option<i32>,
    pub payment_due_date: i64,
    pub order_details: Vec<OrderItemLine>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_validation() {
        let ok: InvoiceCreate = serde_json::from_value(
            serde_json::json!({"order_id": "o1", "payment_method": "CASH"}),
        )
        .unwrap();
        assert!(ok.validate().is_ok());
        assert!(ok.payment_status.is_none());

        let bad: InvoiceCreate = serde_json::from_value(
            serde_json::json!({"order_id": "o1", "payment_status": "LATER"}),
        )
        .unwrap();
        assert!(bad.validate().unwrap_err().field_errors().contains_key("payment_status"));

        let missing: InvoiceCreate = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(missing.validate().unwrap_err().field_errors().contains_key("order_id"));
    }
}

//! Menu Model

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::utils::validation::validate_not_blank;

/// Menu entity (菜单)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Menu {
    pub menu_id: String,
    pub name: String,
    pub category: String,
    /// Validity window, epoch millis
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create menu payload
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_menu_window"))]
pub struct MenuCreate {
    #[validate(required, length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    pub name: Option<String>,
    #[validate(required, length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    pub category: Option<String>,
    pub start_date: Option<i64>,
    pub end_date: Option<i64>,
}

/// Update menu payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_menu_update_window"))]
pub struct MenuUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<i64>,
}

/// end_date must come after start_date when both are given
pub fn check_window(start: Option<i64>, end: Option<i64>) -> Result<(), ValidationError> {
    match (start, end) {
        (Some(s), Some(e)) if e <= s => Err(ValidationError::new("menu_window")
            .with_message("end_date must be after start_date".into())),
        _ => Ok(()),
    }
}

fn validate_menu_window(menu: &MenuCreate) -> Result<(), ValidationError> {
    check_window(menu.start_date, menu.end_date)
}

fn validate_menu_update_window(menu: &MenuUpdate) -> Result<(), ValidationError> {
    check_window(menu.start_date, menu.end_date)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window() {
        assert!(check_window(None, None).is_ok());
        assert!(check_window(Some(1), None).is_ok());
        assert!(check_window(Some(1), Some(2)).is_ok());
        assert!(check_window(Some(2), Some(2)).is_err());
        assert!(check_window(Some(3), Some(2)).is_err());
    }

    #[test]
    fn test_create_requires_name_and_category() {
        let payload: MenuCreate = serde_json::from_str(r#"{"name": "Lunch"}"#).unwrap();
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("category"));
        assert!(!errors.field_errors().contains_key("name"));
    }

    #[test]
    fn test_update_patch_skips_missing_fields() {
        let patch = MenuUpdate {
            name: Some("Dinner".into()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            serde_json::json!({"name": "Dinner"})
        );
    }
}

//! Input validation helpers
//!
//! Allowed enumerations, custom `validator` functions and the [`ValidatedJson`]
//! extractor that turns every body rejection into a JSON 400.

use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError};

use crate::utils::AppError;
use crate::utils::error::validation_error;

pub const PAYMENT_METHODS: &[&str] = &["CARD", "CASH"];
pub const PAYMENT_STATUSES: &[&str] = &["PENDING", "PAID"];

// ── Custom validators (used from #[validate(custom(...))]) ──────────

pub fn validate_payment_method(method: &str) -> Result<(), ValidationError> {
    if PAYMENT_METHODS.contains(&method) {
        Ok(())
    } else {
        Err(ValidationError::new("payment_method")
            .with_message("must be CARD or CASH".into()))
    }
}

pub fn validate_payment_status(status: &str) -> Result<(), ValidationError> {
    if PAYMENT_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(ValidationError::new("payment_status")
            .with_message("must be PENDING or PAID".into()))
    }
}

/// Reject whitespace-only strings that `length(min = 1)` would accept
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be empty".into()));
    }
    Ok(())
}

// ── Extractor ───────────────────────────────────────────────────────

/// JSON body extractor that also runs `validator`
///
/// Malformed JSON, a wrong content type or a missing field all answer 400
/// with the standard error body instead of axum's plain-text rejection.
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::invalid_request(rejection.body_text()))?;
        value.validate().map_err(validation_error)?;
        Ok(Self(value))
    }
}

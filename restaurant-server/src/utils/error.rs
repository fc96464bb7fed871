//! 统一错误处理
//!
//! 错误类型来自 `shared::error`；这里补充仓储错误和校验错误到
//! [`AppError`] 的转换。
//!
//! | 来源 | 转换结果 |
//! |------|----------|
//! | `RepoError::NotFound` | 404 |
//! | `RepoError::Duplicate` | 409 |
//! | `RepoError::Validation` | 400 |
//! | `RepoError::Database` | 500 (消息不外泄) |
//! | `validator::ValidationErrors` | 400，`details.fields` 列出字段 |

pub use shared::error::{AppError, AppResult, ErrorCategory, ErrorCode};

use crate::db::repository::RepoError;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::conflict(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Database(msg) => {
                tracing::error!(error = %msg, "Database operation failed");
                AppError::database("Database operation failed")
            }
        }
    }
}

/// 将 validator 的错误转换为 400，消息列出所有失败字段
pub fn validation_error(errors: validator::ValidationErrors) -> AppError {
    let mut fields: Vec<String> = errors
        .field_errors()
        .keys()
        .map(|k| k.to_string())
        .collect();
    fields.sort();

    let mut message = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match (&e.message, &**field) {
                // struct-level (schema) errors carry no field name
                (Some(msg), "__all__") => msg.to_string(),
                (Some(msg), _) => format!("{field}: {msg}"),
                (None, _) => format!("{field}: {}", e.code),
            })
        })
        .collect::<Vec<_>>();
    message.sort();

    AppError::validation(if message.is_empty() {
        "Validation failed".to_string()
    } else {
        message.join("; ")
    })
    .with_detail("fields", fields)
}

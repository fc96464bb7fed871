//! HTTP 中间件
//!
//! - [`middleware::logging_middleware`] - 请求日志
//! - [`middleware::deadline_middleware`] - 统一请求超时

pub mod middleware;

//! 请求超时中间件
//!
//! 所有路由共用一个超时时间 (`REQUEST_TIMEOUT_MS`)。超时后丢弃处理
//! future，正在进行的数据库调用随之取消，请求以 500 结束。

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::AppError;
use crate::core::ServerState;

pub async fn deadline_middleware(
    State(state): State<ServerState>,
    req: Request,
    next: Next,
) -> Response {
    let deadline = state.config.request_timeout();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    match tokio::time::timeout(deadline, next.run(req)).await {
        Ok(response) => response,
        Err(_) => {
            tracing::warn!(
                method = %method,
                path = %path,
                timeout_ms = deadline.as_millis() as u64,
                "Request deadline exceeded"
            );
            AppError::timeout().into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::{Router, body::Body, middleware, routing::get};
    use http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::Config;

    async fn app(request_timeout_ms: u64) -> Router {
        let config = Config {
            request_timeout_ms,
            ..Config::for_tests()
        };
        let state = ServerState::initialize(&config).await.unwrap();
        Router::new()
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_millis(200)).await;
                    "done"
                }),
            )
            .route("/fast", get(|| async { "done" }))
            .layer(middleware::from_fn_with_state(
                state.clone(),
                deadline_middleware,
            ))
            .with_state(state)
    }

    #[tokio::test]
    async fn test_expired_deadline_is_timeout_error() {
        let request = Request::get("/slow").body(Body::empty()).unwrap();
        let response = app(1).await.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], 9004);
    }

    #[tokio::test]
    async fn test_request_within_deadline_passes() {
        let request = Request::get("/fast").body(Body::empty()).unwrap();
        let response = app(10_000).await.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

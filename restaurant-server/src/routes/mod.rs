//! 路由组装
//!
//! [`build_router`] 注册所有 API 路由；[`build_app`] 在此之上叠加全局中间件。
//! HTTP 服务器和集成测试 (`tower::ServiceExt::oneshot`) 使用同一个 [`build_app`]。

use axum::Router;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::api;
use crate::auth::require_auth;
use crate::core::ServerState;
use crate::server::middleware::{deadline_middleware, logging_middleware};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        // Public
        .merge(api::health::router())
        // Users: signup / login / refresh are public, the rest protected
        .merge(api::users::router())
        // Resources - authentication required
        .merge(api::menus::router())
        .merge(api::foods::router())
        .merge(api::tables::router())
        .merge(api::orders::router())
        .merge(api::order_items::router())
        .merge(api::invoices::router())
}

/// Build a fully configured application with all middleware
///
/// Layers run outermost first: request id → trace → logging → CORS →
/// deadline → bearer guard → handler.
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    build_router()
        // ========== Application Middleware ==========
        // Bearer guard - injects CurrentUser, skips public paths
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ))
        // One deadline for the whole request
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            deadline_middleware,
        ))
        // ========== Tower HTTP Middleware ==========
        .layer(CorsLayer::permissive())
        // Request logging
        .layer(axum_middleware::from_fn(logging_middleware))
        // Trace - Request tracing
        .layer(TraceLayer::new_for_http())
        // Propagate request ID to response
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        // Request ID - Generate unique ID for each request (outermost)
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
}

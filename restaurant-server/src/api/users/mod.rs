//! User API 模块
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /users/signup | POST | 注册 | 无 |
//! | /users/login | POST | 登录 | 无 |
//! | /users/refresh | POST | 刷新令牌 | 无 (需刷新令牌) |
//! | /users | GET | 分页用户列表 | 需要 |
//! | /users/{id} | GET / PATCH | 查询 / 更新用户 | 需要 |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/users", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        // Public routes - skipped by require_auth
        .route("/signup", post(handler::signup))
        .route("/login", post(handler::login))
        .route("/refresh", post(handler::refresh))
        // Protected routes
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id).patch(handler::update))
}

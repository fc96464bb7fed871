//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::UpdateResult;
use crate::db::models::{Order, OrderCreate, OrderUpdate};
use crate::utils::validation::ValidatedJson;
use crate::utils::{AppError, AppResult, ErrorCode};

/// GET /orders - 获取所有订单
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Order>>> {
    let orders = state.orders().find_all().await?;
    Ok(Json(orders))
}

/// GET /orders/{id} - 获取单个订单
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let order = state
        .orders()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;
    Ok(Json(order))
}

/// POST /orders - 创建订单 (桌台必须存在)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<OrderCreate>,
) -> AppResult<(StatusCode, Json<Order>)> {
    let order = state.orders().create(payload).await?;

    tracing::info!(
        order_id = %order.order_id,
        table_id = ?order.table_id,
        user = %user.uid,
        "Order created"
    );
    Ok((StatusCode::CREATED, Json(order)))
}

/// PATCH /orders/{id} - 更新订单
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<OrderUpdate>,
) -> AppResult<Json<UpdateResult>> {
    let result = state.orders().update(&id, payload).await?;
    Ok(Json(result))
}

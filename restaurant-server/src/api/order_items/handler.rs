//! Order Item API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::util::{new_record_key, now_millis};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::UpdateResult;
use crate::db::models::{OrderItem, OrderItemUpdate, OrderWithItemsCreate, OrderWithItemsCreated};
use crate::reports::{OrderSummary, OrderSummaryReport};
use crate::utils::error::validation_error;
use crate::utils::validation::ValidatedJson;
use crate::utils::{AppError, AppResult, ErrorCode};

/// GET /orderItems - 获取所有订单明细
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<OrderItem>>> {
    let items = state.order_items().find_all().await?;
    Ok(Json(items))
}

/// GET /orderItems/{order_id} - 订单聚合汇总
///
/// 订单不存在或没有明细时返回空数组
pub async fn summary(
    State(state): State<ServerState>,
    Path(order_id): Path<String>,
) -> AppResult<Json<Vec<OrderSummary>>> {
    let summaries = OrderSummaryReport::new(state.db.clone())
        .run(&order_id)
        .await?;
    Ok(Json(summaries))
}

/// GET /orderItems/item/{id} - 获取单条明细
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<OrderItem>> {
    let item = state
        .order_items()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderItemNotFound))?;
    Ok(Json(item))
}

/// POST /orderItems - 创建订单及其明细
///
/// 1. 校验桌台 (如有)
/// 2. 写入订单
/// 3. 逐条校验明细，任一失败则不写入任何明细
/// 4. 单事务批量写入明细，单价保留两位小数
///
/// 第 3、4 步失败时第 2 步写入的订单不会回滚。
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<OrderWithItemsCreate>,
) -> AppResult<(StatusCode, Json<OrderWithItemsCreated>)> {
    let orders = state.orders();
    if let Some(table_id) = &payload.table_id {
        orders.ensure_table(table_id).await?;
    }

    let now = now_millis();
    let order = orders.insert(payload.to_order(new_record_key(), now)).await?;
    let order_id = order.order_id;

    let mut items = Vec::with_capacity(payload.order_items.len());
    for (index, input) in payload.order_items.into_iter().enumerate() {
        if let Err(errors) = input.validate() {
            tracing::warn!(
                order_id = %order_id,
                index,
                "Order item rejected, order kept without items"
            );
            return Err(validation_error(errors).with_detail("index", index));
        }
        let item = input
            .into_item(&order_id, new_record_key(), now)
            .ok_or_else(|| AppError::new(ErrorCode::RequiredField).with_detail("index", index))?;
        items.push(item);
    }

    let inserted_ids = state.order_items().insert_many(items).await?;

    tracing::info!(
        order_id = %order_id,
        items = inserted_ids.len(),
        user = %user.uid,
        "Order with items created"
    );
    Ok((
        StatusCode::CREATED,
        Json(OrderWithItemsCreated {
            order_id,
            inserted_ids,
        }),
    ))
}

/// PATCH /orderItems/{id} - 更新明细
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<OrderItemUpdate>,
) -> AppResult<Json<UpdateResult>> {
    let result = state.order_items().update(&id, payload).await?;
    Ok(Json(result))
}

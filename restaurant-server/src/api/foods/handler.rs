//! Food API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Serialize;

use crate::api::Pagination;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::UpdateResult;
use crate::db::models::{Food, FoodCreate, FoodUpdate};
use crate::utils::validation::ValidatedJson;
use crate::utils::{AppError, AppResult, ErrorCode};

/// 分页菜品列表
#[derive(Debug, Serialize)]
pub struct FoodPage {
    pub total_count: u64,
    pub food_items: Vec<Food>,
}

/// GET /foods?page=&recordPerPage= - 分页获取菜品
pub async fn list(
    State(state): State<ServerState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<FoodPage>> {
    let (food_items, total_count) = state
        .foods()
        .find_page(pagination.skip(), pagination.per_page())
        .await?;
    Ok(Json(FoodPage {
        total_count,
        food_items,
    }))
}

/// GET /foods/{id} - 获取单个菜品
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Food>> {
    let food = state
        .foods()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::FoodNotFound))?;
    Ok(Json(food))
}

/// POST /foods - 创建菜品 (菜单必须存在，价格保留两位小数)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<FoodCreate>,
) -> AppResult<(StatusCode, Json<Food>)> {
    let food = state.foods().create(payload).await?;

    tracing::info!(
        food_id = %food.food_id,
        menu_id = %food.menu_id,
        price = food.price,
        user = %user.uid,
        "Food created"
    );
    Ok((StatusCode::CREATED, Json(food)))
}

/// PATCH /foods/{id} - 更新菜品
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<FoodUpdate>,
) -> AppResult<Json<UpdateResult>> {
    let result = state.foods().update(&id, payload).await?;
    Ok(Json(result))
}

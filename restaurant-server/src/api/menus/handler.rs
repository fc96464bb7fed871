//! Menu API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::UpdateResult;
use crate::db::models::{Menu, MenuCreate, MenuUpdate};
use crate::utils::validation::ValidatedJson;
use crate::utils::{AppError, AppResult, ErrorCode};

/// GET /menus - 获取所有菜单
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Menu>>> {
    let menus = state.menus().find_all().await?;
    Ok(Json(menus))
}

/// GET /menus/{id} - 获取单个菜单
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Menu>> {
    let menu = state
        .menus()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::MenuNotFound))?;
    Ok(Json(menu))
}

/// POST /menus - 创建菜单
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<MenuCreate>,
) -> AppResult<(StatusCode, Json<Menu>)> {
    let menu = state.menus().create(payload).await?;

    tracing::info!(menu_id = %menu.menu_id, user = %user.uid, "Menu created");
    Ok((StatusCode::CREATED, Json(menu)))
}

/// PATCH /menus/{id} - 更新菜单 (菜单不存在时返回 404)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<MenuUpdate>,
) -> AppResult<Json<UpdateResult>> {
    let result = state.menus().update(&id, payload).await?;
    Ok(Json(result))
}

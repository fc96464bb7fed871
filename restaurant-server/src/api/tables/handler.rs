//! Dining Table API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::core::ServerState;
use crate::db::UpdateResult;
use crate::db::models::{Table, TableCreate, TableUpdate};
use crate::utils::validation::ValidatedJson;
use crate::utils::{AppError, AppResult, ErrorCode};

/// GET /tables - 获取所有桌台
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Table>>> {
    let tables = state.tables().find_all().await?;
    Ok(Json(tables))
}

/// GET /tables/{id} - 获取单个桌台
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Table>> {
    let table = state
        .tables()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::TableNotFound))?;
    Ok(Json(table))
}

/// POST /tables - 创建桌台
pub async fn create(
    State(state): State<ServerState>,
    ValidatedJson(payload): ValidatedJson<TableCreate>,
) -> AppResult<(StatusCode, Json<Table>)> {
    let table = state.tables().create(payload).await?;
    tracing::info!(table_id = %table.table_id, number = table.table_number, "Table created");
    Ok((StatusCode::CREATED, Json(table)))
}

/// PATCH /tables/{id} - 更新桌台
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<TableUpdate>,
) -> AppResult<Json<UpdateResult>> {
    let result = state.tables().update(&id, payload).await?;
    Ok(Json(result))
}

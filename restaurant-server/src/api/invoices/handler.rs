//! Invoice API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::UpdateResult;
use crate::db::models::{Invoice, InvoiceCreate, InvoiceUpdate, InvoiceView};
use crate::reports::OrderSummaryReport;
use crate::utils::validation::ValidatedJson;
use crate::utils::{AppError, AppResult, ErrorCode};

/// GET /invoices - 获取所有账单
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Invoice>>> {
    let invoices = state.invoices().find_all().await?;
    Ok(Json(invoices))
}

/// GET /invoices/{id} - 账单详情 (附订单汇总)
///
/// 订单没有任何明细时返回 404
pub async fn get_view(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<InvoiceView>> {
    let invoice = state
        .invoices()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::InvoiceNotFound))?;

    let summary = OrderSummaryReport::new(state.db.clone())
        .run(&invoice.order_id)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::OrderItemNotFound,
                format!("Order {} has no items", invoice.order_id),
            )
        })?;

    Ok(Json(InvoiceView {
        invoice_id: invoice.invoice_id,
        payment_method: invoice.payment_method,
        order_id: invoice.order_id,
        payment_status: invoice.payment_status,
        payment_due: summary.payment_due,
        table_number: summary.table_number,
        payment_due_date: invoice.payment_due_date,
        order_details: summary.order_items,
    }))
}

/// POST /invoices - 创建账单 (订单必须存在)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<InvoiceCreate>,
) -> AppResult<(StatusCode, Json<Invoice>)> {
    let invoice = state.invoices().create(payload).await?;

    tracing::info!(
        invoice_id = %invoice.invoice_id,
        order_id = %invoice.order_id,
        user = %user.uid,
        "Invoice created"
    );
    Ok((StatusCode::CREATED, Json(invoice)))
}

/// PATCH /invoices/{id} - 更新支付方式 / 支付状态
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<InvoiceUpdate>,
) -> AppResult<Json<UpdateResult>> {
    let result = state.invoices().update(&id, payload).await?;
    Ok(Json(result))
}

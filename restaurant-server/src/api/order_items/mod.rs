//! Order Item API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /orderItems | GET | 所有订单明细 |
//! | /orderItems | POST | 下单: 创建订单 + 批量写入明细 |
//! | /orderItems/{order_id} | GET | 订单聚合汇总 |
//! | /orderItems/{order_item_id} | PATCH | 更新明细 |
//! | /orderItems/item/{order_item_id} | GET | 单条明细 |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/orderItems", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        // GET 按订单 ID 汇总，PATCH 按明细 ID 更新
        .route("/{id}", get(handler::summary).patch(handler::update))
        .route("/item/{id}", get(handler::get_by_id))
}

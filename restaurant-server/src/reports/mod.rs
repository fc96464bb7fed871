//! 报表模块
//!
//! - [`order_summary`] - 订单明细聚合 (应付金额、数量、明细)

pub mod order_summary;

pub use order_summary::{OrderItemLine, OrderSummary, OrderSummaryReport};

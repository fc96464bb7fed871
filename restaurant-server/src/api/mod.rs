//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`users`] - 注册、登录、刷新令牌、用户管理
//! - [`menus`] - 菜单管理接口
//! - [`foods`] - 菜品管理接口
//! - [`tables`] - 桌台管理接口
//! - [`orders`] - 订单管理接口
//! - [`order_items`] - 订单明细 (下单、聚合汇总)
//! - [`invoices`] - 账单接口
//!
//! 除 `/health` 和 `/users/{signup,login,refresh}` 外，所有接口都需要访问令牌。

pub mod pagination;

pub mod foods;
pub mod health;
pub mod invoices;
pub mod menus;
pub mod order_items;
pub mod orders;
pub mod tables;
pub mod users;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};
pub use pagination::Pagination;

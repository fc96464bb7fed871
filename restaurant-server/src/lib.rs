//! Restaurant Server - 餐厅管理后端
//!
//! # 架构概述
//!
//! 菜单、菜品、桌台、订单、订单明细、发票和用户的 REST 接口，
//! 数据存放在嵌入式 SurrealDB 中。
//!
//! - **数据库** (`db`): 集合访问器 + 各资源仓储
//! - **报表** (`reports`): 订单明细聚合 (match / lookup / project / group)
//! - **认证** (`auth`): JWT + Argon2 认证体系
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! restaurant-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT、密码哈希、认证中间件
//! ├── api/           # HTTP 路由和处理器
//! ├── routes/        # 路由组装和全局中间件
//! ├── server/        # 请求日志、请求超时中间件
//! ├── db/            # 数据库层
//! ├── reports/       # 订单聚合
//! ├── money/         # 金额精度
//! └── utils/         # 错误、日志、校验
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod money;
pub mod reports;
pub mod routes;
pub mod server;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 设置运行环境: 加载 .env 并初始化日志
pub fn setup_environment() {
    // .env 文件可选
    let _ = dotenvy::dotenv();

    let level = std::env::var("LOG_LEVEL").ok();
    let json = std::env::var("LOG_JSON")
        .ok()
        .and_then(|v| v.parse::<bool>().ok());
    let dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(level.as_deref(), json, dir.as_deref());
}

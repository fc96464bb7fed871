use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::{JwtService, PasswordService};
use crate::core::Config;
use crate::db::DbService;
use crate::db::repository::{
    FoodRepository, InvoiceRepository, MenuRepository, OrderItemRepository, OrderRepository,
    TableRepository, UserRepository,
};

/// 服务器状态 - 持有所有请求共享的句柄
///
/// 启动时构建一次，之后只读。`Clone` 仅复制句柄:
/// `Surreal<Db>` 内部是 Arc，服务对象用 Arc 包装。
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 服务器配置 |
/// | db | 嵌入式 SurrealDB 客户端 |
/// | jwt_service | JWT 令牌服务 |
/// | passwords | 密码哈希服务 |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
    pub jwt_service: Arc<JwtService>,
    pub passwords: Arc<PasswordService>,
}

impl ServerState {
    /// 使用已打开的数据库创建状态
    pub fn new(config: Config, db: Surreal<Db>) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let passwords = Arc::new(PasswordService::new(config.password.clone()));
        Self {
            config,
            db,
            jwt_service,
            passwords,
        }
    }

    /// 打开数据库并初始化服务器状态
    pub async fn initialize(config: &Config) -> anyhow::Result<Self> {
        let db_service = DbService::open(config).await?;
        Ok(Self::new(config.clone(), db_service.db))
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    // ========== 仓储访问 ==========

    pub fn menus(&self) -> MenuRepository {
        MenuRepository::new(self.db.clone())
    }

    pub fn foods(&self) -> FoodRepository {
        FoodRepository::new(self.db.clone())
    }

    pub fn tables(&self) -> TableRepository {
        TableRepository::new(self.db.clone())
    }

    pub fn orders(&self) -> OrderRepository {
        OrderRepository::new(self.db.clone())
    }

    pub fn order_items(&self) -> OrderItemRepository {
        OrderItemRepository::new(self.db.clone())
    }

    pub fn invoices(&self) -> InvoiceRepository {
        InvoiceRepository::new(self.db.clone())
    }

    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.db.clone())
    }
}

use std::time::Duration;

use crate::auth::{JwtConfig, PasswordConfig};

/// 数据库路径的特殊值: 使用内存引擎
pub const MEMORY_DATABASE: &str = "memory";

/// 服务器配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_HOST | 0.0.0.0 | 监听地址 |
/// | HTTP_PORT | 8000 | HTTP 服务端口 |
/// | DATABASE_PATH | data/restaurant.db | RocksDB 目录 (`memory` 为内存库) |
/// | DB_NAMESPACE | restaurant | SurrealDB namespace |
/// | DB_NAME | restaurant | SurrealDB database |
/// | ENVIRONMENT | development | 运行环境 |
/// | REQUEST_TIMEOUT_MS | 10000 | 请求超时(毫秒) |
/// | LOGIN_FIXED_DELAY_MS | 300 | 登录失败固定延迟(毫秒) |
///
/// JWT 与密码哈希参数见 [`JwtConfig`] 和 [`PasswordConfig`]。
#[derive(Debug, Clone)]
pub struct Config {
    pub http_host: String,
    pub http_port: u16,
    /// RocksDB 数据目录
    pub database_path: String,
    pub db_namespace: String,
    pub db_name: String,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 请求超时时间 (毫秒)，对所有路由统一生效
    pub request_timeout_ms: u64,
    /// 登录失败时的固定延迟 (毫秒)
    pub login_fixed_delay_ms: u64,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 密码哈希参数
    pub password: PasswordConfig,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值。JWT 密钥在 release 构建下必须设置。
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            http_host: std::env::var("HTTP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            http_port: env_parse("HTTP_PORT", 8000),
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "data/restaurant.db".into()),
            db_namespace: std::env::var("DB_NAMESPACE").unwrap_or_else(|_| "restaurant".into()),
            db_name: std::env::var("DB_NAME").unwrap_or_else(|_| "restaurant".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            request_timeout_ms: env_parse("REQUEST_TIMEOUT_MS", 10_000),
            login_fixed_delay_ms: env_parse("LOGIN_FIXED_DELAY_MS", 300),
            jwt: JwtConfig::from_env()?,
            password: PasswordConfig::from_env(),
        })
    }

    /// 测试配置: 内存数据库、低成本哈希、无登录延迟
    pub fn for_tests() -> Self {
        Self {
            http_host: "127.0.0.1".into(),
            http_port: 0,
            database_path: MEMORY_DATABASE.into(),
            db_namespace: "test".into(),
            db_name: "test".into(),
            environment: "test".into(),
            request_timeout_ms: 10_000,
            login_fixed_delay_ms: 0,
            jwt: JwtConfig::for_tests(),
            password: PasswordConfig::for_tests(),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn uses_memory_database(&self) -> bool {
        self.database_path == MEMORY_DATABASE
    }
}

pub(crate) fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_uses_memory_database() {
        let config = Config::for_tests();
        assert!(config.uses_memory_database());
        assert!(!config.is_production());
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_env_parse_falls_back_on_garbage() {
        // key is never set by anything in this crate
        assert_eq!(env_parse("RESTAURANT_TEST_UNSET_KEY", 42u16), 42);
    }
}

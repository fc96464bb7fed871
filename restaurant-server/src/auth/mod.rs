//! 认证模块
//!
//! 提供 JWT 认证、密码哈希和中间件：
//! - [`JwtService`] - 访问令牌 / 刷新令牌的签发与校验
//! - [`PasswordService`] - Argon2 密码哈希
//! - [`CurrentUser`] - 当前用户上下文
//! - [`require_auth`] - 认证中间件

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{
    Claims, CurrentUser, JwtConfig, JwtError, JwtService, TokenKind, TokenPair, TokenSubject,
};
pub use middleware::require_auth;
pub use password::{PasswordConfig, PasswordError, PasswordService};

//! JWT 令牌服务
//!
//! 签发访问令牌与刷新令牌，两者携带相同的身份声明 (email、姓名、uid)，
//! 通过 `token_type` 区分用途。

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::config::env_parse;

/// JWT 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// JWT 密钥 (至少 32 字节)
    pub secret: String,
    /// 访问令牌过期时间 (分钟)
    pub access_expiration_minutes: i64,
    /// 刷新令牌过期时间 (小时)
    pub refresh_expiration_hours: i64,
    /// 令牌签发者
    pub issuer: String,
    /// 令牌受众
    pub audience: String,
}

impl JwtConfig {
    /// 从环境变量加载
    ///
    /// | 环境变量 | 默认值 |
    /// |----------|--------|
    /// | JWT_SECRET | release 构建必填; debug 构建随机生成 |
    /// | JWT_ACCESS_EXPIRATION_MINUTES | 1440 (24 小时) |
    /// | JWT_REFRESH_EXPIRATION_HOURS | 168 (7 天) |
    /// | JWT_ISSUER | restaurant-server |
    /// | JWT_AUDIENCE | restaurant-clients |
    pub fn from_env() -> Result<Self, JwtError> {
        Ok(Self {
            secret: load_jwt_secret()?,
            access_expiration_minutes: env_parse("JWT_ACCESS_EXPIRATION_MINUTES", 1440),
            refresh_expiration_hours: env_parse("JWT_REFRESH_EXPIRATION_HOURS", 168),
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "restaurant-server".into()),
            audience: std::env::var("JWT_AUDIENCE")
                .unwrap_or_else(|_| "restaurant-clients".into()),
        })
    }

    pub fn for_tests() -> Self {
        Self {
            secret: "test-secret-key-that-is-long-enough-for-hs256".into(),
            access_expiration_minutes: 60,
            refresh_expiration_hours: 24,
            issuer: "restaurant-server".into(),
            audience: "restaurant-clients".into(),
        }
    }
}

/// 令牌用途
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// 存储在令牌中的 JWT Claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// 用户 ID (Subject)
    pub sub: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub uid: String,
    pub token_type: TokenKind,
    /// 令牌唯一 ID, 保证同一秒内重新签发的令牌也不相同
    pub jti: String,
    pub exp: i64,
    pub iat: i64,
    pub iss: String,
    pub aud: String,
}

/// 签发令牌所需的身份信息
#[derive(Debug, Clone, Copy)]
pub struct TokenSubject<'a> {
    pub uid: &'a str,
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
}

/// 一次签发的访问令牌 + 刷新令牌
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub token: String,
    pub refresh_token: String,
}

/// JWT 错误
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("无效令牌: {0}")]
    InvalidToken(String),

    #[error("令牌已过期")]
    ExpiredToken,

    #[error("无效签名")]
    InvalidSignature,

    #[error("令牌类型错误: 需要 {expected:?}")]
    WrongKind { expected: TokenKind },

    #[error("令牌生成失败: {0}")]
    GenerationFailed(String),

    #[error("配置错误: {0}")]
    ConfigError(String),
}

/// 生成可打印的安全 JWT 密钥 (用于开发环境)
pub fn generate_secure_printable_jwt_secret() -> Result<String, JwtError> {
    const ALLOWED: &[u8] =
        b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_=+.";

    let rng = SystemRandom::new();
    let mut bytes = [0u8; 64];
    rng.fill(&mut bytes).map_err(|_| {
        JwtError::ConfigError("Failed to generate secure random key".to_string())
    })?;

    Ok(bytes
        .iter()
        .map(|b| ALLOWED[*b as usize % ALLOWED.len()] as char)
        .collect())
}

/// 从环境变量安全地加载 JWT 密钥
fn load_jwt_secret() -> Result<String, JwtError> {
    match std::env::var("JWT_SECRET") {
        Ok(secret) => {
            if secret.len() < 32 {
                return Err(JwtError::ConfigError(
                    "JWT_SECRET must be at least 32 characters long".to_string(),
                ));
            }
            Ok(secret)
        }
        Err(_) => {
            #[cfg(debug_assertions)]
            {
                tracing::warn!("JWT_SECRET not set! Generating temporary key for development.");
                generate_secure_printable_jwt_secret()
            }
            #[cfg(not(debug_assertions))]
            {
                Err(JwtError::ConfigError(
                    "JWT_SECRET environment variable must be set in production!".to_string(),
                ))
            }
        }
    }
}

/// JWT 令牌服务
#[derive(Clone)]
pub struct JwtService {
    pub config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("issuer", &self.config.issuer)
            .field("audience", &self.config.audience)
            .finish_non_exhaustive()
    }
}

impl JwtService {
    /// 使用指定配置创建新的 JWT 服务
    pub fn with_config(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// 签发访问令牌 + 刷新令牌
    pub fn generate_token_pair(&self, subject: TokenSubject<'_>) -> Result<TokenPair, JwtError> {
        Ok(TokenPair {
            token: self.generate_token(
                subject,
                TokenKind::Access,
                Duration::minutes(self.config.access_expiration_minutes),
            )?,
            refresh_token: self.generate_token(
                subject,
                TokenKind::Refresh,
                Duration::hours(self.config.refresh_expiration_hours),
            )?,
        })
    }

    fn generate_token(
        &self,
        subject: TokenSubject<'_>,
        kind: TokenKind,
        ttl: Duration,
    ) -> Result<String, JwtError> {
        let now = Utc::now();
        let expiration = now + ttl;

        let claims = Claims {
            sub: subject.uid.to_string(),
            email: subject.email.to_string(),
            first_name: subject.first_name.to_string(),
            last_name: subject.last_name.to_string(),
            uid: subject.uid.to_string(),
            token_type: kind,
            jti: uuid::Uuid::new_v4().simple().to_string(),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// 验证并解码令牌 (不检查用途)
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss", "aud"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                ErrorKind::InvalidToken => JwtError::InvalidToken(e.to_string()),
                _ => JwtError::InvalidToken(format!("Token validation failed: {}", e)),
            }
        })?;

        Ok(token_data.claims)
    }

    /// 验证令牌并要求指定用途
    pub fn validate_kind(&self, token: &str, expected: TokenKind) -> Result<Claims, JwtError> {
        let claims = self.validate_token(token)?;
        if claims.token_type != expected {
            return Err(JwtError::WrongKind { expected });
        }
        Ok(claims)
    }

    /// 从 Authorization 头提取令牌
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ").map(str::trim).filter(|t| !t.is_empty())
    }
}

/// 当前用户上下文 (从访问令牌解析)
///
/// 由认证中间件注入请求扩展，处理函数直接作为参数提取。
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub uid: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            uid: claims.uid,
            email: claims.email,
            first_name: claims.first_name,
            last_name: claims.last_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject() -> TokenSubject<'static> {
        TokenSubject {
            uid: "u-1",
            email: "ada@example.com",
            first_name: "Ada",
            last_name: "Lovelace",
        }
    }

    #[test]
    fn test_token_pair_carries_identity() {
        let service = JwtService::with_config(JwtConfig::for_tests());
        let pair = service.generate_token_pair(subject()).unwrap();

        let access = service.validate_kind(&pair.token, TokenKind::Access).unwrap();
        assert_eq!(access.uid, "u-1");
        assert_eq!(access.sub, "u-1");
        assert_eq!(access.email, "ada@example.com");
        assert_eq!(access.first_name, "Ada");
        assert_eq!(access.last_name, "Lovelace");

        let refresh = service
            .validate_kind(&pair.refresh_token, TokenKind::Refresh)
            .unwrap();
        assert!(refresh.exp > access.exp, "refresh token must outlive access token");
    }

    #[test]
    fn test_refresh_token_is_not_an_access_token() {
        let service = JwtService::with_config(JwtConfig::for_tests());
        let pair = service.generate_token_pair(subject()).unwrap();
        assert!(matches!(
            service.validate_kind(&pair.refresh_token, TokenKind::Access),
            Err(JwtError::WrongKind {
                expected: TokenKind::Access
            })
        ));
    }

    #[test]
    fn test_regenerated_tokens_differ() {
        let service = JwtService::with_config(JwtConfig::for_tests());
        let a = service.generate_token_pair(subject()).unwrap();
        let b = service.generate_token_pair(subject()).unwrap();
        assert_ne!(a.token, b.token);
        assert_ne!(a.refresh_token, b.refresh_token);
    }

    #[test]
    fn test_expired_token_rejected() {
        let mut config = JwtConfig::for_tests();
        config.access_expiration_minutes = -10;
        let service = JwtService::with_config(config);
        let pair = service.generate_token_pair(subject()).unwrap();
        assert!(matches!(
            service.validate_token(&pair.token),
            Err(JwtError::ExpiredToken)
        ));
    }

    #[test]
    fn test_foreign_secret_rejected() {
        let service = JwtService::with_config(JwtConfig::for_tests());
        let mut other = JwtConfig::for_tests();
        other.secret = "another-secret-key-that-is-long-enough-for-hs256".into();
        let pair = JwtService::with_config(other)
            .generate_token_pair(subject())
            .unwrap();
        assert!(service.validate_token(&pair.token).is_err());
    }

    #[test]
    fn test_extract_from_header() {
        assert_eq!(JwtService::extract_from_header("Bearer abc"), Some("abc"));
        assert_eq!(JwtService::extract_from_header("Basic abc"), None);
        assert_eq!(JwtService::extract_from_header("Bearer "), None);
    }

    #[test]
    fn test_printable_secret() {
        let secret = generate_secure_printable_jwt_secret().unwrap();
        assert_eq!(secret.len(), 64);
        assert!(secret.is_ascii());
    }
}

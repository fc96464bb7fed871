//! 密码哈希
//!
//! Argon2id，成本参数可配置。校验时参数从哈希串本身读取，
//! 所以调整成本不会影响已存储的哈希。

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;

use crate::core::config::env_parse;

/// Argon2 成本参数
///
/// | 环境变量 | 默认值 |
/// |----------|--------|
/// | ARGON2_MEMORY_KIB | 19456 |
/// | ARGON2_ITERATIONS | 2 |
/// | ARGON2_PARALLELISM | 1 |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

impl PasswordConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            memory_kib: env_parse("ARGON2_MEMORY_KIB", defaults.memory_kib),
            iterations: env_parse("ARGON2_ITERATIONS", defaults.iterations),
            parallelism: env_parse("ARGON2_PARALLELISM", defaults.parallelism),
        }
    }

    /// 测试用的低成本参数
    pub fn for_tests() -> Self {
        Self {
            memory_kib: 64,
            iterations: 1,
            parallelism: 1,
        }
    }
}

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("invalid argon2 parameters: {0}")]
    Params(String),

    #[error("password hashing failed: {0}")]
    Hash(String),
}

/// 密码哈希服务
#[derive(Debug, Clone)]
pub struct PasswordService {
    config: PasswordConfig,
    /// 用户不存在时用于校验的哈希，成本参数与真实哈希相同
    dummy_hash: Option<String>,
}

impl PasswordService {
    pub fn new(config: PasswordConfig) -> Self {
        let mut service = Self {
            config,
            dummy_hash: None,
        };
        service.dummy_hash = service.hash_password("no-such-user").ok();
        service
    }

    fn hasher(&self) -> Result<Argon2<'static>, PasswordError> {
        let params = Params::new(
            self.config.memory_kib,
            self.config.iterations,
            self.config.parallelism,
            None,
        )
        .map_err(|e| PasswordError::Params(e.to_string()))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }

    /// Hash password using argon2 with a fresh random salt
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .hasher()?
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| PasswordError::Hash(e.to_string()))?;
        Ok(hash.to_string())
    }

    /// Verify a password against a stored PHC hash string
    ///
    /// A malformed stored hash counts as a mismatch.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(stored_hash) {
            Ok(h) => h,
            Err(e) => {
                tracing::warn!(error = %e, "Stored password hash is malformed");
                return false;
            }
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }

    /// Run a full verification for an unknown account; always a mismatch
    ///
    /// Keeps the unknown-email path as slow as the wrong-password path.
    pub fn verify_unknown_user(&self, password: &str) -> bool {
        if let Some(hash) = &self.dummy_hash {
            let _ = self.verify_password(password, hash);
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let service = PasswordService::new(PasswordConfig::for_tests());
        let hash = service.hash_password("correct horse").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(service.verify_password("correct horse", &hash));
        assert!(!service.verify_password("wrong horse", &hash));
    }

    #[test]
    fn test_same_password_different_salt() {
        let service = PasswordService::new(PasswordConfig::for_tests());
        let a = service.hash_password("secret").unwrap();
        let b = service.hash_password("secret").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_malformed_hash_is_mismatch() {
        let service = PasswordService::new(PasswordConfig::for_tests());
        assert!(!service.verify_password("secret", "not-a-phc-string"));
    }

    #[test]
    fn test_unknown_user_runs_real_verification() {
        let service = PasswordService::new(PasswordConfig::for_tests());
        let dummy = service.dummy_hash.as_deref().unwrap();
        assert!(dummy.starts_with("$argon2id$v=19$m=64,t=1,p=1$"));
        assert!(!service.verify_unknown_user("no-such-user"));
        assert!(!service.verify_unknown_user(""));
    }

    #[test]
    fn test_invalid_params_rejected() {
        let service = PasswordService::new(PasswordConfig {
            memory_kib: 1,
            iterations: 0,
            parallelism: 1,
        });
        assert!(matches!(
            service.hash_password("secret"),
            Err(PasswordError::Params(_))
        ));
    }
}

//! Database Module
//!
//! Embedded SurrealDB: RocksDB on disk, in-memory engine for tests and
//! `DATABASE_PATH=memory`.

pub mod collection;
pub mod models;
pub mod repository;

pub use collection::{Collection, Filter, UpdateResult};

use std::path::Path;

use anyhow::Context;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

use crate::core::Config;

/// Database service - owns the embedded SurrealDB client
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open the configured engine and select namespace/database
    pub async fn open(config: &Config) -> anyhow::Result<Self> {
        let db = if config.uses_memory_database() {
            Surreal::new::<Mem>(())
                .await
                .context("Failed to open in-memory database")?
        } else {
            let path = Path::new(&config.database_path);
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create database directory {}", parent.display())
                })?;
            }
            Surreal::new::<RocksDb>(path)
                .await
                .with_context(|| format!("Failed to open database at {}", path.display()))?
        };

        db.use_ns(config.db_namespace.as_str())
            .use_db(config.db_name.as_str())
            .await
            .context("Failed to select namespace/database")?;

        tracing::info!(
            path = %config.database_path,
            namespace = %config.db_namespace,
            database = %config.db_name,
            "Database connection established"
        );

        Ok(Self { db })
    }
}

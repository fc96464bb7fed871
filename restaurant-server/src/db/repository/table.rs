//! Dining Table Repository

use super::{RepoResult, required};
use crate::db::collection::{Collection, Filter, UpdateResult};
use crate::db::models::{Table, TableCreate, TableUpdate};
use shared::util::{new_record_key, now_millis};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "dining_table";
const ID_FIELD: &str = "table_id";

#[derive(Clone)]
pub struct TableRepository {
    tables: Collection<Table>,
}

impl TableRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            tables: Collection::new(db, TABLE, ID_FIELD),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Table>> {
        self.tables.find(&Filter::all()).await
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Table>> {
        self.tables.find_by_key(id).await
    }

    pub async fn find_by_ids(&self, ids: &[String]) -> RepoResult<Vec<Table>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.tables
            .find(&Filter::is_in(ID_FIELD, ids.iter().cloned()))
            .await
    }

    pub async fn exists(&self, id: &str) -> RepoResult<bool> {
        Ok(self.tables.count(&Filter::eq(ID_FIELD, id)).await? > 0)
    }

    pub async fn create(&self, data: TableCreate) -> RepoResult<Table> {
        let now = now_millis();
        let table_id = new_record_key();
        let table = Table {
            table_id: table_id.clone(),
            table_number: required(data.table_number, "table_number")?,
            number_of_guests: required(data.number_of_guests, "number_of_guests")?,
            created_at: now,
            updated_at: now,
        };
        self.tables.insert_one(&table_id, table).await
    }

    pub async fn update(&self, id: &str, data: TableUpdate) -> RepoResult<UpdateResult> {
        self.tables.update_one(id, &data, true).await
    }
}

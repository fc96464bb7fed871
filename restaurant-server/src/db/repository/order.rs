//! Order Repository

use super::{RepoError, RepoResult, TableRepository};
use crate::db::collection::{Collection, Filter, UpdateResult};
use crate::db::models::{Order, OrderCreate, OrderUpdate};
use shared::util::{new_record_key, now_millis};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "order";
const ID_FIELD: &str = "order_id";

#[derive(Clone)]
pub struct OrderRepository {
    orders: Collection<Order>,
    tables: TableRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            orders: Collection::new(db.clone(), TABLE, ID_FIELD),
            tables: TableRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Order>> {
        self.orders.find(&Filter::all()).await
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        self.orders.find_by_key(id).await
    }

    pub async fn find_by_ids(&self, ids: &[String]) -> RepoResult<Vec<Order>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.orders
            .find(&Filter::is_in(ID_FIELD, ids.iter().cloned()))
            .await
    }

    pub async fn exists(&self, id: &str) -> RepoResult<bool> {
        Ok(self.orders.count(&Filter::eq(ID_FIELD, id)).await? > 0)
    }

    /// 404 unless `table_id` names an existing table
    pub async fn ensure_table(&self, table_id: &str) -> RepoResult<()> {
        if !self.tables.exists(table_id).await? {
            return Err(RepoError::NotFound(format!("Table {table_id} not found")));
        }
        Ok(())
    }

    /// Create an order; `order_date` defaults to now
    pub async fn create(&self, data: OrderCreate) -> RepoResult<Order> {
        if let Some(table_id) = &data.table_id {
            self.ensure_table(table_id).await?;
        }
        let now = now_millis();
        let order = Order {
            order_id: new_record_key(),
            order_date: data.order_date.unwrap_or(now),
            table_id: data.table_id,
            created_at: now,
            updated_at: now,
        };
        self.insert(order).await
    }

    /// Store a fully built order (reference checks are the caller's job)
    pub async fn insert(&self, order: Order) -> RepoResult<Order> {
        let key = order.order_id.clone();
        self.orders.insert_one(&key, order).await
    }

    pub async fn update(&self, id: &str, data: OrderUpdate) -> RepoResult<UpdateResult> {
        if let Some(table_id) = &data.table_id {
            self.ensure_table(table_id).await?;
        }
        self.orders.update_one(id, &data, true).await
    }
}

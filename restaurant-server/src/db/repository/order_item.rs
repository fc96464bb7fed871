//! Order Item Repository

use super::RepoResult;
use crate::db::collection::{Collection, Filter, UpdateResult};
use crate::db::models::{OrderItem, OrderItemUpdate};
use crate::money::normalize_price;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "order_item";
const ID_FIELD: &str = "order_item_id";

#[derive(Clone)]
pub struct OrderItemRepository {
    items: Collection<OrderItem>,
}

impl OrderItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            items: Collection::new(db, TABLE, ID_FIELD),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<OrderItem>> {
        self.items.find(&Filter::all()).await
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<OrderItem>> {
        self.items.find_by_key(id).await
    }

    /// All items of one order
    pub async fn find_by_order(&self, order_id: &str) -> RepoResult<Vec<OrderItem>> {
        self.items.find(&Filter::eq("order_id", order_id)).await
    }

    /// Insert the batch atomically, returning the new ids in input order
    pub async fn insert_many(&self, items: Vec<OrderItem>) -> RepoResult<Vec<String>> {
        let ids: Vec<String> = items.iter().map(|i| i.order_item_id.clone()).collect();
        let docs = items
            .into_iter()
            .map(|item| (item.order_item_id.clone(), item))
            .collect();
        self.items.insert_many(docs).await?;
        Ok(ids)
    }

    /// Upsert an item; a new unit price is normalized
    pub async fn update(&self, id: &str, mut data: OrderItemUpdate) -> RepoResult<UpdateResult> {
        data.unit_price = data.unit_price.map(normalize_price);
        self.items.update_one(id, &data, true).await
    }
}

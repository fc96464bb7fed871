//! Food Repository

use super::{MenuRepository, RepoError, RepoResult, required};
use crate::db::collection::{Collection, Filter, UpdateResult};
use crate::db::models::{Food, FoodCreate, FoodUpdate};
use crate::money::normalize_price;
use shared::util::{new_record_key, now_millis};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "food";
const ID_FIELD: &str = "food_id";

#[derive(Clone)]
pub struct FoodRepository {
    foods: Collection<Food>,
    menus: MenuRepository,
}

impl FoodRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            foods: Collection::new(db.clone(), TABLE, ID_FIELD),
            menus: MenuRepository::new(db),
        }
    }

    /// One page of foods plus the total count
    pub async fn find_page(&self, skip: usize, limit: usize) -> RepoResult<(Vec<Food>, u64)> {
        self.foods.find_page(&Filter::all(), skip, limit).await
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Food>> {
        self.foods.find_by_key(id).await
    }

    /// Foods whose id is in `ids`
    pub async fn find_by_ids(&self, ids: &[String]) -> RepoResult<Vec<Food>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.foods
            .find(&Filter::is_in(ID_FIELD, ids.iter().cloned()))
            .await
    }

    async fn ensure_menu(&self, menu_id: &str) -> RepoResult<()> {
        if !self.menus.exists(menu_id).await? {
            return Err(RepoError::NotFound(format!("Menu {menu_id} not found")));
        }
        Ok(())
    }

    /// Create a food under an existing menu, price normalized
    pub async fn create(&self, data: FoodCreate) -> RepoResult<Food> {
        let menu_id = required(data.menu_id, "menu_id")?;
        self.ensure_menu(&menu_id).await?;

        let now = now_millis();
        let food_id = new_record_key();
        let food = Food {
            food_id: food_id.clone(),
            name: required(data.name, "name")?,
            price: normalize_price(required(data.price, "price")?),
            food_image: required(data.food_image, "food_image")?,
            menu_id,
            created_at: now,
            updated_at: now,
        };
        self.foods.insert_one(&food_id, food).await
    }

    /// Upsert a food; a new menu_id must exist, a new price is normalized
    pub async fn update(&self, id: &str, mut data: FoodUpdate) -> RepoResult<UpdateResult> {
        if let Some(menu_id) = &data.menu_id {
            self.ensure_menu(menu_id).await?;
        }
        data.price = data.price.map(normalize_price);
        self.foods.update_one(id, &data, true).await
    }
}

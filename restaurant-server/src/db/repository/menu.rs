//! Menu Repository

use super::{RepoError, RepoResult, required};
use crate::db::collection::{Collection, Filter, UpdateResult};
use crate::db::models::menu::check_window;
use crate::db::models::{Menu, MenuCreate, MenuUpdate};
use shared::util::{new_record_key, now_millis};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "menu";
const ID_FIELD: &str = "menu_id";

#[derive(Clone)]
pub struct MenuRepository {
    menus: Collection<Menu>,
}

impl MenuRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            menus: Collection::new(db, TABLE, ID_FIELD),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Menu>> {
        self.menus.find(&Filter::all()).await
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Menu>> {
        self.menus.find_by_key(id).await
    }

    pub async fn exists(&self, id: &str) -> RepoResult<bool> {
        Ok(self.menus.count(&Filter::eq(ID_FIELD, id)).await? > 0)
    }

    /// Create a new menu
    pub async fn create(&self, data: MenuCreate) -> RepoResult<Menu> {
        let now = now_millis();
        let menu_id = new_record_key();
        let menu = Menu {
            menu_id: menu_id.clone(),
            name: required(data.name, "name")?,
            category: required(data.category, "category")?,
            start_date: data.start_date,
            end_date: data.end_date,
            created_at: now,
            updated_at: now,
        };
        self.menus.insert_one(&menu_id, menu).await
    }

    /// Update an existing menu; unlike other resources a missing menu is an error
    ///
    /// The validity window is checked against the merged result, so patching
    /// only `end_date` still has to land after the stored `start_date`.
    pub async fn update(&self, id: &str, data: MenuUpdate) -> RepoResult<UpdateResult> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Menu {id} not found")))?;

        check_window(
            data.start_date.or(existing.start_date),
            data.end_date.or(existing.end_date),
        )
        .map_err(|e| RepoError::Validation(e.to_string()))?;

        self.menus.update_one(id, &data, false).await
    }
}

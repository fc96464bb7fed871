//! User Repository
//!
//! Email and phone uniqueness is a count-before-write check; two concurrent
//! signups with the same email can both pass it.

use super::RepoResult;
use crate::db::collection::{Collection, Filter, UpdateResult};
use crate::db::models::{User, UserUpdate};
use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "user";
const ID_FIELD: &str = "user_id";

/// Token columns written after signup / login / refresh
#[derive(Debug, Serialize)]
struct TokenPatch<'a> {
    token: &'a str,
    refresh_token: &'a str,
}

#[derive(Clone)]
pub struct UserRepository {
    users: Collection<User>,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            users: Collection::new(db, TABLE, ID_FIELD),
        }
    }

    /// One page of users plus the total count
    pub async fn find_page(&self, skip: usize, limit: usize) -> RepoResult<(Vec<User>, u64)> {
        self.users.find_page(&Filter::all(), skip, limit).await
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        self.users.find_by_key(id).await
    }

    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        self.users.find_one(&Filter::eq("email", email)).await
    }

    /// Users other than `exclude` holding `value` in `field`
    pub async fn count_with(
        &self,
        field: &'static str,
        value: &str,
        exclude: Option<&str>,
    ) -> RepoResult<u64> {
        let mut filter = Filter::eq(field, value);
        if let Some(user_id) = exclude {
            filter = filter.and_ne(ID_FIELD, user_id);
        }
        self.users.count(&filter).await
    }

    pub async fn insert(&self, user: User) -> RepoResult<User> {
        let key = user.user_id.clone();
        self.users.insert_one(&key, user).await
    }

    /// Overwrite both stored tokens
    pub async fn update_tokens(
        &self,
        id: &str,
        token: &str,
        refresh_token: &str,
    ) -> RepoResult<UpdateResult> {
        self.users
            .update_one(id, &TokenPatch { token, refresh_token }, false)
            .await
    }

    /// Upsert profile fields; `password` must already be hashed
    pub async fn update(&self, id: &str, data: &UserUpdate) -> RepoResult<UpdateResult> {
        self.users.update_one(id, data, true).await
    }
}

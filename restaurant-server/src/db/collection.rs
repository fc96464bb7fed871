//! Collection accessor
//!
//! Typed handle to one named SurrealDB table. Every document carries its
//! public id in a plain field (`food_id`, `order_id`, ...) that equals the
//! record key, so lookups filter on ordinary fields and the Rust models never
//! touch `RecordId`.
//!
//! Primitives: find, find-one, count, insert-one, insert-many,
//! update-one (with optional upsert).

use std::marker::PhantomData;

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::repository::{RepoError, RepoResult};

/// Comparison used by a [`Filter`] clause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Eq,
    Ne,
    In,
}

impl Op {
    fn as_sql(self) -> &'static str {
        match self {
            Op::Eq => "=",
            Op::Ne => "!=",
            Op::In => "IN",
        }
    }
}

/// AND-combined field conditions
///
/// Field names are compile-time constants; only values are bound.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    clauses: Vec<(&'static str, Op, Value)>,
}

impl Filter {
    /// Matches every document
    pub fn all() -> Self {
        Self::default()
    }

    pub fn eq(field: &'static str, value: impl Into<Value>) -> Self {
        Self::all().and_eq(field, value)
    }

    /// Field value is one of `values`
    pub fn is_in<I, V>(field: &'static str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let list: Vec<Value> = values.into_iter().map(Into::into).collect();
        Self {
            clauses: vec![(field, Op::In, Value::Array(list))],
        }
    }

    pub fn and_eq(mut self, field: &'static str, value: impl Into<Value>) -> Self {
        self.clauses.push((field, Op::Eq, value.into()));
        self
    }

    pub fn and_ne(mut self, field: &'static str, value: impl Into<Value>) -> Self {
        self.clauses.push((field, Op::Ne, value.into()));
        self
    }

    /// ` WHERE a = $f0 AND b != $f1` (empty when unfiltered)
    fn where_clause(&self) -> String {
        if self.clauses.is_empty() {
            return String::new();
        }
        let parts: Vec<String> = self
            .clauses
            .iter()
            .enumerate()
            .map(|(i, (field, op, _))| format!("{field} {} $f{i}", op.as_sql()))
            .collect();
        format!(" WHERE {}", parts.join(" AND "))
    }

    fn bindings(&self) -> impl Iterator<Item = (String, Value)> + '_ {
        self.clauses
            .iter()
            .enumerate()
            .map(|(i, (_, _, value))| (format!("f{i}"), value.clone()))
    }
}

/// Outcome of [`Collection::update_one`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateResult {
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upserted_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CountRow {
    count: u64,
}

/// Typed handle to a named table
pub struct Collection<T> {
    db: Surreal<Db>,
    name: &'static str,
    id_field: &'static str,
    _doc: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            name: self.name,
            id_field: self.id_field,
            _doc: PhantomData,
        }
    }
}

impl<T> Collection<T>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    pub fn new(db: Surreal<Db>, name: &'static str, id_field: &'static str) -> Self {
        Self {
            db,
            name,
            id_field,
            _doc: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// All matching documents, oldest first
    pub async fn find(&self, filter: &Filter) -> RepoResult<Vec<T>> {
        let sql = format!(
            "SELECT * FROM type::table($tb){} ORDER BY created_at ASC",
            filter.where_clause()
        );
        let mut query = self.db.query(sql).bind(("tb", self.name));
        for binding in filter.bindings() {
            query = query.bind(binding);
        }
        let docs: Vec<T> = query.await?.take(0)?;
        Ok(docs)
    }

    /// First matching document
    ///
    /// No `LIMIT`: the embedded engine can drop rows when LIMIT meets WHERE.
    pub async fn find_one(&self, filter: &Filter) -> RepoResult<Option<T>> {
        Ok(self.find(filter).await?.into_iter().next())
    }

    /// Document by public id
    pub async fn find_by_key(&self, key: &str) -> RepoResult<Option<T>> {
        self.find_one(&Filter::eq(self.id_field, key)).await
    }

    /// One page of matching documents plus the total match count
    ///
    /// Paged in memory for the same LIMIT/START reason as [`Self::find_one`].
    pub async fn find_page(
        &self,
        filter: &Filter,
        skip: usize,
        limit: usize,
    ) -> RepoResult<(Vec<T>, u64)> {
        let docs = self.find(filter).await?;
        let total = docs.len() as u64;
        Ok((docs.into_iter().skip(skip).take(limit).collect(), total))
    }

    pub async fn count(&self, filter: &Filter) -> RepoResult<u64> {
        let sql = format!(
            "SELECT count() FROM type::table($tb){} GROUP ALL",
            filter.where_clause()
        );
        let mut query = self.db.query(sql).bind(("tb", self.name));
        for binding in filter.bindings() {
            query = query.bind(binding);
        }
        let rows: Vec<CountRow> = query.await?.take(0)?;
        Ok(rows.first().map(|r| r.count).unwrap_or(0))
    }

    /// Insert a document under `key`
    pub async fn insert_one(&self, key: &str, doc: T) -> RepoResult<T> {
        let created: Option<T> = self
            .db
            .create((self.name, key.to_string()))
            .content(doc)
            .await?;
        created.ok_or_else(|| {
            RepoError::Database(format!("Failed to create {} record {}", self.name, key))
        })
    }

    /// Insert all documents in one transaction: either every document is
    /// written or none is.
    pub async fn insert_many(&self, docs: Vec<(String, T)>) -> RepoResult<usize> {
        if docs.is_empty() {
            return Ok(0);
        }
        let count = docs.len();

        let mut sql = String::from("BEGIN TRANSACTION;\n");
        for i in 0..count {
            sql.push_str(&format!(
                "CREATE type::thing($tb, $k{i}) CONTENT $d{i} RETURN NONE;\n"
            ));
        }
        sql.push_str("COMMIT TRANSACTION;");

        let mut query = self.db.query(sql).bind(("tb", self.name));
        for (i, (key, doc)) in docs.into_iter().enumerate() {
            query = query.bind((format!("k{i}"), key)).bind((format!("d{i}"), doc));
        }
        query.await?.check()?;
        Ok(count)
    }

    /// Merge `patch` into the document with public id `key`
    ///
    /// `updated_at` and the id field are always written. With `upsert` a
    /// missing document is created from the patch alone.
    pub async fn update_one<P>(&self, key: &str, patch: &P, upsert: bool) -> RepoResult<UpdateResult>
    where
        P: Serialize,
    {
        let mut data = serde_json::to_value(patch)
            .map_err(|e| RepoError::Validation(format!("Invalid update payload: {e}")))?;
        let Some(fields) = data.as_object_mut() else {
            return Err(RepoError::Validation(
                "Update payload must be an object".to_string(),
            ));
        };
        fields.insert(self.id_field.to_string(), Value::from(key));
        fields.insert("updated_at".to_string(), Value::from(shared::util::now_millis()));

        let matched = self.count(&Filter::eq(self.id_field, key)).await?;
        if matched == 0 && !upsert {
            return Ok(UpdateResult::default());
        }

        let verb = if upsert { "UPSERT" } else { "UPDATE" };
        self.db
            .query(format!(
                "{verb} type::thing($tb, $key) MERGE $data RETURN NONE"
            ))
            .bind(("tb", self.name))
            .bind(("key", key.to_string()))
            .bind(("data", data))
            .await?
            .check()?;

        Ok(if matched > 0 {
            UpdateResult {
                matched_count: matched,
                modified_count: matched,
                upserted_count: 0,
                upserted_id: None,
            }
        } else {
            UpdateResult {
                matched_count: 0,
                modified_count: 0,
                upserted_count: 1,
                upserted_id: Some(key.to_string()),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_where_clause() {
        assert_eq!(Filter::all().where_clause(), "");
        let filter = Filter::eq("email", "a@b.c").and_ne("user_id", "u1");
        assert_eq!(filter.where_clause(), " WHERE email = $f0 AND user_id != $f1");
        let names: Vec<String> = filter.bindings().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["f0", "f1"]);
    }

    #[test]
    fn test_is_in_binds_array() {
        let filter = Filter::is_in("food_id", ["a".to_string(), "b".to_string()]);
        assert_eq!(filter.where_clause(), " WHERE food_id IN $f0");
        let (_, value) = filter.bindings().next().unwrap();
        assert_eq!(value, serde_json::json!(["a", "b"]));
    }
}

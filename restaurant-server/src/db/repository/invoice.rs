//! Invoice Repository

use super::{OrderRepository, RepoError, RepoResult, required};
use crate::db::collection::{Collection, Filter, UpdateResult};
use crate::db::models::invoice::DEFAULT_PAYMENT_STATUS;
use crate::db::models::{Invoice, InvoiceCreate, InvoiceUpdate};
use shared::util::{new_record_key, now_millis};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "invoice";
const ID_FIELD: &str = "invoice_id";

/// Time between invoice creation and payment due date
const PAYMENT_TERM_MS: i64 = 24 * 60 * 60 * 1000;

#[derive(Clone)]
pub struct InvoiceRepository {
    invoices: Collection<Invoice>,
    orders: OrderRepository,
}

impl InvoiceRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            invoices: Collection::new(db.clone(), TABLE, ID_FIELD),
            orders: OrderRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Invoice>> {
        self.invoices.find(&Filter::all()).await
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Invoice>> {
        self.invoices.find_by_key(id).await
    }

    /// Create an invoice for an existing order
    pub async fn create(&self, data: InvoiceCreate) -> RepoResult<Invoice> {
        let order_id = required(data.order_id, "order_id")?;
        if !self.orders.exists(&order_id).await? {
            return Err(RepoError::NotFound(format!("Order {order_id} not found")));
        }

        let now = now_millis();
        let invoice_id = new_record_key();
        let invoice = Invoice {
            invoice_id: invoice_id.clone(),
            order_id,
            payment_method: data.payment_method,
            payment_status: data
                .payment_status
                .unwrap_or_else(|| DEFAULT_PAYMENT_STATUS.to_string()),
            payment_due_date: now + PAYMENT_TERM_MS,
            created_at: now,
            updated_at: now,
        };
        self.invoices.insert_one(&invoice_id, invoice).await
    }

    pub async fn update(&self, id: &str, data: InvoiceUpdate) -> RepoResult<UpdateResult> {
        self.invoices.update_one(id, &data, true).await
    }
}

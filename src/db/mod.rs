use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use crate::config::Config;
use crate::error::{BillingError, Result};
use crate::models::{Client, Invoice, InvoiceItem, NewClient, NewInvoice, NewInvoiceItem};
use crate::store::BillingStore;

/// Database connection pool
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new Database instance with a connection pool
    pub async fn new(config: &Config) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(config.database_url())
            .await?;

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn get_pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply the embedded schema migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|err| BillingError::Unavailable(err.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl BillingStore for Database {
    async fn list_clients(&self) -> Result<Vec<Client>> {
        let clients = sqlx::query_as::<_, Client>(
            "SELECT id, name, email, address FROM clients ORDER BY id ASC",
        )
        .fetch_all(self.get_pool())
        .await?;

        Ok(clients)
    }

    async fn create_client(&self, client: &NewClient) -> Result<i32> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO clients (name, email, address)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&client.name)
        .bind(&client.email)
        .bind(&client.address)
        .fetch_one(self.get_pool())
        .await?;

        Ok(id)
    }

    async fn list_invoices(&self) -> Result<Vec<Invoice>> {
        let invoices = sqlx::query_as::<_, Invoice>(
            "SELECT id, client_id, date, total, tax, status FROM invoices ORDER BY id ASC",
        )
        .fetch_all(self.get_pool())
        .await?;

        Ok(invoices)
    }

    async fn get_invoice(&self, id: i32) -> Result<Invoice> {
        let invoice = sqlx::query_as::<_, Invoice>(
            "SELECT id, client_id, date, total, tax, status FROM invoices WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.get_pool())
        .await?;

        invoice.ok_or(BillingError::NotFound(id))
    }

    async fn create_invoice_header(&self, header: &NewInvoice) -> Result<i32> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO invoices (client_id, date, total, tax, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(header.client_id)
        .bind(header.date)
        .bind(header.total)
        .bind(header.tax)
        .bind(header.status.as_str())
        .fetch_one(self.get_pool())
        .await?;

        Ok(id)
    }

    async fn create_invoice_item(&self, invoice_id: i32, item: &NewInvoiceItem) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO invoice_items (invoice_id, description, quantity, price)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(invoice_id)
        .bind(&item.description)
        .bind(item.quantity)
        .bind(item.price)
        .execute(self.get_pool())
        .await?;

        Ok(())
    }

    async fn list_invoice_items(&self, invoice_id: i32) -> Result<Vec<InvoiceItem>> {
        let items = sqlx::query_as::<_, InvoiceItem>(
            r#"
            SELECT id, invoice_id, description, quantity, price
            FROM invoice_items
            WHERE invoice_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(invoice_id)
        .fetch_all(self.get_pool())
        .await?;

        Ok(items)
    }

    /// Header and items in one transaction: a failed item write rolls the
    /// header back instead of leaving an orphan.
    async fn create_invoice_with_items(
        &self,
        header: &NewInvoice,
        items: &[NewInvoiceItem],
    ) -> Result<i32> {
        // Begin a transaction
        let mut tx = self.pool.begin().await?;

        let invoice_id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO invoices (client_id, date, total, tax, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(header.client_id)
        .bind(header.date)
        .bind(header.total)
        .bind(header.tax)
        .bind(header.status.as_str())
        .fetch_one(&mut *tx)
        .await?;

        // Insert all items, preserving input order
        for item in items {
            sqlx::query(
                r#"
                INSERT INTO invoice_items (invoice_id, description, quantity, price)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(invoice_id)
            .bind(&item.description)
            .bind(item.quantity)
            .bind(item.price)
            .execute(&mut *tx)
            .await?;
        }

        // Commit the transaction
        tx.commit().await?;

        info!(invoice_id, items = items.len(), "invoice persisted");

        Ok(invoice_id)
    }
}

/// Initialize the database connection pool and apply migrations
pub async fn init(config: &Config) -> Result<Database> {
    let db = Database::new(config).await?;

    db.migrate().await?;

    Ok(db)
}

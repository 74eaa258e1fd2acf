use async_trait::async_trait;
use tracing::warn;

use crate::error::{BillingError, Result};
use crate::models::{Client, Invoice, InvoiceItem, NewClient, NewInvoice, NewInvoiceItem};

/// Storage contract for the billing domain. Every operation is individually
/// consistent (read-your-writes); `create_invoice_with_items` is the only
/// multi-row write.
#[async_trait]
pub trait BillingStore: Send + Sync {
    async fn list_clients(&self) -> Result<Vec<Client>>;

    async fn create_client(&self, client: &NewClient) -> Result<i32>;

    /// Header rows only; items are fetched per invoice.
    async fn list_invoices(&self) -> Result<Vec<Invoice>>;

    async fn get_invoice(&self, id: i32) -> Result<Invoice>;

    async fn create_invoice_header(&self, header: &NewInvoice) -> Result<i32>;

    async fn create_invoice_item(&self, invoice_id: i32, item: &NewInvoiceItem) -> Result<()>;

    /// Items in the order they were written for the invoice.
    async fn list_invoice_items(&self, invoice_id: i32) -> Result<Vec<InvoiceItem>>;

    /// Persist a header and its items as one logical write. Stores with
    /// transactions should override this. The default runs the explicit
    /// two-phase protocol and reports a mid-sequence item failure as
    /// `PartialWrite` carrying the orphaned header id, so a caller can
    /// compensate instead of guessing.
    async fn create_invoice_with_items(
        &self,
        header: &NewInvoice,
        items: &[NewInvoiceItem],
    ) -> Result<i32> {
        let header_id = self.create_invoice_header(header).await?;
        for item in items {
            if let Err(err) = self.create_invoice_item(header_id, item).await {
                warn!(header_id, error = %err, "item write failed after header write");
                return Err(BillingError::PartialWrite {
                    header_id,
                    reason: err.to_string(),
                });
            }
        }
        Ok(header_id)
    }
}

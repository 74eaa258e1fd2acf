//! Turns a header draft and an item list into one persisted invoice.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::error::{BillingError, Result};
use crate::models::{InvoiceStatus, NewClient, NewInvoice, NewInvoiceItem};
use crate::money;
use crate::store::BillingStore;

/// Header fields as supplied by the caller. The total is derived during
/// composition, never accepted from outside.
#[derive(Debug, Clone)]
pub struct InvoiceDraft {
    pub client_id: i32,
    /// Calendar date, `yyyy-mm-dd`.
    pub date: String,
    pub tax: Decimal,
    pub status: InvoiceStatus,
}

/// Validate a draft and its items, derive the totals, and persist the whole
/// invoice as one logical write. Returns the new invoice id.
///
/// Nothing is written until every check has passed, so a rejected draft
/// leaves storage untouched.
pub async fn compose_invoice(
    store: &dyn BillingStore,
    draft: &InvoiceDraft,
    items: &[NewInvoiceItem],
) -> Result<i32> {
    if items.is_empty() {
        return Err(BillingError::Validation(
            "an invoice needs at least one item".into(),
        ));
    }
    for item in items {
        item.validate()?;
    }
    if draft.client_id <= 0 {
        return Err(BillingError::Validation(format!(
            "invalid client reference {}",
            draft.client_id
        )));
    }
    let date = NaiveDate::parse_from_str(&draft.date, "%Y-%m-%d").map_err(|err| {
        BillingError::Validation(format!("invalid invoice date {:?}: {}", draft.date, err))
    })?;
    if draft.tax < Decimal::ZERO {
        return Err(BillingError::Validation(format!(
            "tax must not be negative, got {}",
            draft.tax
        )));
    }

    // Line totals are rounded to cents before summation, so the stored total
    // always equals what the rendered document adds up to.
    let subtotal: Decimal = items
        .iter()
        .map(|item| money::round(item.line_total()))
        .sum();
    let tax = money::round(draft.tax);
    let total = subtotal + tax;
    debug!(%subtotal, %tax, %total, "invoice totals derived");

    let header = NewInvoice {
        client_id: draft.client_id,
        date,
        total,
        tax,
        status: draft.status,
    };

    let invoice_id = store.create_invoice_with_items(&header, items).await?;
    info!(invoice_id, client_id = draft.client_id, "invoice composed");

    Ok(invoice_id)
}

/// Validate and persist a new client. Returns the new client id.
pub async fn register_client(store: &dyn BillingStore, client: &NewClient) -> Result<i32> {
    client.validate()?;

    let client_id = store.create_client(client).await?;
    info!(client_id, "client registered");

    Ok(client_id)
}

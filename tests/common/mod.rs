//! Shared test fixtures: an in-memory `BillingStore`.

use std::sync::Mutex;

use async_trait::async_trait;
use carebill::error::{BillingError, Result};
use carebill::models::{Client, Invoice, InvoiceItem, NewClient, NewInvoice, NewInvoiceItem};
use carebill::store::BillingStore;

/// In-memory store. It does not override `create_invoice_with_items`, so
/// invoice composition exercises the trait's two-phase default.
#[derive(Default)]
pub struct MemStore {
    inner: Mutex<Inner>,
    item_write_budget: Mutex<Option<usize>>,
}

#[derive(Default)]
struct Inner {
    clients: Vec<Client>,
    invoices: Vec<Invoice>,
    items: Vec<InvoiceItem>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make item writes fail once this many have succeeded.
    pub fn fail_item_writes_after(&self, successes: usize) {
        *self.item_write_budget.lock().unwrap() = Some(successes);
    }
}

#[async_trait]
impl BillingStore for MemStore {
    async fn list_clients(&self) -> Result<Vec<Client>> {
        Ok(self.inner.lock().unwrap().clients.clone())
    }

    async fn create_client(&self, client: &NewClient) -> Result<i32> {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.clients.len() as i32 + 1;
        inner.clients.push(Client {
            id,
            name: client.name.clone(),
            email: client.email.clone(),
            address: client.address.clone(),
        });
        Ok(id)
    }

    async fn list_invoices(&self) -> Result<Vec<Invoice>> {
        Ok(self.inner.lock().unwrap().invoices.clone())
    }

    async fn get_invoice(&self, id: i32) -> Result<Invoice> {
        self.inner
            .lock()
            .unwrap()
            .invoices
            .iter()
            .find(|invoice| invoice.id == id)
            .cloned()
            .ok_or(BillingError::NotFound(id))
    }

    async fn create_invoice_header(&self, header: &NewInvoice) -> Result<i32> {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.invoices.len() as i32 + 1;
        inner.invoices.push(Invoice {
            id,
            client_id: header.client_id,
            date: header.date,
            total: header.total,
            tax: header.tax,
            status: header.status,
        });
        Ok(id)
    }

    async fn create_invoice_item(&self, invoice_id: i32, item: &NewInvoiceItem) -> Result<()> {
        if let Some(budget) = self.item_write_budget.lock().unwrap().as_mut() {
            if *budget == 0 {
                return Err(BillingError::Unavailable(
                    "injected item write failure".into(),
                ));
            }
            *budget -= 1;
        }

        let mut inner = self.inner.lock().unwrap();
        let id = inner.items.len() as i32 + 1;
        inner.items.push(InvoiceItem {
            id,
            invoice_id,
            description: item.description.clone(),
            quantity: item.quantity,
            price: item.price,
        });
        Ok(())
    }

    async fn list_invoice_items(&self, invoice_id: i32) -> Result<Vec<InvoiceItem>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .items
            .iter()
            .filter(|item| item.invoice_id == invoice_id)
            .cloned()
            .collect())
    }
}

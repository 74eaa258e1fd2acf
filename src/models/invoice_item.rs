use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{BillingError, Result};

/// A single line on an invoice. Items are owned by their invoice: they are
/// written and read only through the parent invoice id.
#[derive(sqlx::FromRow, Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceItem {
    pub id: i32,
    pub invoice_id: i32,
    pub description: String,
    pub quantity: i32,
    pub price: Decimal,
}

impl InvoiceItem {
    /// Derived, never stored.
    pub fn line_total(&self) -> Decimal {
        Decimal::from(self.quantity) * self.price
    }
}

/// One line of a not-yet-persisted invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewInvoiceItem {
    pub description: String,
    pub quantity: i32,
    pub price: Decimal,
}

impl NewInvoiceItem {
    pub fn validate(&self) -> Result<()> {
        if self.description.trim().is_empty() {
            return Err(BillingError::Validation(
                "item description must not be empty".into(),
            ));
        }
        if self.quantity <= 0 {
            return Err(BillingError::Validation(format!(
                "item quantity must be positive, got {}",
                self.quantity
            )));
        }
        if self.price < Decimal::ZERO {
            return Err(BillingError::Validation(format!(
                "item price must not be negative, got {}",
                self.price
            )));
        }
        Ok(())
    }

    pub fn line_total(&self) -> Decimal {
        Decimal::from(self.quantity) * self.price
    }
}

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::Row;
use sqlx::postgres::PgRow;
use thiserror::Error;

/// Payment state of an invoice. Persisted as text, parsed case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceStatus {
    Unpaid,
    Paid,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Unpaid => "Unpaid",
            InvoiceStatus::Paid => "Paid",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error)]
#[error("unrecognized invoice status {0:?}")]
pub struct ParseStatusError(pub String);

impl FromStr for InvoiceStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unpaid" => Ok(InvoiceStatus::Unpaid),
            "paid" => Ok(InvoiceStatus::Paid),
            _ => Err(ParseStatusError(s.to_string())),
        }
    }
}

/// Invoice header. `total` is derived once at composition time and stored;
/// items are immutable afterwards, so it cannot drift.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: i32,
    /// Reference to a client. Deliberately not enforced against the clients
    /// relation; consumers must tolerate a dangling reference.
    pub client_id: i32,
    pub date: NaiveDate,
    pub total: Decimal,
    /// Additive amount, not a percentage.
    pub tax: Decimal,
    pub status: InvoiceStatus,
}

impl<'r> sqlx::FromRow<'r, PgRow> for Invoice {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let status: String = row.try_get("status")?;
        let status = status
            .parse()
            .map_err(|err: ParseStatusError| sqlx::Error::ColumnDecode {
                index: "status".into(),
                source: Box::new(err),
            })?;

        Ok(Self {
            id: row.try_get("id")?,
            client_id: row.try_get("client_id")?,
            date: row.try_get("date")?,
            total: row.try_get("total")?,
            tax: row.try_get("tax")?,
            status,
        })
    }
}

/// Header fields for a new invoice. The composer fills in `total`; it is
/// never accepted from callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewInvoice {
    pub client_id: i32,
    pub date: NaiveDate,
    pub total: Decimal,
    pub tax: Decimal,
    pub status: InvoiceStatus,
}

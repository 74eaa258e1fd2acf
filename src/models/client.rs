use serde::{Deserialize, Serialize};

use crate::error::{BillingError, Result};

/// A billable customer. Immutable once created; invoices hold a non-owning
/// reference to it by id.
#[derive(sqlx::FromRow, Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub address: String,
}

/// Input for creating a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewClient {
    pub name: String,
    pub email: String,
    pub address: String,
}

impl NewClient {
    /// The email check is a shape check, not a deliverability check.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(BillingError::Validation(
                "client name must not be empty".into(),
            ));
        }
        if !self.email.contains('@') {
            return Err(BillingError::Validation(format!(
                "{:?} does not look like an email address",
                self.email
            )));
        }
        Ok(())
    }
}

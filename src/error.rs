use thiserror::Error;

pub type Result<T> = std::result::Result<T, BillingError>;

/// Failure classes surfaced by the billing core.
#[derive(Debug, Error)]
pub enum BillingError {
    /// Malformed input, rejected before any write.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The requested invoice does not exist.
    #[error("invoice {0} not found")]
    NotFound(i32),

    /// An invoice header was written but one of its items was not. The
    /// header id is carried so the caller can compensate.
    #[error("invoice header {header_id} was persisted without all of its items: {reason}")]
    PartialWrite { header_id: i32, reason: String },

    /// The storage collaborator could not be reached or failed. Not retried
    /// here; retry policy belongs to the caller.
    #[error("billing store unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for BillingError {
    fn from(err: sqlx::Error) -> Self {
        BillingError::Unavailable(err.to_string())
    }
}

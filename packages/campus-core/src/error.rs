//! Store error types.

use thiserror::Error;

/// Store operation errors.
#[derive(Error, Debug, Clone)]
pub enum StoreError {
    /// No record with the requested identifier
    #[error("{resource} with id {id} not found")]
    RecordNotFound { resource: &'static str, id: u64 },

    /// Input rejected by model validation
    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// Lock poisoned (RwLock poisoned)
    #[error("Lock poisoned")]
    LockPoisoned,
}

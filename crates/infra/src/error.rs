//! Operation-layer error model.

use thiserror::Error;

use timberledger_core::{DomainError, Money};

pub type OpResult<T> = Result<T, OpError>;

/// Failure of one externally invokable operation.
///
/// Every variant except `Internal` is deterministic and reported with the
/// store untouched; `Internal` covers datastore-level failures where the
/// transaction was rolled back in full.
#[derive(Debug, Error)]
pub enum OpError {
    /// Missing or out-of-range input; no mutation attempted.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Referenced entity absent, or in the wrong status for the transition.
    #[error("not found")]
    NotFound,

    /// A cash-spending guard failed.
    #[error("insufficient funds: required {required}, available {available}")]
    InsufficientFunds { required: Money, available: Money },

    /// The target was already processed (e.g. a decided transfer).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Datastore failure; the transaction was rolled back.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for OpError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::Validation(msg) | DomainError::InvalidId(msg) => {
                OpError::Validation(msg)
            }
            // An invariant violation inside a transaction means the draft
            // state went bad; it is discarded, so surface it as internal.
            DomainError::InvariantViolation(msg) => OpError::Internal(msg),
            DomainError::NotFound => OpError::NotFound,
            DomainError::Conflict(msg) => OpError::Conflict(msg),
            DomainError::InsufficientFunds {
                required,
                available,
            } => OpError::InsufficientFunds {
                required,
                available,
            },
        }
    }
}

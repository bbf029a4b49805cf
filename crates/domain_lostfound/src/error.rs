//! Lost & found domain errors

use thiserror::Error;

use core_kernel::{ClaimId, CoreError, ItemId, PortError};

/// Errors that can occur in the lost & found domain
#[derive(Debug, Error)]
pub enum LostFoundError {
    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),

    #[error("Claim not found: {0}")]
    ClaimNotFound(ClaimId),

    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Incorrect password. Please try again.")]
    IncorrectPassword,

    #[error("Invalid credentials or unauthorized role access.")]
    InvalidCredentials,

    /// A store write failed; `context` is the message shown to callers
    #[error("{context}")]
    Store {
        context: &'static str,
        #[source]
        source: PortError,
    },

    /// The claim is recorded as approved but the item write did not land.
    /// Calling `approve_claim` again with the same claim id finishes the job.
    #[error("Claim {claim_id} was approved but item {item_id} could not be marked claimed")]
    PartialApproval {
        claim_id: ClaimId,
        item_id: ItemId,
        #[source]
        source: PortError,
    },
}

impl LostFoundError {
    pub fn validation(message: impl Into<String>) -> Self {
        LostFoundError::Validation(message.into())
    }

    pub fn invalid_transition(from: impl ToString, to: impl ToString) -> Self {
        LostFoundError::InvalidStatusTransition {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    /// Wraps a port failure under a caller-facing message
    pub fn store(context: &'static str) -> impl FnOnce(PortError) -> Self {
        move |source| LostFoundError::Store { context, source }
    }

    /// Returns true if the error reports a missing item or claim
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            LostFoundError::ItemNotFound(_) | LostFoundError::ClaimNotFound(_)
        )
    }
}

impl From<validator::ValidationErrors> for LostFoundError {
    fn from(errors: validator::ValidationErrors) -> Self {
        LostFoundError::Validation(errors.to_string())
    }
}

impl From<CoreError> for LostFoundError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Validation(msg) => LostFoundError::Validation(msg),
            other => LostFoundError::Validation(other.to_string()),
        }
    }
}

//! Error taxonomy of the chat orchestrator.
//!
//! Directory, delivery, and precondition failures are never propagated as
//! panics or early returns across the orchestrator boundary; every public
//! operation reports them as explicit values in its outcome list.

use thiserror::Error;

use crate::domain::{DeliveryError, DirectoryError};

/// Failure of one chat operation step or one recipient delivery.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    /// The connection directory rejected or failed a call.
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    /// No connection record exists where a user identity was required.
    #[error("user of connection '{0}' is not found")]
    UserUnresolved(String),

    /// The inbound action kind was not recognized.
    #[error("invalid chat action: {0}")]
    InvalidAction(String),

    /// Delivery to one recipient failed; the cause is recorded, not
    /// interpreted.
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

/// Per-recipient result of a send operation.
pub type DeliveryOutcome = Result<(), ChatError>;

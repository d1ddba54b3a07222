use serde::Serialize;
use thiserror::Error;

use crate::services::signer::SignerError;

/// Failures of a single transfer attempt.
///
/// Every variant is terminal for the attempt that produced it. A new attempt
/// always starts from scratch with a fresh blockhash.
#[derive(Error, Debug, Serialize, Clone, PartialEq)]
pub enum TransactionError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("No wallet connected")]
    WalletNotConnected,

    #[error("Account lookup failed: {0}")]
    AccountLookupFailed(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Transaction contains no instructions")]
    EmptyTransaction,

    #[error("Submission failed: {0}")]
    SubmissionFailed(String),

    #[error("Transaction {signature} failed on chain")]
    ConfirmationFailed { signature: String },

    #[error("Transaction {signature} was not confirmed before the deadline")]
    ConfirmationTimedOut { signature: String },

    #[error("Collector notification failed: {0}")]
    SideEffectNotifyFailed(String),

    #[error("Another transaction is already in progress")]
    Busy,

    #[error("Signing failed: {0}")]
    SigningFailed(String),

    #[error("Unable to fetch a recent blockhash: {0}")]
    BlockhashUnavailable(String),
}

impl TransactionError {
    /// Errors detected locally before any network call is made.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            TransactionError::InvalidAddress(_)
                | TransactionError::InvalidAmount(_)
                | TransactionError::EmptyTransaction
        )
    }

    /// The outcome is unknown: funds may or may not have moved.
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, TransactionError::ConfirmationTimedOut { .. })
    }

    /// Signature of the submitted transaction, when the attempt got that far.
    pub fn signature(&self) -> Option<&str> {
        match self {
            TransactionError::ConfirmationFailed { signature }
            | TransactionError::ConfirmationTimedOut { signature } => Some(signature),
            _ => None,
        }
    }
}

impl From<SignerError> for TransactionError {
    fn from(error: SignerError) -> Self {
        match error {
            SignerError::NotConnected => TransactionError::WalletNotConnected,
            other => TransactionError::SigningFailed(other.to_string()),
        }
    }
}

//! Wallet capability.
//!
//! The pipeline never owns keys. It asks an injected signer for its public key
//! and for signatures over a transaction message.

use serde::Serialize;
use thiserror::Error;

mod solana;
pub use solana::*;

#[derive(Error, Debug, Serialize, Clone, PartialEq)]
pub enum SignerError {
    #[error("Wallet is not connected")]
    NotConnected,

    #[error("Invalid key format: {0}")]
    KeyError(String),

    #[error("Failed to sign transaction: {0}")]
    SigningError(String),
}

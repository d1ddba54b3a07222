//! Solana signing for the transfer pipeline.
//!
//! ```text
//! SolanaSignTrait
//!   └── Local (keypair file or in-memory keypair)
//! ```
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use solana_sdk::{pubkey::Pubkey, signature::Signature, transaction::Transaction};
use tracing::debug;

mod local_signer;
pub use local_signer::*;

use super::SignerError;
use crate::{domain::submit_transaction, models::TransactionError, services::SolanaProviderTrait};

#[async_trait]
#[cfg_attr(test, automock)]
/// Trait defining the wallet operations the pipeline relies on.
///
/// Implementations may prompt a user, call a remote wallet or sign locally;
/// the pipeline only sees this interface.
pub trait SolanaSignTrait: Sync + Send {
    /// Public key of the connected wallet.
    ///
    /// Returns `SignerError::NotConnected` when no wallet is available.
    async fn pubkey(&self) -> Result<Pubkey, SignerError>;

    /// Signs a serialized transaction message.
    async fn sign(&self, message: &[u8]) -> Result<Signature, SignerError>;

    /// Signs `transaction` and hands it to the network through `provider`.
    ///
    /// The default signs with [`sign_transaction`] and submits once. Wallets
    /// that broadcast on their own override it.
    async fn sign_and_send(
        &self,
        transaction: Transaction,
        provider: &dyn SolanaProviderTrait,
    ) -> Result<Signature, TransactionError> {
        let (signed, signature) = sign_transaction(self, transaction).await?;
        debug!(signature = %signature, "transaction signed");
        submit_transaction(provider, &signed).await
    }
}

/// Signs a transaction by placing the signer's signature at its slot
/// among the required signers.
///
/// Signatures already present for other signers are preserved.
pub async fn sign_transaction<T: SolanaSignTrait + ?Sized>(
    signer: &T,
    mut transaction: Transaction,
) -> Result<(Transaction, Signature), SignerError> {
    let signer_pubkey = signer.pubkey().await?;

    let signer_index = transaction
        .message
        .account_keys
        .iter()
        .position(|key| *key == signer_pubkey)
        .ok_or_else(|| {
            SignerError::SigningError(
                "Signer public key not found in transaction signers".to_string(),
            )
        })?;

    let num_required = transaction.message.header.num_required_signatures as usize;
    if signer_index >= num_required {
        return Err(SignerError::SigningError(format!(
            "Signer is not marked as a required signer in the transaction (position {signer_index} >= {num_required})"
        )));
    }

    let signature = signer.sign(&transaction.message_data()).await?;

    transaction
        .signatures
        .resize(num_required, Signature::default());
    transaction.signatures[signer_index] = signature;

    Ok((transaction, signature))
}

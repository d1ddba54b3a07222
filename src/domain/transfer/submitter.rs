use solana_sdk::{signature::Signature, transaction::Transaction};
use tracing::{debug, info, warn};

use crate::{
    models::TransactionError,
    services::{SolanaProviderTrait, SolanaSignTrait},
};

/// Broadcasts a fully signed transaction, exactly once.
///
/// A failed send is not retried. The caller decides whether to rebuild and
/// try again with a fresh blockhash.
///
/// # Errors
///
/// * `TransactionError::SigningFailed` when a required signature is missing.
///   Nothing is sent in that case.
/// * `TransactionError::SubmissionFailed` when the network rejects the send.
pub async fn submit_transaction<P: SolanaProviderTrait + ?Sized>(
    provider: &P,
    transaction: &Transaction,
) -> Result<Signature, TransactionError> {
    let required = transaction.message.header.num_required_signatures as usize;
    let signed = transaction.signatures.len() == required
        && transaction
            .signatures
            .iter()
            .all(|signature| *signature != Signature::default());
    if !signed {
        return Err(TransactionError::SigningFailed(
            "transaction is missing required signatures".to_string(),
        ));
    }

    let signature = provider
        .send_transaction(transaction)
        .await
        .map_err(|e| {
            warn!(error = %e, transient = e.is_transient(), "transaction submission failed");
            TransactionError::SubmissionFailed(e.to_string())
        })?;

    info!(signature = %signature, "transaction submitted");
    Ok(signature)
}

/// Has the wallet sign `transaction` and send it through `provider`.
pub async fn sign_and_submit<P, S>(
    provider: &P,
    wallet: &S,
    transaction: Transaction,
) -> Result<Signature, TransactionError>
where
    P: SolanaProviderTrait,
    S: SolanaSignTrait + ?Sized,
{
    let signature = wallet.sign_and_send(transaction, provider).await?;
    debug!(signature = %signature, "wallet returned signature");
    Ok(signature)
}

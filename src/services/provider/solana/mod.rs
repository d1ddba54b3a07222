//! Solana Provider Module
//!
//! This module provides an abstraction layer over the Solana RPC client,
//! offering the operations the transfer pipeline needs: balance lookup,
//! account existence checks, fetching the latest blockhash, sending
//! transactions and reading signature statuses.
//!
//! The provider uses the non-blocking `RpcClient`. Every call is made exactly
//! once; retry policy belongs to the caller.
//!
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use reqwest::Url;
use serde::Serialize;
use solana_client::{
    client_error::{ClientError, ClientErrorKind},
    nonblocking::rpc_client::RpcClient,
};
use solana_sdk::{
    account::Account, commitment_config::CommitmentConfig, hash::Hash, pubkey::Pubkey,
    signature::Signature, transaction::Transaction,
};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::models::ConfirmationStatus;

/// Utility function to match error patterns by normalizing both strings.
/// Removes spaces and converts to lowercase for flexible matching.
fn matches_error_pattern(error_msg: &str, pattern: &str) -> bool {
    let normalized_msg = error_msg.to_lowercase().replace(' ', "");
    let normalized_pattern = pattern.to_lowercase().replace(' ', "");
    normalized_msg.contains(&normalized_pattern)
}

/// Errors that can occur when interacting with the Solana provider.
#[derive(Error, Debug, Serialize, Clone, PartialEq)]
pub enum SolanaProviderError {
    /// Network/IO error (connection issues, timeouts)
    #[error("Network error: {0}")]
    NetworkError(String),

    /// RPC protocol error (node lag, sync pending, unknown codes)
    #[error("RPC error: {0}")]
    RpcError(String),

    /// HTTP request error with status code
    #[error("Request error (HTTP {status_code}): {error}")]
    RequestError { error: String, status_code: u16 },

    /// Invalid address format
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Network configuration error (bad URL, unsupported operation)
    #[error("Network configuration error: {0}")]
    NetworkConfiguration(String),

    /// Insufficient funds for transaction
    #[error("Insufficient funds for transaction: {0}")]
    InsufficientFunds(String),

    /// Blockhash not found or expired; the transaction must be rebuilt
    #[error("Blockhash not found or expired: {0}")]
    BlockhashNotFound(String),

    /// Invalid transaction structure or execution
    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),

    /// Transaction already processed
    #[error("Transaction already processed: {0}")]
    AlreadyProcessed(String),
}

impl SolanaProviderError {
    /// Whether the same request could succeed if the user tries again later.
    ///
    /// The pipeline never retries on its own; this only shapes the message
    /// shown to the user.
    pub fn is_transient(&self) -> bool {
        match self {
            SolanaProviderError::NetworkError(_) => true,
            SolanaProviderError::RpcError(_) => true,
            SolanaProviderError::BlockhashNotFound(_) => true,

            SolanaProviderError::RequestError { status_code, .. } => match *status_code {
                501 | 505 => false,
                500 | 502..=504 | 506..=599 => true,
                408 | 425 | 429 => true,
                _ => false,
            },

            SolanaProviderError::InsufficientFunds(_) => false,
            SolanaProviderError::InvalidTransaction(_) => false,
            SolanaProviderError::AlreadyProcessed(_) => false,
            SolanaProviderError::InvalidAddress(_) => false,
            SolanaProviderError::NetworkConfiguration(_) => false,
        }
    }

    /// Classifies a Solana RPC client error into the appropriate error variant.
    pub fn from_rpc_error(error: ClientError) -> Self {
        match error.kind() {
            ClientErrorKind::Io(_) => SolanaProviderError::NetworkError(error.to_string()),

            ClientErrorKind::Reqwest(reqwest_err) => {
                if let Some(status) = reqwest_err.status() {
                    SolanaProviderError::RequestError {
                        error: error.to_string(),
                        status_code: status.as_u16(),
                    }
                } else {
                    SolanaProviderError::NetworkError(error.to_string())
                }
            }

            ClientErrorKind::RpcError(rpc_err) => {
                let rpc_err_str = format!("{rpc_err}");
                Self::from_rpc_response_error(&rpc_err_str, &error)
            }

            ClientErrorKind::TransactionError(tx_error) => {
                Self::from_transaction_error(tx_error, &error)
            }

            ClientErrorKind::Custom(msg) => Self::from_rpc_response_error(msg, &error),

            _ => SolanaProviderError::RpcError(error.to_string()),
        }
    }

    /// Classifies RPC response errors using JSON-RPC error codes and messages.
    ///
    /// - `-32002`: simulation failed, refined by message
    /// - `-32003`, `-32013`, `-32015`, `-32602`: malformed or unsupported transaction
    /// - `-32004`, `-32005`, `-32014`, `-32016`: node not ready
    /// - `-32007`, `-32010`: data unavailable on this node
    /// - `-32008`: blockhash not found
    /// - `-32009`: already processed
    fn from_rpc_response_error(rpc_err: &str, full_error: &ClientError) -> Self {
        let message = full_error.to_string();

        if rpc_err.contains("-32002") {
            if matches_error_pattern(rpc_err, "blockhash not found") {
                SolanaProviderError::BlockhashNotFound(message)
            } else if matches_error_pattern(rpc_err, "insufficient funds") {
                SolanaProviderError::InsufficientFunds(message)
            } else {
                SolanaProviderError::InvalidTransaction(message)
            }
        } else if ["-32003", "-32013", "-32015", "-32602"]
            .iter()
            .any(|code| rpc_err.contains(code))
        {
            SolanaProviderError::InvalidTransaction(message)
        } else if ["-32004", "-32005", "-32014", "-32016"]
            .iter()
            .any(|code| rpc_err.contains(code))
        {
            SolanaProviderError::RpcError(message)
        } else if rpc_err.contains("-32007") || rpc_err.contains("-32010") {
            SolanaProviderError::NetworkConfiguration(message)
        } else if rpc_err.contains("-32008") {
            SolanaProviderError::BlockhashNotFound(message)
        } else if rpc_err.contains("-32009") {
            SolanaProviderError::AlreadyProcessed(message)
        } else if matches_error_pattern(rpc_err, "insufficient funds") {
            SolanaProviderError::InsufficientFunds(message)
        } else if matches_error_pattern(rpc_err, "blockhash not found") {
            SolanaProviderError::BlockhashNotFound(message)
        } else if matches_error_pattern(rpc_err, "already processed") {
            SolanaProviderError::AlreadyProcessed(message)
        } else {
            SolanaProviderError::RpcError(message)
        }
    }

    /// Classifies a Solana TransactionError into the appropriate error variant.
    fn from_transaction_error(
        tx_error: &solana_sdk::transaction::TransactionError,
        full_error: &ClientError,
    ) -> Self {
        use solana_sdk::transaction::TransactionError as TxErr;

        match tx_error {
            TxErr::InsufficientFundsForFee | TxErr::InsufficientFundsForRent { .. } => {
                SolanaProviderError::InsufficientFunds(full_error.to_string())
            }
            TxErr::BlockhashNotFound => {
                SolanaProviderError::BlockhashNotFound(full_error.to_string())
            }
            TxErr::AlreadyProcessed => {
                SolanaProviderError::AlreadyProcessed(full_error.to_string())
            }
            TxErr::AccountInUse | TxErr::AccountLoadedTwice | TxErr::ClusterMaintenance => {
                SolanaProviderError::RpcError(full_error.to_string())
            }
            _ => SolanaProviderError::InvalidTransaction(full_error.to_string()),
        }
    }
}

/// Network operations consumed by the transfer pipeline.
#[async_trait]
#[cfg_attr(test, automock)]
pub trait SolanaProviderTrait: Send + Sync {
    /// Retrieves the balance (in lamports) for the given address.
    async fn get_balance(&self, address: &Pubkey) -> Result<u64, SolanaProviderError>;

    /// Retrieves account data, `None` when the account does not exist.
    ///
    /// A missing account is not an error; only a failed lookup is.
    async fn get_account_info(
        &self,
        address: &Pubkey,
    ) -> Result<Option<Account>, SolanaProviderError>;

    /// Retrieves the latest blockhash.
    async fn get_latest_blockhash(&self) -> Result<Hash, SolanaProviderError>;

    /// Sends a signed transaction to the network.
    async fn send_transaction(
        &self,
        transaction: &Transaction,
    ) -> Result<Signature, SolanaProviderError>;

    /// Reads the current settlement status of a signature.
    ///
    /// A signature the cluster has not seen yet reports `Pending`.
    async fn get_transaction_status(
        &self,
        signature: &Signature,
    ) -> Result<ConfirmationStatus, SolanaProviderError>;
}

pub struct SolanaProvider {
    client: RpcClient,
    url: String,
    // Default timeout in seconds
    timeout_seconds: Duration,
    // Default commitment level
    commitment: CommitmentConfig,
}

impl std::fmt::Debug for SolanaProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolanaProvider")
            .field("url", &self.url)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("commitment", &self.commitment)
            .finish()
    }
}

impl SolanaProvider {
    pub fn new(url: &str, timeout_seconds: u64) -> Result<Self, SolanaProviderError> {
        Self::new_with_commitment(url, timeout_seconds, CommitmentConfig::confirmed())
    }

    /// Creates a new SolanaProvider for a single RPC endpoint.
    ///
    /// # Arguments
    ///
    /// * `url` - RPC endpoint, must be an absolute http(s) URL
    /// * `timeout_seconds` - Request timeout
    /// * `commitment` - Commitment level used for reads
    pub fn new_with_commitment(
        url: &str,
        timeout_seconds: u64,
        commitment: CommitmentConfig,
    ) -> Result<Self, SolanaProviderError> {
        let rpc_url: Url = url.parse().map_err(|e| {
            SolanaProviderError::NetworkConfiguration(format!("Invalid URL format: {e}"))
        })?;
        if !matches!(rpc_url.scheme(), "http" | "https") {
            return Err(SolanaProviderError::NetworkConfiguration(format!(
                "Unsupported URL scheme: {}",
                rpc_url.scheme()
            )));
        }

        let timeout_seconds = Duration::from_secs(timeout_seconds);
        let client = RpcClient::new_with_timeout_and_commitment(
            rpc_url.to_string(),
            timeout_seconds,
            commitment,
        );

        Ok(Self {
            client,
            url: rpc_url.to_string(),
            timeout_seconds,
            commitment,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl SolanaProviderTrait for SolanaProvider {
    async fn get_balance(&self, address: &Pubkey) -> Result<u64, SolanaProviderError> {
        self.client
            .get_balance(address)
            .await
            .map_err(SolanaProviderError::from_rpc_error)
    }

    async fn get_account_info(
        &self,
        address: &Pubkey,
    ) -> Result<Option<Account>, SolanaProviderError> {
        self.client
            .get_account_with_commitment(address, self.commitment)
            .await
            .map(|response| response.value)
            .map_err(SolanaProviderError::from_rpc_error)
    }

    async fn get_latest_blockhash(&self) -> Result<Hash, SolanaProviderError> {
        self.client
            .get_latest_blockhash()
            .await
            .map_err(SolanaProviderError::from_rpc_error)
    }

    async fn send_transaction(
        &self,
        transaction: &Transaction,
    ) -> Result<Signature, SolanaProviderError> {
        self.client
            .send_transaction(transaction)
            .await
            .map_err(SolanaProviderError::from_rpc_error)
    }

    async fn get_transaction_status(
        &self,
        signature: &Signature,
    ) -> Result<ConfirmationStatus, SolanaProviderError> {
        let result = self
            .client
            .get_signature_statuses(&[*signature])
            .await
            .map_err(SolanaProviderError::from_rpc_error)?;

        let status = match result.value.into_iter().next().flatten() {
            Some(v) if v.err.is_some() => ConfirmationStatus::Failed,
            Some(v) if v.satisfies_commitment(CommitmentConfig::finalized()) => {
                ConfirmationStatus::Finalized
            }
            Some(v) if v.satisfies_commitment(CommitmentConfig::confirmed()) => {
                ConfirmationStatus::Confirmed
            }
            Some(_) => ConfirmationStatus::Processed,
            None => ConfirmationStatus::Pending,
        };

        debug!(signature = %signature, status = %status, "fetched signature status");
        Ok(status)
    }
}

use serde::Serialize;
use solana_sdk::{pubkey::Pubkey, signature::Signature};

use super::ConfirmationStatus;

/// Settled transfer, reported to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferOutcome {
    #[serde(serialize_with = "serialize_display")]
    pub signature: Signature,
    pub status: ConfirmationStatus,
    pub explorer_link: String,
    /// Associated accounts created by this transaction.
    #[serde(serialize_with = "serialize_display_list")]
    pub created_accounts: Vec<Pubkey>,
}

fn serialize_display<T: std::fmt::Display, S: serde::Serializer>(
    value: &T,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

#[allow(clippy::ptr_arg)]
fn serialize_display_list<T: std::fmt::Display, S: serde::Serializer>(
    values: &Vec<T>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(values.iter().map(|v| v.to_string()))
}

use solana_sdk::signature::Signature;

use crate::models::SolanaNetwork;

/// Link to a transaction on the block explorer:
/// `<explorer-base>/tx/<signature>?cluster=<network>`.
pub fn explorer_transaction_link(
    explorer_base_url: &str,
    signature: &Signature,
    network: SolanaNetwork,
) -> String {
    format!(
        "{}/tx/{signature}?cluster={network}",
        explorer_base_url.trim_end_matches('/')
    )
}

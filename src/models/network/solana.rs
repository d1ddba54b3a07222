use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Public Solana clusters.
///
/// The string form is the `cluster` query parameter understood by the explorer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SolanaNetwork {
    #[default]
    Devnet,
    Testnet,
    MainnetBeta,
}

impl SolanaNetwork {
    /// Public RPC endpoint of the cluster.
    pub fn default_rpc_url(&self) -> &'static str {
        match self {
            SolanaNetwork::Devnet => "https://api.devnet.solana.com",
            SolanaNetwork::Testnet => "https://api.testnet.solana.com",
            SolanaNetwork::MainnetBeta => "https://api.mainnet-beta.solana.com",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_cluster_names() {
        assert_eq!(SolanaNetwork::Devnet.to_string(), "devnet");
        assert_eq!(SolanaNetwork::MainnetBeta.to_string(), "mainnet-beta");
        assert_eq!(
            SolanaNetwork::from_str("mainnet-beta").unwrap(),
            SolanaNetwork::MainnetBeta
        );
        assert!(SolanaNetwork::from_str("localnet").is_err());
    }

    #[test]
    fn test_default_rpc_urls() {
        assert_eq!(
            SolanaNetwork::Testnet.default_rpc_url(),
            "https://api.testnet.solana.com"
        );
        assert_eq!(SolanaNetwork::default(), SolanaNetwork::Devnet);
    }
}

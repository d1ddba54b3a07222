use std::{env, str::FromStr, time::Duration};

use crate::{
    constants::{
        get_default_confirmation_poll_interval, get_default_confirmation_timeout,
        DEFAULT_CONFIRMATION_POLL_INTERVAL_MS, DEFAULT_CONFIRMATION_TIMEOUT_SECONDS,
        DEFAULT_EXPLORER_BASE_URL, DEFAULT_RPC_TIMEOUT_SECONDS,
    },
    models::SolanaNetwork,
};

#[derive(Debug, Clone, PartialEq)]
pub struct SenderConfig {
    pub network: SolanaNetwork,
    pub rpc_url: String,
    pub rpc_timeout_seconds: u64,
    pub explorer_base_url: String,
    /// Endpoint notified after an unpack settles. Unset disables notifications.
    pub collector_url: Option<String>,
    pub confirmation_timeout: Duration,
    pub confirmation_poll_interval: Duration,
}

impl Default for SenderConfig {
    fn default() -> Self {
        let network = SolanaNetwork::default();
        Self {
            network,
            rpc_url: network.default_rpc_url().to_string(),
            rpc_timeout_seconds: DEFAULT_RPC_TIMEOUT_SECONDS,
            explorer_base_url: DEFAULT_EXPLORER_BASE_URL.to_string(),
            collector_url: None,
            confirmation_timeout: get_default_confirmation_timeout(),
            confirmation_poll_interval: get_default_confirmation_poll_interval(),
        }
    }
}

impl SenderConfig {
    /// Reads the configuration from environment variables.
    ///
    /// Missing or unparseable values fall back to their defaults.
    pub fn from_env() -> Self {
        let network = env::var("SOLANA_NETWORK")
            .ok()
            .and_then(|value| SolanaNetwork::from_str(value.trim()).ok())
            .unwrap_or_default();

        Self {
            network,
            rpc_url: non_empty_var("SOLANA_RPC_URL")
                .unwrap_or_else(|| network.default_rpc_url().to_string()),
            rpc_timeout_seconds: parse_var("RPC_TIMEOUT_SECONDS")
                .unwrap_or(DEFAULT_RPC_TIMEOUT_SECONDS),
            explorer_base_url: non_empty_var("EXPLORER_BASE_URL")
                .unwrap_or_else(|| DEFAULT_EXPLORER_BASE_URL.to_string()),
            collector_url: non_empty_var("COLLECTOR_URL"),
            confirmation_timeout: Duration::from_secs(
                parse_var("CONFIRMATION_TIMEOUT_SECONDS")
                    .unwrap_or(DEFAULT_CONFIRMATION_TIMEOUT_SECONDS),
            ),
            confirmation_poll_interval: Duration::from_millis(
                parse_var("CONFIRMATION_POLL_INTERVAL_MS")
                    .filter(|interval: &u64| *interval > 0)
                    .unwrap_or(DEFAULT_CONFIRMATION_POLL_INTERVAL_MS),
            ),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_var<T: FromStr>(key: &str) -> Option<T> {
    non_empty_var(key).and_then(|value| value.parse().ok())
}

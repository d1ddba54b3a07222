//! Constants for Solana transaction processing.
//!
//! Default timing for confirmation polling and the fixed values of the Solana
//! protocol the transfer pipeline depends on.

use std::time::Duration;

/// Decimal places of the native SOL amount.
pub const SOL_DECIMALS: u8 = 9;

/// Delay between two signature status checks, in milliseconds.
pub const DEFAULT_CONFIRMATION_POLL_INTERVAL_MS: u64 = 2_000;

/// Shortest delay the poller accepts between two status checks, in milliseconds.
pub const MIN_CONFIRMATION_POLL_INTERVAL_MS: u64 = 5;

/// Time after which an unconfirmed transaction is reported as timed out, in seconds.
///
/// A blockhash stays valid for roughly 150 slots (about a minute), so a
/// transaction still unseen after this window is unlikely to land.
pub const DEFAULT_CONFIRMATION_TIMEOUT_SECONDS: u64 = 60;

/// Explorer used for transaction links.
pub const DEFAULT_EXPLORER_BASE_URL: &str = "https://explorer.solana.com";

pub fn get_default_confirmation_poll_interval() -> Duration {
    Duration::from_millis(DEFAULT_CONFIRMATION_POLL_INTERVAL_MS)
}

pub fn get_default_confirmation_timeout() -> Duration {
    Duration::from_secs(DEFAULT_CONFIRMATION_TIMEOUT_SECONDS)
}

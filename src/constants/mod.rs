//! Protocol constants and configuration defaults.

mod http_client;
pub use http_client::*;

mod logging;
pub use logging::*;

mod solana_transaction;
pub use solana_transaction::*;

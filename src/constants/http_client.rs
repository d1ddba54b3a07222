/// Overall timeout for a collector notification request, in seconds.
pub const COLLECTOR_REQUEST_TIMEOUT_SECONDS: u64 = 10;

/// Default timeout for Solana RPC requests, in seconds.
pub const DEFAULT_RPC_TIMEOUT_SECONDS: u64 = 30;

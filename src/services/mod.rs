//! # Services Module
//!
//! External capabilities the transfer pipeline calls into: the Solana network,
//! the wallet, and the collector service.

pub mod notification;
pub use notification::*;

pub mod provider;
pub use provider::*;

pub mod signer;
pub use signer::*;

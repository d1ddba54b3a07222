//! Wallet-side transfer pipeline for Solana.
//!
//! Native SOL transfers, fungible token transfers and the unpack action, each
//! built into one atomic transaction, signed by the connected wallet,
//! submitted once and polled until it settles.

pub mod config;
pub mod constants;
pub mod domain;
pub mod logging;
pub mod models;
pub mod services;
pub mod utils;

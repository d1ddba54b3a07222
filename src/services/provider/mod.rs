//! Network access for the transfer pipeline.

mod solana;
pub use solana::*;

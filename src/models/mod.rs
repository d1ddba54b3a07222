//! # Models
//!
//! Data types shared by the transfer pipeline: addresses, requests, statuses
//! and the error taxonomy.

mod address;
pub use address::*;

mod error;
pub use error::*;

mod network;
pub use network::*;

mod transaction;
pub use transaction::*;

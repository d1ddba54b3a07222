//! # Domain Module
//!
//! Core domain logic of the sender:
//!
//! * Associated token account resolution
//! * Instruction building and transaction assembly
//! * Submission and confirmation of transfers

pub mod transfer;
pub use transfer::*;

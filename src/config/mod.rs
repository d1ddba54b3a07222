//! Configuration read from the process environment.

mod sender_config;
pub use sender_config::*;

//! Transfer pipeline.
//!
//! ```text
//! parse_address → AccountResolver → instruction builders → assemble
//!   → sign_and_submit → ConfirmationPoller
//! ```
//!
//! [`SessionContext`] drives the stages in that order for one request.

mod assembler;
mod confirmation;
mod instruction;
mod session;
mod submitter;
mod token;

pub use assembler::*;
pub use confirmation::*;
pub use instruction::*;
pub use session::*;
pub use submitter::*;
pub use token::*;

mod explorer;
pub use explorer::*;

mod token;
pub use token::*;

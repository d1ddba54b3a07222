mod account;
pub use account::*;

mod request;
pub use request::*;

mod response;
pub use response::*;

mod status;
pub use status::*;

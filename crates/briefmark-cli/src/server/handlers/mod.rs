//! API request handlers.

mod export;
mod session;
mod upload;

pub use export::*;
pub use session::*;
pub use upload::*;

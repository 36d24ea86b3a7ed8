pub mod config;
pub mod error;
pub mod room;
pub mod signaling;

pub use config::*;
pub use error::*;
pub use room::*;
pub use signaling::*;

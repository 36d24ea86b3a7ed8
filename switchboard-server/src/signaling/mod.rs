mod connections;
mod lifecycle;
mod output;
mod router;
mod service;
mod ws_handler;

pub use connections::*;
pub use lifecycle::*;
pub use output::*;
pub use router::*;
pub use service::*;
pub use ws_handler::*;

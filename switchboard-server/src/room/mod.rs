mod registry;
mod topology;

pub use registry::*;
pub use topology::*;

pub mod log;
pub mod slice;

pub use log::*;
pub use slice::*;

mod memory;
mod upload;

pub use memory::*;
pub use upload::*;

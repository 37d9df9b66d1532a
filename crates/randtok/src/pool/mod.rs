mod interface;
mod symbols;

pub use interface::*;
pub use symbols::*;

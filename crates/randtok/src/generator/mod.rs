mod custom;
mod integer;
mod interface;
mod string;
mod unicode;

pub use custom::*;
pub use integer::*;
pub use interface::*;
pub use string::*;
pub use unicode::*;

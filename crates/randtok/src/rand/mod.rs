mod interface;
mod lock;
mod thread;

pub use interface::*;
pub use lock::*;
pub use thread::*;

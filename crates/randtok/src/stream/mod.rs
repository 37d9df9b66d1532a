mod builder;
#[cfg(feature = "parallel")]
mod parallel;
mod sequence;
#[cfg(test)]
mod tests;
mod tracker;

pub use builder::*;
#[cfg_attr(docsrs, doc(cfg(feature = "parallel")))]
#[cfg(feature = "parallel")]
pub use parallel::*;
pub use sequence::*;
pub use tracker::*;

#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
mod generator;
mod mutex;
mod pool;
mod preset;
mod rand;
#[cfg(feature = "serde")]
mod serde;
mod stream;

pub use crate::error::*;
pub use crate::generator::*;
pub use crate::pool::*;
pub use crate::preset::*;
pub use crate::rand::*;
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
#[cfg(feature = "serde")]
pub use crate::serde::*;
pub use crate::stream::*;
pub use num_bigint::BigUint;

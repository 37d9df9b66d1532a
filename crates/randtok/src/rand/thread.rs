use crate::RandSource;
use rand::{Rng, rng};

/// A `RandSource` backed by `rand::rng()`.
///
/// Every draw fetches the calling thread's RNG and asks it for one
/// `random_range(0..upper)`, so nothing is stored here and the type is a
/// `Copy` zero-sized handle. Workers of a parallel fan-out each hit their own
/// thread's RNG and never contend.
///
/// Draws cannot be replayed; use [`LockRandom`] with a seed for that.
///
/// [`LockRandom`]: crate::LockRandom
#[derive(Default, Clone, Copy, Debug)]
pub struct ThreadRandom;

impl RandSource for ThreadRandom {
    fn rand_below(&self, upper: usize) -> usize {
        rng().random_range(0..upper)
    }
}

use std::sync::Arc;

/// A source of uniformly distributed integers.
///
/// Generators call [`RandSource::rand_below`] once per drawn symbol. The trait
/// takes `&self` so a single source can be shared by every worker of a
/// parallel sequence; implementations that keep mutable state must therefore
/// synchronize internally (see [`LockRandom`]) or keep their state per thread
/// (see [`ThreadRandom`]).
///
/// This abstraction allows you to plug in a real random source or a mocked
/// one in tests.
///
/// # Example
/// ```
/// use randtok::RandSource;
///
/// struct FixedRand;
/// impl RandSource for FixedRand {
///     fn rand_below(&self, upper: usize) -> usize {
///         upper - 1
///     }
/// }
///
/// assert_eq!(FixedRand.rand_below(10), 9);
/// ```
///
/// [`LockRandom`]: crate::LockRandom
/// [`ThreadRandom`]: crate::ThreadRandom
pub trait RandSource {
    /// Returns an integer drawn uniformly from `0..upper`.
    ///
    /// Callers in this crate never pass `upper == 0`; implementations may
    /// panic on it.
    fn rand_below(&self, upper: usize) -> usize;
}

impl<R> RandSource for &R
where
    R: RandSource + ?Sized,
{
    fn rand_below(&self, upper: usize) -> usize {
        (**self).rand_below(upper)
    }
}

impl<R> RandSource for Box<R>
where
    R: RandSource + ?Sized,
{
    fn rand_below(&self, upper: usize) -> usize {
        (**self).rand_below(upper)
    }
}

impl<R> RandSource for Arc<R>
where
    R: RandSource + ?Sized,
{
    fn rand_below(&self, upper: usize) -> usize {
        (**self).rand_below(upper)
    }
}

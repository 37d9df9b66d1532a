use crate::{Result, TokenGenerator};
use core::fmt;

/// A [`TokenGenerator`] backed by a closure.
///
/// Created by [`from_fn`]. The closure receives the requested length and
/// decides on its own what to do with it; no minimum is enforced here.
#[derive(Clone)]
pub struct FnGenerator<F> {
    f: F,
}

impl<F, T> TokenGenerator for FnGenerator<F>
where
    F: Fn(usize) -> Result<T>,
{
    type Token = T;

    fn next(&self, length: usize) -> Result<T> {
        (self.f)(length)
    }
}

impl<F> fmt::Debug for FnGenerator<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnGenerator").finish_non_exhaustive()
    }
}

/// Turns a closure into a [`TokenGenerator`].
///
/// Useful for wrapping another generator's output, e.g. with a fixed prefix
/// and suffix.
///
/// # Example
/// ```
/// use randtok::{StringGenerator, TokenGenerator, from_fn};
///
/// let inner = StringGenerator::default();
/// let wrapped = from_fn(|length: usize| {
///     Ok(format!("aa{}aa", inner.next(length.saturating_sub(4))?))
/// });
///
/// let token = wrapped.next(13)?;
/// assert_eq!(token.len(), 13);
/// assert!(token.starts_with("aa") && token.ends_with("aa"));
/// # Ok::<(), randtok::Error>(())
/// ```
pub const fn from_fn<F, T>(f: F) -> FnGenerator<F>
where
    F: Fn(usize) -> Result<T>,
{
    FnGenerator { f }
}

use crate::Result;
use std::sync::Arc;

/// Smallest token length a generator accepts.
pub const MIN_TOKEN_LENGTH: usize = 1;

/// A minimal interface for producing one token of a requested length.
///
/// The built-in [`StringGenerator`], [`IntegerGenerator`] and
/// [`UnicodeGenerator`] implement it, and so can any user type; closures are
/// adapted with [`from_fn`]. Sequences are generic over this trait, so every
/// implementation is a first-class, interchangeable producer.
///
/// `next` takes `&self`: generators keep no state between calls other than
/// what their randomness source holds. A generator can feed a parallel
/// sequence when it is `Sync`.
///
/// # Example
/// ```
/// use randtok::{Result, TokenGenerator};
///
/// struct Dashes;
/// impl TokenGenerator for Dashes {
///     type Token = String;
///
///     fn next(&self, length: usize) -> Result<String> {
///         Ok("-".repeat(length))
///     }
/// }
///
/// assert_eq!(Dashes.next(3)?, "---");
/// # Ok::<(), randtok::Error>(())
/// ```
///
/// [`StringGenerator`]: crate::StringGenerator
/// [`IntegerGenerator`]: crate::IntegerGenerator
/// [`UnicodeGenerator`]: crate::UnicodeGenerator
/// [`from_fn`]: crate::from_fn
pub trait TokenGenerator {
    /// The type of token produced.
    type Token;

    /// Produces one token of `length` symbols.
    ///
    /// # Errors
    /// Built-in generators return [`Error::InvalidLength`] when `length` is
    /// below [`MIN_TOKEN_LENGTH`]. Custom generators may fail for their own
    /// reasons.
    ///
    /// [`Error::InvalidLength`]: crate::Error::InvalidLength
    fn next(&self, length: usize) -> Result<Self::Token>;
}

impl<G> TokenGenerator for &G
where
    G: TokenGenerator + ?Sized,
{
    type Token = G::Token;

    fn next(&self, length: usize) -> Result<Self::Token> {
        (**self).next(length)
    }
}

impl<G> TokenGenerator for Box<G>
where
    G: TokenGenerator + ?Sized,
{
    type Token = G::Token;

    fn next(&self, length: usize) -> Result<Self::Token> {
        (**self).next(length)
    }
}

impl<G> TokenGenerator for Arc<G>
where
    G: TokenGenerator + ?Sized,
{
    type Token = G::Token;

    fn next(&self, length: usize) -> Result<Self::Token> {
        (**self).next(length)
    }
}

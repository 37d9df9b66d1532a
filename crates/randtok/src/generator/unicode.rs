#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{Error, MIN_TOKEN_LENGTH, RandSource, Result, ThreadRandom, TokenGenerator};
use unicode_general_category::{GeneralCategory, get_general_category};

/// Number of code points in the Basic Multilingual Plane.
pub const BMP_SIZE: usize = 0x1_0000;

/// A generator of tokens made of arbitrary Basic Multilingual Plane
/// characters.
///
/// Draws `length` code points uniformly from `U+0000..=U+FFFF` and keeps
/// only assigned characters. Draws that land on a surrogate
/// (`U+D800..=U+DFFF`) or on an unassigned code point (general category
/// `Cn`, e.g. `U+0378`) are dropped rather than redrawn, so a token holds
/// *at most* `length` chars.
///
/// # Example
/// ```
/// use randtok::{TokenGenerator, unicode_generator};
///
/// let token = unicode_generator().next(16)?;
/// assert!(token.chars().count() <= 16);
/// # Ok::<(), randtok::Error>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct UnicodeGenerator<R = ThreadRandom> {
    rng: R,
}

impl<R> UnicodeGenerator<R>
where
    R: RandSource,
{
    /// Creates a new [`UnicodeGenerator`] backed by `rng`.
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generates one token from `length` code point draws.
    ///
    /// # Errors
    /// Returns [`Error::InvalidLength`] if `length` is zero.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_token(&self, length: usize) -> Result<String> {
        Error::check_length(length, MIN_TOKEN_LENGTH)?;
        Ok((0..length)
            .filter_map(|_| {
                u32::try_from(self.rng.rand_below(BMP_SIZE))
                    .ok()
                    .and_then(char::from_u32)
                    .filter(|&c| is_assigned(c))
            })
            .collect())
    }
}

fn is_assigned(c: char) -> bool {
    get_general_category(c) != GeneralCategory::Unassigned
}

impl<R> TokenGenerator for UnicodeGenerator<R>
where
    R: RandSource,
{
    type Token = String;

    fn next(&self, length: usize) -> Result<String> {
        self.next_token(length)
    }
}

/// Creates a unicode generator backed by [`ThreadRandom`].
pub const fn unicode_generator() -> UnicodeGenerator {
    UnicodeGenerator::new(ThreadRandom)
}

/// Creates a unicode generator backed by `rng`.
pub const fn unicode_generator_with<R>(rng: R) -> UnicodeGenerator<R>
where
    R: RandSource,
{
    UnicodeGenerator::new(rng)
}

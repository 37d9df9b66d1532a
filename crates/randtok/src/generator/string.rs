#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    CharacterPool, Error, MIN_POOL_SIZE, MIN_TOKEN_LENGTH, Pool, RandSource, Result,
    ThreadRandom, TokenGenerator,
};

/// A generator that assembles `String` tokens from a [`CharacterPool`].
///
/// Each call draws `length` independent, uniformly distributed indices into
/// the pool and concatenates the matching symbols in draw order. Every draw
/// is accepted as-is: tokens may repeat symbols or start with any symbol.
///
/// ## Features
/// - ✅ Thread-safe when the pool and the [`RandSource`] are `Sync`
/// - ✅ Reproducible with a seeded source such as [`LockRandom`]
/// - ✅ Length 1 tokens allowed (the sequence builder enforces its own floor)
///
/// ## See Also
/// - [`IntegerGenerator`]
/// - [`UnicodeGenerator`]
///
/// [`LockRandom`]: crate::LockRandom
/// [`IntegerGenerator`]: crate::IntegerGenerator
/// [`UnicodeGenerator`]: crate::UnicodeGenerator
#[derive(Clone, Debug)]
pub struct StringGenerator<P = Pool, R = ThreadRandom> {
    pool: P,
    rng: R,
}

impl<P, R> StringGenerator<P, R>
where
    P: CharacterPool,
    R: RandSource,
{
    /// Creates a new [`StringGenerator`] drawing from `pool` with `rng`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidPool`] if the pool holds fewer than
    /// [`MIN_POOL_SIZE`] symbols.
    ///
    /// # Example
    /// ```
    /// use randtok::{LockRandom, Pool, StringGenerator, TokenGenerator};
    ///
    /// let generator = StringGenerator::new(Pool::numeric(), LockRandom::seed_from_u64(1))?;
    /// let token = generator.next(8)?;
    /// assert_eq!(token.len(), 8);
    /// assert!(token.chars().all(|c| c.is_ascii_digit()));
    /// # Ok::<(), randtok::Error>(())
    /// ```
    pub fn new(pool: P, rng: R) -> Result<Self> {
        Error::check_pool(pool.len(), MIN_POOL_SIZE)?;
        Ok(Self { pool, rng })
    }

    /// The pool this generator draws from.
    pub const fn pool(&self) -> &P {
        &self.pool
    }

    /// The randomness source backing this generator.
    pub const fn rng(&self) -> &R {
        &self.rng
    }

    /// Generates one token of `length` symbols.
    ///
    /// # Errors
    /// Returns [`Error::InvalidLength`] if `length` is zero.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_token(&self, length: usize) -> Result<String> {
        Error::check_length(length, MIN_TOKEN_LENGTH)?;
        Ok(draw_symbols(self.pool.characters(), &self.rng, length).collect())
    }
}

impl<P> StringGenerator<P, ThreadRandom>
where
    P: CharacterPool,
{
    /// Creates a generator over `pool` backed by [`ThreadRandom`].
    ///
    /// # Errors
    /// Returns [`Error::InvalidPool`] if the pool is too small.
    pub fn with_pool(pool: P) -> Result<Self> {
        Self::new(pool, ThreadRandom)
    }
}

impl StringGenerator {
    /// A generator over the ten ASCII digits backed by [`ThreadRandom`].
    ///
    /// Tokens keep their leading zeros; see [`IntegerGenerator`] for the
    /// numeric form.
    ///
    /// [`IntegerGenerator`]: crate::IntegerGenerator
    pub fn numeric() -> Self {
        Self {
            pool: Pool::numeric(),
            rng: ThreadRandom,
        }
    }
}

impl Default for StringGenerator {
    /// An alphanumeric generator backed by [`ThreadRandom`].
    fn default() -> Self {
        Self {
            pool: Pool::alphanumeric(),
            rng: ThreadRandom,
        }
    }
}

impl<P, R> TokenGenerator for StringGenerator<P, R>
where
    P: CharacterPool,
    R: RandSource,
{
    type Token = String;

    fn next(&self, length: usize) -> Result<String> {
        self.next_token(length)
    }
}

/// Draws `length` symbols uniformly from `symbols`, in draw order.
pub(crate) fn draw_symbols<'a, R>(
    symbols: &'a [char],
    rng: &'a R,
    length: usize,
) -> impl Iterator<Item = char> + 'a
where
    R: RandSource,
{
    (0..length).map(move |_| symbols[rng.rand_below(symbols.len())])
}

/// Creates a string generator over `pool` backed by [`ThreadRandom`].
///
/// # Errors
/// Returns [`Error::InvalidPool`] if the pool is too small.
pub fn string_generator<P>(pool: P) -> Result<StringGenerator<P>>
where
    P: CharacterPool,
{
    StringGenerator::with_pool(pool)
}

/// Creates a string generator over `pool` backed by `rng`.
///
/// # Errors
/// Returns [`Error::InvalidPool`] if the pool is too small.
pub fn string_generator_with<P, R>(pool: P, rng: R) -> Result<StringGenerator<P, R>>
where
    P: CharacterPool,
    R: RandSource,
{
    StringGenerator::new(pool, rng)
}

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    CharacterPool, Error, MIN_POOL_SIZE, MIN_TOKEN_LENGTH, Pool, RandSource, Result,
    ThreadRandom, TokenGenerator,
};
use num_bigint::BigUint;

// Largest digit run that always fits a u64: 10^19 < 2^64.
const DIGITS_PER_LIMB: usize = 19;

/// A generator that draws decimal digits and returns them as a [`BigUint`].
///
/// The draw works exactly like [`StringGenerator`]: `length` uniform picks
/// from the pool. The resulting digit string is then read as a base-10
/// number, so leading zeros are dropped and the magnitude may have fewer
/// digits than requested. A draw of only zeros is `0`.
///
/// Every pool symbol must be an ASCII decimal digit; the pool does not have
/// to contain all ten.
///
/// # Example
/// ```
/// use randtok::{IntegerGenerator, Pool, TokenGenerator};
///
/// let generator = IntegerGenerator::with_pool(Pool::new("89")?)?;
/// let number = generator.next(3)?;
/// assert!(number.to_string().chars().all(|c| c == '8' || c == '9'));
/// # Ok::<(), randtok::Error>(())
/// ```
///
/// [`StringGenerator`]: crate::StringGenerator
#[derive(Clone, Debug)]
pub struct IntegerGenerator<P = Pool, R = ThreadRandom> {
    pool: P,
    digits: Box<[u8]>,
    rng: R,
}

impl<P, R> IntegerGenerator<P, R>
where
    P: CharacterPool,
    R: RandSource,
{
    /// Creates a new [`IntegerGenerator`] drawing from `pool` with `rng`.
    ///
    /// # Errors
    /// - [`Error::InvalidPool`] if the pool holds fewer than
    ///   [`MIN_POOL_SIZE`] symbols.
    /// - [`Error::NonDigitSymbol`] if a symbol is not an ASCII digit.
    pub fn new(pool: P, rng: R) -> Result<Self> {
        Error::check_pool(pool.len(), MIN_POOL_SIZE)?;
        let digits = pool
            .characters()
            .iter()
            .map(|&symbol| {
                symbol
                    .to_digit(10)
                    .and_then(|digit| u8::try_from(digit).ok())
                    .ok_or(Error::NonDigitSymbol { symbol })
            })
            .collect::<Result<Box<[u8]>>>()?;
        Ok(Self { pool, digits, rng })
    }

    /// The pool this generator draws from.
    pub const fn pool(&self) -> &P {
        &self.pool
    }

    /// Generates one number from `length` drawn digits.
    ///
    /// # Errors
    /// Returns [`Error::InvalidLength`] if `length` is zero.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_number(&self, length: usize) -> Result<BigUint> {
        Error::check_length(length, MIN_TOKEN_LENGTH)?;
        let drawn: Vec<u8> = (0..length)
            .map(|_| self.digits[self.rng.rand_below(self.digits.len())])
            .collect();
        Ok(parse_decimal(&drawn))
    }
}

impl<P> IntegerGenerator<P, ThreadRandom>
where
    P: CharacterPool,
{
    /// Creates a generator over `pool` backed by [`ThreadRandom`].
    ///
    /// # Errors
    /// See [`IntegerGenerator::new`].
    pub fn with_pool(pool: P) -> Result<Self> {
        Self::new(pool, ThreadRandom)
    }
}

impl Default for IntegerGenerator {
    /// A generator over all ten digits backed by [`ThreadRandom`].
    fn default() -> Self {
        Self {
            pool: Pool::numeric(),
            digits: (0..10).collect(),
            rng: ThreadRandom,
        }
    }
}

impl<P, R> TokenGenerator for IntegerGenerator<P, R>
where
    P: CharacterPool,
    R: RandSource,
{
    type Token = BigUint;

    fn next(&self, length: usize) -> Result<BigUint> {
        self.next_number(length)
    }
}

/// Reads most-significant-first decimal digits as a number.
fn parse_decimal(digits: &[u8]) -> BigUint {
    digits
        .chunks(DIGITS_PER_LIMB)
        .fold(BigUint::default(), |acc, chunk| {
            let (scale, value) = chunk.iter().fold((1_u64, 0_u64), |(scale, value), &d| {
                (scale * 10, value * 10 + u64::from(d))
            });
            acc * scale + value
        })
}

/// Creates an integer generator over `pool` backed by [`ThreadRandom`].
///
/// # Errors
/// See [`IntegerGenerator::new`].
pub fn integer_generator<P>(pool: P) -> Result<IntegerGenerator<P>>
where
    P: CharacterPool,
{
    IntegerGenerator::with_pool(pool)
}

/// Creates an integer generator over `pool` backed by `rng`.
///
/// # Errors
/// See [`IntegerGenerator::new`].
pub fn integer_generator_with<P, R>(pool: P, rng: R) -> Result<IntegerGenerator<P, R>>
where
    P: CharacterPool,
    R: RandSource,
{
    IntegerGenerator::new(pool, rng)
}

use crate::{CharacterPool, Error, Result};
use core::{
    fmt::{self, Write as _},
    str::FromStr,
};
use std::sync::{Arc, LazyLock};

/// Smallest pool accepted by the string and integer generators.
///
/// With a single symbol every token would be the same constant.
pub const MIN_POOL_SIZE: usize = 2;

/// ASCII uppercase letters.
pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
/// ASCII lowercase letters.
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
/// ASCII decimal digits.
pub const DIGITS: &str = "0123456789";
/// ASCII punctuation, the 32 graphic characters that are neither letters nor
/// digits.
pub const PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

static ALPHANUMERIC: LazyLock<Pool> =
    LazyLock::new(|| Pool::from_parts(&[UPPERCASE, LOWERCASE, DIGITS]));
static NUMERIC: LazyLock<Pool> = LazyLock::new(|| Pool::from_parts(&[DIGITS]));
static ALPHANUMERIC_PUNCTUATION: LazyLock<Pool> =
    LazyLock::new(|| Pool::from_parts(&[UPPERCASE, LOWERCASE, DIGITS, PUNCTUATION]));

/// An immutable, validated character pool.
///
/// Symbols live behind an [`Arc`], so cloning a pool is cheap and every clone
/// shares the same storage. A pool keeps its symbols in the order they were
/// given; duplicates are kept too and simply weigh that symbol more.
///
/// # Example
/// ```
/// use randtok::{CharacterPool, Pool};
///
/// let pool = Pool::new("89")?;
/// assert_eq!(pool.characters(), &['8', '9']);
///
/// assert!(Pool::new("x").is_err());
/// # Ok::<(), randtok::Error>(())
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Pool {
    symbols: Arc<[char]>,
}

impl Pool {
    /// Builds a pool from the chars of `symbols`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidPool`] if `symbols` holds fewer than
    /// [`MIN_POOL_SIZE`] chars.
    pub fn new(symbols: &str) -> Result<Self> {
        Self::from_chars(symbols.chars())
    }

    /// Builds a pool from any sequence of chars.
    ///
    /// # Errors
    /// Returns [`Error::InvalidPool`] if fewer than [`MIN_POOL_SIZE`] chars
    /// are given.
    pub fn from_chars(symbols: impl IntoIterator<Item = char>) -> Result<Self> {
        let symbols: Arc<[char]> = symbols.into_iter().collect();
        Error::check_pool(symbols.len(), MIN_POOL_SIZE)?;
        Ok(Self { symbols })
    }

    /// Uppercase and lowercase ASCII letters followed by digits (62 symbols).
    pub fn alphanumeric() -> Self {
        ALPHANUMERIC.clone()
    }

    /// ASCII decimal digits (10 symbols).
    pub fn numeric() -> Self {
        NUMERIC.clone()
    }

    /// [`Pool::alphanumeric`] followed by ASCII punctuation (94 symbols).
    pub fn alphanumeric_with_punctuation() -> Self {
        ALPHANUMERIC_PUNCTUATION.clone()
    }

    /// Returns `true` if `symbol` can appear in tokens drawn from this pool.
    pub fn contains(&self, symbol: char) -> bool {
        self.symbols.contains(&symbol)
    }

    fn from_parts(parts: &[&str]) -> Self {
        Self {
            symbols: parts.iter().flat_map(|part| part.chars()).collect(),
        }
    }
}

impl CharacterPool for Pool {
    fn characters(&self) -> &[char] {
        &self.symbols
    }
}

impl fmt::Display for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.symbols.iter().try_for_each(|c| f.write_char(*c))
    }
}

impl fmt::Debug for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pool").field(&self.to_string()).finish()
    }
}

impl FromStr for Pool {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<&str> for Pool {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

/// Shorthand for [`Pool::alphanumeric`].
pub fn alphanumeric_pool() -> Pool {
    Pool::alphanumeric()
}

/// Shorthand for [`Pool::numeric`].
pub fn numeric_pool() -> Pool {
    Pool::numeric()
}

/// Shorthand for [`Pool::alphanumeric_with_punctuation`].
pub fn alphanumeric_with_punctuation_pool() -> Pool {
    Pool::alphanumeric_with_punctuation()
}

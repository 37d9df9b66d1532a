//! One-call shortcuts over the default builders.

use crate::{
    Error, IntegerGenerator, Result, SequenceBuilder, StringGenerator, TokenGenerator, build,
};
use num_bigint::BigUint;

/// A builder of alphanumeric string tokens. Same as [`build`].
pub fn strings() -> SequenceBuilder<StringGenerator> {
    build()
}

/// A builder of digit-only string tokens.
///
/// # Example
/// ```
/// let pins: Vec<String> = randtok::numbers().stream_limited(4, 10)?.collect();
/// assert!(pins.iter().all(|p| p.len() == 4 && p.chars().all(|c| c.is_ascii_digit())));
/// # Ok::<(), randtok::Error>(())
/// ```
pub fn numbers() -> SequenceBuilder<StringGenerator> {
    SequenceBuilder::new(StringGenerator::numeric())
}

/// A builder of [`BigUint`] tokens drawn from all ten digits.
pub fn integers() -> SequenceBuilder<IntegerGenerator> {
    SequenceBuilder::new(IntegerGenerator::default())
}

/// One alphanumeric token of `length` symbols.
///
/// Goes through the sequence builder, so `length` must be at least
/// [`MIN_STREAM_LENGTH`].
///
/// # Errors
/// - [`Error::InvalidLength`] if `length < MIN_STREAM_LENGTH`.
/// - [`Error::EmptyResult`] if nothing was produced.
///
/// # Example
/// ```
/// let token = randtok::get(12)?;
/// assert_eq!(token.len(), 12);
/// assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
/// # Ok::<(), randtok::Error>(())
/// ```
///
/// [`MIN_STREAM_LENGTH`]: crate::MIN_STREAM_LENGTH
pub fn get(length: usize) -> Result<String> {
    first(&strings(), length)
}

/// One non-negative integer drawn from `length` decimal digits.
///
/// Leading zeros of the draw are dropped, so the result may have fewer
/// than `length` digits.
///
/// # Errors
/// See [`get`].
///
/// # Example
/// ```
/// let n = randtok::get_number(5)?;
/// assert!(n < randtok::BigUint::from(100_000_u32));
/// # Ok::<(), randtok::Error>(())
/// ```
pub fn get_number(length: usize) -> Result<BigUint> {
    first(&integers(), length)
}

/// Eagerly collects `limit` tokens of `length` from `generator` that satisfy
/// `filter`.
///
/// # Errors
/// - [`Error::InvalidLength`] if `length < MIN_STREAM_LENGTH`.
/// - Any error raised by the generator.
///
/// [`MIN_STREAM_LENGTH`]: crate::MIN_STREAM_LENGTH
pub fn list<G, F>(length: usize, limit: usize, filter: F, generator: G) -> Result<Vec<G::Token>>
where
    G: TokenGenerator,
    F: FnMut(&G::Token) -> bool,
{
    SequenceBuilder::new(generator).list(length, limit, filter)
}

fn first<G>(builder: &SequenceBuilder<G>, length: usize) -> Result<G::Token>
where
    G: TokenGenerator,
{
    let mut sequence = builder.stream_limited(length, 1)?;
    match sequence.next() {
        Some(token) => Ok(token),
        None => Err(sequence.error().cloned().unwrap_or(Error::EmptyResult)),
    }
}

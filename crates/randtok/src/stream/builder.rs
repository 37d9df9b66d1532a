#[cfg(feature = "parallel")]
use super::parallel::{SharedDistinct, SharedUntracked, default_workers, fan_out};
use super::sequence::accept_all;
use crate::{
    AcceptAll, CharacterPool, Distinct, Error, RandSource, Result, Sequence, StringGenerator,
    TokenGenerator, Tracker, Untracked,
};
use core::{fmt, hash::Hash};
use std::sync::Arc;

/// Token length used when none is given.
pub const DEFAULT_LENGTH: usize = 5;

/// Smallest token length accepted by the sequence builder.
///
/// Stricter than [`MIN_TOKEN_LENGTH`]: a generator will happily produce
/// single-symbol tokens, but sequences of them exhaust a pool almost at once
/// when uniqueness is requested, so the builder refuses them.
///
/// [`MIN_TOKEN_LENGTH`]: crate::MIN_TOKEN_LENGTH
pub const MIN_STREAM_LENGTH: usize = 2;

/// Binds a [`TokenGenerator`] into a reusable production context.
///
/// The builder owns its generator behind an [`Arc`]; every sequence it
/// creates holds a clone of that `Arc`, so sequences outlive the builder and
/// cloning the builder is cheap.
///
/// All entry points validate `length` against [`MIN_STREAM_LENGTH`] before
/// any token is drawn. Omitted arguments default to [`DEFAULT_LENGTH`] and
/// an accept-all filter.
///
/// # Example
/// ```
/// use randtok::{Pool, build_from_pool};
///
/// let tokens: Vec<String> = build_from_pool(Pool::numeric())?
///     .stream_limited(5, 1000)?
///     .collect();
///
/// assert_eq!(tokens.len(), 1000);
/// assert!(tokens.iter().all(|t| t.len() == 5 && t.chars().all(|c| c.is_ascii_digit())));
/// # Ok::<(), randtok::Error>(())
/// ```
pub struct SequenceBuilder<G> {
    generator: Arc<G>,
    #[cfg(feature = "parallel")]
    workers: Option<usize>,
}

impl<G> SequenceBuilder<G>
where
    G: TokenGenerator,
{
    /// Wraps `generator`.
    pub fn new(generator: G) -> Self {
        Self::from_shared(Arc::new(generator))
    }

    /// Wraps a generator that is already shared.
    pub fn from_shared(generator: Arc<G>) -> Self {
        Self {
            generator,
            #[cfg(feature = "parallel")]
            workers: None,
        }
    }

    /// The wrapped generator.
    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Sets the number of worker threads used by the parallel entry points.
    ///
    /// Defaults to the number of logical CPUs, looked up only when a parallel
    /// entry point runs; `0` is treated as `1`.
    #[cfg_attr(docsrs, doc(cfg(feature = "parallel")))]
    #[cfg(feature = "parallel")]
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers.max(1));
        self
    }

    /// Number of worker threads used by the parallel entry points.
    #[cfg_attr(docsrs, doc(cfg(feature = "parallel")))]
    #[cfg(feature = "parallel")]
    pub fn workers(&self) -> usize {
        self.workers.unwrap_or_else(default_workers)
    }

    /// An unbounded sequence of [`DEFAULT_LENGTH`] tokens.
    ///
    /// # Example
    /// ```
    /// let tokens: Vec<String> = randtok::build().stream().take(3).collect();
    /// assert!(tokens.iter().all(|t| t.len() == 5));
    /// ```
    pub fn stream(&self) -> Sequence<G> {
        self.sequence(DEFAULT_LENGTH, None, accept_all(), Untracked)
    }

    /// An unbounded sequence of `length`-symbol tokens.
    ///
    /// # Errors
    /// Returns [`Error::InvalidLength`] if `length < MIN_STREAM_LENGTH`.
    pub fn stream_with_length(&self, length: usize) -> Result<Sequence<G>> {
        Self::check_length(length)?;
        Ok(self.sequence(length, None, accept_all(), Untracked))
    }

    /// A sequence of exactly `limit` tokens of `length` symbols.
    ///
    /// # Errors
    /// Returns [`Error::InvalidLength`] if `length < MIN_STREAM_LENGTH`.
    pub fn stream_limited(&self, length: usize, limit: usize) -> Result<Sequence<G>> {
        Self::check_length(length)?;
        Ok(self.sequence(length, Some(limit), accept_all(), Untracked))
    }

    /// A sequence of exactly `limit` tokens that satisfy `filter`.
    ///
    /// ⚠️ Never terminates if `filter` rejects every token.
    ///
    /// # Errors
    /// Returns [`Error::InvalidLength`] if `length < MIN_STREAM_LENGTH`.
    pub fn stream_filtered<F>(&self, length: usize, limit: usize, filter: F) -> Result<Sequence<G, F>>
    where
        F: FnMut(&G::Token) -> bool,
    {
        Self::check_length(length)?;
        Ok(self.sequence(length, Some(limit), filter, Untracked))
    }

    /// A sequence of exactly `limit` pairwise distinct tokens.
    ///
    /// Duplicates are skipped and replaced by fresh draws.
    ///
    /// ⚠️ Never terminates if `limit` exceeds the number of distinct tokens
    /// the generator can produce at this length.
    ///
    /// # Errors
    /// Returns [`Error::InvalidLength`] if `length < MIN_STREAM_LENGTH`.
    ///
    /// # Example
    /// ```
    /// use std::collections::HashSet;
    ///
    /// let tokens: HashSet<String> = randtok::build().unique_stream(15, 100)?.collect();
    /// assert_eq!(tokens.len(), 100);
    /// # Ok::<(), randtok::Error>(())
    /// ```
    pub fn unique_stream(
        &self,
        length: usize,
        limit: usize,
    ) -> Result<Sequence<G, AcceptAll<G::Token>, Distinct<G::Token>>>
    where
        G::Token: Eq + Hash + Clone,
    {
        Self::check_length(length)?;
        Ok(self.sequence(length, Some(limit), accept_all(), Distinct::new()))
    }

    /// A sequence of exactly `limit` pairwise distinct tokens that satisfy
    /// `filter`. The filter runs before the distinct check.
    ///
    /// # Errors
    /// Returns [`Error::InvalidLength`] if `length < MIN_STREAM_LENGTH`.
    pub fn unique_stream_filtered<F>(
        &self,
        length: usize,
        limit: usize,
        filter: F,
    ) -> Result<Sequence<G, F, Distinct<G::Token>>>
    where
        F: FnMut(&G::Token) -> bool,
        G::Token: Eq + Hash + Clone,
    {
        Self::check_length(length)?;
        Ok(self.sequence(length, Some(limit), filter, Distinct::new()))
    }

    /// Eagerly collects `limit` tokens that satisfy `filter`, in production
    /// order.
    ///
    /// # Errors
    /// - [`Error::InvalidLength`] if `length < MIN_STREAM_LENGTH`.
    /// - Any error raised by the generator while producing.
    pub fn list<F>(&self, length: usize, limit: usize, filter: F) -> Result<Vec<G::Token>>
    where
        F: FnMut(&G::Token) -> bool,
    {
        self.stream_filtered(length, limit, filter)?.into_vec()
    }

    fn sequence<F, D>(
        &self,
        length: usize,
        limit: Option<usize>,
        filter: F,
        tracker: D,
    ) -> Sequence<G, F, D>
    where
        F: FnMut(&G::Token) -> bool,
        D: Tracker<G::Token>,
    {
        Sequence::new(Arc::clone(&self.generator), length, limit, filter, tracker)
    }

    const fn check_length(length: usize) -> Result<()> {
        Error::check_length(length, MIN_STREAM_LENGTH)
    }
}

#[cfg_attr(docsrs, doc(cfg(feature = "parallel")))]
#[cfg(feature = "parallel")]
impl<G> SequenceBuilder<G>
where
    G: TokenGenerator + Sync,
    G::Token: Send,
{
    /// Produces exactly `limit` tokens on the builder's worker threads.
    ///
    /// The generator is shared by all workers, so its randomness source must
    /// tolerate concurrent draws (`Sync`). Output order is unspecified.
    ///
    /// # Errors
    /// - [`Error::InvalidLength`] if `length < MIN_STREAM_LENGTH`.
    /// - Any error raised by the generator on a worker.
    ///
    /// # Example
    /// ```
    /// let tokens = randtok::build().with_workers(4).parallel_stream(15, 1000)?;
    /// assert_eq!(tokens.len(), 1000);
    /// # Ok::<(), randtok::Error>(())
    /// ```
    pub fn parallel_stream(&self, length: usize, limit: usize) -> Result<Vec<G::Token>> {
        self.parallel_stream_filtered(length, limit, accept_all::<G::Token>())
    }

    /// Produces exactly `limit` tokens satisfying `filter` on the builder's
    /// worker threads.
    ///
    /// ⚠️ Never returns if `filter` rejects every token.
    ///
    /// # Errors
    /// See [`SequenceBuilder::parallel_stream`].
    pub fn parallel_stream_filtered<F>(
        &self,
        length: usize,
        limit: usize,
        filter: F,
    ) -> Result<Vec<G::Token>>
    where
        F: Fn(&G::Token) -> bool + Sync,
    {
        Self::check_length(length)?;
        fan_out(&*self.generator, length, limit, self.workers(), &filter, &SharedUntracked)
    }

    /// Produces exactly `limit` pairwise distinct tokens on the builder's
    /// worker threads. Distinctness holds across workers.
    ///
    /// # Errors
    /// See [`SequenceBuilder::parallel_stream`].
    pub fn parallel_unique_stream(&self, length: usize, limit: usize) -> Result<Vec<G::Token>>
    where
        G::Token: Eq + Hash + Clone + Sync,
    {
        self.parallel_unique_stream_filtered(length, limit, accept_all::<G::Token>())
    }

    /// Produces exactly `limit` pairwise distinct tokens satisfying `filter`
    /// on the builder's worker threads.
    ///
    /// # Errors
    /// See [`SequenceBuilder::parallel_stream`].
    pub fn parallel_unique_stream_filtered<F>(
        &self,
        length: usize,
        limit: usize,
        filter: F,
    ) -> Result<Vec<G::Token>>
    where
        F: Fn(&G::Token) -> bool + Sync,
        G::Token: Eq + Hash + Clone + Sync,
    {
        Self::check_length(length)?;
        let tracker = SharedDistinct::new();
        fan_out(&*self.generator, length, limit, self.workers(), &filter, &tracker)
    }
}

impl<G> Clone for SequenceBuilder<G> {
    fn clone(&self) -> Self {
        Self {
            generator: Arc::clone(&self.generator),
            #[cfg(feature = "parallel")]
            workers: self.workers,
        }
    }
}

impl<G> fmt::Debug for SequenceBuilder<G>
where
    G: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("SequenceBuilder");
        s.field("generator", &self.generator);
        #[cfg(feature = "parallel")]
        s.field("workers", &self.workers);
        s.finish()
    }
}

/// A builder over the alphanumeric pool backed by [`ThreadRandom`].
///
/// [`ThreadRandom`]: crate::ThreadRandom
///
/// # Example
/// ```
/// let token = randtok::build().stream_limited(8, 1)?.next();
/// assert_eq!(token.map(|t| t.len()), Some(8));
/// # Ok::<(), randtok::Error>(())
/// ```
pub fn build() -> SequenceBuilder<StringGenerator> {
    SequenceBuilder::new(StringGenerator::default())
}

/// A builder over any generator, including custom ones.
///
/// # Example
/// ```
/// use randtok::{StringGenerator, TokenGenerator, build_with, from_fn};
///
/// let inner = StringGenerator::default();
/// let builder = build_with(from_fn(move |length: usize| {
///     Ok(format!("aa{}aa", inner.next(length.saturating_sub(4))?))
/// }));
///
/// for token in builder.stream_limited(13, 8)? {
///     assert!(token.starts_with("aa") && token.ends_with("aa"));
/// }
/// # Ok::<(), randtok::Error>(())
/// ```
pub fn build_with<G>(generator: G) -> SequenceBuilder<G>
where
    G: TokenGenerator,
{
    SequenceBuilder::new(generator)
}

/// A builder producing string tokens from `pool` with [`ThreadRandom`].
///
/// # Errors
/// Returns [`Error::InvalidPool`] if the pool is too small.
///
/// [`ThreadRandom`]: crate::ThreadRandom
pub fn build_from_pool<P>(pool: P) -> Result<SequenceBuilder<StringGenerator<P>>>
where
    P: CharacterPool,
{
    Ok(SequenceBuilder::new(StringGenerator::with_pool(pool)?))
}

/// A builder producing string tokens from `pool` with a caller-supplied
/// randomness source.
///
/// # Errors
/// Returns [`Error::InvalidPool`] if the pool is too small.
///
/// # Example
/// ```
/// use randtok::{LockRandom, Pool, build_from_pool_with};
///
/// let a: Vec<String> = build_from_pool_with(Pool::alphanumeric(), LockRandom::seed_from_u64(9))?
///     .stream_limited(10, 4)?
///     .collect();
/// let b: Vec<String> = build_from_pool_with(Pool::alphanumeric(), LockRandom::seed_from_u64(9))?
///     .stream_limited(10, 4)?
///     .collect();
/// assert_eq!(a, b);
/// # Ok::<(), randtok::Error>(())
/// ```
pub fn build_from_pool_with<P, R>(pool: P, rng: R) -> Result<SequenceBuilder<StringGenerator<P, R>>>
where
    P: CharacterPool,
    R: RandSource,
{
    Ok(SequenceBuilder::new(StringGenerator::new(pool, rng)?))
}

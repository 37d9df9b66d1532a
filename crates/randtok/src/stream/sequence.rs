use crate::{Error, Result, TokenGenerator, Tracker, Untracked};
use core::{fmt, iter::FusedIterator};
use std::sync::Arc;

/// The filter type of sequences built without a predicate.
pub type AcceptAll<T> = fn(&T) -> bool;

pub(crate) fn accept_all<T>() -> AcceptAll<T> {
    |_: &T| true
}

/// A lazy production of tokens with its operator chain attached.
///
/// Every call to [`Iterator::next`] runs the pipeline in a fixed order:
///
/// 1. **produce**: ask the generator for a token of the configured length
/// 2. **filter**: drop tokens the predicate rejects
/// 3. **distinct**: drop tokens the [`Tracker`] has already seen
/// 4. **limit**: stop once the configured number of tokens went through
///
/// Rejected tokens are replaced by fresh draws, so a bounded sequence always
/// yields exactly its limit. A sequence without a limit never ends on its
/// own; take as many tokens as you need and drop it.
///
/// ⚠️ A filter that rejects every possible token makes `next` loop forever.
/// Keep predicates satisfiable.
///
/// If the generator fails (only custom generators can, since lengths are
/// validated up front), the sequence ends early and keeps the error; check
/// [`Sequence::error`] or use [`Sequence::into_vec`].
///
/// Sequences are created by [`SequenceBuilder`].
///
/// [`SequenceBuilder`]: crate::SequenceBuilder
pub struct Sequence<G, F = AcceptAll<<G as TokenGenerator>::Token>, D = Untracked>
where
    G: TokenGenerator,
{
    generator: Arc<G>,
    length: usize,
    filter: F,
    tracker: D,
    remaining: Option<usize>,
    error: Option<Error>,
}

impl<G, F, D> Sequence<G, F, D>
where
    G: TokenGenerator,
    F: FnMut(&G::Token) -> bool,
    D: Tracker<G::Token>,
{
    pub(crate) const fn new(
        generator: Arc<G>,
        length: usize,
        limit: Option<usize>,
        filter: F,
        tracker: D,
    ) -> Self {
        Self {
            generator,
            length,
            filter,
            tracker,
            remaining: limit,
            error: None,
        }
    }

    /// Length requested from the generator for every token.
    pub const fn length(&self) -> usize {
        self.length
    }

    /// Tokens still to be yielded, or `None` for an unbounded sequence.
    pub const fn remaining(&self) -> Option<usize> {
        self.remaining
    }

    /// The generator error that ended this sequence, if any.
    pub const fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Drains the sequence into a `Vec`, in production order.
    ///
    /// # Errors
    /// Returns the generator error if the sequence ended because of one; the
    /// tokens produced before it are discarded.
    ///
    /// ⚠️ Never returns for an unbounded sequence.
    pub fn into_vec(mut self) -> Result<Vec<G::Token>> {
        let tokens = self.by_ref().collect();
        match self.error {
            Some(err) => Err(err),
            None => Ok(tokens),
        }
    }
}

impl<G, F, D> Iterator for Sequence<G, F, D>
where
    G: TokenGenerator,
    F: FnMut(&G::Token) -> bool,
    D: Tracker<G::Token>,
{
    type Item = G::Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == Some(0) || self.error.is_some() {
            return None;
        }

        loop {
            let token = match self.generator.next(self.length) {
                Ok(token) => token,
                Err(err) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(length = self.length, error = %err, "sequence stopped by generator error");
                    self.error = Some(err);
                    return None;
                }
            };

            if !(self.filter)(&token) || !self.tracker.first_seen(&token) {
                continue;
            }

            if let Some(remaining) = self.remaining.as_mut() {
                *remaining -= 1;
            }
            return Some(token);
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.error.is_some() {
            return (0, Some(0));
        }
        (0, self.remaining)
    }
}

impl<G, F, D> FusedIterator for Sequence<G, F, D>
where
    G: TokenGenerator,
    F: FnMut(&G::Token) -> bool,
    D: Tracker<G::Token>,
{
}

impl<G, F, D> fmt::Debug for Sequence<G, F, D>
where
    G: TokenGenerator,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequence")
            .field("length", &self.length)
            .field("remaining", &self.remaining)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

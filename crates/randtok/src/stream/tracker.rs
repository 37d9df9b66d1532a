use core::hash::Hash;
use std::collections::HashSet;

/// Decides whether a token passes the distinct stage of a [`Sequence`].
///
/// [`Sequence`]: crate::Sequence
pub trait Tracker<T> {
    /// Returns `true` the first time `token` is offered and records it.
    fn first_seen(&mut self, token: &T) -> bool;
}

/// A tracker that lets every token through.
#[derive(Clone, Copy, Debug, Default)]
pub struct Untracked;

impl<T> Tracker<T> for Untracked {
    fn first_seen(&mut self, _token: &T) -> bool {
        true
    }
}

/// Remembers every token emitted by one sequence.
///
/// The set grows for as long as the sequence lives and is dropped with it.
#[derive(Clone, Debug)]
pub struct Distinct<T> {
    seen: HashSet<T>,
}

impl<T> Distinct<T> {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self {
            seen: HashSet::new(),
        }
    }

    /// Number of distinct tokens seen so far.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Returns `true` if no token has been seen yet.
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

impl<T> Default for Distinct<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Tracker<T> for Distinct<T>
where
    T: Eq + Hash + Clone,
{
    fn first_seen(&mut self, token: &T) -> bool {
        if self.seen.contains(token) {
            return false;
        }
        self.seen.insert(token.clone())
    }
}

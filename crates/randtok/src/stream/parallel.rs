//! Parallel fan-out of the produce, filter and distinct stages.
//!
//! Every worker is a scoped thread running the same pipeline against a
//! shared generator. Accepted tokens claim one of `limit` slots in an atomic
//! counter before being sent over a bounded channel, so the collecting thread
//! receives exactly `limit` tokens no matter how many workers race for the
//! last slots. Tokens arrive in completion order, which is unspecified.
//!
//! Workers stop when every slot is claimed, when the collector hangs up, or
//! when any worker reported a generator error.

use crate::{Error, Result, TokenGenerator};
use core::hash::Hash;
use crossbeam_channel::{Sender, bounded};
use crossbeam_utils::CachePadded;
use dashmap::DashSet;
use portable_atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread::scope;

/// Channel capacity granted to each worker.
const SLOTS_PER_WORKER: usize = 64;

/// Distinct stage shared by every worker of one fan-out.
pub trait SharedTracker<T>: Sync {
    /// Returns `true` the first time any worker offers `token`.
    fn first_seen(&self, token: &T) -> bool;
}

/// A shared tracker that lets every token through.
#[derive(Clone, Copy, Debug, Default)]
pub struct SharedUntracked;

impl<T> SharedTracker<T> for SharedUntracked {
    fn first_seen(&self, _token: &T) -> bool {
        true
    }
}

/// A concurrent set of the tokens emitted by one parallel fan-out.
///
/// Backed by a sharded [`DashSet`], so workers contend only when their tokens
/// hash to the same shard.
#[derive(Debug)]
pub struct SharedDistinct<T>
where
    T: Eq + Hash,
{
    seen: DashSet<T>,
}

impl<T> SharedDistinct<T>
where
    T: Eq + Hash,
{
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self {
            seen: DashSet::new(),
        }
    }

    /// Number of distinct tokens recorded so far.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Returns `true` if no token has been recorded.
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

impl<T> Default for SharedDistinct<T>
where
    T: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SharedTracker<T> for SharedDistinct<T>
where
    T: Eq + Hash + Clone + Send + Sync,
{
    fn first_seen(&self, token: &T) -> bool {
        if self.seen.contains(token) {
            return false;
        }
        self.seen.insert(token.clone())
    }
}

/// Everything a worker needs, borrowed from the fan-out call.
struct Shared<'a, G, F, D> {
    generator: &'a G,
    filter: &'a F,
    tracker: &'a D,
    length: usize,
    limit: usize,
    claimed: CachePadded<AtomicUsize>,
    failed: AtomicBool,
}

/// Runs the pipeline on `workers` threads and collects exactly `limit`
/// tokens in unspecified order.
///
/// # Errors
/// Returns the first generator error reported by a worker.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "debug", skip(generator, filter, tracker))
)]
pub(crate) fn fan_out<G, F, D>(
    generator: &G,
    length: usize,
    limit: usize,
    workers: usize,
    filter: &F,
    tracker: &D,
) -> Result<Vec<G::Token>>
where
    G: TokenGenerator + Sync,
    G::Token: Send,
    F: Fn(&G::Token) -> bool + Sync,
    D: SharedTracker<G::Token>,
{
    if limit == 0 {
        return Ok(Vec::new());
    }

    let workers = workers.clamp(1, limit);
    let shared = Shared {
        generator,
        filter,
        tracker,
        length,
        limit,
        claimed: CachePadded::new(AtomicUsize::new(0)),
        failed: AtomicBool::new(false),
    };
    let capacity = workers.saturating_mul(SLOTS_PER_WORKER);
    let (tx, rx) = bounded(capacity);
    let mut tokens = Vec::with_capacity(limit.min(capacity));
    let mut error = None;

    scope(|s| {
        for worker_id in 0..workers {
            let tx = tx.clone();
            let shared = &shared;
            s.spawn(move || worker_loop(worker_id, shared, tx));
        }
        drop(tx);

        for received in rx.iter() {
            match received {
                Ok(token) => {
                    tokens.push(token);
                    if tokens.len() == limit {
                        break;
                    }
                }
                Err(err) => {
                    shared.failed.store(true, Ordering::Release);
                    error = Some(err);
                    break;
                }
            }
        }

        // Unblocks any worker waiting on a full channel.
        drop(rx);
    });

    #[cfg(feature = "tracing")]
    tracing::debug!(collected = tokens.len(), failed = error.is_some(), "fan-out finished");

    match error {
        Some(err) => Err(err),
        None => Ok(tokens),
    }
}

fn worker_loop<G, F, D>(
    worker_id: usize,
    shared: &Shared<'_, G, F, D>,
    tx: Sender<Result<G::Token, Error>>,
) where
    G: TokenGenerator,
    F: Fn(&G::Token) -> bool,
    D: SharedTracker<G::Token>,
{
    #[cfg(feature = "tracing")]
    tracing::trace!("Worker {worker_id} started");
    #[cfg(not(feature = "tracing"))]
    let _ = worker_id;

    while !shared.failed.load(Ordering::Acquire)
        && shared.claimed.load(Ordering::Relaxed) < shared.limit
    {
        let token = match shared.generator.next(shared.length) {
            Ok(token) => token,
            Err(err) => {
                // The collector may already be gone; nothing left to report to.
                let _ = tx.send(Err(err));
                break;
            }
        };

        if !(shared.filter)(&token) || !shared.tracker.first_seen(&token) {
            continue;
        }

        if shared.claimed.fetch_add(1, Ordering::AcqRel) >= shared.limit {
            break;
        }

        if tx.send(Ok(token)).is_err() {
            break;
        }
    }

    #[cfg(feature = "tracing")]
    tracing::trace!("Worker {worker_id} stopped");
}

/// Default number of fan-out workers: one per logical CPU.
pub fn default_workers() -> usize {
    num_cpus::get().max(1)
}

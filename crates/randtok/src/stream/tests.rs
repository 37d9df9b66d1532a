use crate::{
    Error, IntegerGenerator, LockRandom, Pool, Result, SequenceBuilder, StringGenerator,
    TokenGenerator, build, build_from_pool, build_from_pool_with, build_with, from_fn,
};
use core::hash::Hash;
use num_bigint::BigUint;
use portable_atomic::{AtomicUsize, Ordering};
use std::collections::HashSet;

const KEY_LENGTH: usize = 15;
const COUNT: usize = 1000;

/// Counts up from zero, one call per token, so every token is distinct and
/// the call order is observable.
struct Counter {
    calls: AtomicUsize,
}

impl Counter {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }
}

impl TokenGenerator for Counter {
    type Token = usize;

    fn next(&self, _length: usize) -> Result<usize> {
        Ok(self.calls.fetch_add(1, Ordering::Relaxed))
    }
}

/// Cycles through a fixed list of tokens.
struct Cycle {
    tokens: Vec<&'static str>,
    calls: AtomicUsize,
}

impl TokenGenerator for Cycle {
    type Token = &'static str;

    fn next(&self, _length: usize) -> Result<&'static str> {
        let call = self.calls.fetch_add(1, Ordering::Relaxed);
        Ok(self.tokens[call % self.tokens.len()])
    }
}

/// Succeeds `ok` times, then fails forever.
fn failing_after(ok: usize) -> impl TokenGenerator<Token = usize> + Sync {
    let calls = AtomicUsize::new(0);
    from_fn(move |_length: usize| {
        let call = calls.fetch_add(1, Ordering::Relaxed);
        if call < ok {
            Ok(call)
        } else {
            Err(Error::EmptyResult)
        }
    })
}

fn assert_distinct<T>(tokens: &[T])
where
    T: Eq + Hash,
{
    let set: HashSet<&T> = tokens.iter().collect();
    assert_eq!(set.len(), tokens.len(), "duplicate token emitted");
}

#[test]
fn numeric_pool_stream_scenario() {
    let tokens: Vec<String> = build_from_pool(Pool::numeric())
        .unwrap()
        .stream_limited(5, COUNT)
        .unwrap()
        .collect();
    assert_eq!(tokens.len(), COUNT);
    for token in &tokens {
        assert_eq!(token.len(), 5);
        assert!(token.chars().all(|c| c.is_ascii_digit()), "{token}");
    }
}

#[test]
fn custom_pool_stream() {
    let tokens: Vec<String> = build_from_pool(Pool::new("89").unwrap())
        .unwrap()
        .stream_limited(5, COUNT)
        .unwrap()
        .collect();
    assert_eq!(tokens.len(), COUNT);
    assert!(tokens.iter().all(|t| t.chars().all(|c| c == '8' || c == '9')));
}

#[test]
fn unbounded_stream_uses_default_length() {
    let builder = build();
    let tokens: Vec<String> = builder.stream().take(COUNT).collect();
    assert_eq!(tokens.len(), COUNT);
    assert!(tokens.iter().all(|t| t.len() == 5));

    let mut sequence = builder.stream_with_length(9).unwrap();
    assert_eq!(sequence.remaining(), None);
    assert_eq!(sequence.next().map(|t| t.len()), Some(9));
}

#[test]
fn sequences_outlive_their_builder() {
    let sequence = build().stream_limited(6, 3).unwrap();
    assert_eq!(sequence.count(), 3);
}

#[test]
fn builder_rejects_short_lengths() {
    let builder = build();
    for length in [0, 1] {
        let expected = Error::InvalidLength {
            requested: length,
            minimum: 2,
        };
        assert_eq!(builder.stream_with_length(length).unwrap_err(), expected);
        assert_eq!(builder.stream_limited(length, 5).unwrap_err(), expected);
        assert_eq!(builder.stream_filtered(length, 5, |_| true).unwrap_err(), expected);
        assert_eq!(builder.unique_stream(length, 5).unwrap_err(), expected);
        assert_eq!(builder.list(length, 5, |_| true).unwrap_err(), expected);
    }

    // The generator itself still serves single-symbol tokens.
    assert_eq!(builder.generator().next(1).unwrap().len(), 1);
}

#[test]
fn zero_limit_is_empty() {
    let builder = build();
    assert_eq!(builder.stream_limited(5, 0).unwrap().count(), 0);
    assert_eq!(builder.unique_stream(5, 0).unwrap().count(), 0);
    assert!(builder.list(5, 0, |_| false).unwrap().is_empty());

    let counter = build_with(Counter::new());
    assert_eq!(counter.stream_limited(5, 0).unwrap().count(), 0);
    assert_eq!(counter.generator().calls.load(Ordering::Relaxed), 0);
}

#[test]
fn filtered_stream_only_yields_matches() {
    let tokens: Vec<String> = build()
        .stream_filtered(8, 50, |s: &String| s.starts_with('b') && s.ends_with('b'))
        .unwrap()
        .collect();
    assert_eq!(tokens.len(), 50);
    assert!(tokens.iter().all(|s| s.len() == 8 && s.starts_with('b') && s.ends_with('b')));
}

#[test]
fn filter_sees_every_draw_in_order() {
    let builder = build_with(Counter::new());
    let evens: Vec<usize> = builder
        .stream_filtered(2, 5, |n: &usize| n % 2 == 0)
        .unwrap()
        .collect();
    assert_eq!(evens, vec![0, 2, 4, 6, 8]);
}

#[test]
fn custom_generator_stream() {
    let inner = StringGenerator::default();
    let builder = build_with(from_fn(move |length: usize| {
        Ok(format!("aa{}aa", inner.next(length - 4)?))
    }));
    let tokens: Vec<String> = builder.stream_limited(13, 8).unwrap().collect();
    assert_eq!(tokens.len(), 8);
    for token in tokens {
        assert_eq!(token.len(), 13);
        assert!(token.starts_with("aa") && token.ends_with("aa"));
    }
}

#[test]
fn unique_stream_scenario() {
    let tokens: Vec<String> = build().unique_stream(KEY_LENGTH, 100).unwrap().collect();
    assert_eq!(tokens.len(), 100);
    assert!(tokens.iter().all(|t| t.len() == KEY_LENGTH));
    assert_distinct(&tokens);
}

#[test]
fn unique_stream_skips_duplicates_and_keeps_first_order() {
    let builder = build_with(Cycle {
        tokens: vec!["aa", "bb", "aa", "cc", "bb", "dd"],
        calls: AtomicUsize::new(0),
    });
    let tokens: Vec<_> = builder.unique_stream(2, 4).unwrap().collect();
    assert_eq!(tokens, vec!["aa", "bb", "cc", "dd"]);
}

#[test]
fn unique_filtered_stream() {
    let tokens: Vec<String> = build()
        .unique_stream_filtered(KEY_LENGTH, COUNT, |s: &String| s.starts_with('a'))
        .unwrap()
        .collect();
    assert_eq!(tokens.len(), COUNT);
    assert!(tokens.iter().all(|s| s.starts_with('a')));
    assert_distinct(&tokens);
}

#[test]
fn unique_integer_stream() {
    let builder = SequenceBuilder::new(IntegerGenerator::default());
    let numbers: Vec<BigUint> = builder.unique_stream(12, 200).unwrap().collect();
    assert_eq!(numbers.len(), 200);
    assert_distinct(&numbers);
}

#[test]
fn list_collects_in_order() {
    let list = build().list(KEY_LENGTH, COUNT, |_| true).unwrap();
    assert_eq!(list.len(), COUNT);
    assert!(list.iter().all(|s| s.len() == KEY_LENGTH));

    let abc = build_from_pool(Pool::new("abc").unwrap()).unwrap();
    let list = abc.list(KEY_LENGTH, 50, |s: &String| s.starts_with('a')).unwrap();
    assert_eq!(list.len(), 50);
    assert!(list.iter().all(|s| s.starts_with('a')));

    let counter = build_with(Counter::new());
    assert_eq!(counter.list(2, 4, |_| true).unwrap(), vec![0, 1, 2, 3]);
}

#[test]
fn seeded_builders_are_reproducible() {
    let make = || build_from_pool_with(Pool::alphanumeric(), LockRandom::seed_from_u64(42)).unwrap();
    let a: Vec<String> = make().stream_limited(KEY_LENGTH, 20).unwrap().collect();
    let b: Vec<String> = make().stream_limited(KEY_LENGTH, 20).unwrap().collect();
    assert_eq!(a, b);
}

#[test]
fn generator_error_ends_sequence() {
    let builder = build_with(failing_after(3));
    let mut sequence = builder.stream_limited(2, 10).unwrap();
    assert_eq!(sequence.by_ref().collect::<Vec<_>>(), vec![0, 1, 2]);
    assert_eq!(sequence.error(), Some(&Error::EmptyResult));
    assert_eq!(sequence.next(), None);
    assert_eq!(sequence.size_hint(), (0, Some(0)));
}

#[test]
fn list_surfaces_generator_errors() {
    let builder = build_with(failing_after(3));
    assert_eq!(builder.list(2, 10, |_| true).unwrap_err(), Error::EmptyResult);
}

#[test]
fn size_hint_tracks_remaining() {
    let mut sequence = build().stream_limited(5, 3).unwrap();
    assert_eq!(sequence.size_hint(), (0, Some(3)));
    sequence.next();
    assert_eq!(sequence.remaining(), Some(2));
    assert_eq!(sequence.size_hint(), (0, Some(2)));
    assert_eq!(build().stream().size_hint(), (0, None));
}

#[cfg(feature = "parallel")]
mod parallel {
    use super::*;

    #[test]
    fn parallel_stream_yields_exact_count() {
        let builder = build();
        let tokens = builder.parallel_stream(KEY_LENGTH, COUNT).unwrap();
        assert_eq!(tokens.len(), COUNT);
        assert!(tokens.iter().all(|t| t.len() == KEY_LENGTH));

        let tokens = builder.clone().with_workers(3).parallel_stream(5, 7).unwrap();
        assert_eq!(tokens.len(), 7);
    }

    #[test]
    fn parallel_stream_respects_limit_under_contention() {
        // More workers than tokens: late claimers must not leak extras.
        for limit in [1, 2, 5, 64] {
            let builder = build_with(Counter::new()).with_workers(16);
            let tokens = builder.parallel_stream(2, limit).unwrap();
            assert_eq!(tokens.len(), limit);
            assert_distinct(&tokens);
        }
    }

    #[test]
    fn parallel_zero_limit() {
        let builder = build_with(Counter::new()).with_workers(4);
        assert!(builder.parallel_stream(2, 0).unwrap().is_empty());
        assert!(builder.parallel_unique_stream(2, 0).unwrap().is_empty());
        assert_eq!(builder.generator().calls.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn parallel_filtered_stream() {
        let tokens = build()
            .parallel_stream_filtered(KEY_LENGTH, COUNT, |s: &String| s.starts_with('a'))
            .unwrap();
        assert_eq!(tokens.len(), COUNT);
        assert!(tokens.iter().all(|s| s.starts_with('a')));
    }

    #[test]
    fn parallel_unique_stream_has_no_cross_worker_duplicates() {
        let tokens = build()
            .with_workers(8)
            .parallel_unique_stream(KEY_LENGTH, COUNT)
            .unwrap();
        assert_eq!(tokens.len(), COUNT);
        assert_distinct(&tokens);
    }

    #[test]
    fn parallel_unique_over_small_space() {
        // 10^3 possible tokens, 900 requested: workers collide constantly.
        let builder = build_from_pool(Pool::numeric()).unwrap().with_workers(8);
        let tokens = builder.parallel_unique_stream(3, 900).unwrap();
        assert_eq!(tokens.len(), 900);
        assert_distinct(&tokens);
    }

    #[test]
    fn parallel_unique_filtered_stream() {
        let tokens = build()
            .parallel_unique_stream_filtered(KEY_LENGTH, COUNT, |s: &String| !s.starts_with('a'))
            .unwrap();
        assert_eq!(tokens.len(), COUNT);
        assert!(tokens.iter().all(|s| !s.starts_with('a')));
        assert_distinct(&tokens);
    }

    #[test]
    fn parallel_with_seeded_source() {
        let builder = build_from_pool_with(Pool::alphanumeric(), LockRandom::seed_from_u64(5))
            .unwrap()
            .with_workers(4);
        let tokens = builder.parallel_unique_stream(KEY_LENGTH, COUNT).unwrap();
        assert_eq!(tokens.len(), COUNT);
        assert_distinct(&tokens);
    }

    #[test]
    fn parallel_integer_stream() {
        let builder = SequenceBuilder::new(IntegerGenerator::default()).with_workers(4);
        let numbers = builder.parallel_unique_stream(10, 500).unwrap();
        assert_eq!(numbers.len(), 500);
        assert_distinct(&numbers);
    }

    #[test]
    fn parallel_surfaces_generator_errors() {
        let builder = build_with(failing_after(10)).with_workers(4);
        assert_eq!(builder.parallel_stream(2, 100).unwrap_err(), Error::EmptyResult);
    }

    #[test]
    fn parallel_huge_limit_does_not_preallocate() {
        let builder = build_with(failing_after(3)).with_workers(2);
        assert_eq!(
            builder.parallel_stream(2, usize::MAX).unwrap_err(),
            Error::EmptyResult
        );
        let builder = build_with(failing_after(3)).with_workers(2);
        assert_eq!(
            builder.parallel_unique_stream(2, usize::MAX).unwrap_err(),
            Error::EmptyResult
        );
    }

    #[test]
    fn workers_never_zero() {
        assert_eq!(build().with_workers(0).workers(), 1);
        assert!(build().workers() >= 1);
    }

    #[test]
    fn worker_count_resolved_lazily() {
        let builder = build();
        assert!(format!("{builder:?}").contains("workers: None"));
        assert_eq!(builder.workers(), num_cpus::get().max(1));

        let builder = builder.with_workers(3);
        assert!(format!("{builder:?}").contains("workers: Some(3)"));
        assert_eq!(builder.workers(), 3);
    }
}

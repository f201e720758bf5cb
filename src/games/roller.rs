//! Uniform integer rolls
//!
//! Strategies never reach for a global generator. They receive a [`Roller`]
//! so tests can pin the roll and production code can use the thread RNG.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Source of uniformly distributed integers
pub trait Roller: Send + Sync {
    /// Random integer in `[min, max]`, both ends inclusive.
    ///
    /// Reversed bounds are swapped.
    fn rand_int_inclusive(&self, min: i64, max: i64) -> i64;
}

fn ordered(min: i64, max: i64) -> (i64, i64) {
    if min <= max {
        (min, max)
    } else {
        (max, min)
    }
}

/// Thread-local RNG backed roller
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngRoller;

impl ThreadRngRoller {
    pub fn new() -> Self {
        Self
    }
}

impl Roller for ThreadRngRoller {
    fn rand_int_inclusive(&self, min: i64, max: i64) -> i64 {
        let (lo, hi) = ordered(min, max);
        rand::thread_rng().gen_range(lo..=hi)
    }
}

/// Reproducible roller seeded once at construction
#[derive(Debug)]
pub struct SeededRoller {
    rng: Mutex<StdRng>,
}

impl SeededRoller {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Roller for SeededRoller {
    fn rand_int_inclusive(&self, min: i64, max: i64) -> i64 {
        let (lo, hi) = ordered(min, max);
        // A poisoned lock still holds a usable generator.
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_range(lo..=hi)
    }
}

/// Roller that replays a fixed sequence, cycling when exhausted.
///
/// Values are returned as given, ignoring the requested bounds, so a test
/// can force any roll the strategy should see.
#[derive(Debug)]
pub struct FixedRoller {
    values: Vec<i64>,
    index: AtomicUsize,
}

impl FixedRoller {
    /// An empty sequence always rolls 0.
    pub fn new(values: Vec<i64>) -> Self {
        let values = if values.is_empty() { vec![0] } else { values };
        Self {
            values,
            index: AtomicUsize::new(0),
        }
    }

    /// Always returns `value`
    pub fn constant(value: i64) -> Self {
        Self::new(vec![value])
    }
}

impl Roller for FixedRoller {
    fn rand_int_inclusive(&self, _min: i64, _max: i64) -> i64 {
        let idx = self.index.fetch_add(1, Ordering::SeqCst);
        self.values[idx % self.values.len()]
    }
}

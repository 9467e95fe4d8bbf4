use crate::RandSource;
use rand::{Rng, rng};

/// A [`RandSource`] backed by the thread-local RNG (`rand::rng()`).
///
/// This RNG is fast, cryptographically secure (ChaCha-based), and
/// automatically reseeded periodically. A broken entropy source aborts
/// inside `rand` rather than returning degraded randomness, which matches
/// the generator's contract: entropy failure is fatal, never retried.
///
/// Each OS thread has its own RNG instance, so calls from multiple threads
/// are contention-free and safe. This type does **not** store the RNG
/// itself; it is a zero-sized wrapper that accesses the thread-local
/// generator on each call, and may be freely shared across threads.
#[derive(Default, Clone, Debug)]
pub struct ThreadRandom;

impl RandSource<u64> for ThreadRandom {
    fn rand(&self) -> u64 {
        rng().random()
    }
}

impl RandSource<u128> for ThreadRandom {
    fn rand(&self) -> u128 {
        rng().random()
    }
}

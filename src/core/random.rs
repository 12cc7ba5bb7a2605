//! Random event source
//!
//! Every stochastic draw in the engine goes through `RandomEventSource` so a
//! run can be seeded (`ChaChaSource`) or fully scripted (`ScriptedSource`).

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Capability for uniform random draws
pub trait RandomEventSource {
    /// Uniform float in [0, 1)
    fn next_f64(&mut self) -> f64;

    /// Bernoulli trial succeeding with probability `p`
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Uniform index in [0, len). `len` must be non-zero.
    fn index(&mut self, len: usize) -> usize {
        let idx = (self.next_f64() * len as f64) as usize;
        idx.min(len.saturating_sub(1))
    }
}

/// Seedable source backed by ChaCha8
#[derive(Debug, Clone)]
pub struct ChaChaSource {
    rng: ChaCha8Rng,
}

impl ChaChaSource {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }
}

impl RandomEventSource for ChaChaSource {
    fn next_f64(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Deterministic stub: replays queued values, then repeats `fallback`
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    queue: VecDeque<f64>,
    fallback: f64,
}

impl ScriptedSource {
    pub fn new(values: impl IntoIterator<Item = f64>, fallback: f64) -> Self {
        Self {
            queue: values.into_iter().collect(),
            fallback,
        }
    }

    /// Always returns `value`
    pub fn constant(value: f64) -> Self {
        Self::new(std::iter::empty(), value)
    }

    /// A source under which no Bernoulli trial with p < 1 ever succeeds
    pub fn never() -> Self {
        Self::constant(0.999_999)
    }
}

impl RandomEventSource for ScriptedSource {
    fn next_f64(&mut self) -> f64 {
        self.queue.pop_front().unwrap_or(self.fallback)
    }
}

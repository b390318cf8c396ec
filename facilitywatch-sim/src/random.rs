//! Injectable sources of random walk steps.
//!
//! The engine never touches a global generator. Every tick draws its steps
//! from a [`StepSource`] handed in by the caller, so production code can use
//! an OS-seeded RNG while tests replay exact sequences.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of integer steps drawn from `[-delta, +delta]`.
pub trait StepSource: Send {
    /// Draw one step. Implementations must stay within `[-delta, +delta]`.
    fn step(&mut self, delta: u32) -> i64;
}

impl<S: StepSource + ?Sized> StepSource for Box<S> {
    fn step(&mut self, delta: u32) -> i64 {
        (**self).step(delta)
    }
}

/// Uniform steps from any `rand` generator.
///
/// # Example
///
/// ```rust
/// use facilitywatch_sim::{RngSource, StepSource};
///
/// let mut a = RngSource::seeded(7);
/// let mut b = RngSource::seeded(7);
/// let left: Vec<i64> = (0..16).map(|_| a.step(1)).collect();
/// let right: Vec<i64> = (0..16).map(|_| b.step(1)).collect();
/// assert_eq!(left, right);
/// ```
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng + Send> RngSource<R> {
    /// Wrap an existing generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    /// Generator seeded from the operating system.
    pub fn system() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    /// Reproducible generator for a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng + Send> StepSource for RngSource<R> {
    fn step(&mut self, delta: u32) -> i64 {
        if delta == 0 {
            return 0;
        }
        let delta = i64::from(delta);
        self.rng.random_range(-delta..=delta)
    }
}

/// Always returns the same step, clamped into `[-delta, +delta]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedStep(pub i64);

impl StepSource for FixedStep {
    fn step(&mut self, delta: u32) -> i64 {
        let delta = i64::from(delta);
        self.0.clamp(-delta, delta)
    }
}

/// Replays a fixed list of steps, then returns 0 forever.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSteps {
    steps: VecDeque<i64>,
}

impl ScriptedSteps {
    pub fn new(steps: impl IntoIterator<Item = i64>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
        }
    }

    /// Steps not yet replayed.
    pub fn remaining(&self) -> usize {
        self.steps.len()
    }
}

impl StepSource for ScriptedSteps {
    fn step(&mut self, delta: u32) -> i64 {
        let delta = i64::from(delta);
        self.steps.pop_front().unwrap_or(0).clamp(-delta, delta)
    }
}

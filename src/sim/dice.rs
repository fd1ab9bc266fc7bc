//! Random source for the simulation
//!
//! Every random decision in the engine goes through [`Dice::unit`], one
//! uniform draw in `[0, 1)` per decision. Games run on a seeded `Pcg32`;
//! tests swap in [`ScriptedDice`] to force specific outcomes.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Uniform random source
pub trait Dice {
    /// Uniform draw in `[0, 1)`
    fn unit(&mut self) -> f32;

    /// Uniform draw in `[lo, hi)`
    fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.unit()
    }

    /// Bernoulli trial that succeeds with probability `p`
    fn chance(&mut self, p: f32) -> bool {
        self.unit() < p
    }

    /// +1 or -1 with equal odds
    fn sign(&mut self) -> f32 {
        if self.unit() > 0.5 { 1.0 } else { -1.0 }
    }

    /// Uniform index into a collection of `len` items (`len` must be non-zero)
    fn pick(&mut self, len: usize) -> usize {
        ((self.unit() * len as f32) as usize).min(len.saturating_sub(1))
    }
}

impl Dice for Pcg32 {
    fn unit(&mut self) -> f32 {
        self.random::<f32>()
    }
}

/// Seeded generator for a run
pub fn seeded(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Replays a fixed sequence of draws, then falls back to a seeded stream
#[derive(Debug, Clone)]
pub struct ScriptedDice {
    script: VecDeque<f32>,
    fallback: Pcg32,
}

impl ScriptedDice {
    pub fn new(script: impl IntoIterator<Item = f32>) -> Self {
        Self {
            script: script.into_iter().collect(),
            fallback: seeded(0),
        }
    }

    /// Scripted draws not yet consumed
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl Dice for ScriptedDice {
    fn unit(&mut self) -> f32 {
        match self.script.pop_front() {
            // Keep scripted values inside the documented domain
            Some(v) => v.clamp(0.0, 0.999_999),
            None => self.fallback.unit(),
        }
    }
}

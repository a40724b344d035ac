//! Randomness behind the simulation.
//!
//! The instrument never calls a global RNG. It draws through a
//! `RandomSource` so tests can replace the generator with a script and
//! check bounds, rounding, and tare arithmetic exactly.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the draws the instrument needs.
///
/// `Send` is required because the source lives inside the instrument's
/// mutex and is used from whichever worker thread holds the lock.
pub trait RandomSource: Send {
    /// Uniform draw from the closed interval `[low, high]`.
    fn uniform(&mut self, low: f64, high: f64) -> f64;

    /// Bernoulli draw: `true` with probability `p`.
    fn chance(&mut self, p: f64) -> bool;
}

/// Production source backed by `StdRng`.
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    /// Seed from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Fixed seed, for reproducible signal traces.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for StdRandom {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        if low >= high {
            return low;
        }
        self.rng.gen_range(low..=high)
    }

    fn chance(&mut self, p: f64) -> bool {
        self.rng.gen_bool(p.clamp(0.0, 1.0))
    }
}

/// Replays scripted draws.
///
/// Scripted uniform values are clamped into the requested interval, so a
/// script can never push the instrument outside its contract. Once the
/// script runs out, uniform draws return the interval midpoint and chance
/// draws return `p >= 0.5`.
#[derive(Debug, Default, Clone)]
pub struct ScriptedRandom {
    uniforms: VecDeque<f64>,
    chances: VecDeque<bool>,
}

impl ScriptedRandom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue values for successive `uniform` calls.
    pub fn with_uniforms(mut self, values: impl IntoIterator<Item = f64>) -> Self {
        self.uniforms.extend(values);
        self
    }

    /// Queue outcomes for successive `chance` calls.
    pub fn with_chances(mut self, outcomes: impl IntoIterator<Item = bool>) -> Self {
        self.chances.extend(outcomes);
        self
    }
}

impl RandomSource for ScriptedRandom {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        match self.uniforms.pop_front() {
            Some(v) => v.clamp(low, high),
            None => (low + high) / 2.0,
        }
    }

    fn chance(&mut self, p: f64) -> bool {
        self.chances.pop_front().unwrap_or(p >= 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn std_uniform_stays_in_interval() {
        let mut rng = StdRandom::seeded(7);
        for _ in 0..10_000 {
            let v = rng.uniform(-0.2, 0.2);
            assert!((-0.2..=0.2).contains(&v), "out of range: {v}");
        }
    }

    #[test]
    fn std_degenerate_interval() {
        let mut rng = StdRandom::seeded(1);
        assert_eq!(rng.uniform(3.0, 3.0), 3.0);
    }

    #[test]
    fn std_chance_extremes() {
        let mut rng = StdRandom::seeded(3);
        assert!((0..1000).all(|_| rng.chance(1.0)));
        assert!((0..1000).all(|_| !rng.chance(0.0)));
    }

    #[test]
    fn seeded_sources_repeat() {
        let mut a = StdRandom::seeded(99);
        let mut b = StdRandom::seeded(99);
        for _ in 0..100 {
            assert_eq!(a.uniform(0.0, 20.0), b.uniform(0.0, 20.0));
        }
    }

    #[test]
    fn scripted_clamps_and_falls_back() {
        let mut rng = ScriptedRandom::new()
            .with_uniforms([1.0, 50.0])
            .with_chances([false]);
        assert_eq!(rng.uniform(0.0, 10.0), 1.0);
        assert_eq!(rng.uniform(0.0, 10.0), 10.0);
        assert_eq!(rng.uniform(0.0, 10.0), 5.0);
        assert!(!rng.chance(0.9));
        assert!(rng.chance(0.9));
        assert!(!rng.chance(0.1));
    }
}

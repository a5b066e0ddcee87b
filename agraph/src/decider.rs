//! Branch deciders consulted by conditional edges.
//!
//! ```rust
//! use agraph::{BranchDecider, ScriptedDecider};
//!
//! let decider = ScriptedDecider::flips([false, true]);
//! assert!(!decider.flip());
//! assert!(decider.flip());
//! // Exhausted scripts fall back to the first choice.
//! assert_eq!(decider.choose(3), 0);
//! ```

use std::collections::VecDeque;
use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait BranchDecider: Send + Sync {
    /// Picks an index in `0..choices`. `choices` is never zero.
    fn choose(&self, choices: usize) -> usize;

    fn flip(&self) -> bool {
        self.choose(2) == 1
    }
}

/// Uniform random decisions.
#[derive(Debug)]
pub struct CoinFlip {
    rng: Mutex<StdRng>,
}

impl CoinFlip {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for CoinFlip {
    fn default() -> Self {
        Self::new()
    }
}

impl BranchDecider for CoinFlip {
    fn choose(&self, choices: usize) -> usize {
        let choices = choices.max(1);
        match self.rng.lock() {
            Ok(mut rng) => rng.gen_range(0..choices),
            Err(poisoned) => poisoned.into_inner().gen_range(0..choices),
        }
    }
}

/// Replays a fixed sequence of choices.
#[derive(Debug, Default)]
pub struct ScriptedDecider {
    script: Mutex<VecDeque<usize>>,
}

impl ScriptedDecider {
    pub fn new(script: impl IntoIterator<Item = usize>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
        }
    }

    pub fn flips(script: impl IntoIterator<Item = bool>) -> Self {
        Self::new(script.into_iter().map(usize::from))
    }

    pub fn remaining(&self) -> usize {
        self.script.lock().map_or(0, |script| script.len())
    }
}

impl BranchDecider for ScriptedDecider {
    fn choose(&self, choices: usize) -> usize {
        let next = match self.script.lock() {
            Ok(mut script) => script.pop_front(),
            Err(poisoned) => poisoned.into_inner().pop_front(),
        };
        next.unwrap_or(0).min(choices.saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_coin_flips_are_reproducible() {
        let first = CoinFlip::seeded(7);
        let second = CoinFlip::seeded(7);

        let a: Vec<bool> = (0..32).map(|_| first.flip()).collect();
        let b: Vec<bool> = (0..32).map(|_| second.flip()).collect();
        assert_eq!(a, b);
        assert!(a.iter().any(|value| *value));
        assert!(a.iter().any(|value| !*value));
    }

    #[test]
    fn coin_flip_stays_in_range() {
        let decider = CoinFlip::seeded(1);
        assert!((0..100).all(|_| decider.choose(3) < 3));
    }

    #[test]
    fn scripted_choices_are_clamped_to_available_targets() {
        let decider = ScriptedDecider::new([5, 1]);
        assert_eq!(decider.remaining(), 2);
        assert_eq!(decider.choose(2), 1);
        assert_eq!(decider.choose(2), 1);
        assert_eq!(decider.remaining(), 0);
    }
}

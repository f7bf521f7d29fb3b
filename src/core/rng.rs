//! RNG module - weighted token generation
//!
//! A simple LCG drives a weighted draw over the configured token table.
//! The generator's entire state is one `u32`, so a snapshot can capture and
//! restore it as a first-class value and replay the exact draw sequence.

use crate::config::ConfigError;
use crate::types::TokenKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Rebuild an RNG from a previously captured state, verbatim.
    ///
    /// Unlike `new`, this performs no zero-guarding: the LCG's orbit passes
    /// through every u32 value, including 0.
    pub fn from_state(state: u32) -> Self {
        Self { state }
    }

    /// Current internal state, suitable for exact restore
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }
}

/// Weighted token generator
///
/// Draws a kind with probability `weight / weight_total` by walking the
/// weight table in enumeration order over a draw from `[0, weight_total)`.
#[derive(Debug, Clone)]
pub struct TokenGenerator {
    weights: Vec<u32>,
    total: u32,
    rng: SimpleRng,
}

impl TokenGenerator {
    /// Build a generator from per-kind weights and a seed.
    ///
    /// The table must cover every `TokenKind` and sum to a positive value
    /// that fits in a u32; anything else is a configuration error.
    pub fn new(weights: &[u32], seed: u32) -> Result<Self, ConfigError> {
        if weights.len() != TokenKind::COUNT {
            return Err(ConfigError::WeightTable {
                expected: TokenKind::COUNT,
                got: weights.len(),
            });
        }
        let total: u64 = weights.iter().map(|&w| w as u64).sum();
        if total == 0 {
            return Err(ConfigError::ZeroWeightTotal);
        }
        let total = u32::try_from(total).map_err(|_| ConfigError::WeightOverflow)?;
        Ok(Self {
            weights: weights.to_vec(),
            total,
            rng: SimpleRng::new(seed),
        })
    }

    /// Draw the next token kind.
    ///
    /// The draw is taken from `[0, weight_total)` exactly, so every band is
    /// hit with probability `weight / weight_total` and the walk cannot fall
    /// through the end of the table.
    pub fn draw(&mut self) -> TokenKind {
        let mut r = self.rng.next_range(self.total) as i64;
        for (i, &w) in self.weights.iter().enumerate() {
            r -= w as i64;
            if r < 0 {
                return TokenKind::ALL[i];
            }
        }
        unreachable!("weight bands cover [0, weight_total)")
    }

    pub fn weight_total(&self) -> u32 {
        self.total
    }

    /// Capture the generator state for snapshotting
    pub fn state(&self) -> u32 {
        self.rng.state()
    }

    /// Restore a previously captured state
    pub fn set_state(&mut self, state: u32) {
        self.rng = SimpleRng::from_state(state);
    }
}

//! Seeded linear congruential random source
//!
//! Outcome fairness depends on this stream being reproducible everywhere, so
//! the constants are fixed and the state update uses exact integer math:
//!
//! ```text
//! seed ← (1103515245 · seed + 12345) mod 2³¹
//! next  = seed / 2³¹            ∈ [0, 1)
//! ```

use serde::{Deserialize, Serialize};

pub const LCG_MULTIPLIER: u64 = 1_103_515_245;
pub const LCG_INCREMENT: u64 = 12_345;
pub const LCG_MODULUS: u64 = 1 << 31;

/// Deterministic pseudo-random stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomSource {
    state: u64,
}

impl RandomSource {
    /// Create from a seed. Any 32-bit value is accepted; the stream stays
    /// within 31 bits after the first step.
    pub fn new(seed: u32) -> Self {
        Self {
            state: u64::from(seed),
        }
    }

    /// Current internal state
    pub fn state(&self) -> u64 {
        self.state
    }

    /// Advance and return the raw state in `[0, 2³¹)`
    pub fn next_raw(&mut self) -> u32 {
        // a < 2³¹ and state < 2³², so the product fits in u64
        self.state = (LCG_MULTIPLIER * self.state + LCG_INCREMENT) % LCG_MODULUS;
        self.state as u32
    }

    /// Advance and return a float in `[0, 1)`
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_raw()) / LCG_MODULUS as f64
    }

    /// Integer in `[min, max]`, inclusive on both ends
    pub fn next_int(&mut self, min: u32, max: u32) -> u32 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        let span = u64::from(hi - lo) + 1;
        let offset = (self.next_f64() * span as f64).floor() as u64;
        // Guard the float product against rounding up to `span`
        lo + offset.min(span - 1) as u32
    }
}

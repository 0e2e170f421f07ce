//! SplitMix64: fixed-increment 64-bit generator.
//!
//! Adds the golden-ratio gamma to a 64-bit state and passes the result
//! through Stafford's Mix13 finalizer. It is fast, passes BigCrush, and its
//! state can start anywhere, which makes it the crate's seed-expansion
//! engine: every integer-seeded permutation engine draws its key schedule
//! material from one.

use std::fmt;
use std::str::FromStr;

use super::engine::BitEngine;
use super::seed_seq::SeedSequence;
use crate::error::{Result, StreamRngError};
use crate::utils::converter::{write_decimal, StateReader};

/// Weyl-sequence increment, `floor(2^64 / phi)`.
const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// SplitMix64 generator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    /// Creates a generator whose state starts at `seed`.
    pub fn new(seed: u64) -> Self {
        SplitMix64 { state: seed }
    }

    /// Restarts the generator at `seed`.
    pub fn seed(&mut self, seed: u64) {
        self.state = seed;
    }

    /// Returns the next 64-bit output.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(GOLDEN_GAMMA);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Writes the state as a decimal integer.
    pub fn encode(&self) -> String {
        write_decimal([self.state])
    }

    /// Parses state written by [`encode`](Self::encode).
    ///
    /// # Errors
    /// Returns a format error if the text is not exactly one decimal `u64`.
    pub fn decode(text: &str) -> Result<Self> {
        let mut reader = StateReader::new(text, 1);
        let state = reader.read_any()?;
        reader.finish()?;
        Ok(SplitMix64 { state })
    }
}

impl Default for SplitMix64 {
    fn default() -> Self {
        Self::new(0)
    }
}

impl BitEngine for SplitMix64 {
    type Output = u64;

    #[inline]
    fn next_word(&mut self) -> u64 {
        self.next_u64()
    }

    /// Jumps ahead in constant time.
    fn discard(&mut self, count: u64) {
        self.state = self
            .state
            .wrapping_add(GOLDEN_GAMMA.wrapping_mul(count));
    }
}

impl SeedSequence for SplitMix64 {
    /// Emits each 64-bit output as two words, low half first.
    fn generate(&mut self, dest: &mut [u32]) {
        for pair in dest.chunks_mut(2) {
            let value = self.next_u64();
            pair[0] = value as u32;
            if let Some(high) = pair.get_mut(1) {
                *high = (value >> 32) as u32;
            }
        }
    }
}

impl fmt::Display for SplitMix64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for SplitMix64 {
    type Err = StreamRngError;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

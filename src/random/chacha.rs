//! ChaCha-family counter-block engine.
//!
//! Each 16-word output block is the ChaCha permutation of an input block
//! built from four constants, eight key words, the block number and two
//! filler words, with the input added back afterwards (feed-forward).
//! Outputs are handed out one word at a time.
//!
//! The engine keeps a single 64-bit word position: the block number is
//! `position / 16` and the index inside the block is `position % 16`.
//! Equality and serialization both cover it, so equal engines always
//! produce equal output.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, trace};

use super::chacha_core;
use super::engine::BitEngine;
use super::seed_seq::SeedSequence;
use crate::error::{Result, StreamRngError};
use crate::utils::converter::{write_decimal, StateReader};

/// "expand 32-byte k".
const CONSTANTS: [u32; 4] = [0x6170_7865, 0x3320_646e, 0x7962_2d32, 0x6b20_6574];

/// Filler for the unused halves of the seed, stream and counter words.
const FILLER: u32 = 0xdead_beef;

/// Words per output block.
const BLOCK_WORDS: u64 = 16;

/// Seed used by [`ChaCha::default`].
pub const DEFAULT_SEED: u64 = 0xfeed_face_cafe_f00d;

/// ChaCha generator running `R` rounds per block.
///
/// `R` must be a positive even number; other values fail to compile when the
/// engine is constructed.
#[derive(Clone)]
pub struct ChaCha<const R: usize> {
    block: [u32; 16],
    keysetup: [u32; 8],
    ctr: u64,
}

/// ChaCha with 8 rounds.
pub type ChaCha8 = ChaCha<8>;

/// ChaCha with 12 rounds.
pub type ChaCha12 = ChaCha<12>;

/// ChaCha with 20 rounds.
pub type ChaCha20 = ChaCha<20>;

impl<const R: usize> ChaCha<R> {
    const VALID_ROUNDS: () = assert!(R > 0 && R % 2 == 0, "ChaCha rounds must be positive and even");

    /// Creates an engine from a 64-bit seed and a 64-bit stream identifier.
    pub fn new(seed: u64, stream: u64) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::VALID_ROUNDS;
        let mut engine = ChaCha {
            block: [0; 16],
            keysetup: [0; 8],
            ctr: 0,
        };
        engine.seed(seed, stream);
        engine
    }

    /// Creates an engine whose eight key words come from `seq`.
    pub fn from_sequence<S: SeedSequence + ?Sized>(seq: &mut S) -> Self {
        let mut engine = Self::new(DEFAULT_SEED, 0);
        engine.seed_from_sequence(seq);
        engine
    }

    /// Creates an engine from explicit key words and word position.
    pub fn from_parts(keysetup: [u32; 8], position: u64) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::VALID_ROUNDS;
        let mut engine = ChaCha {
            block: [0; 16],
            keysetup,
            ctr: position,
        };
        if engine.ctr % BLOCK_WORDS != 0 {
            engine.generate_block();
        }
        engine
    }

    /// Re-keys from a seed and stream identifier and rewinds to position 0.
    ///
    /// Key words 0-1 hold the seed, 4-5 the stream, each low half first;
    /// words 2, 3, 6 and 7 hold a fixed filler.
    pub fn seed(&mut self, seed: u64, stream: u64) {
        trace!(seed, stream, "chacha seed");
        self.ctr = 0;
        self.keysetup = [
            seed as u32,
            (seed >> 32) as u32,
            FILLER,
            FILLER,
            stream as u32,
            (stream >> 32) as u32,
            FILLER,
            FILLER,
        ];
    }

    /// Re-keys all eight key words from `seq` and rewinds to position 0.
    pub fn seed_from_sequence<S: SeedSequence + ?Sized>(&mut self, seq: &mut S) {
        self.ctr = 0;
        seq.generate(&mut self.keysetup);
        trace!("chacha seeded from sequence");
    }

    /// Returns the eight key words.
    pub fn key_words(&self) -> &[u32; 8] {
        &self.keysetup
    }

    /// Returns the number of words produced since the last reseed.
    pub fn word_position(&self) -> u64 {
        self.ctr
    }

    fn generate_block(&mut self) {
        let block_number = self.ctr / BLOCK_WORDS;
        let mut input = [0u32; 16];
        input[..4].copy_from_slice(&CONSTANTS);
        input[4..12].copy_from_slice(&self.keysetup);
        input[12] = block_number as u32;
        input[13] = (block_number >> 32) as u32;
        input[14] = FILLER;
        input[15] = FILLER;

        self.block = input;
        chacha_core::rounds(&mut self.block, R / 2);
        for (word, original) in self.block.iter_mut().zip(input.iter()) {
            *word = word.wrapping_add(*original);
        }
    }

    /// Writes the eight key words then the word position as decimals.
    pub fn encode(&self) -> String {
        write_decimal(
            self.keysetup
                .iter()
                .map(|&word| u64::from(word))
                .chain(std::iter::once(self.ctr)),
        )
    }

    /// Parses state written by [`encode`](Self::encode).
    ///
    /// # Errors
    /// Returns a format error if the text does not hold exactly eight
    /// 32-bit key words followed by a 64-bit position.
    pub fn decode(text: &str) -> Result<Self> {
        Self::parse_state(text).map_err(|err| {
            debug!(%err, "rejected serialized chacha state");
            err
        })
    }

    fn parse_state(text: &str) -> Result<Self> {
        let mut reader = StateReader::new(text, 9);
        let mut keysetup = [0u32; 8];
        for word in keysetup.iter_mut() {
            *word = reader.read_below(1 << 32)? as u32;
        }
        let position = reader.read_any()?;
        reader.finish()?;
        Ok(Self::from_parts(keysetup, position))
    }
}

impl<const R: usize> BitEngine for ChaCha<R> {
    type Output = u32;

    #[inline]
    fn next_word(&mut self) -> u32 {
        let idx = (self.ctr % BLOCK_WORDS) as usize;
        if idx == 0 {
            self.generate_block();
        }
        self.ctr = self.ctr.wrapping_add(1);
        self.block[idx]
    }

    /// Skips `count` words, generating at most one block.
    fn discard(&mut self, count: u64) {
        let old_idx = self.ctr % BLOCK_WORDS;
        let old_block = self.ctr / BLOCK_WORDS;
        self.ctr = self.ctr.wrapping_add(count);
        // At index 0 the loaded block is stale: next_word has not yet
        // generated the block for this position.
        let landed_mid_block = self.ctr % BLOCK_WORDS != 0;
        if landed_mid_block && (old_idx == 0 || self.ctr / BLOCK_WORDS != old_block) {
            self.generate_block();
        }
    }
}

impl<const R: usize> Default for ChaCha<R> {
    fn default() -> Self {
        Self::new(DEFAULT_SEED, 0)
    }
}

impl<const R: usize> PartialEq for ChaCha<R> {
    fn eq(&self, other: &Self) -> bool {
        self.keysetup == other.keysetup && self.ctr == other.ctr
    }
}

impl<const R: usize> Eq for ChaCha<R> {}

impl<const R: usize> fmt::Debug for ChaCha<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChaCha")
            .field("rounds", &R)
            .field("keysetup", &self.keysetup)
            .field("ctr", &self.ctr)
            .finish_non_exhaustive()
    }
}

impl<const R: usize> fmt::Display for ChaCha<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl<const R: usize> FromStr for ChaCha<R> {
    type Err = StreamRngError;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

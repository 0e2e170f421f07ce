//! ARC4-family keystream-permutation engine.
//!
//! The engine owns a permutation table of `2^BITS` entries and two cursors.
//! Each step swaps two table entries and emits the entry indexed by their
//! sum; a result word is assembled from as many `BITS`-wide steps as its
//! width needs, least significant chunk first.
//!
//! Two historical flaws of the arc4random key schedule are handled:
//!
//! - After the key-schedule pass, `j` is set to `i`. Without this, roughly
//!   one seed in 75000 leaves the generator on a cycle of only 16320 outputs.
//! - The first 1024 steps after every key schedule are discarded, following
//!   "Weaknesses in the Key Scheduling Algorithm of RC4" (Fluhrer, Mantin,
//!   Shamir) and "(Not So) Random Shuffles of RC4" (Mironov).
//!
//! `BITS` below 6 yields generators that fail BigCrush; they are useful for
//! testing only.

use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use tracing::debug;

use super::engine::{BitEngine, TableEntry, Word};
use super::seed_seq::SeedSequence;
use super::splitmix::SplitMix64;
use crate::error::{Result, StreamRngError};
use crate::utils::bits;
use crate::utils::converter::{write_decimal, StateReader};

/// Steps discarded after every key schedule.
pub const KEY_SCHEDULE_DISCARD: usize = 1024;

/// Seed used by [`Arc4Engine::default`].
pub const DEFAULT_SEED: u64 = 0xd0be_ef41;

/// ARC4-family engine producing `W` words from a table of `E` entries
/// indexed by `BITS` bits.
///
/// `BITS` must lie in `1..=E::BITS`; other values fail to compile when the
/// engine is constructed.
#[derive(Clone, PartialEq, Eq)]
pub struct Arc4Engine<W: Word = u32, E: TableEntry = u8, const BITS: u32 = 8> {
    i: usize,
    j: usize,
    table: Box<[E]>,
    _word: PhantomData<W>,
}

/// 32-bit output over a 256-entry byte table (classic arc4random).
pub type Arc4Rand = Arc4Engine<u32, u8, 8>;

/// 64-bit output over a 256-entry byte table.
pub type Arc4Rand64 = Arc4Engine<u64, u8, 8>;

/// 32-bit output over a 65536-entry table of 16-bit entries.
pub type Arc4Rand16 = Arc4Engine<u32, u16, 16>;

impl<W: Word, E: TableEntry, const BITS: u32> Arc4Engine<W, E, BITS> {
    /// Number of table entries.
    pub const BOXES: usize = 1 << BITS;

    const VALID_WIDTH: () = assert!(
        BITS >= 1 && BITS <= E::BITS && BITS <= 16,
        "BITS must be between 1 and the table entry width (at most 16)"
    );

    /// Creates an engine keyed from a single integer.
    ///
    /// The integer seeds a [`SplitMix64`] which supplies the key schedule.
    pub fn new(seed: u64) -> Self {
        let mut expander = SplitMix64::new(seed);
        Self::from_sequence(&mut expander)
    }

    /// Creates an engine keyed from a seed sequence.
    ///
    /// Draws enough words to cover `BOXES / 2` key entries, cutting
    /// `BITS`-wide slices from each word, then runs the key schedule once.
    pub fn from_sequence<S: SeedSequence + ?Sized>(seq: &mut S) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::VALID_WIDTH;
        Self::keyed(Self::BOXES, seq)
    }

    /// Creates an engine whose table holds `boxes` entries.
    ///
    /// Tables that are not a power of two do not produce sensible random
    /// numbers; this exists to study the key schedule in tests.
    ///
    /// # Errors
    /// Returns [`StreamRngError::InvalidBoxCount`] unless
    /// `2 <= boxes <= 2^BITS`.
    #[cfg(feature = "override-boxes")]
    pub fn with_box_count<S: SeedSequence + ?Sized>(boxes: usize, seq: &mut S) -> Result<Self> {
        #[allow(clippy::let_unit_value)]
        let () = Self::VALID_WIDTH;
        Self::check_box_count(boxes)?;
        if !boxes.is_power_of_two() {
            tracing::warn!(boxes, "permutation table size is not a power of two");
        }
        Ok(Self::keyed(boxes, seq))
    }

    /// Re-keys this engine from a single integer, as [`new`](Self::new).
    pub fn seed(&mut self, seed: u64) {
        let mut expander = SplitMix64::new(seed);
        self.seed_from_sequence(&mut expander);
    }

    /// Re-keys this engine from a seed sequence, as
    /// [`from_sequence`](Self::from_sequence). The table size is kept.
    pub fn seed_from_sequence<S: SeedSequence + ?Sized>(&mut self, seq: &mut S) {
        *self = Self::keyed(self.table.len(), seq);
    }

    fn keyed<S: SeedSequence + ?Sized>(boxes: usize, seq: &mut S) -> Self {
        let mut engine = Arc4Engine {
            i: 0,
            j: 0,
            table: (0..boxes).map(E::from_index).collect(),
            _word: PhantomData,
        };
        let key = Self::key_material(boxes, seq);
        debug!(boxes, key_len = key.len(), "arc4 key schedule");
        // boxes >= 2, so the key is never empty.
        engine.schedule(&key);
        engine
    }

    fn key_material<S: SeedSequence + ?Sized>(boxes: usize, seq: &mut S) -> Vec<E> {
        let full_table = boxes == Self::BOXES;
        let per_word = bits::entries_per_word(BITS, full_table);
        let seed_boxes = boxes / 2;
        let mut scribble = vec![0u32; seed_boxes.div_ceil(per_word)];
        seq.generate(&mut scribble);

        (0..seed_boxes)
            .map(|k| {
                let slice = bits::slice_word(scribble[k / per_word], k % per_word, BITS);
                E::from_index(slice as usize % boxes)
            })
            .collect()
    }

    /// Mixes `data` into the table with one full key-schedule pass.
    ///
    /// Starting at the current `i`, every table position is swapped with one
    /// chosen by `j + table[i] + data[n % data.len()]`. Afterwards `j` is set
    /// to `i` and the first [`KEY_SCHEDULE_DISCARD`] steps are thrown away.
    /// May be called again at any time to re-key.
    ///
    /// # Errors
    /// Returns [`StreamRngError::EmptyKeyMaterial`] if `data` is empty.
    pub fn add_random(&mut self, data: &[E]) -> Result<()> {
        if data.is_empty() {
            return Err(StreamRngError::EmptyKeyMaterial);
        }
        debug!(data_len = data.len(), "arc4 re-key");
        self.schedule(data);
        Ok(())
    }

    fn schedule(&mut self, data: &[E]) {
        let boxes = self.table.len();

        let mut i = (self.i + boxes - 1) % boxes;
        let mut j = self.j;
        for n in 0..boxes {
            i = (i + 1) % boxes;
            let si = self.table[i].index();
            j = (j + si + data[n % data.len()].index()) % boxes;
            self.table.swap(i, j);
        }
        self.i = i;
        self.j = i;

        for _ in 0..KEY_SCHEDULE_DISCARD {
            self.step();
        }
    }

    /// Advances the cursors once and returns one `BITS`-wide value.
    #[inline]
    fn step(&mut self) -> usize {
        let boxes = self.table.len();
        self.i = (self.i + 1) % boxes;
        let si = self.table[self.i].index();
        self.j = (self.j + si) % boxes;
        let sj = self.table[self.j].index();
        self.table.swap(self.i, self.j);
        self.table[(si + sj) % boxes].index()
    }

    /// Returns the number of table entries.
    pub fn boxes(&self) -> usize {
        self.table.len()
    }

    /// Returns the permutation table.
    pub fn table(&self) -> &[E] {
        &self.table
    }

    /// Returns the `(i, j)` cursors.
    pub fn cursors(&self) -> (usize, usize) {
        (self.i, self.j)
    }

    /// Writes `i`, `j`, then every table entry as decimal integers.
    pub fn encode(&self) -> String {
        let head = [self.i as u64, self.j as u64];
        write_decimal(
            head.into_iter()
                .chain(self.table.iter().map(|entry| entry.to_u64())),
        )
    }

    /// Parses state written by [`encode`](Self::encode).
    ///
    /// # Errors
    /// Returns a format error if the text is truncated, carries trailing
    /// values, holds a value `>= BOXES`, or the table is not a permutation.
    pub fn decode(text: &str) -> Result<Self> {
        #[allow(clippy::let_unit_value)]
        let () = Self::VALID_WIDTH;
        Self::decode_boxes(text, Self::BOXES)
    }

    /// Parses state of a table holding `boxes` entries.
    ///
    /// # Errors
    /// As [`decode`](Self::decode), plus
    /// [`StreamRngError::InvalidBoxCount`] for an unsupported size.
    #[cfg(feature = "override-boxes")]
    pub fn decode_with_box_count(text: &str, boxes: usize) -> Result<Self> {
        #[allow(clippy::let_unit_value)]
        let () = Self::VALID_WIDTH;
        Self::check_box_count(boxes)?;
        Self::decode_boxes(text, boxes)
    }

    #[cfg(feature = "override-boxes")]
    fn check_box_count(boxes: usize) -> Result<()> {
        if !(2..=Self::BOXES).contains(&boxes) {
            return Err(StreamRngError::InvalidBoxCount {
                boxes,
                max: Self::BOXES,
            });
        }
        Ok(())
    }

    fn decode_boxes(text: &str, boxes: usize) -> Result<Self> {
        Self::parse_state(text, boxes).map_err(|err| {
            debug!(%err, boxes, "rejected serialized arc4 state");
            err
        })
    }

    fn parse_state(text: &str, boxes: usize) -> Result<Self> {
        let limit = boxes as u64;
        let mut reader = StateReader::new(text, boxes + 2);
        let i = reader.read_below(limit)? as usize;
        let j = reader.read_below(limit)? as usize;

        let mut seen = vec![false; boxes];
        let mut table = Vec::with_capacity(boxes);
        for _ in 0..boxes {
            let value = reader.read_below(limit)? as usize;
            if std::mem::replace(&mut seen[value], true) {
                return Err(StreamRngError::NotAPermutation {
                    value: value as u64,
                });
            }
            table.push(E::from_index(value));
        }
        reader.finish()?;

        Ok(Arc4Engine {
            i,
            j,
            table: table.into_boxed_slice(),
            _word: PhantomData,
        })
    }
}

impl<W: Word, E: TableEntry, const BITS: u32> BitEngine for Arc4Engine<W, E, BITS> {
    type Output = W;

    #[inline]
    fn next_word(&mut self) -> W {
        let mut value = W::ZERO;
        let mut shift = 0;
        while shift < W::BITS {
            value = value.or_shifted(self.step() as u64, shift);
            shift += BITS;
        }
        value
    }

    fn discard(&mut self, count: u64) {
        let steps = u64::from(bits::chunks_per_word(W::BITS, BITS));
        for _ in 0..count.saturating_mul(steps) {
            self.step();
        }
    }
}

impl<W: Word, E: TableEntry, const BITS: u32> Default for Arc4Engine<W, E, BITS> {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl<W: Word, E: TableEntry, const BITS: u32> fmt::Debug for Arc4Engine<W, E, BITS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arc4Engine")
            .field("bits", &BITS)
            .field("boxes", &self.table.len())
            .field("i", &self.i)
            .field("j", &self.j)
            .finish_non_exhaustive()
    }
}

impl<W: Word, E: TableEntry, const BITS: u32> fmt::Display for Arc4Engine<W, E, BITS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl<W: Word, E: TableEntry, const BITS: u32> FromStr for Arc4Engine<W, E, BITS> {
    type Err = StreamRngError;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

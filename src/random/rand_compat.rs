//! `rand_core` integration.
//!
//! Engines with 32- or 64-bit output implement [`RngCore`], and every engine
//! implements [`SeedableRng`], so they can drive anything in the `rand`
//! ecosystem. `seed_from_u64` routes to each engine's native integer seeding,
//! so `E::seed_from_u64(x)` and `E::new(x)` agree.

use rand_core::{impls, Error, RngCore, SeedableRng};

use super::arc4::Arc4Engine;
use super::chacha::ChaCha;
use super::engine::{BitEngine, TableEntry, Word};
use super::seed_seq::SeedSeq;
use super::splitmix::SplitMix64;

fn seed_words(seed: &[u8; 32]) -> [u32; 8] {
    let mut words = [0u32; 8];
    for (word, bytes) in words.iter_mut().zip(seed.chunks_exact(4)) {
        *word = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    }
    words
}

impl<const R: usize> RngCore for ChaCha<R> {
    fn next_u32(&mut self) -> u32 {
        self.next_word()
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl<const R: usize> SeedableRng for ChaCha<R> {
    type Seed = [u8; 32];

    /// Uses the 32 seed bytes as the eight key words, little-endian.
    fn from_seed(seed: Self::Seed) -> Self {
        Self::from_parts(seed_words(&seed), 0)
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new(state, 0)
    }
}

impl<E: TableEntry, const BITS: u32> RngCore for Arc4Engine<u32, E, BITS> {
    fn next_u32(&mut self) -> u32 {
        self.next_word()
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl<E: TableEntry, const BITS: u32> RngCore for Arc4Engine<u64, E, BITS> {
    fn next_u32(&mut self) -> u32 {
        self.next_word() as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next_word()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl<W: Word, E: TableEntry, const BITS: u32> SeedableRng for Arc4Engine<W, E, BITS> {
    type Seed = [u8; 32];

    /// Mixes the 32 seed bytes through a [`SeedSeq`] into the key schedule.
    fn from_seed(seed: Self::Seed) -> Self {
        Self::from_sequence(&mut SeedSeq::new(&seed_words(&seed)))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new(state)
    }
}

impl RngCore for SplitMix64 {
    fn next_u32(&mut self) -> u32 {
        (self.next_word() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next_word()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for SplitMix64 {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u64::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new(state)
    }
}

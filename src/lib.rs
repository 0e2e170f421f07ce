//! Keystream PRNG engines with unbiased sampling and randomized algorithms.
//!
//! streamrng provides two deterministic bit-stream engines, a bias-free
//! bounded sampler built on the engine contract, and the two algorithms
//! that consume it: an in-place Fisher-Yates shuffle and a randomized
//! quicksort. None of the engines are meant for cryptographic use.
//!
//! # Architecture
//!
//! ```text
//! BitEngine   (fixed-width output: next_word and discard)
//!     ├── Arc4Engine<W, E, BITS>  (permutation table + two cursors)
//!     ├── ChaCha<R>               (key words + word-position counter)
//!     └── SplitMix64              (seed expansion for integer seeding)
//!          ↓ &mut engine
//! bounded_rand  (rejection sampling into [0, n))
//!          ↓
//! shuffle / quicksort  (in place over a caller-owned slice)
//! ```
//!
//! # Examples
//!
//! Shuffle and sort a vector with an ARC4 engine:
//!
//! ```
//! use streamrng::random::arc4::Arc4Rand;
//! use streamrng::{quicksort, shuffle};
//!
//! let mut engine = Arc4Rand::new(2024);
//! let mut values: Vec<u32> = (0..100).collect();
//!
//! shuffle(&mut values, &mut engine).unwrap();
//! quicksort(&mut values, &mut engine).unwrap();
//! assert_eq!(values, (0..100).collect::<Vec<u32>>());
//! ```
//!
//! Draw unbiased dice rolls and save the engine state:
//!
//! ```
//! use streamrng::random::chacha::ChaCha20;
//! use streamrng::bounded_rand;
//!
//! let mut engine = ChaCha20::new(42, 0);
//! let roll = bounded_rand(&mut engine, 6).unwrap() + 1;
//! assert!((1..=6).contains(&roll));
//!
//! let saved = engine.encode();
//! let restored = ChaCha20::decode(&saved).unwrap();
//! assert_eq!(restored, engine);
//! ```

#![deny(clippy::all)]

pub mod error;
pub mod quicksort;
pub mod random;
pub mod sampler;
pub mod shuffle;
pub mod utils;

pub use error::{Result, StreamRngError};
pub use quicksort::quicksort;
pub use random::arc4::{Arc4Engine, Arc4Rand, Arc4Rand16, Arc4Rand64};
pub use random::chacha::{ChaCha, ChaCha12, ChaCha20, ChaCha8};
pub use random::engine::{BitEngine, TableEntry, Word};
pub use random::seed_seq::{SeedSeq, SeedSequence};
pub use random::splitmix::SplitMix64;
pub use sampler::{bounded_rand, sample_index, sample_range};
pub use shuffle::shuffle;

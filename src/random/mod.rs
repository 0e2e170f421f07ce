//! Random number engines.
//!
//! Provides the [`BitEngine`](engine::BitEngine) contract, the seed
//! sequences used to key engines, and the engines themselves: the
//! ARC4-family permutation engine, the ChaCha-family counter-block engine,
//! and SplitMix64.

pub mod arc4;
pub mod chacha;
pub mod chacha_core;
pub mod engine;
pub mod rand_compat;
pub mod seed_seq;
pub mod splitmix;

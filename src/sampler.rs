//! Unbiased bounded sampling.
//!
//! Reducing a raw engine word modulo `n` favours small results whenever `n`
//! does not divide the engine's range. [`bounded_rand`] rejects the
//! `range mod n` lowest raw values first, leaving a multiple of `n` equally
//! likely values, so every result in `[0, n)` is exactly equally likely.
//!
//! The rejected region is smaller than `n`, so for any bound far below the
//! engine range nearly every call uses a single draw.

use std::ops::Range;

use crate::error::{Result, StreamRngError};
use crate::random::engine::{BitEngine, Word};

/// Draws a uniformly distributed value in `[0, upper_bound)`.
///
/// # Parameters
/// - `engine`: The engine to draw from.
/// - `upper_bound`: Exclusive upper bound.
///
/// # Errors
/// Returns [`StreamRngError::ZeroBound`] if `upper_bound` is zero.
pub fn bounded_rand<E>(engine: &mut E, upper_bound: E::Output) -> Result<E::Output>
where
    E: BitEngine + ?Sized,
{
    if upper_bound == E::Output::ZERO {
        return Err(StreamRngError::ZeroBound);
    }
    // A full-width engine's range wraps to zero, which is still correct here.
    let range = E::MAX.wrapping_sub(E::MIN).wrapping_add(E::Output::ONE);
    let threshold = range.wrapping_sub(upper_bound).rem(upper_bound);
    loop {
        let r = engine.next_word().wrapping_sub(E::MIN);
        if r >= threshold {
            return Ok(r.rem(upper_bound));
        }
    }
}

/// Draws a uniformly distributed index in `[0, len)`.
///
/// # Errors
/// - [`StreamRngError::ZeroBound`] if `len` is zero.
/// - [`StreamRngError::RangeTooWide`] if `len` does not fit the engine word.
pub fn sample_index<E>(engine: &mut E, len: usize) -> Result<usize>
where
    E: BitEngine + ?Sized,
{
    let bound = check_width::<E>(len)?;
    let value = bounded_rand(engine, bound)?;
    // value < bound <= len, so it fits usize.
    Ok(value.to_u64() as usize)
}

/// Draws a uniformly distributed value in `range`.
///
/// # Errors
/// Returns [`StreamRngError::ZeroBound`] if `range` is empty.
pub fn sample_range<E>(engine: &mut E, range: Range<E::Output>) -> Result<E::Output>
where
    E: BitEngine + ?Sized,
{
    if range.end <= range.start {
        return Err(StreamRngError::ZeroBound);
    }
    let offset = bounded_rand(engine, range.end.wrapping_sub(range.start))?;
    Ok(range.start.wrapping_add(offset))
}

/// Converts `len` into the engine word.
///
/// # Errors
/// Returns [`StreamRngError::RangeTooWide`] if it does not fit.
pub(crate) fn check_width<E>(len: usize) -> Result<E::Output>
where
    E: BitEngine + ?Sized,
{
    E::Output::try_from_usize(len).ok_or(StreamRngError::RangeTooWide {
        len,
        bits: <E::Output as Word>::BITS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::chacha::ChaCha8;

    /// Replays a fixed list of words.
    struct Scripted {
        words: Vec<u8>,
        pos: usize,
    }

    impl BitEngine for Scripted {
        type Output = u8;

        fn next_word(&mut self) -> u8 {
            let word = self.words[self.pos];
            self.pos += 1;
            word
        }
    }

    /// An engine whose range is `[10, 19]`.
    struct Narrow(u8);

    impl BitEngine for Narrow {
        type Output = u8;
        const MIN: u8 = 10;
        const MAX: u8 = 19;

        fn next_word(&mut self) -> u8 {
            self.0 = (self.0 + 1) % 10;
            10 + self.0
        }
    }

    #[test]
    fn test_zero_bound_rejected() {
        let mut engine = ChaCha8::default();
        assert_eq!(bounded_rand(&mut engine, 0), Err(StreamRngError::ZeroBound));
    }

    #[test]
    fn test_rejects_below_threshold() {
        // 256 mod 7 = 4, so raw values 0..4 are rejected.
        let mut engine = Scripted {
            words: vec![0, 3, 4, 200],
            pos: 0,
        };
        assert_eq!(bounded_rand(&mut engine, 7), Ok(4 % 7));
        assert_eq!(engine.pos, 3);
    }

    #[test]
    fn test_power_of_two_never_rejects() {
        let mut engine = Scripted {
            words: vec![0, 1, 255],
            pos: 0,
        };
        assert_eq!(bounded_rand(&mut engine, 16), Ok(0));
        assert_eq!(bounded_rand(&mut engine, 16), Ok(1));
        assert_eq!(bounded_rand(&mut engine, 16), Ok(15));
    }

    #[test]
    fn test_bound_of_one() {
        let mut engine = ChaCha8::new(1, 1);
        for _ in 0..100 {
            assert_eq!(bounded_rand(&mut engine, 1), Ok(0));
        }
    }

    #[test]
    fn test_engine_with_offset_range() {
        // Range size 10, bound 3: threshold 10 - 3 = 7 mod 3 = 1.
        let mut engine = Narrow(0);
        for _ in 0..100 {
            let value = bounded_rand(&mut engine, 3).unwrap();
            assert!(value < 3);
        }
    }

    #[test]
    fn test_results_in_range() {
        let mut engine = ChaCha8::new(99, 0);
        for bound in [1u32, 2, 3, 7, 1000, u32::MAX] {
            for _ in 0..200 {
                assert!(bounded_rand(&mut engine, bound).unwrap() < bound);
            }
        }
    }

    #[test]
    fn test_sample_index_too_wide() {
        let mut engine = Scripted {
            words: vec![],
            pos: 0,
        };
        assert_eq!(
            sample_index(&mut engine, 300),
            Err(StreamRngError::RangeTooWide { len: 300, bits: 8 })
        );
    }

    #[test]
    fn test_sample_range() {
        let mut engine = ChaCha8::new(4, 0);
        for _ in 0..500 {
            let value = sample_range(&mut engine, 100..110).unwrap();
            assert!((100..110).contains(&value));
        }
        assert_eq!(
            sample_range(&mut engine, 5..5),
            Err(StreamRngError::ZeroBound)
        );
    }
}

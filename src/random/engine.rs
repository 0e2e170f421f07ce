//! The deterministic bit-stream engine contract.
//!
//! Every generator in this crate produces fixed-width unsigned words from
//! owned state. [`BitEngine`] is the capability set the sampling and
//! permutation algorithms consume; [`Word`] abstracts over the output width
//! and [`TableEntry`] over the narrow integers a permutation table stores.

use std::fmt;
use std::str::FromStr;

/// Unsigned fixed-width integer produced by an engine.
pub trait Word:
    Copy + Eq + Ord + Default + fmt::Debug + fmt::Display + FromStr + Send + Sync + 'static
{
    /// Width in bits.
    const BITS: u32;
    /// The value `0`.
    const ZERO: Self;
    /// The value `1`.
    const ONE: Self;
    /// The largest representable value.
    const MAX: Self;

    /// Addition modulo `2^BITS`.
    fn wrapping_add(self, rhs: Self) -> Self;

    /// Subtraction modulo `2^BITS`.
    fn wrapping_sub(self, rhs: Self) -> Self;

    /// Remainder of `self / rhs`. Panics if `rhs` is zero.
    fn rem(self, rhs: Self) -> Self;

    /// Truncates `value` to the low `BITS` bits.
    fn from_u64(value: u64) -> Self;

    /// Widens to `u64`.
    fn to_u64(self) -> u64;

    /// Converts `value`, returning `None` if it does not fit.
    fn try_from_usize(value: usize) -> Option<Self>;

    /// ORs `chunk` into `self` at bit offset `shift`.
    ///
    /// Bits of `chunk` that land at or above `BITS` are dropped; `shift`
    /// must be below `BITS`.
    fn or_shifted(self, chunk: u64, shift: u32) -> Self;
}

/// Narrow unsigned integer stored in a permutation table.
///
/// Implemented for `u8` and `u16`. The width bounds the number of bits a
/// permutation engine may index its table with.
pub trait TableEntry: Word {
    /// Converts a table index known to fit the entry width.
    fn from_index(index: usize) -> Self;

    /// Widens to a table index.
    fn index(self) -> usize;
}

macro_rules! impl_word {
    ($($ty:ty),*) => {
        $(
            impl Word for $ty {
                const BITS: u32 = <$ty>::BITS;
                const ZERO: Self = 0;
                const ONE: Self = 1;
                const MAX: Self = <$ty>::MAX;

                #[inline]
                fn wrapping_add(self, rhs: Self) -> Self {
                    <$ty>::wrapping_add(self, rhs)
                }

                #[inline]
                fn wrapping_sub(self, rhs: Self) -> Self {
                    <$ty>::wrapping_sub(self, rhs)
                }

                #[inline]
                fn rem(self, rhs: Self) -> Self {
                    self % rhs
                }

                #[inline]
                fn from_u64(value: u64) -> Self {
                    value as $ty
                }

                #[inline]
                fn to_u64(self) -> u64 {
                    self as u64
                }

                #[inline]
                fn try_from_usize(value: usize) -> Option<Self> {
                    <$ty>::try_from(value).ok()
                }

                #[inline]
                fn or_shifted(self, chunk: u64, shift: u32) -> Self {
                    self | ((chunk as $ty) << shift)
                }
            }
        )*
    };
}

impl_word!(u8, u16, u32, u64);

impl TableEntry for u8 {
    #[inline]
    fn from_index(index: usize) -> Self {
        index as u8
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

impl TableEntry for u16 {
    #[inline]
    fn from_index(index: usize) -> Self {
        index as u16
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// A deterministic generator of fixed-width unsigned words.
///
/// Two engines of the same type in equal states produce identical output.
/// Every call mutates the engine, so an instance must not be shared between
/// threads without external locking; parallel users should each own one.
pub trait BitEngine {
    /// The output word.
    type Output: Word;

    /// Smallest value [`next_word`](Self::next_word) can return.
    const MIN: Self::Output = <Self::Output as Word>::ZERO;

    /// Largest value [`next_word`](Self::next_word) can return.
    const MAX: Self::Output = <Self::Output as Word>::MAX;

    /// Produces the next output word and advances the state.
    fn next_word(&mut self) -> Self::Output;

    /// Advances the state by `count` outputs without returning them.
    fn discard(&mut self, count: u64) {
        for _ in 0..count {
            self.next_word();
        }
    }
}

impl<E: BitEngine + ?Sized> BitEngine for &mut E {
    type Output = E::Output;

    const MIN: Self::Output = E::MIN;
    const MAX: Self::Output = E::MAX;

    #[inline]
    fn next_word(&mut self) -> Self::Output {
        (**self).next_word()
    }

    fn discard(&mut self, count: u64) {
        (**self).discard(count)
    }
}

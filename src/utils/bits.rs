//! Bit slicing utilities for key scheduling and output assembly.
//!
//! Seed sequences produce 32-bit words, while permutation tables consume
//! `BITS`-wide entries and engine outputs are assembled from `BITS`-wide
//! chunks. These helpers keep that arithmetic in one place.

/// Width of the words produced by a seed sequence.
pub const SEED_WORD_BITS: u32 = 32;

/// Returns how many `width`-bit table entries are cut from one seed word.
///
/// Tables whose size is not a full power of two take one entry per word,
/// so the slices never overlap a value the modulo would fold.
///
/// # Parameters
/// - `width`: Bits per table entry (1..=32).
/// - `full_table`: Whether the table holds exactly `2^width` entries.
pub fn entries_per_word(width: u32, full_table: bool) -> usize {
    if !full_table || width == 0 || width > SEED_WORD_BITS {
        return 1;
    }
    (SEED_WORD_BITS / width) as usize
}

/// Extracts the `index`-th `width`-bit slice of `word`, least significant first.
///
/// Bits above the slice are left in place; callers reduce the result modulo
/// the table size. Returns `0` when the slice starts past the end of the word.
///
/// # Parameters
/// - `word`: The 32-bit seed word.
/// - `index`: Slice position within the word.
/// - `width`: Bits per slice.
pub fn slice_word(word: u32, index: usize, width: u32) -> u32 {
    let shift = (index as u32).saturating_mul(width);
    word.checked_shr(shift).unwrap_or(0)
}

/// Returns how many `chunk_bits`-wide chunks fill a `word_bits`-wide value.
///
/// The last chunk may overhang the word; its excess bits are discarded when
/// it is shifted into place.
pub fn chunks_per_word(word_bits: u32, chunk_bits: u32) -> u32 {
    word_bits.div_ceil(chunk_bits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_per_word_full_tables() {
        assert_eq!(entries_per_word(8, true), 4);
        assert_eq!(entries_per_word(16, true), 2);
        assert_eq!(entries_per_word(5, true), 6);
        assert_eq!(entries_per_word(1, true), 32);
    }

    #[test]
    fn test_entries_per_word_partial_table() {
        assert_eq!(entries_per_word(8, false), 1);
    }

    #[test]
    fn test_slice_word_basic() {
        let word = 0x1234_5678u32;
        assert_eq!(slice_word(word, 0, 8) & 0xFF, 0x78);
        assert_eq!(slice_word(word, 1, 8) & 0xFF, 0x56);
        assert_eq!(slice_word(word, 3, 8), 0x12);
    }

    #[test]
    fn test_slice_word_past_end() {
        assert_eq!(slice_word(u32::MAX, 4, 8), 0);
        assert_eq!(slice_word(u32::MAX, usize::MAX, 16), 0);
    }

    #[test]
    fn test_chunks_per_word() {
        assert_eq!(chunks_per_word(32, 8), 4);
        assert_eq!(chunks_per_word(64, 8), 8);
        assert_eq!(chunks_per_word(32, 5), 7);
        assert_eq!(chunks_per_word(8, 16), 1);
    }
}

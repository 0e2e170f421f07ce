//! ChaCha round functions.
//!
//! Two implementations of the same permutation over a 16-word block:
//!
//! - [`scalar_rounds`] applies quarter-rounds to indexed words, four column
//!   groups then four diagonal groups per double round.
//! - [`row_rounds`] holds the block as four 4-lane rows and runs each
//!   quarter-round step on a whole row at once, rotating lanes between the
//!   column and diagonal halves. This is the shape SIMD code takes and it
//!   auto-vectorizes well.
//!
//! [`rounds`] dispatches to one of them: the scalar form by default, the row
//! form with the `row-core` feature. Their outputs are bit-identical.

/// One row of the block: four consecutive words.
type Row = [u32; 4];

/// The ChaCha quarter-round on four words.
#[inline(always)]
pub fn quarter_round(a: u32, b: u32, c: u32, d: u32) -> (u32, u32, u32, u32) {
    let a = a.wrapping_add(b);
    let d = (d ^ a).rotate_left(16);
    let c = c.wrapping_add(d);
    let b = (b ^ c).rotate_left(12);
    let a = a.wrapping_add(b);
    let d = (d ^ a).rotate_left(8);
    let c = c.wrapping_add(d);
    let b = (b ^ c).rotate_left(7);
    (a, b, c, d)
}

#[inline(always)]
fn quarter_round_at(x: &mut [u32; 16], a: usize, b: usize, c: usize, d: usize) {
    let (na, nb, nc, nd) = quarter_round(x[a], x[b], x[c], x[d]);
    x[a] = na;
    x[b] = nb;
    x[c] = nc;
    x[d] = nd;
}

/// Applies `double_rounds` column+diagonal round pairs to `block` in place.
pub fn scalar_rounds(block: &mut [u32; 16], double_rounds: usize) {
    for _ in 0..double_rounds {
        quarter_round_at(block, 0, 4, 8, 12);
        quarter_round_at(block, 1, 5, 9, 13);
        quarter_round_at(block, 2, 6, 10, 14);
        quarter_round_at(block, 3, 7, 11, 15);
        quarter_round_at(block, 0, 5, 10, 15);
        quarter_round_at(block, 1, 6, 11, 12);
        quarter_round_at(block, 2, 7, 8, 13);
        quarter_round_at(block, 3, 4, 9, 14);
    }
}

#[inline(always)]
fn add(x: Row, y: Row) -> Row {
    [
        x[0].wrapping_add(y[0]),
        x[1].wrapping_add(y[1]),
        x[2].wrapping_add(y[2]),
        x[3].wrapping_add(y[3]),
    ]
}

#[inline(always)]
fn xor_rotate(x: Row, y: Row, bits: u32) -> Row {
    [
        (x[0] ^ y[0]).rotate_left(bits),
        (x[1] ^ y[1]).rotate_left(bits),
        (x[2] ^ y[2]).rotate_left(bits),
        (x[3] ^ y[3]).rotate_left(bits),
    ]
}

/// Rotates the lanes of `x` left by `n` positions.
#[inline(always)]
fn rotate_lanes(x: Row, n: usize) -> Row {
    [x[n % 4], x[(n + 1) % 4], x[(n + 2) % 4], x[(n + 3) % 4]]
}

#[inline(always)]
fn row_quarter_round(a: &mut Row, b: &mut Row, c: &mut Row, d: &mut Row) {
    *a = add(*a, *b);
    *d = xor_rotate(*d, *a, 16);
    *c = add(*c, *d);
    *b = xor_rotate(*b, *c, 12);
    *a = add(*a, *b);
    *d = xor_rotate(*d, *a, 8);
    *c = add(*c, *d);
    *b = xor_rotate(*b, *c, 7);
}

fn split_rows(block: &[u32; 16]) -> [Row; 4] {
    let mut rows = [[0u32; 4]; 4];
    for (r, row) in rows.iter_mut().enumerate() {
        row.copy_from_slice(&block[4 * r..4 * r + 4]);
    }
    rows
}

/// Row-wise equivalent of [`scalar_rounds`].
pub fn row_rounds(block: &mut [u32; 16], double_rounds: usize) {
    let [mut a, mut b, mut c, mut d] = split_rows(block);
    for _ in 0..double_rounds {
        row_quarter_round(&mut a, &mut b, &mut c, &mut d);
        // Line the diagonals up as columns.
        b = rotate_lanes(b, 1);
        c = rotate_lanes(c, 2);
        d = rotate_lanes(d, 3);
        row_quarter_round(&mut a, &mut b, &mut c, &mut d);
        b = rotate_lanes(b, 3);
        c = rotate_lanes(c, 2);
        d = rotate_lanes(d, 1);
    }
    for (r, row) in [a, b, c, d].iter().enumerate() {
        block[4 * r..4 * r + 4].copy_from_slice(row);
    }
}

/// Applies `double_rounds` round pairs with the configured implementation.
#[inline]
pub fn rounds(block: &mut [u32; 16], double_rounds: usize) {
    #[cfg(feature = "row-core")]
    row_rounds(block, double_rounds);
    #[cfg(not(feature = "row-core"))]
    scalar_rounds(block, double_rounds);
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Block function input from RFC 7539 section 2.3.2.
    #[rustfmt::skip]
    const RFC_INPUT: [u32; 16] = [
        0x61707865, 0x3320646e, 0x79622d32, 0x6b206574,
        0x03020100, 0x07060504, 0x0b0a0908, 0x0f0e0d0c,
        0x13121110, 0x17161514, 0x1b1a1918, 0x1f1e1d1c,
        0x00000001, 0x09000000, 0x4a000000, 0x00000000,
    ];

    /// ChaCha20 block output (after feed-forward) for [`RFC_INPUT`].
    #[rustfmt::skip]
    const RFC_OUTPUT: [u32; 16] = [
        0xe4e7f110, 0x15593bd1, 0x1fdd0f50, 0xc47120a3,
        0xc7f4d1c7, 0x0368c033, 0x9aaa2204, 0x4e6cd4c3,
        0x466482d2, 0x09aa9f07, 0x05d7c214, 0xa2028bd9,
        0xd19c12b5, 0xb94e16de, 0xe883d0cb, 0x4e3c50a2,
    ];

    fn block_function(rounds_fn: fn(&mut [u32; 16], usize)) -> [u32; 16] {
        let mut block = RFC_INPUT;
        rounds_fn(&mut block, 10);
        for (word, input) in block.iter_mut().zip(RFC_INPUT.iter()) {
            *word = word.wrapping_add(*input);
        }
        block
    }

    #[test]
    fn test_quarter_round_rfc_vector() {
        let (a, b, c, d) = quarter_round(0x11111111, 0x01020304, 0x9b8d6f43, 0x01234567);
        assert_eq!(a, 0xea2a92f4);
        assert_eq!(b, 0xcb1cf8ce);
        assert_eq!(c, 0x4581472e);
        assert_eq!(d, 0x5881c4bb);
    }

    #[test]
    fn test_scalar_block_function_rfc_vector() {
        assert_eq!(block_function(scalar_rounds), RFC_OUTPUT);
    }

    #[test]
    fn test_row_block_function_rfc_vector() {
        assert_eq!(block_function(row_rounds), RFC_OUTPUT);
    }

    #[test]
    fn test_row_matches_scalar() {
        let mut seed = 0x0123_4567u32;
        for double_rounds in [1usize, 2, 4, 6, 10] {
            let mut block = [0u32; 16];
            for word in block.iter_mut() {
                seed = seed.wrapping_mul(747796405).wrapping_add(2891336453);
                *word = seed;
            }
            let mut scalar = block;
            let mut row = block;
            scalar_rounds(&mut scalar, double_rounds);
            row_rounds(&mut row, double_rounds);
            assert_eq!(scalar, row, "mismatch at {} double rounds", double_rounds);
        }
    }

    #[test]
    fn test_dispatch_matches_scalar() {
        let mut expected = RFC_INPUT;
        let mut actual = RFC_INPUT;
        scalar_rounds(&mut expected, 4);
        rounds(&mut actual, 4);
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_rotate_lanes() {
        let row = [1, 2, 3, 4];
        assert_eq!(rotate_lanes(row, 1), [2, 3, 4, 1]);
        assert_eq!(rotate_lanes(rotate_lanes(row, 1), 3), row);
    }
}

//! Seed sequences for engine initialization.
//!
//! A [`SeedSequence`] fills a buffer of 32-bit words with seed material.
//! Engines take any implementor in their sequence-seeding constructors,
//! drawing exactly as many words as their key schedule needs.
//!
//! [`SeedSeq`] is the standard entropy-mixing seed sequence: it spreads a
//! short list of input words over an output buffer of any length so that
//! every output word depends on every input word.

/// Source of 32-bit seed words.
pub trait SeedSequence {
    /// Fills `dest` with seed words.
    ///
    /// Calling `generate` again with a buffer of the same length must yield
    /// the same words, for sequences meant to be reproducible.
    fn generate(&mut self, dest: &mut [u32]);
}

impl<S: SeedSequence + ?Sized> SeedSequence for &mut S {
    fn generate(&mut self, dest: &mut [u32]) {
        (**self).generate(dest)
    }
}

/// Initial fill value of the output buffer.
const FILL: u32 = 0x8b8b_8b8b;

/// Multiplier of the first (additive) mixing pass.
const MIX_ADD: u32 = 1_664_525;

/// Multiplier of the second (xor) mixing pass.
const MIX_XOR: u32 = 1_566_083_941;

/// Entropy-mixing seed sequence over a list of 32-bit input words.
///
/// Output depends only on the input words and the requested length.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SeedSeq {
    entropy: Vec<u32>,
}

impl SeedSeq {
    /// Creates a seed sequence over `entropy`.
    pub fn new(entropy: &[u32]) -> Self {
        SeedSeq {
            entropy: entropy.to_vec(),
        }
    }

    /// Creates a seed sequence from a 64-bit value, low half first.
    pub fn from_u64(value: u64) -> Self {
        SeedSeq {
            entropy: vec![value as u32, (value >> 32) as u32],
        }
    }

    /// Returns the number of input words.
    pub fn size(&self) -> usize {
        self.entropy.len()
    }

    /// Returns the input words.
    pub fn param(&self) -> &[u32] {
        &self.entropy
    }

    #[inline]
    fn temper(x: u32) -> u32 {
        x ^ (x >> 27)
    }
}

impl SeedSequence for SeedSeq {
    fn generate(&mut self, dest: &mut [u32]) {
        let n = dest.len();
        if n == 0 {
            return;
        }
        dest.fill(FILL);

        let s = self.entropy.len();
        let t = if n >= 623 {
            11
        } else if n >= 68 {
            7
        } else if n >= 39 {
            5
        } else if n >= 7 {
            3
        } else {
            (n - 1) / 2
        };
        let p = (n - t) / 2;
        let q = p + t;
        let m = (s + 1).max(n);

        for k in 0..m {
            let r1 = MIX_ADD.wrapping_mul(Self::temper(
                dest[k % n] ^ dest[(k + p) % n] ^ dest[(k + n - 1) % n],
            ));
            let r2 = if k == 0 {
                r1.wrapping_add(s as u32)
            } else if k <= s {
                r1.wrapping_add((k % n) as u32)
                    .wrapping_add(self.entropy[k - 1])
            } else {
                r1.wrapping_add((k % n) as u32)
            };
            dest[(k + p) % n] = dest[(k + p) % n].wrapping_add(r1);
            dest[(k + q) % n] = dest[(k + q) % n].wrapping_add(r2);
            dest[k % n] = r2;
        }

        for k in m..(m + n) {
            let r3 = MIX_XOR.wrapping_mul(Self::temper(
                dest[k % n]
                    .wrapping_add(dest[(k + p) % n])
                    .wrapping_add(dest[(k + n - 1) % n]),
            ));
            let r4 = r3.wrapping_sub((k % n) as u32);
            dest[(k + p) % n] ^= r3;
            dest[(k + q) % n] ^= r4;
            dest[k % n] = r4;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_deterministic() {
        let mut a = SeedSeq::new(&[1, 2, 3]);
        let mut b = SeedSeq::new(&[1, 2, 3]);
        let mut out_a = [0u32; 16];
        let mut out_b = [0u32; 16];
        a.generate(&mut out_a);
        b.generate(&mut out_b);
        assert_eq!(out_a, out_b);
    }

    #[test]
    fn test_generate_repeatable_on_same_instance() {
        let mut seq = SeedSeq::from_u64(0xcafe_f00d);
        let mut first = [0u32; 8];
        let mut second = [0u32; 8];
        seq.generate(&mut first);
        seq.generate(&mut second);
        assert_eq!(first, second);
    }

    #[test]
    fn test_every_input_word_matters() {
        let mut base = [0u32; 32];
        SeedSeq::new(&[10, 20, 30, 40]).generate(&mut base);
        for changed in 0..4 {
            let mut entropy = [10u32, 20, 30, 40];
            entropy[changed] ^= 1;
            let mut out = [0u32; 32];
            SeedSeq::new(&entropy).generate(&mut out);
            assert_ne!(out, base, "changing input word {} had no effect", changed);
        }
    }

    #[test]
    fn test_output_is_not_fill_pattern() {
        let mut out = [0u32; 4];
        SeedSeq::default().generate(&mut out);
        assert!(out.iter().any(|&w| w != FILL));
    }

    #[test]
    fn test_empty_destination() {
        let mut out: [u32; 0] = [];
        SeedSeq::new(&[1]).generate(&mut out);
    }

    #[test]
    fn test_small_and_large_lengths() {
        for len in [1usize, 2, 6, 7, 39, 68, 623, 700] {
            let mut out = vec![0u32; len];
            SeedSeq::new(&[0xdead_beef]).generate(&mut out);
            assert_eq!(out.len(), len);
        }
    }

    #[test]
    fn test_accessors() {
        let seq = SeedSeq::from_u64(0x0000_0002_0000_0001);
        assert_eq!(seq.size(), 2);
        assert_eq!(seq.param(), &[1, 2]);
    }
}

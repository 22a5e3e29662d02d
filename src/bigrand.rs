//! Randomization of [`BigUint`] values, used by the test suite and the
//! benchmark harness to exercise arithmetic across a spread of operand
//! sizes rather than a handful of hand-picked ones.
//!
//! Signed `BigInt` generation and a `UniformBigInt` sampler are
//! deliberately absent here — this crate has no signed integer type
//! (see the design notes on why) — leaving only the `BigUint` side.

use rand::Rng;

use crate::biguint::BigUint;
use crate::codec;

/// Extension trait for drawing random [`BigUint`] values from an `Rng`.
pub trait RandBigUint {
    /// A random `BigUint` of exactly `bit_size` bits (the top bit set,
    /// unless `bit_size` is zero).
    fn gen_biguint(&mut self, bit_size: usize) -> BigUint;

    /// A random `BigUint` strictly less than `bound`. Panics if `bound`
    /// is zero.
    fn gen_biguint_below(&mut self, bound: &BigUint) -> BigUint;

    /// A random `BigUint` in `[lbound, ubound)`. Panics unless
    /// `lbound < ubound`.
    fn gen_biguint_range(&mut self, lbound: &BigUint, ubound: &BigUint) -> BigUint;
}

fn gen_bits<R: Rng + ?Sized>(rng: &mut R, words: &mut [u32], rem_bits: usize) {
    rng.fill(words);
    if rem_bits > 0 {
        let last = words.len() - 1;
        words[last] >>= 32 - rem_bits;
    }
}

impl<R: Rng + ?Sized> RandBigUint for R {
    fn gen_biguint(&mut self, bit_size: usize) -> BigUint {
        if bit_size == 0 {
            return BigUint::zero();
        }
        let full_words = bit_size / 32;
        let rem = bit_size % 32;
        let word_count = full_words + (rem > 0) as usize;
        let mut words = vec![0u32; word_count];
        gen_bits(self, &mut words, rem);

        let mut bytes = Vec::with_capacity(word_count * 4);
        for w in words.iter().rev() {
            bytes.extend_from_slice(&w.to_be_bytes());
        }
        codec::from_bytes_be(&bytes).expect("random byte buffer always decodes")
    }

    fn gen_biguint_below(&mut self, bound: &BigUint) -> BigUint {
        assert!(!bound.is_zero(), "gen_biguint_below requires a nonzero bound");
        let bits = bound.bit_length();
        loop {
            let n = self.gen_biguint(bits);
            if n.compare(bound) == std::cmp::Ordering::Less {
                return n;
            }
        }
    }

    fn gen_biguint_range(&mut self, lbound: &BigUint, ubound: &BigUint) -> BigUint {
        assert!(lbound.compare(ubound) == std::cmp::Ordering::Less, "lbound must be < ubound");
        if lbound.is_zero() {
            self.gen_biguint_below(ubound)
        } else {
            let span = ubound.sub(lbound).expect("ubound > lbound by the assertion above");
            lbound.add(&self.gen_biguint_below(&span)).expect("bounded sum stays within range")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn gen_biguint_respects_requested_bit_size() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for bits in [1usize, 8, 32, 33, 128, 4096] {
            let v = rng.gen_biguint(bits);
            assert!(v.bit_length() <= bits);
        }
    }

    #[test]
    fn gen_biguint_below_stays_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let bound = codec::from_decimal("123456789012345678901234567890").unwrap();
        for _ in 0..50 {
            let v = rng.gen_biguint_below(&bound);
            assert!(v.compare(&bound) == std::cmp::Ordering::Less);
        }
    }

    #[test]
    fn gen_biguint_range_stays_in_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let lo = BigUint::from_u32(1000);
        let hi = codec::from_decimal("99999999999999999999").unwrap();
        for _ in 0..50 {
            let v = rng.gen_biguint_range(&lo, &hi);
            assert!(v.compare(&lo) != std::cmp::Ordering::Less);
            assert!(v.compare(&hi) == std::cmp::Ordering::Less);
        }
    }
}

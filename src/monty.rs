//! Montgomery reduction context: precomputed REDC parameters tied to
//! one odd modulus, plus form conversion, multiplication, and
//! exponentiation in Montgomery form.
//!
//! Reference: Brent & Zimmermann, *Modern Computer Arithmetic*, v0.5.9,
//! Algorithm 2.6 (REDC) and Algorithm 1.20 (the Hensel-lifting inverse
//! used in [`n_prime_for`]).

use std::cmp::Ordering;

use crate::algorithms::mac_digit;
use crate::big_digit::Limb;
use crate::biguint::BigUint;
use crate::error::MontgomeryError;

/// Precomputed parameters for Montgomery arithmetic modulo an odd `n`.
#[derive(Clone, Debug, PartialEq)]
pub struct MontCtx {
    n: BigUint,
    k: usize,
    n_prime: Limb,
    r_squared: BigUint,
    active: bool,
}

/// `x <- x*(2 - n0*x) mod 2^32`, iterated until `x` converges to
/// `n0^-1 mod 2^32`. Five rounds double the number of correct bits
/// each time starting from one correct bit, which is enough to
/// converge for any odd 32-bit `n0`.
fn n_prime_for(n0: Limb) -> Result<Limb, MontgomeryError> {
    let mut x: Limb = n0;
    for _ in 0..5 {
        x = x.wrapping_mul(2u32.wrapping_sub(n0.wrapping_mul(x)));
    }
    if n0.wrapping_mul(x) != 1 {
        return Err(MontgomeryError::InternalInvariantBroken {
            detail: "n0 * n0_inv != 1 mod 2^32 after Hensel lifting",
        });
    }
    let n_prime = (!x).wrapping_add(1);
    if n0.wrapping_mul(n_prime) != u32::MAX {
        return Err(MontgomeryError::InternalInvariantBroken {
            detail: "n0 * n_prime != 2^32 - 1",
        });
    }
    Ok(n_prime)
}

fn r_squared_for(n: &BigUint, k: usize) -> Result<BigUint, MontgomeryError> {
    let r_mod_n = BigUint::from_u32(1).shift_left(32 * k)?.modulo(n)?;
    Ok(r_mod_n.mul(&r_mod_n)?.modulo(n)?)
}

impl MontCtx {
    /// Builds a context for modulus `n`. Fails with
    /// [`MontgomeryError::EvenModulus`] if `n` is even, or
    /// [`MontgomeryError::ZeroModulus`] if `n` is zero.
    pub fn build(n: &BigUint) -> Result<MontCtx, MontgomeryError> {
        if n.is_zero() {
            return Err(MontgomeryError::ZeroModulus);
        }
        if !n.get_bit(0) {
            return Err(MontgomeryError::EvenModulus);
        }
        let k = n.used();
        let n_prime = n_prime_for(n.limb_at(0))?;
        let r_squared = r_squared_for(n, k)?;
        Ok(MontCtx { n: n.clone(), k, n_prime, r_squared, active: true })
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn modulus(&self) -> &BigUint {
        &self.n
    }

    /// Montgomery reduction: `T*R^-1 mod n` for `0 <= T < n*R`.
    fn redc(&self, t: &BigUint) -> Result<BigUint, MontgomeryError> {
        let mut a: Vec<Limb> = t.limb_slice().to_vec();
        a.resize(2 * self.k + 2, 0);
        let n = self.n.limb_slice();

        for i in 0..self.k {
            let m_i = a[i].wrapping_mul(self.n_prime);
            mac_digit(&mut a[i..], n, m_i);
        }

        let shifted = BigUint::from_limb_slice(&a[self.k..]);
        if shifted.compare(&self.n) != Ordering::Less {
            Ok(shifted.sub(&self.n)?)
        } else {
            Ok(shifted)
        }
    }

    fn reduce_if_needed(&self, a: &BigUint) -> Result<BigUint, MontgomeryError> {
        if a.compare(&self.n) != Ordering::Less {
            Ok(a.modulo(&self.n)?)
        } else {
            Ok(a.clone())
        }
    }

    /// `a*R mod n`, the Montgomery form of `a`.
    pub fn to_form(&self, a: &BigUint) -> Result<BigUint, MontgomeryError> {
        let reduced = self.reduce_if_needed(a)?;
        let t = reduced.mul(&self.r_squared)?;
        self.redc(&t)
    }

    /// `a*R^-1 mod n`, mapping a Montgomery-form value back to the
    /// residues domain.
    pub fn from_form(&self, a: &BigUint) -> Result<BigUint, MontgomeryError> {
        self.redc(a)
    }

    /// Montgomery multiplication: both operands and the result are in
    /// Montgomery form.
    pub fn mulmod(&self, a: &BigUint, b: &BigUint) -> Result<BigUint, MontgomeryError> {
        let t = a.mul(b)?;
        self.redc(&t)
    }

    /// `base^exp mod n`.
    pub fn expmod(&self, base: &BigUint, exp: &BigUint) -> Result<BigUint, MontgomeryError> {
        if exp.is_zero() {
            return Ok(BigUint::from_u32(1));
        }
        if base.is_zero() {
            return Ok(BigUint::zero());
        }

        let base_reduced = self.reduce_if_needed(base)?;
        let b_tilde = self.to_form(&base_reduced)?;
        let mut r_tilde = self.to_form(&BigUint::from_u32(1))?;

        let bits = exp.bit_length();
        for i in (0..bits).rev() {
            if i != bits - 1 {
                r_tilde = self.mulmod(&r_tilde, &r_tilde)?;
            }
            if exp.get_bit(i) {
                r_tilde = self.mulmod(&r_tilde, &b_tilde)?;
            }
        }

        let mut result = self.from_form(&r_tilde)?;
        if result.compare(&self.n) != Ordering::Less {
            result = self.reduce_if_needed(&result)?;
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::from_decimal;

    #[test]
    fn build_rejects_even_modulus() {
        assert_eq!(MontCtx::build(&BigUint::from_u32(10)), Err(MontgomeryError::EvenModulus));
    }

    #[test]
    fn build_rejects_zero_modulus() {
        assert_eq!(MontCtx::build(&BigUint::zero()), Err(MontgomeryError::ZeroModulus));
    }

    #[test]
    fn n_prime_satisfies_the_defining_congruence() {
        let n = from_decimal("143").unwrap(); // S7: used(n) = 1
        let ctx = MontCtx::build(&n).unwrap();
        let n0 = n.limb_at(0) as u64;
        let prod = (n0 * ctx.n_prime as u64) & 0xFFFF_FFFF;
        assert_eq!(prod as u32, u32::MAX);
    }

    #[test]
    fn form_round_trip_holds_for_every_residue() {
        let n = from_decimal("143").unwrap();
        let ctx = MontCtx::build(&n).unwrap();
        for a in 1u32..143 {
            let a = BigUint::from_u32(a);
            let form = ctx.to_form(&a).unwrap();
            assert_eq!(ctx.from_form(&form).unwrap(), a);
        }
    }

    #[test]
    fn mulmod_matches_plain_modular_multiplication() {
        let n = from_decimal("1000000007").unwrap();
        let ctx = MontCtx::build(&n).unwrap();
        let a = BigUint::from_u32(123456);
        let b = BigUint::from_u32(987654);
        let expected = a.mul(&b).unwrap().modulo(&n).unwrap();

        let fa = ctx.to_form(&a).unwrap();
        let fb = ctx.to_form(&b).unwrap();
        let got = ctx.from_form(&ctx.mulmod(&fa, &fb).unwrap()).unwrap();
        assert_eq!(got, expected);
    }

    #[test]
    fn expmod_matches_schoolbook() {
        let n = from_decimal("9999999967").unwrap();
        let ctx = MontCtx::build(&n).unwrap();
        let base = from_decimal("123456789").unwrap();
        let exp = from_decimal("987654321").unwrap();
        let mont_result = ctx.expmod(&base, &exp).unwrap();
        let schoolbook_result = crate::schoolbook::modexp(&base, &exp, &n).unwrap();
        assert_eq!(mont_result, schoolbook_result);
    }

    #[test]
    fn expmod_exp_zero_is_one() {
        let n = from_decimal("143").unwrap();
        let ctx = MontCtx::build(&n).unwrap();
        assert!(ctx.expmod(&BigUint::from_u32(5), &BigUint::zero()).unwrap().is_one());
    }
}

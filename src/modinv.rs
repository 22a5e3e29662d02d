//! Extended Euclidean algorithm over [`BigUint`], computing `a^-1 mod m`.
//!
//! `BigUint` is unsigned, so the coefficient track of the algorithm is
//! carried as a sign-tagged `(BigUint, bool)` pair instead of a signed
//! integer. No iteration cap: a correct extended GCD terminates in
//! `O(log max(a, m))` steps, and that is the only termination condition
//! here.

use std::cmp::Ordering;

use crate::biguint::BigUint;
use crate::error::{BigIntError, ModInverseError};

/// A magnitude with an explicit sign, used only for the coefficient
/// track of the extended Euclidean algorithm. Never exposed outside
/// this module — the crate otherwise has no signed integer type.
#[derive(Clone)]
struct Signed {
    mag: BigUint,
    neg: bool,
}

impl Signed {
    fn zero() -> Self {
        Signed { mag: BigUint::zero(), neg: false }
    }

    fn one() -> Self {
        Signed { mag: BigUint::from_u32(1), neg: false }
    }

    fn from_biguint(v: BigUint) -> Self {
        Signed { mag: v, neg: false }
    }

    fn negate(&self) -> Self {
        if self.mag.is_zero() {
            self.clone()
        } else {
            Signed { mag: self.mag.clone(), neg: !self.neg }
        }
    }

    fn add(&self, other: &Signed) -> Result<Signed, BigIntError> {
        if self.mag.is_zero() {
            return Ok(other.clone());
        }
        if other.mag.is_zero() {
            return Ok(self.clone());
        }
        if self.neg == other.neg {
            Ok(Signed { mag: self.mag.add(&other.mag)?, neg: self.neg })
        } else {
            match self.mag.compare(&other.mag) {
                Ordering::Equal => Ok(Signed::zero()),
                Ordering::Greater => Ok(Signed { mag: self.mag.sub(&other.mag)?, neg: self.neg }),
                Ordering::Less => Ok(Signed { mag: other.mag.sub(&self.mag)?, neg: other.neg }),
            }
        }
    }

    fn sub(&self, other: &Signed) -> Result<Signed, BigIntError> {
        self.add(&other.negate())
    }

    fn mul(&self, other: &Signed) -> Result<Signed, BigIntError> {
        let mag = self.mag.mul(&other.mag)?;
        let neg = !mag.is_zero() && (self.neg != other.neg);
        Ok(Signed { mag, neg })
    }

    /// Reduces to `[0, m)`.
    fn reduce_mod(&self, m: &BigUint) -> Result<BigUint, BigIntError> {
        let r = self.mag.modulo(m)?;
        if self.neg && !r.is_zero() {
            m.sub(&r)
        } else {
            Ok(r)
        }
    }
}

/// `a^-1 mod m` for `gcd(a, m) = 1`.
///
/// Fails with [`ModInverseError::ZeroOperand`] if `a` or `m` is zero,
/// and with [`ModInverseError::NoInverse`] if `gcd(a, m) != 1`. The
/// result always lies in `[1, m)`.
pub fn inv_mod(a: &BigUint, m: &BigUint) -> Result<BigUint, ModInverseError> {
    if a.is_zero() || m.is_zero() {
        return Err(ModInverseError::ZeroOperand);
    }

    if m.used() <= 1 && m.limb_at(0) <= 10_000 {
        return inv_mod_trial(a, m);
    }

    inv_mod_extended_gcd(a, m)
}

/// Standard extended Euclidean algorithm, generalized to `BigUint` with
/// a sign-tagged coefficient track.
///
/// Every `BigIntError` that could arise here (`Overflow`, division by a
/// zero remainder that can't occur inside the loop guard, ...) is
/// surfaced as [`ModInverseError::ArithmeticFailure`] rather than
/// folded into `ZeroOperand`, which names a specific, different cause
/// (`inv_mod` already rejects zero operands before this function runs).
fn inv_mod_extended_gcd(a: &BigUint, m: &BigUint) -> Result<BigUint, ModInverseError> {
    let mut old_r = a.modulo(m)?;
    let mut r = m.clone();
    let mut old_s = Signed::one();
    let mut s = Signed::zero();

    while !r.is_zero() {
        let (q, rem) = old_r.div_mod(&r)?;
        old_r = r;
        r = rem;

        let qs = Signed::from_biguint(q).mul(&s)?;
        let new_s = old_s.sub(&qs)?;
        old_s = s;
        s = new_s;
    }

    if !old_r.is_one() {
        return Err(ModInverseError::NoInverse);
    }

    Ok(old_s.reduce_mod(m)?)
}

/// Fast path for small moduli: search `[1, m)` directly rather than
/// running the general algorithm.
fn inv_mod_trial(a: &BigUint, m: &BigUint) -> Result<BigUint, ModInverseError> {
    let modulus = m.limb_at(0) as u64;
    let a_mod_m = a.modulo(m)?.limb_at(0) as u64;
    if a_mod_m == 0 {
        return Err(ModInverseError::NoInverse);
    }
    for candidate in 1..modulus {
        if (a_mod_m * candidate) % modulus == 1 {
            return Ok(BigUint::from_u32(candidate as u32));
        }
    }
    Err(ModInverseError::NoInverse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::from_decimal;

    #[test]
    fn zero_operand_fails() {
        assert_eq!(inv_mod(&BigUint::zero(), &BigUint::from_u32(7)), Err(ModInverseError::ZeroOperand));
        assert_eq!(inv_mod(&BigUint::from_u32(7), &BigUint::zero()), Err(ModInverseError::ZeroOperand));
    }

    #[test]
    fn non_coprime_fails() {
        assert_eq!(inv_mod(&BigUint::from_u32(4), &BigUint::from_u32(8)), Err(ModInverseError::NoInverse));
    }

    #[test]
    fn small_modulus_trial_path() {
        let inv = inv_mod(&BigUint::from_u32(13), &BigUint::from_u32(60)).unwrap();
        assert_eq!(inv, BigUint::from_u32(37));
    }

    #[test]
    fn large_modulus_extended_gcd_path() {
        let a = from_decimal("123456789012345678901234567890123").unwrap();
        let m = from_decimal("340282366920938463463374607431768211297").unwrap(); // prime-ish, large
        let inv = inv_mod(&a, &m).unwrap();
        let check = a.mul(&inv).unwrap().modulo(&m).unwrap();
        assert!(check.is_one());
    }

    #[test]
    fn result_is_always_in_range() {
        let a = BigUint::from_u32(7);
        let m = from_decimal("999999999999999999999999999989").unwrap();
        let inv = inv_mod(&a, &m).unwrap();
        assert_eq!(inv.compare(&BigUint::zero()), Ordering::Greater);
        assert_eq!(inv.compare(&m), Ordering::Less);
    }
}

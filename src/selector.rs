//! Chooses between Montgomery and schoolbook exponentiation for a
//! single `modexp` call, and retries on Montgomery's behalf if it
//! fails at runtime.

use std::cmp::Ordering;

use crate::biguint::BigUint;
use crate::error::{BigIntError, RsaError};
use crate::monty::MontCtx;
use crate::schoolbook;

/// Moduli narrower than this many bits favor schoolbook: Montgomery's
/// setup cost (n', R^2 mod n) dominates before the modulus is wide
/// enough for the saved divisions to pay for it.
const MONTGOMERY_MIN_BITS: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpAlgorithm {
    Schoolbook,
    Montgomery,
}

/// Picks the algorithm `modexp` would use for this `(n, mont)` pair,
/// without running it.
pub fn select(mont: Option<&MontCtx>, n: &BigUint) -> ExpAlgorithm {
    match mont {
        None => ExpAlgorithm::Schoolbook,
        Some(ctx) if !ctx.is_active() => ExpAlgorithm::Schoolbook,
        Some(_) if !n.get_bit(0) => ExpAlgorithm::Schoolbook,
        Some(_) if n.bit_length() < MONTGOMERY_MIN_BITS => ExpAlgorithm::Schoolbook,
        Some(_) => ExpAlgorithm::Montgomery,
    }
}

/// `base^exp mod n`, routed through Montgomery or schoolbook per
/// [`select`]. If Montgomery fails at runtime, retries with schoolbook
/// on the original inputs; if schoolbook also fails, surfaces the
/// original Montgomery error. The result always satisfies `result < n`.
pub fn modexp(
    base: &BigUint,
    exp: &BigUint,
    n: &BigUint,
    mont: Option<&MontCtx>,
) -> Result<BigUint, RsaError> {
    if n.is_zero() {
        return Err(RsaError::BigInt(BigIntError::DivisionByZero));
    }

    let result = match select(mont, n) {
        ExpAlgorithm::Montgomery => {
            let ctx = mont.expect("Montgomery selected implies a context was supplied");
            match ctx.expmod(base, exp) {
                Ok(r) => Ok(r),
                Err(original) => {
                    log::warn!("Montgomery expmod failed ({original}), falling back to schoolbook");
                    match schoolbook::modexp(base, exp, n) {
                        Ok(r) => Ok(r),
                        Err(_) => Err(RsaError::from(original)),
                    }
                }
            }
        }
        ExpAlgorithm::Schoolbook => schoolbook::modexp(base, exp, n).map_err(RsaError::from),
    }?;

    if result.compare(n) != Ordering::Less {
        Ok(result.modulo(n).map_err(RsaError::from)?)
    } else {
        Ok(result)
    }
}

//! Square-and-multiply and 4-bit sliding-window modular exponentiation,
//! built entirely on [`BigUint`] operations — no Montgomery form.

use crate::biguint::BigUint;
use crate::error::BigIntError;

/// Exponent bit widths at or below this many limbs use the simple
/// right-to-left binary method; wider exponents use the sliding
/// window, where the table-build cost pays for itself.
const SMALL_EXPONENT_LIMBS: usize = 20;

/// `base^exp mod m` using only [`BigUint`] arithmetic.
///
/// Precondition: `m != 0`. `exp = 0` returns `1`; `base = 0` with
/// `exp > 0` returns `0`; `m = 1` returns `0`.
pub fn modexp(base: &BigUint, exp: &BigUint, m: &BigUint) -> Result<BigUint, BigIntError> {
    if m.is_zero() {
        return Err(BigIntError::DivisionByZero);
    }
    if exp.is_zero() {
        return Ok(BigUint::from_u32(1));
    }
    if base.is_zero() {
        return Ok(BigUint::zero());
    }
    if m.is_one() {
        return Ok(BigUint::zero());
    }

    if exp.used() <= SMALL_EXPONENT_LIMBS {
        modexp_binary(base, exp, m)
    } else {
        modexp_sliding_window(base, exp, m)
    }
}

/// Right-to-left binary exponentiation: `(result, base', exp')`
/// initialized to `(1, base mod m, exp)`, reduced after every
/// multiplication so `result < m` holds at each iteration boundary.
fn modexp_binary(base: &BigUint, exp: &BigUint, m: &BigUint) -> Result<BigUint, BigIntError> {
    let mut result = BigUint::from_u32(1);
    let mut b = base.modulo(m)?;
    let mut e = exp.clone();
    loop {
        if e.get_bit(0) {
            result = result.mul(&b)?.modulo(m)?;
        }
        e = e.shift_right(1);
        if e.is_zero() {
            break;
        }
        b = b.mul(&b)?.modulo(m)?;
    }
    Ok(result)
}

/// 4-bit sliding window, left-to-right: precompute `T[0..15]`, then
/// process the exponent MSB-first in aligned 4-bit windows, skipping
/// leading all-zero windows.
fn modexp_sliding_window(base: &BigUint, exp: &BigUint, m: &BigUint) -> Result<BigUint, BigIntError> {
    let b0 = base.modulo(m)?;
    let mut table = Vec::with_capacity(16);
    table.push(BigUint::from_u32(1));
    table.push(b0.clone());
    for i in 2..16 {
        let t = table[i - 1].mul(&b0)?.modulo(m)?;
        table.push(t);
    }

    let bits = exp.bit_length();
    let window_count = (bits + 3) / 4;
    let mut result: Option<BigUint> = None;

    for w_idx in (0..window_count).rev() {
        let mut window = 0u32;
        for bit in 0..4 {
            let pos = w_idx * 4 + bit;
            if exp.get_bit(pos) {
                window |= 1 << bit;
            }
        }
        match &mut result {
            None => {
                if window != 0 {
                    result = Some(table[window as usize].clone());
                }
            }
            Some(r) => {
                for _ in 0..4 {
                    *r = r.mul(r)?.modulo(m)?;
                }
                if window != 0 {
                    *r = r.mul(&table[window as usize])?.modulo(m)?;
                }
            }
        }
    }

    Ok(result.unwrap_or_else(|| BigUint::from_u32(1)))
}

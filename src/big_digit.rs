//! Limb-level type aliases, mirroring the `BigDigit`/`DoubleBigDigit`
//! split used throughout the big-integer arithmetic layer.

/// A single limb of a [`crate::biguint::BigUint`]: base 2^32.
pub type Limb = u32;

/// Twice the width of a [`Limb`], wide enough to hold the full product
/// of two limbs plus a carry without overflow.
pub type DoubleLimb = u64;

/// Number of bits in a [`Limb`].
pub const LIMB_BITS: u32 = Limb::BITS;

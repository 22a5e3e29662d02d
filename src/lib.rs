//! Fixed-capacity big-integer arithmetic and Montgomery modular
//! exponentiation for textbook RSA.
//!
//! The crate is split leaves-first: [`biguint`] is the multi-precision
//! integer everything else is built on, [`codec`] converts it to and
//! from decimal/hex/bytes, [`schoolbook`] and [`monty`] are the two
//! exponentiation engines, [`modinv`] backs Montgomery setup, and
//! [`selector`] picks between the two engines per call. None of this
//! performs key generation, primality testing, or padding — see the
//! crate's design notes for the full non-goal list.

pub mod algorithms;
pub mod big_digit;
#[cfg(feature = "rand")]
pub mod bigrand;
pub mod biguint;
pub mod codec;
pub mod error;
pub mod modinv;
pub mod monty;
pub mod schoolbook;
pub mod selector;

pub use biguint::BigUint;
pub use error::{BigIntError, ModInverseError, MontgomeryError, RsaError};
pub use modinv::inv_mod;
pub use monty::MontCtx;
pub use selector::{modexp, select, ExpAlgorithm};

/// Maximum number of limbs a [`BigUint`] may hold: 512 limbs of 32 bits
/// each, 16,384 bits total. Comfortably covers `2*k + 1` limbs plus a
/// guard limb for any modulus up to 4096 bits (`k <= 128`).
pub const CAP: usize = 512;

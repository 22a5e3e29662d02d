//! Error taxonomy for the arithmetic core.
//!
//! Each layer (bigint, Montgomery, modular inverse, RSA collaborator)
//! gets its own enum so library callers can match on exactly the
//! failures that layer can produce; the CLI collapses all of them to
//! one descriptive exit line.

use thiserror::Error;

/// Failures from [`crate::biguint::BigUint`] operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BigIntError {
    #[error("'{operation}' would exceed the fixed-capacity limb budget")]
    Overflow { operation: &'static str },

    #[error("subtraction underflowed: right-hand operand exceeds left-hand operand")]
    Underflow,

    #[error("division or modulus by zero")]
    DivisionByZero,

    #[error("could not parse input as an integer: {reason}")]
    BadFormat { reason: String },

    #[error("output buffer too small: need at least {needed} bytes")]
    BufferTooSmall { needed: usize },
}

/// Failures from [`crate::monty::MontCtx`] setup and reduction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MontgomeryError {
    #[error("Montgomery context requires an odd modulus")]
    EvenModulus,

    #[error("Montgomery context requires a nonzero modulus")]
    ZeroModulus,

    #[error(transparent)]
    BigInt(#[from] BigIntError),

    #[error("Montgomery invariant broken: {detail}")]
    InternalInvariantBroken { detail: &'static str },
}

/// Failures from [`crate::modinv::inv_mod`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModInverseError {
    #[error("operand must be nonzero")]
    ZeroOperand,

    #[error("no modular inverse exists: operands are not coprime")]
    NoInverse,

    #[error("arithmetic failure inside the extended Euclidean algorithm: {0}")]
    ArithmeticFailure(#[from] BigIntError),
}

/// Failures surfaced by [`crate::selector::modexp`] and the RSA
/// collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RsaError {
    #[error(transparent)]
    BigInt(#[from] BigIntError),

    #[error(transparent)]
    Montgomery(#[from] MontgomeryError),

    #[error("message out of range: must satisfy 0 <= m < n")]
    DomainError,
}

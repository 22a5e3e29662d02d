//! `RsaOp`: the thin collaborator that wraps a key pair, parses
//! decimal/hex/bytes via `rsa4096_core::codec`, and calls
//! `rsa4096_core::selector::modexp`. Not part of the arithmetic core —
//! it owns none of the hard invariants, just the glue.

use std::cmp::Ordering;

use rsa4096_core::biguint::BigUint;
use rsa4096_core::codec;
use rsa4096_core::monty::MontCtx;
use rsa4096_core::selector::modexp;
use rsa4096_core::RsaError;

/// `{n, exp, is_private, mont}`. The public/private split is
/// informational — `encrypt` and `decrypt` run the identical operation
/// against whichever exponent the key was built with.
pub struct RsaKey {
    pub n: BigUint,
    pub exp: BigUint,
    pub is_private: bool,
    mont: Option<MontCtx>,
}

impl RsaKey {
    pub fn new(n: BigUint, exp: BigUint, is_private: bool) -> Self {
        let mont = MontCtx::build(&n).ok();
        RsaKey { n, exp, is_private, mont }
    }

    pub fn public(n: BigUint, e: BigUint) -> Self {
        Self::new(n, e, false)
    }

    pub fn private(n: BigUint, d: BigUint) -> Self {
        Self::new(n, d, true)
    }

    /// `m^exp mod n`, with the zero short-circuit and the domain check
    /// `0 <= m < n` this collaborator is responsible for (the core's
    /// `modexp` has no opinion on the caller's message range).
    fn apply(&self, input: &BigUint) -> Result<BigUint, RsaError> {
        if input.compare(&self.n) != Ordering::Less {
            return Err(RsaError::DomainError);
        }
        if input.is_zero() {
            return Ok(BigUint::zero());
        }
        modexp(input, &self.exp, &self.n, self.mont.as_ref())
    }

    pub fn encrypt(&self, m: &BigUint) -> Result<BigUint, RsaError> {
        self.apply(m)
    }

    pub fn decrypt(&self, c: &BigUint) -> Result<BigUint, RsaError> {
        self.apply(c)
    }

    pub fn encrypt_decimal(&self, m: &str) -> anyhow::Result<String> {
        let m = codec::from_decimal(m)?;
        Ok(codec::to_decimal(&self.encrypt(&m)?))
    }

    pub fn decrypt_decimal(&self, c: &str) -> anyhow::Result<String> {
        let c = codec::from_decimal(c)?;
        Ok(codec::to_decimal(&self.decrypt(&c)?))
    }
}

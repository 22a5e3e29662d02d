//! Cross-module properties that need both exponentiation engines wired
//! together: round-trips, the RSA correctness property, and the
//! literal end-to-end scenarios from the test plan (S1-S8).

use rsa4096_core::biguint::BigUint;
use rsa4096_core::codec;
use rsa4096_core::modinv::inv_mod;
use rsa4096_core::monty::MontCtx;
use rsa4096_core::schoolbook;
use rsa4096_core::selector::modexp;

fn dec(s: &str) -> BigUint {
    codec::from_decimal(s).unwrap()
}

fn rsa_roundtrip_holds(n: &BigUint, e: &BigUint, d: &BigUint, m: &BigUint) {
    let mont = MontCtx::build(n).ok();
    let c = modexp(m, e, n, mont.as_ref()).unwrap();
    let back = modexp(&c, d, n, mont.as_ref()).unwrap();
    assert_eq!(&back, m);
}

#[test]
fn s1_s2_s3_encrypt_small_key() {
    let n = BigUint::from_u32(35);
    let e = BigUint::from_u32(5);
    assert_eq!(modexp(&BigUint::from_u32(2), &e, &n, None).unwrap(), BigUint::from_u32(32));
    assert_eq!(modexp(&BigUint::from_u32(3), &e, &n, None).unwrap(), BigUint::from_u32(33));
    assert_eq!(modexp(&BigUint::from_u32(4), &e, &n, None).unwrap(), BigUint::from_u32(9));
}

#[test]
fn s4_encrypt_then_decrypt_round_trips() {
    let n = BigUint::from_u32(143); // 11 * 13
    let e = BigUint::from_u32(7);
    let d = BigUint::from_u32(103);
    let m = BigUint::from_u32(42);
    rsa_roundtrip_holds(&n, &e, &d, &m);
}

#[test]
fn s5_zero_message_short_circuits() {
    let n = BigUint::from_u32(35);
    let e = BigUint::from_u32(5);
    let c = modexp(&BigUint::zero(), &e, &n, None).unwrap();
    assert!(c.is_zero());
}

#[test]
fn s6_n_minus_one_to_the_first_power() {
    let n = BigUint::from_u32(35);
    let m = BigUint::from_u32(34);
    let e = BigUint::from_u32(1);
    assert_eq!(modexp(&m, &e, &n, None).unwrap(), m);
}

#[test]
fn s7_form_round_trip_for_every_residue_of_a_one_limb_modulus() {
    let n = dec("143");
    let ctx = MontCtx::build(&n).unwrap();
    for a in 1u32..143 {
        let a = BigUint::from_u32(a);
        assert_eq!(ctx.from_form(&ctx.to_form(&a).unwrap()).unwrap(), a);
    }
}

#[test]
fn s8_real_4096_bit_key_round_trips_a_short_message() {
    let n = dec(include_str!("fixtures/rsa4096_n.txt").trim());
    let e = BigUint::from_u32(65537);
    let d = dec(include_str!("fixtures/rsa4096_d.txt").trim());
    let m = dec("123456789012345678901234567890123456789012345678901234567890");
    let expected_c = dec(include_str!("fixtures/rsa4096_c.txt").trim());

    let mont = MontCtx::build(&n).unwrap();
    let c = modexp(&m, &e, &n, Some(&mont)).unwrap();
    assert_eq!(c, expected_c);

    let back = modexp(&c, &d, &n, Some(&mont)).unwrap();
    assert_eq!(back, m);
}

#[test]
fn negative_encrypt_with_message_out_of_range_is_the_rsaop_callers_job() {
    // The core's `modexp` has no domain check of its own (that belongs
    // to the RsaOp collaborator in the CLI crate); it just reduces.
    // This documents that boundary rather than testing it, since
    // `DomainError` is produced one layer up.
    let n = BigUint::from_u32(35);
    let m = BigUint::from_u32(40); // >= n
    let e = BigUint::from_u32(5);
    let reduced = modexp(&m, &e, &n, None).unwrap();
    assert_eq!(reduced, modexp(&m.modulo(&n).unwrap(), &e, &n, None).unwrap());
}

#[test]
fn div_mod_identity_property_random_sample() {
    use rand::SeedableRng;
    use rsa4096_core::bigrand::RandBigUint;
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(99);
    for _ in 0..200 {
        let a = rng.gen_biguint(512);
        let mut b = rng.gen_biguint(256);
        if b.is_zero() {
            b = BigUint::from_u32(1);
        }
        let (q, r) = a.div_mod(&b).unwrap();
        assert_eq!(q.mul(&b).unwrap().add(&r).unwrap(), a);
        assert!(r.compare(&b) == std::cmp::Ordering::Less);
    }
}

#[test]
fn expmod_agreement_random_sample() {
    use rand::SeedableRng;
    use rsa4096_core::bigrand::RandBigUint;
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(123);
    for _ in 0..30 {
        let mut n = rng.gen_biguint(300);
        if !n.get_bit(0) {
            n = n.add_word(1).unwrap();
        }
        if n.is_zero() {
            continue;
        }
        let base = rng.gen_biguint_below(&n);
        let exp = rng.gen_biguint(64);

        let schoolbook_result = schoolbook::modexp(&base, &exp, &n).unwrap();
        let selector_result = modexp(&base, &exp, &n, None).unwrap();
        assert_eq!(schoolbook_result, selector_result);

        if let Ok(ctx) = MontCtx::build(&n) {
            assert_eq!(ctx.expmod(&base, &exp).unwrap(), schoolbook_result);
        }
    }
}

#[test]
fn idempotent_reduction() {
    let n = dec("97");
    let x = dec("12345");
    let once = x.modulo(&n).unwrap();
    let twice = once.modulo(&n).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn mod_inverse_feeds_a_valid_rsa_private_exponent() {
    // d = e^-1 mod phi, cross-checked against the known-correct S4 key.
    let phi = BigUint::from_u32(120); // (11-1)*(13-1)
    let e = BigUint::from_u32(7);
    let d = inv_mod(&e, &phi).unwrap();
    assert_eq!(d, BigUint::from_u32(103));
}

//! `rsa4096`: a scripted diagnostic harness over `rsa4096-core`, plus
//! one interactive subcommand for ad hoc modular exponentiation.
//!
//! Every subcommand but `manual` runs a fixed, self-contained scenario
//! and prints one line per check; the process exits non-zero the
//! moment any scenario reports a failed check.

mod rsaop;
mod scenarios;

use std::io::{self, Write};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use rsa4096_core::biguint::BigUint;
use rsa4096_core::codec;
use rsa4096_core::monty::MontCtx;
use rsa4096_core::schoolbook;
use rsa4096_core::selector::modexp;

use scenarios::Check;

#[derive(Parser)]
#[command(name = "rsa4096", about = "Fixed-capacity bigint + Montgomery RSA primitive harness")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the literal S1-S6 end-to-end scenarios.
    Verify,
    /// Run `verify` plus the round-trip and identity property checks.
    Test,
    /// Time Montgomery vs. schoolbook `modexp` across a spread of moduli widths.
    Benchmark,
    /// Exercise the big-endian byte codec.
    Binary,
    /// Read a decimal modulus, exponent, and message from stdin and print `modexp`.
    Manual,
    /// Run S8: a real, independently verified 4096-bit RSA round trip.
    Real4096,
    /// Exercise the Montgomery/schoolbook selector across small and wide moduli.
    Hybrid,
    /// Exercise decimal/hex/bytes codec round trips.
    Roundtrip,
    /// Exercise the negative-path error taxonomy.
    Boundary,
    /// Exercise Montgomery-specific invariants (form round trip, mulmod congruence).
    Montgomery,
    /// Compare schoolbook and selector-routed results directly.
    Algorithms,
}

fn run_checks(checks: Vec<Check>) -> bool {
    let mut all_passed = true;
    for c in &checks {
        if c.passed {
            println!("PASS {}", c.name);
        } else {
            all_passed = false;
            let detail = c.detail.as_deref().unwrap_or("");
            println!("FAIL {}: {}", c.name, detail);
        }
    }
    all_passed
}

fn run_scenario(name: &str, checks: Vec<Check>) -> Result<()> {
    let total = checks.len();
    let passed = run_checks(checks);
    if passed {
        println!("{name}: all {total} checks passed");
        Ok(())
    } else {
        anyhow::bail!("{name}: one or more checks failed");
    }
}

fn manual() -> Result<()> {
    let mut line = String::new();
    print!("modulus (decimal): ");
    io::stdout().flush().ok();
    io::stdin().read_line(&mut line).context("reading modulus")?;
    let n = codec::from_decimal(line.trim()).context("parsing modulus")?;

    line.clear();
    print!("exponent (decimal): ");
    io::stdout().flush().ok();
    io::stdin().read_line(&mut line).context("reading exponent")?;
    let e = codec::from_decimal(line.trim()).context("parsing exponent")?;

    line.clear();
    print!("message (decimal): ");
    io::stdout().flush().ok();
    io::stdin().read_line(&mut line).context("reading message")?;
    let m = codec::from_decimal(line.trim()).context("parsing message")?;

    let mont = MontCtx::build(&n).ok();
    let result = modexp(&m, &e, &n, mont.as_ref()).context("modexp")?;
    println!("{}", codec::to_decimal(&result));
    Ok(())
}

fn benchmark() -> Result<()> {
    let moduli: &[&str] = &[
        "9999999999999999999999999999999999999999999999999989",
        &"9".repeat(160),
        &"9".repeat(620),
    ];
    let exp = codec::from_decimal("65537").unwrap();

    for m in moduli {
        let n = codec::from_decimal(m).context("parsing benchmark modulus")?;
        let base = n.sub(&BigUint::from_u32(2)).unwrap_or_else(|_| BigUint::from_u32(2));
        let mont = MontCtx::build(&n).ok();

        let start = Instant::now();
        let schoolbook_result = schoolbook::modexp(&base, &exp, &n)?;
        let schoolbook_elapsed = start.elapsed();

        let start = Instant::now();
        let selector_result = modexp(&base, &exp, &n, mont.as_ref())?;
        let selector_elapsed = start.elapsed();

        if schoolbook_result != selector_result {
            anyhow::bail!("benchmark: schoolbook and selector disagree for modulus bit length {}", n.bit_length());
        }

        println!(
            "bits={:>5}  schoolbook={:>10?}  selector={:>10?}  montgomery_active={}",
            n.bit_length(),
            schoolbook_elapsed,
            selector_elapsed,
            mont.as_ref().map(|c| c.is_active()).unwrap_or(false),
        );
    }
    Ok(())
}

fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Verify => run_scenario("verify", scenarios::scenario_verify()),
        Command::Test => run_scenario("test", scenarios::scenario_test()),
        Command::Binary => run_scenario("binary", scenarios::scenario_binary()),
        Command::Real4096 => run_scenario("real4096", scenarios::scenario_real4096()),
        Command::Hybrid => run_scenario("hybrid", scenarios::scenario_hybrid()),
        Command::Roundtrip => run_scenario("roundtrip", scenarios::scenario_roundtrip()),
        Command::Boundary => run_scenario("boundary", scenarios::scenario_boundary()),
        Command::Montgomery => run_scenario("montgomery", scenarios::scenario_montgomery()),
        Command::Algorithms => run_scenario("algorithms", scenarios::scenario_algorithms()),
        Command::Benchmark => benchmark(),
        Command::Manual => manual(),
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(err) = dispatch(cli.command) {
        let kind = err.root_cause();
        let site = err.chain().next().unwrap_or(kind);
        eprintln!("{kind}: {site}");
        std::process::exit(1);
    }
}

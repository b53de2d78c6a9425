// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # DH1080 Command-Line Tool
//!
//! Entry point for the `dh1080` binary. Parses CLI arguments, initializes
//! logging and the domain parameters, then runs one subcommand:
//!
//! - `keygen`: generate a key pair
//! - `derive`: derive the shared key from our private and the peer's public key
//! - `encode`: hex bytes to DH1080 wire string
//! - `decode`: DH1080 wire string to hex bytes
//! - `selftest`: run complete exchanges in-process
//! - `version`: print build version information

mod cli;
mod logging;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use zeroize::Zeroizing;

use cli::{Commands, Dh1080Cli};
use logging::LogFormat;

/// JSON shape printed by `keygen --json`.
#[derive(Serialize)]
struct KeygenOutput<'a> {
    private: &'a str,
    public: &'a str,
}

fn main() -> Result<()> {
    let cli = Dh1080Cli::parse();

    logging::init_logging(&cli.log_level, LogFormat::from_str_lossy(&cli.log_format));
    dh1080::init().context("failed to initialize DH1080 domain parameters")?;

    let result = match cli.command {
        Commands::Keygen(args) => keygen(args),
        Commands::Derive(args) => derive(args),
        Commands::Encode(args) => encode(args),
        Commands::Decode(args) => decode(args),
        Commands::Selftest(args) => selftest(args),
        Commands::Version => {
            print_version();
            Ok(())
        }
    };

    dh1080::deinit();
    result
}

/// Generates a key pair and prints it.
fn keygen(args: cli::KeygenArgs) -> Result<()> {
    let pair = dh1080::generate_keypair().context("key generation failed")?;

    if args.json {
        let out = Zeroizing::new(serde_json::to_string_pretty(&KeygenOutput {
            private: pair.private_wire(),
            public: pair.public_wire(),
        })?);
        println!("{}", out.as_str());
    } else {
        println!("private {}", pair.private_wire());
        println!("public  {}", pair.public_wire());
    }
    Ok(())
}

/// Derives and prints the shared key.
fn derive(args: cli::DeriveArgs) -> Result<()> {
    let private = Zeroizing::new(args.private);
    let key = dh1080::compute_shared_key(&private, &args.peer).map_err(|e| {
        if e.is_peer_fault() {
            tracing::warn!(error = %e, "peer public key rejected");
        }
        e
    })?;
    println!("{}", key.as_str());
    Ok(())
}

/// Encodes hex input as a wire string.
fn encode(args: cli::EncodeArgs) -> Result<()> {
    let bytes = hex::decode(args.hex.trim()).context("input is not valid hex")?;
    println!("{}", dh1080::codec::encode(&bytes));
    Ok(())
}

/// Decodes a wire string to hex.
fn decode(args: cli::DecodeArgs) -> Result<()> {
    let wire = args.wire.trim();
    if !dh1080::codec::is_transport_alphabet(wire) {
        bail!("input contains characters outside A-Za-z0-9+/");
    }
    let bytes = dh1080::codec::decode(wire)?;
    println!("{}", hex::encode(bytes.as_slice()));
    Ok(())
}

/// Runs `rounds` full exchanges and checks both sides agree every time.
fn selftest(args: cli::SelftestArgs) -> Result<()> {
    for round in 1..=args.rounds {
        let mut alice = dh1080::start_exchange(dh1080::Role::Initiator)?;
        let mut bob = dh1080::start_exchange(dh1080::Role::Responder)?;

        let alice_pub = alice.public_wire().to_string();
        let bob_pub = bob.public_wire().to_string();

        let bob_key = bob
            .complete(&alice_pub)
            .with_context(|| format!("round {round}: responder failed"))?;
        let alice_key = alice
            .complete(&bob_pub)
            .with_context(|| format!("round {round}: initiator failed"))?;

        if alice_key != bob_key {
            bail!("round {round}: derived keys differ");
        }
        tracing::info!(round, "exchange agreed");
    }

    println!("ok: {} exchange(s) agreed", args.rounds);
    Ok(())
}

fn print_version() {
    println!("dh1080 {}", env!("CARGO_PKG_VERSION"));
    println!(
        "  group: {}-bit safe prime, g = {}",
        dh1080::config::PRIME_BITS,
        dh1080::config::GENERATOR
    );
    println!("  kdf:   SHA-256");
}

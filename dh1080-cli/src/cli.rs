//! # CLI Interface
//!
//! Defines the command-line argument structure for `dh1080` using `clap`
//! derive. Subcommands: `keygen`, `derive`, `encode`, `decode`, `selftest`
//! and `version`.

use clap::{Args, Parser, Subcommand};

/// DH1080 key exchange from the shell.
///
/// Generates key pairs, derives FiSH keys from a retained private key and a
/// peer's public key, and converts between hex and the DH1080 wire encoding.
#[derive(Parser, Debug)]
#[command(
    name = "dh1080",
    about = "DH1080 Diffie-Hellman key exchange for IRC",
    version,
    propagate_version = true
)]
pub struct Dh1080Cli {
    /// Default log filter when `RUST_LOG` is not set.
    #[arg(long, global = true, env = "DH1080_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log output format: `pretty` or `json`.
    #[arg(long, global = true, env = "DH1080_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a fresh key pair and print both wire strings.
    Keygen(KeygenArgs),
    /// Derive the shared key from our private key and the peer's public key.
    Derive(DeriveArgs),
    /// Encode hex bytes as a DH1080 wire string.
    Encode(EncodeArgs),
    /// Decode a DH1080 wire string to hex bytes.
    Decode(DecodeArgs),
    /// Run a complete two-party exchange in-process and check agreement.
    Selftest(SelftestArgs),
    /// Print version information and exit.
    Version,
}

/// Arguments for the `keygen` subcommand.
#[derive(Args, Debug)]
pub struct KeygenArgs {
    /// Print the pair as a JSON object instead of two lines.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `derive` subcommand.
#[derive(Args, Debug)]
pub struct DeriveArgs {
    /// Our private key wire string, as printed by `keygen`.
    ///
    /// Prefer the environment variable: command lines end up in shell
    /// history and process listings.
    #[arg(long, env = "DH1080_PRIVATE_KEY", hide_env_values = true)]
    pub private: String,

    /// The peer's public key wire string.
    #[arg(long)]
    pub peer: String,
}

/// Arguments for the `encode` subcommand.
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Bytes to encode, as hex.
    pub hex: String,
}

/// Arguments for the `decode` subcommand.
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// DH1080 wire string to decode.
    pub wire: String,
}

/// Arguments for the `selftest` subcommand.
#[derive(Args, Debug)]
pub struct SelftestArgs {
    /// Number of independent exchanges to run.
    #[arg(long, short = 'n', default_value_t = 1)]
    pub rounds: u32,
}

//! # Key-Pair Generation
//!
//! One fresh (private exponent, public value) pair per handshake, handed
//! back already in wire form.
//!
//! The private exponent `x` is drawn uniformly from `[2, p - 2]` with the
//! OS CSPRNG, and the public value is `y = 2^x mod p`. Both are serialized
//! at their natural big-endian length (no leading zeros) and pushed through
//! the transport codec. The `BigUint` holding `x` and the byte buffer it is
//! serialized through are wiped before this module returns.
//!
//! ## Why hand the private key back as a string?
//!
//! Because that's what the IRC layer stores between `DH1080_INIT` and
//! `DH1080_FINISH`, and because the deriver takes it back in that form.
//! The string lives in [`Zeroizing`] storage so it is wiped when dropped.
//! If you want the "use once, then it's gone" guarantee enforced for you,
//! use [`KeyExchange`](crate::exchange::KeyExchange) instead.

use std::fmt;

use num_bigint_dig::{BigUint, RandBigInt};
use rand::rngs::OsRng;
use rand::{CryptoRng, Rng};
use tracing::debug;
use zeroize::{Zeroize, Zeroizing};

use crate::buffer::KeyBuffer;
use crate::codec;
use crate::error::Result;
use crate::params::DomainParams;

/// A freshly generated key pair in wire form.
///
/// `Debug` never prints the private half.
pub struct WireKeyPair {
    private: Zeroizing<String>,
    public: String,
}

impl WireKeyPair {
    /// The encoded private exponent. Keep it until the peer answers, then
    /// drop it.
    pub fn private_wire(&self) -> &str {
        &self.private
    }

    /// The encoded public value, ready for `DH1080_INIT` / `DH1080_FINISH`.
    pub fn public_wire(&self) -> &str {
        &self.public
    }

    /// Split into (private, public).
    pub fn into_parts(self) -> (Zeroizing<String>, String) {
        (self.private, self.public)
    }
}

impl fmt::Debug for WireKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WireKeyPair")
            .field("private", &"[REDACTED]")
            .field("public", &self.public)
            .finish()
    }
}

/// Generate a key pair using the OS random number generator.
///
/// # Example
///
/// ```
/// use dh1080::keypair::generate_keypair;
/// use dh1080::params::DomainParams;
///
/// let params = DomainParams::new().unwrap();
/// let pair = generate_keypair(&params).unwrap();
/// assert!(!pair.public_wire().is_empty());
/// assert!(!pair.public_wire().contains('='));
/// ```
pub fn generate_keypair(params: &DomainParams) -> Result<WireKeyPair> {
    generate_keypair_with_rng(params, &mut OsRng)
}

/// Generate a key pair from a caller-supplied CSPRNG.
///
/// Exists for benchmarks and reproducible tests. Production code wants
/// [`generate_keypair`].
pub fn generate_keypair_with_rng<R>(params: &DomainParams, rng: &mut R) -> Result<WireKeyPair>
where
    R: Rng + CryptoRng + ?Sized,
{
    let two = BigUint::from(2u32);
    let mut x = rng.gen_biguint_range(&two, params.prime_minus_one());
    let y = params.generator().modpow(&x, params.prime());

    // Serialize both before encoding either so a failure can't leave one
    // half behind.
    let serialized = KeyBuffer::from_biguint(&x).and_then(|private| {
        KeyBuffer::from_biguint(&y).map(|public| (private, public))
    });
    x.zeroize();
    let (private_buf, public_buf) = serialized?;

    let private = Zeroizing::new(codec::encode(private_buf.significant()));
    let public = codec::encode(public_buf.significant());

    debug!(public_len = public.len(), "generated dh1080 key pair");
    Ok(WireKeyPair { private, public })
}

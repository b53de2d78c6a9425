//! # Shared-Key Derivation
//!
//! Takes our retained private wire string and the peer's public wire string,
//! and produces the key the FiSH cipher layer will use:
//!
//! ```text
//!   x      = decode(private_wire)
//!   peer_y = decode(peer_wire),          rejected unless 1 < peer_y < p-1
//!   z      = peer_y^x mod p,             big-endian, NO leading zeros
//!   key    = encode(SHA-256(z))          always 43 characters
//! ```
//!
//! ## The unpadded secret
//!
//! Modern finite-field DH APIs left-pad the shared secret to the modulus
//! width before hashing. DH1080 predates that convention: about one
//! exchange in 256 produces a `z` whose top byte is zero, and every
//! deployed client hashes it *without* that byte. We do the same, or we
//! derive a different key than the peer in exactly those exchanges.
//!
//! ## Order of operations
//!
//! Input screening and peer validation happen before the private key is
//! even decoded, so garbage from the network never causes us to touch our
//! own secret. Every secret intermediate (`x`, `z`, the digest) is held in
//! storage that wipes itself on drop, so early returns clean up too.

use std::fmt;

use num_bigint_dig::BigUint;
use sha2::digest::generic_array::GenericArray;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::buffer::KeyBuffer;
use crate::codec::{self, decode_checked, is_transport_alphabet};
use crate::config::{PRIME_BYTES, SHA256_DIGEST_LENGTH};
use crate::error::{Dh1080Error, Result};
use crate::params::DomainParams;
use crate::validate::validate_public_value;

/// A derived DH1080 key in wire form.
///
/// This is what both peers end up holding after a successful exchange, and
/// what gets fed to the cipher layer as its key. The string is wiped when
/// the value is dropped; call [`into_string`](Self::into_string) if you need
/// to hand ownership to code that manages its own secrets.
#[derive(Clone)]
pub struct SharedKey {
    wire: Zeroizing<String>,
}

impl SharedKey {
    /// The key as transport Base64 (43 characters).
    pub fn as_str(&self) -> &str {
        &self.wire
    }

    /// Take the key out as a plain `String`. The caller now owns its hygiene.
    pub fn into_string(mut self) -> String {
        std::mem::take(&mut *self.wire)
    }
}

impl PartialEq for SharedKey {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for SharedKey {}

impl fmt::Debug for SharedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedKey").field(&"[REDACTED]").finish()
    }
}

/// The local half of the exchange, rebuilt from the private wire string.
///
/// Holding `y` next to `x` keeps the pair honest: an exponent whose public
/// value would be degenerate can't have come from our key generator, so
/// it is refused rather than used.
struct LocalKeyPair {
    private: Zeroizing<BigUint>,
    public: BigUint,
}

impl LocalKeyPair {
    fn from_wire(params: &DomainParams, private_wire: &str) -> Result<Self> {
        let bytes = decode_checked(private_wire, PRIME_BYTES)?;
        let private = Zeroizing::new(BigUint::from_bytes_be(&bytes));
        let public = params.generator().modpow(&private, params.prime());

        if validate_public_value(params, &public).is_err() {
            return Err(Dh1080Error::MalformedInput(
                "private key yields a degenerate public value",
            ));
        }
        Ok(Self { private, public })
    }

    fn agree(&self, params: &DomainParams, peer: &BigUint) -> Zeroizing<BigUint> {
        Zeroizing::new(peer.modpow(&self.private, params.prime()))
    }
}

/// Derive the shared key from our private wire string and the peer's
/// public wire string.
///
/// Fails with [`Dh1080Error::MalformedInput`] or [`Dh1080Error::KeyTooLong`]
/// for bad encodings, and with [`Dh1080Error::InvalidPublicKey`] when the
/// peer's value is outside `(1, p - 1)`. No partial result is ever returned.
///
/// The result depends only on the inputs and the domain parameters, so
/// calling it twice with the same arguments gives the same key.
///
/// # Example
///
/// ```
/// use dh1080::derive::compute_shared_key;
/// use dh1080::keypair::generate_keypair;
/// use dh1080::params::DomainParams;
///
/// let params = DomainParams::new().unwrap();
/// let alice = generate_keypair(&params).unwrap();
/// let bob = generate_keypair(&params).unwrap();
///
/// let k1 = compute_shared_key(&params, alice.private_wire(), bob.public_wire()).unwrap();
/// let k2 = compute_shared_key(&params, bob.private_wire(), alice.public_wire()).unwrap();
/// assert_eq!(k1, k2);
/// assert_eq!(k1.as_str().len(), 43);
/// ```
pub fn compute_shared_key(
    params: &DomainParams,
    private_wire: &str,
    peer_wire: &str,
) -> Result<SharedKey> {
    if !is_transport_alphabet(private_wire) || !is_transport_alphabet(peer_wire) {
        warn!("rejected dh1080 input containing non-base64 characters");
        return Err(Dh1080Error::MalformedInput(
            "character outside transport alphabet",
        ));
    }

    let peer_bytes = decode_checked(peer_wire, PRIME_BYTES).map_err(|e| {
        warn!(error = %e, "rejected undecodable dh1080 public key");
        e
    })?;
    let peer = BigUint::from_bytes_be(&peer_bytes);
    validate_public_value(params, &peer)?;

    let local = LocalKeyPair::from_wire(params, private_wire)?;
    let shared = local.agree(params, &peer);
    let shared_bytes = KeyBuffer::from_biguint(&shared)?;

    let digest = sha256_wiped(shared_bytes.significant());
    let wire = Zeroizing::new(codec::encode(&digest[..]));

    debug!(
        shared_len = shared_bytes.significant().len(),
        own_public_bits = local.public.bits(),
        "derived dh1080 shared key"
    );
    Ok(SharedKey { wire })
}

/// SHA-256 into a buffer that wipes itself, instead of a stack temporary
/// that doesn't.
fn sha256_wiped(data: &[u8]) -> Zeroizing<[u8; SHA256_DIGEST_LENGTH]> {
    let mut digest = Zeroizing::new([0u8; SHA256_DIGEST_LENGTH]);
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize_into(GenericArray::from_mut_slice(&mut digest[..]));
    digest
}

// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # DH1080: Diffie-Hellman Key Exchange for IRC
//!
//! DH1080 is how FiSH-compatible IRC clients agree on a Blowfish key over a
//! channel that anyone can read: a textbook finite-field Diffie-Hellman over
//! a fixed 1080-bit safe prime, with public values smuggled through IRC as
//! a slightly odd flavour of Base64, and the shared secret hashed with
//! SHA-256 before use.
//!
//! None of this is new or fancy. It is, however, a protocol with a couple
//! of decades of deployed peers, so every quirk is load-bearing.
//!
//! ## Architecture
//!
//! - **config**: The prime, the generator, and every other constant.
//! - **codec**: The IRC-safe Base64 variant (no `=`, ever).
//! - **params**: Domain parameters and their init/deinit lifecycle.
//! - **validate**: The `1 < y < p-1` check on peer public values.
//! - **keypair**: Fresh key pairs, already in wire form.
//! - **derive**: Peer value + our private value in, SHA-256 key out.
//! - **exchange**: A single-use session wrapper over the two above.
//! - **error**: What can go wrong, without saying which bytes were involved.
//!
//! ## Two ways in
//!
//! Every operation takes an explicit [`DomainParams`] handle, which is what
//! tests and multi-tenant hosts want. For plugin-style hosts that expect a
//! process-wide `init()` / `deinit()` pair, the functions at the crate root
//! do exactly that on top of a static [`ParameterStore`].
//!
//! ```
//! dh1080::init().ok(); // Err(AlreadyInitialized) if another test got here first
//!
//! let alice = dh1080::generate_keypair().unwrap();
//! let bob = dh1080::generate_keypair().unwrap();
//!
//! let a = dh1080::compute_shared_key(alice.private_wire(), bob.public_wire()).unwrap();
//! let b = dh1080::compute_shared_key(bob.private_wire(), alice.public_wire()).unwrap();
//! assert_eq!(a, b);
//! ```
//!
//! ## Not in here
//!
//! The Blowfish layer, CTCP framing and anything user-facing belong to the
//! caller. This crate does no I/O.

pub mod codec;
pub mod config;
pub mod derive;
pub mod error;
pub mod exchange;
pub mod keypair;
pub mod params;
pub mod validate;

mod buffer;

use num_bigint_dig::BigUint;

pub use derive::SharedKey;
pub use error::{Dh1080Error, ErrorKind, Result};
pub use exchange::{KeyExchange, Role};
pub use keypair::WireKeyPair;
pub use params::{DomainParams, ParameterStore};

/// The process-wide parameter store behind the root-level functions.
static GLOBAL_PARAMS: ParameterStore = ParameterStore::new();

/// The store used by the root-level functions.
pub fn global_store() -> &'static ParameterStore {
    &GLOBAL_PARAMS
}

/// Load the process-wide domain parameters.
///
/// Call once at startup. A second call without [`deinit`] fails with
/// [`Dh1080Error::AlreadyInitialized`] and leaves the loaded parameters alone.
pub fn init() -> Result<()> {
    GLOBAL_PARAMS.init()
}

/// Release the process-wide domain parameters. Safe to call at any time.
pub fn deinit() {
    GLOBAL_PARAMS.deinit()
}

/// Generate a key pair against the process-wide parameters.
pub fn generate_keypair() -> Result<WireKeyPair> {
    let params = GLOBAL_PARAMS.params()?;
    keypair::generate_keypair(&params)
}

/// Derive a shared key against the process-wide parameters.
pub fn compute_shared_key(private_wire: &str, peer_wire: &str) -> Result<SharedKey> {
    let params = GLOBAL_PARAMS.params()?;
    derive::compute_shared_key(&params, private_wire, peer_wire)
}

/// Start a [`KeyExchange`] session against the process-wide parameters.
pub fn start_exchange(role: Role) -> Result<KeyExchange> {
    KeyExchange::new(GLOBAL_PARAMS.params()?, role)
}

/// Whether a peer's public wire string would be accepted.
///
/// Fails closed: anything undecodable, out of range, or checked before
/// [`init`] is reported as invalid.
pub fn is_valid_public_key(peer_wire: &str) -> bool {
    let Ok(params) = GLOBAL_PARAMS.params() else {
        return false;
    };
    match codec::decode_checked(peer_wire, params.prime_bytes()) {
        Ok(bytes) => {
            let y = BigUint::from_bytes_be(&bytes);
            validate::is_valid_public_value(&y, params.prime())
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Nothing in the unit tests calls `deinit`, so the global store only
    // ever moves from empty to loaded here.
    fn ensure_init() {
        let _ = init();
        assert!(global_store().is_initialized());
    }

    #[test]
    fn test_global_keypair_and_derive_agree() {
        ensure_init();
        let alice = generate_keypair().unwrap();
        let bob = generate_keypair().unwrap();

        let a = compute_shared_key(alice.private_wire(), bob.public_wire()).unwrap();
        let b = compute_shared_key(bob.private_wire(), alice.public_wire()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str().len(), config::SHARED_KEY_WIRE_LENGTH);
    }

    #[test]
    fn test_global_api_matches_explicit_handle() {
        ensure_init();
        let params = DomainParams::new().unwrap();
        let alice = generate_keypair().unwrap();
        let bob = keypair::generate_keypair(&params).unwrap();

        let global = compute_shared_key(alice.private_wire(), bob.public_wire()).unwrap();
        let explicit =
            derive::compute_shared_key(&params, alice.private_wire(), bob.public_wire()).unwrap();
        assert_eq!(global, explicit);
    }

    #[test]
    fn test_global_validity_check() {
        ensure_init();
        let pair = generate_keypair().unwrap();
        assert!(is_valid_public_key(pair.public_wire()));
        assert!(!is_valid_public_key("AQ"));
        assert!(!is_valid_public_key("not base64!"));
    }
}

//! # Domain Parameters
//!
//! The (p, g) pair every DH1080 peer shares, and the store that owns it.
//!
//! [`DomainParams`] is a plain immutable value: build it once, share it by
//! reference or `Arc`, read it from as many threads as you like.
//!
//! [`ParameterStore`] adds the init/deinit lifecycle on top. It exists so
//! that a process (or a test) can hold exactly one set of parameters with an
//! explicit, checkable "am I initialized?" state instead of a bare global
//! pointer. Double initialization is an error, not a silent reset: anyone
//! already holding the old `Arc` keeps working either way, but a second
//! `init()` almost always means two subsystems think they own the lifecycle.

use std::sync::Arc;

use num_bigint_dig::BigUint;
use num_traits::One;
use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::config::{GENERATOR, PRIME_1080, PRIME_BITS, PRIME_BYTES};
use crate::error::{Dh1080Error, Result};

/// The DH1080 group: the 1080-bit safe prime and generator 2.
///
/// `p - 1` is cached alongside because the peer validator compares against
/// it on every handshake.
#[derive(Clone)]
pub struct DomainParams {
    prime: BigUint,
    generator: BigUint,
    prime_minus_one: BigUint,
}

impl DomainParams {
    /// Build the parameters from the compiled-in prime.
    ///
    /// The inputs are constants, so the only realistic failure is the
    /// constant itself being wrong. We check anyway.
    pub fn new() -> Result<Self> {
        let prime = BigUint::from_bytes_be(&PRIME_1080);
        if prime.bits() != PRIME_BITS {
            return Err(Dh1080Error::InitializationFailed(format!(
                "modulus is {} bits, expected {}",
                prime.bits(),
                PRIME_BITS
            )));
        }

        let generator = BigUint::from(GENERATOR);
        let one = BigUint::one();
        if generator <= one || generator >= prime {
            return Err(Dh1080Error::InitializationFailed(
                "generator outside (1, p)".to_string(),
            ));
        }

        let prime_minus_one = &prime - &one;
        Ok(Self {
            prime,
            generator,
            prime_minus_one,
        })
    }

    /// The modulus `p`.
    pub fn prime(&self) -> &BigUint {
        &self.prime
    }

    /// The generator `g`.
    pub fn generator(&self) -> &BigUint {
        &self.generator
    }

    /// `p - 1`, the exclusive upper bound for acceptable public values.
    pub fn prime_minus_one(&self) -> &BigUint {
        &self.prime_minus_one
    }

    /// Byte length of `p`, and therefore the size limit for every key.
    pub fn prime_bytes(&self) -> usize {
        PRIME_BYTES
    }
}

impl std::fmt::Debug for DomainParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // 1080 bits of hex helps nobody in a log line.
        f.debug_struct("DomainParams")
            .field("prime_bits", &self.prime.bits())
            .field("generator", &self.generator)
            .finish()
    }
}

/// Lifecycle owner for a set of [`DomainParams`].
///
/// States: uninitialized, then ready after [`init`](Self::init), then
/// uninitialized again after [`deinit`](Self::deinit). `const`-constructible
/// so it can back a `static`.
///
/// `init` and `deinit` are internally locked, but callers should still run
/// them once at startup and shutdown rather than racing them against
/// handshakes. A handshake that grabbed its `Arc` before `deinit` finishes
/// normally; one that starts after gets [`Dh1080Error::NotInitialized`].
pub struct ParameterStore {
    slot: RwLock<Option<Arc<DomainParams>>>,
}

impl ParameterStore {
    /// An empty, uninitialized store.
    pub const fn new() -> Self {
        Self {
            slot: parking_lot::const_rwlock(None),
        }
    }

    /// Load the domain parameters.
    ///
    /// Fails with [`Dh1080Error::AlreadyInitialized`] if called twice without
    /// an intervening [`deinit`](Self::deinit). The existing parameters are
    /// left untouched in that case.
    pub fn init(&self) -> Result<()> {
        let mut slot = self.slot.write();
        if slot.is_some() {
            warn!("dh1080 init called while already initialized");
            return Err(Dh1080Error::AlreadyInitialized);
        }

        let params = DomainParams::new()?;
        *slot = Some(Arc::new(params));
        debug!(prime_bits = PRIME_BITS, "dh1080 domain parameters initialized");
        Ok(())
    }

    /// Release the domain parameters. A no-op when not initialized.
    pub fn deinit(&self) {
        if self.slot.write().take().is_some() {
            debug!("dh1080 domain parameters released");
        }
    }

    /// Whether [`init`](Self::init) has succeeded and not been undone.
    pub fn is_initialized(&self) -> bool {
        self.slot.read().is_some()
    }

    /// A shared handle to the loaded parameters.
    pub fn params(&self) -> Result<Arc<DomainParams>> {
        self.slot.read().clone().ok_or(Dh1080Error::NotInitialized)
    }
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new()
    }
}

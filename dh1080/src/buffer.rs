//! Fixed-capacity big-endian buffers for group elements.
//!
//! Everything DH1080 serializes (private exponents, public values, raw shared
//! secrets) fits in the modulus byte length. [`KeyBuffer`] holds one such
//! value right-aligned in a `PRIME_BYTES` array and wipes it on drop.
//!
//! The wire format uses the *significant* bytes only: no leading zeros, the
//! way the original big-number-to-binary conversion behaved. Peers hash the
//! shared secret at that natural length, so padding it would silently derive
//! a different key one time in 256.

use num_bigint_dig::BigUint;
use num_traits::Zero;
use zeroize::Zeroizing;

use crate::config::PRIME_BYTES;
use crate::error::{Dh1080Error, Result};

pub(crate) struct KeyBuffer {
    bytes: Zeroizing<[u8; PRIME_BYTES]>,
    len: usize,
}

impl KeyBuffer {
    /// Serialize `value` into the buffer.
    ///
    /// Fails if the value needs more than `PRIME_BYTES`, which for reduced
    /// group elements means something upstream is badly wrong.
    pub(crate) fn from_biguint(value: &BigUint) -> Result<Self> {
        let mut bytes = Zeroizing::new([0u8; PRIME_BYTES]);
        if value.is_zero() {
            return Ok(Self { bytes, len: 0 });
        }

        let raw = Zeroizing::new(value.to_bytes_be());
        if raw.len() > PRIME_BYTES {
            return Err(Dh1080Error::CryptoFailure(format!(
                "value needs {} bytes, buffer holds {}",
                raw.len(),
                PRIME_BYTES
            )));
        }

        bytes[PRIME_BYTES - raw.len()..].copy_from_slice(&raw);
        Ok(Self {
            bytes,
            len: raw.len(),
        })
    }

    /// The value without leading zero bytes.
    pub(crate) fn significant(&self) -> &[u8] {
        &self.bytes[PRIME_BYTES - self.len..]
    }

    /// The value left-padded to the full modulus width.
    #[cfg(test)]
    pub(crate) fn padded(&self) -> &[u8; PRIME_BYTES] {
        &self.bytes
    }
}

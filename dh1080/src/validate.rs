//! # Peer Public Value Validation
//!
//! Before we raise anything to our secret exponent, we make sure it isn't
//! one of the values that would hand an attacker a known shared secret:
//!
//! - `0` and `1` raise to `0` and `1` for any exponent.
//! - `p - 1` raises to `1` or `p - 1`, leaking the parity of our exponent
//!   and collapsing the secret to one of two values.
//! - Anything `>= p` isn't a group element at all.
//!
//! So a public value is accepted iff `1 < y < p - 1`.
//!
//! ## What we deliberately don't check
//!
//! There is no subgroup-order confirmation (`y^q == 1 mod p`). With
//! `g = 2` and this prime, 2 is a quadratic non-residue, so honest public
//! values land in the full group and half of them would fail such a check.
//! Every deployed FiSH peer relies on the range check alone; anything
//! stricter would reject legitimate clients.

use num_bigint_dig::BigUint;
use num_traits::One;
use tracing::warn;

use crate::error::{Dh1080Error, Result};
use crate::params::DomainParams;

/// Range check for a peer public value: `1 < y < p - 1`.
///
/// Pure, no allocation beyond computing `p - 1`. A degenerate modulus
/// (`p <= 1`) rejects everything.
pub fn is_valid_public_value(y: &BigUint, p: &BigUint) -> bool {
    let one = BigUint::one();
    if *p <= one {
        return false;
    }
    let p_minus_one = p - &one;
    *y > one && *y < p_minus_one
}

/// Validate a peer public value against the loaded domain parameters.
///
/// Uses the cached `p - 1` and turns rejection into
/// [`Dh1080Error::InvalidPublicKey`].
pub fn validate_public_value(params: &DomainParams, y: &BigUint) -> Result<()> {
    if *y > BigUint::one() && y < params.prime_minus_one() {
        Ok(())
    } else {
        warn!(bits = y.bits(), "rejected peer public value outside (1, p-1)");
        Err(Dh1080Error::InvalidPublicKey)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::Zero;

    fn params() -> DomainParams {
        DomainParams::new().unwrap()
    }

    #[test]
    fn test_boundaries() {
        let params = params();
        let p = params.prime();
        let one = BigUint::one();

        assert!(!is_valid_public_value(&BigUint::zero(), p));
        assert!(!is_valid_public_value(&one, p));
        assert!(is_valid_public_value(&BigUint::from(2u32), p));
        assert!(is_valid_public_value(&(p - &BigUint::from(2u32)), p));
        assert!(!is_valid_public_value(&(p - &one), p));
        assert!(!is_valid_public_value(p, p));
        assert!(!is_valid_public_value(&(p + &one), p));
    }

    #[test]
    fn test_degenerate_modulus_rejects_everything() {
        let two = BigUint::from(2u32);
        assert!(!is_valid_public_value(&two, &BigUint::one()));
        assert!(!is_valid_public_value(&two, &BigUint::zero()));
        // p = 3 leaves an empty open interval (1, 2).
        assert!(!is_valid_public_value(&two, &BigUint::from(3u32)));
    }

    #[test]
    fn test_validate_agrees_with_predicate() {
        let params = params();
        let p = params.prime().clone();
        let candidates = [
            BigUint::zero(),
            BigUint::one(),
            BigUint::from(2u32),
            BigUint::from(0xDEADBEEFu32),
            &p - &BigUint::from(2u32),
            &p - &BigUint::one(),
            p.clone(),
        ];

        for y in candidates.iter() {
            assert_eq!(
                validate_public_value(&params, y).is_ok(),
                is_valid_public_value(y, &p)
            );
        }
    }

    #[test]
    fn test_validate_error_kind() {
        let params = params();
        let err = validate_public_value(&params, &BigUint::one()).unwrap_err();
        assert!(matches!(err, Dh1080Error::InvalidPublicKey));
    }
}

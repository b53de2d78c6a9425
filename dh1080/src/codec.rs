//! # Transport Codec
//!
//! DH1080's Base64 dialect. IRC clients historically mangled `=` in CTCP
//! payloads, so the original FiSH authors made sure it never appears:
//!
//! - Standard Base64 output with padding has everything from the first `=`
//!   onward cut off. The decoder puts it back by rounding up to a multiple
//!   of four.
//! - Standard output *without* padding gets a literal `A` appended. That
//!   makes the token length `1 (mod 4)`, which no truncated string can ever
//!   be, so the decoder knows to strip it again.
//!
//! It's weird. It's also the wire format every peer speaks, so it stays
//! exactly like this.
//!
//! The one deliberate deviation: empty input encodes to an empty string
//! rather than `"A"`. Both decode to nothing, so peers can't tell.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use zeroize::Zeroizing;

use crate::config::{max_wire_length, NO_PADDING_MARKER};
use crate::error::{Dh1080Error, Result};

/// Decoder that ignores non-zero trailing bits, like the GLib decoder most
/// deployed peers use. Padding is always restored before decoding, so it
/// is required to be canonical.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::RequireCanonical),
);

/// Encode bytes as a DH1080 wire string.
///
/// # Example
///
/// ```
/// use dh1080::codec::encode;
///
/// assert_eq!(encode(b"abc"), "YWJjA"); // no padding needed: marker appended
/// assert_eq!(encode(b"ab"), "YWI");    // one `=` dropped
/// assert_eq!(encode(b"a"), "YQ");      // two `=` dropped
/// ```
pub fn encode(data: &[u8]) -> String {
    if data.is_empty() {
        return String::new();
    }

    // Room for the marker, so the push below never reallocates. The
    // encoder's own scratch space is not wiped.
    let mut out = String::with_capacity(data.len().div_ceil(3) * 4 + 1);
    STANDARD.encode_string(data, &mut out);

    match out.find('=') {
        Some(pos) => out.truncate(pos),
        None => out.push(NO_PADDING_MARKER),
    }
    out
}

/// Decode a DH1080 wire string back into bytes.
///
/// The result is wrapped in [`Zeroizing`] because half the things that pass
/// through here are private exponents.
///
/// Callers handling untrusted input should screen it with
/// [`is_transport_alphabet`] first; this function still fails cleanly on
/// anything that isn't valid Base64 after padding is restored.
pub fn decode(wire: &str) -> Result<Zeroizing<Vec<u8>>> {
    let mut padded = Zeroizing::new(String::with_capacity(wire.len() + 3));
    padded.push_str(wire);

    if padded.len() % 4 == 1 && padded.ends_with(NO_PADDING_MARKER) {
        padded.pop();
    }
    while padded.len() % 4 != 0 {
        padded.push('=');
    }

    let mut out = Zeroizing::new(Vec::with_capacity(padded.len() / 4 * 3));
    LENIENT
        .decode_vec(padded.as_bytes(), &mut *out)
        .map_err(|_| Dh1080Error::MalformedInput("invalid transport base64"))?;
    Ok(out)
}

/// Check that `wire` only uses `A-Za-z0-9+/`.
///
/// The empty string passes. Whether an empty key is acceptable is for the
/// validator to decide, not the alphabet check.
pub fn is_transport_alphabet(wire: &str) -> bool {
    wire.bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'+' || b == b'/')
}

/// Screen and decode an untrusted wire string in one step.
///
/// Rejects bad characters and tokens longer than [`max_wire_length`] allows
/// before any decoding work is done, and payloads that decode to more than
/// `max_len` bytes after.
pub(crate) fn decode_checked(wire: &str, max_len: usize) -> Result<Zeroizing<Vec<u8>>> {
    if !is_transport_alphabet(wire) {
        return Err(Dh1080Error::MalformedInput(
            "character outside transport alphabet",
        ));
    }
    if wire.len() > max_wire_length(max_len) {
        return Err(Dh1080Error::KeyTooLong {
            len: decoded_len(wire.len()),
            max: max_len,
        });
    }
    let bytes = decode(wire)?;
    if bytes.len() > max_len {
        return Err(Dh1080Error::KeyTooLong {
            len: bytes.len(),
            max: max_len,
        });
    }
    Ok(bytes)
}

/// Bytes carried by an unpadded token of `wire_len` characters.
fn decoded_len(wire_len: usize) -> usize {
    wire_len / 4 * 3 + (wire_len % 4).saturating_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        B64_ALPHABET, MAX_WIRE_LENGTH, PRIME_BYTES, SHA256_DIGEST_LENGTH, SHARED_KEY_WIRE_LENGTH,
    };

    #[test]
    fn test_known_vectors() {
        assert_eq!(encode(b"abc"), "YWJjA");
        assert_eq!(encode(b"ab"), "YWI");
        assert_eq!(encode(b"a"), "YQ");
        assert_eq!(encode(b"hello world!"), "aGVsbG8gd29ybGQhA");
    }

    #[test]
    fn test_decode_known_vectors() {
        assert_eq!(decode("YWJjA").unwrap().as_slice(), b"abc");
        assert_eq!(decode("YWI").unwrap().as_slice(), b"ab");
        assert_eq!(decode("YQ").unwrap().as_slice(), b"a");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(encode(b""), "");
        assert!(decode("").unwrap().is_empty());
        // What the legacy encoder emits for empty input still decodes to nothing.
        assert!(decode("A").unwrap().is_empty());
    }

    #[test]
    fn test_round_trip_all_key_lengths() {
        for len in 0..=PRIME_BYTES {
            let data: Vec<u8> = (0..len).map(|i| (i * 37 + 11) as u8).collect();
            let wire = encode(&data);
            assert_eq!(decode(&wire).unwrap().as_slice(), data.as_slice(), "len {len}");
        }
    }

    #[test]
    fn test_wire_never_contains_padding_or_whitespace() {
        for len in 0..=PRIME_BYTES {
            let data = vec![0xFFu8; len];
            let wire = encode(&data);
            assert!(!wire.contains('='));
            assert!(!wire.chars().any(char::is_whitespace));
            assert!(wire.chars().all(|c| B64_ALPHABET.contains(c)));
        }
    }

    #[test]
    fn test_wire_length_is_never_one_mod_four_unless_marked() {
        for len in 1..=64 {
            let wire = encode(&vec![0x42u8; len]);
            if wire.len() % 4 == 1 {
                assert!(wire.ends_with('A'));
                assert_eq!(len % 3, 0);
            }
        }
    }

    #[test]
    fn test_digest_encodes_to_fixed_length() {
        let wire = encode(&[0x5Au8; SHA256_DIGEST_LENGTH]);
        assert_eq!(wire.len(), SHARED_KEY_WIRE_LENGTH);
    }

    #[test]
    fn test_unmarked_one_mod_four_is_rejected() {
        // Five characters that don't end in the marker can't be Base64.
        assert!(decode("YWJjB").is_err());
    }

    #[test]
    fn test_trailing_bits_tolerated() {
        // "YR" has non-zero trailing bits; canonical would be "YQ".
        assert_eq!(decode("YR").unwrap().as_slice(), b"a");
    }

    #[test]
    fn test_alphabet_screening() {
        assert!(is_transport_alphabet("AZaz09+/"));
        assert!(is_transport_alphabet(""));
        assert!(!is_transport_alphabet("not-base64!!"));
        assert!(!is_transport_alphabet("abc="));
        assert!(!is_transport_alphabet("ab c"));
        assert!(!is_transport_alphabet("abc\n"));
    }

    #[test]
    fn test_decode_checked_limits() {
        let wire = encode(&[1u8; 136]);
        match decode_checked(&wire, PRIME_BYTES) {
            Err(Dh1080Error::KeyTooLong { len, max }) => {
                assert_eq!(len, 136);
                assert_eq!(max, PRIME_BYTES);
            }
            other => panic!("expected KeyTooLong, got {other:?}"),
        }

        let wire = encode(&[1u8; PRIME_BYTES]);
        assert_eq!(decode_checked(&wire, PRIME_BYTES).unwrap().len(), PRIME_BYTES);

        let huge = "A".repeat(4096);
        assert!(matches!(
            decode_checked(&huge, PRIME_BYTES),
            Err(Dh1080Error::KeyTooLong { len: 3072, .. })
        ));

        assert!(matches!(
            decode_checked("abc=", PRIME_BYTES),
            Err(Dh1080Error::MalformedInput(_))
        ));
    }

    #[test]
    fn test_oversized_token_rejected_before_decoding() {
        // Not valid Base64 once padded, so only the length check can
        // produce KeyTooLong here.
        let wire = "B".repeat(MAX_WIRE_LENGTH + 4);
        match decode_checked(&wire, PRIME_BYTES) {
            Err(Dh1080Error::KeyTooLong { len, max }) => {
                assert_eq!(len, (MAX_WIRE_LENGTH + 4) / 4 * 3);
                assert_eq!(max, PRIME_BYTES);
            }
            other => panic!("expected KeyTooLong, got {other:?}"),
        }

        // The longest legal token still gets through.
        let wire = encode(&[0xABu8; PRIME_BYTES]);
        assert_eq!(wire.len(), MAX_WIRE_LENGTH);
        assert!(decode_checked(&wire, PRIME_BYTES).is_ok());
    }

    #[test]
    fn test_decoded_len_matches_encoder() {
        for len in 0..=PRIME_BYTES + 3 {
            let wire = encode(&vec![7u8; len]);
            assert_eq!(decoded_len(wire.len()), len, "len {len}");
        }
    }
}

//! # Protocol Constants
//!
//! Every magic number in DH1080 lives here. Unlike most protocols, nothing in
//! this file is negotiable: every FiSH-compatible client on the planet uses
//! the same prime, the same generator and the same oddball Base64 variant.
//! Change any of these and you can only key-exchange with yourself.

// ---------------------------------------------------------------------------
// Group Parameters
// ---------------------------------------------------------------------------

/// Bit length of the DH1080 modulus. The protocol is named after it.
pub const PRIME_BITS: usize = 1080;

/// Byte length of the modulus. Also the upper bound for every serialized
/// private exponent, public value and raw shared secret.
pub const PRIME_BYTES: usize = PRIME_BITS / 8;

/// The generator. Two, as tradition demands.
pub const GENERATOR: u32 = 2;

/// The 1080-bit Sophie Germain (safe) prime shared by all DH1080 peers,
/// big-endian and unsigned.
pub const PRIME_1080: [u8; PRIME_BYTES] = [
    0xFB, 0xE1, 0x02, 0x2E, 0x23, 0xD2, 0x13, 0xE8, 0xAC, 0xFA, 0x9A, 0xE8, 0xB9, 0xDF, 0xAD,
    0xA3, 0xEA, 0x6B, 0x7A, 0xC7, 0xA7, 0xB7, 0xE9, 0x5A, 0xB5, 0xEB, 0x2D, 0xF8, 0x58, 0x92,
    0x1F, 0xEA, 0xDE, 0x95, 0xE6, 0xAC, 0x7B, 0xE7, 0xDE, 0x6A, 0xDB, 0xAB, 0x8A, 0x78, 0x3E,
    0x7A, 0xF7, 0xA7, 0xFA, 0x6A, 0x2B, 0x7B, 0xEB, 0x1E, 0x72, 0xEA, 0xE2, 0xB7, 0x2F, 0x9F,
    0xA2, 0xBF, 0xB2, 0xA2, 0xEF, 0xBE, 0xFA, 0xC8, 0x68, 0xBA, 0xDB, 0x3E, 0x82, 0x8F, 0xA8,
    0xBA, 0xDF, 0xAD, 0xA3, 0xE4, 0xCC, 0x1B, 0xE7, 0xE8, 0xAF, 0xE8, 0x5E, 0x96, 0x98, 0xA7,
    0x83, 0xEB, 0x68, 0xFA, 0x07, 0xA7, 0x7A, 0xB6, 0xAD, 0x7B, 0xEB, 0x61, 0x8A, 0xCF, 0x9C,
    0xA2, 0x89, 0x7E, 0xB2, 0x8A, 0x61, 0x89, 0xEF, 0xA0, 0x7A, 0xB9, 0x9A, 0x8A, 0x7F, 0xA9,
    0xAE, 0x29, 0x9E, 0xFA, 0x7B, 0xA6, 0x6D, 0xEA, 0xFE, 0xFB, 0xEF, 0xBF, 0x0B, 0x7D, 0x8B,
];

// ---------------------------------------------------------------------------
// Key Derivation
// ---------------------------------------------------------------------------

/// SHA-256 digest length. The raw shared secret is hashed down to this.
pub const SHA256_DIGEST_LENGTH: usize = 32;

/// Length of a derived key once it has been through the transport codec.
/// 32 bytes of Base64 is 44 characters with one `=`; dropping the pad leaves 43.
pub const SHARED_KEY_WIRE_LENGTH: usize = 43;

// ---------------------------------------------------------------------------
// Transport Encoding
// ---------------------------------------------------------------------------

/// The only characters a DH1080 wire string may contain.
pub const B64_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Marker appended when standard Base64 would have emitted no padding.
pub const NO_PADDING_MARKER: char = 'A';

/// Longest wire string that can still decode to at most `max_bytes`.
pub const fn max_wire_length(max_bytes: usize) -> usize {
    max_bytes.div_ceil(3) * 4 + 1
}

/// Longest wire string that can still decode to at most [`PRIME_BYTES`].
/// 135 bytes is 180 Base64 characters, plus the trailing marker.
pub const MAX_WIRE_LENGTH: usize = max_wire_length(PRIME_BYTES);

// ---------------------------------------------------------------------------
// IRC Message Commands
// ---------------------------------------------------------------------------

/// Command word opening a key exchange: `DH1080_INIT <public-wire>`.
pub const INIT_COMMAND: &str = "DH1080_INIT";

/// Command word answering one: `DH1080_FINISH <public-wire>`.
pub const FINISH_COMMAND: &str = "DH1080_FINISH";

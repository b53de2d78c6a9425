//! Error types for DH1080.
//!
//! Every fallible operation in the crate returns a [`Dh1080Error`]. Messages
//! never carry key material: a rejected handshake says *what kind* of thing
//! went wrong, never *which bytes* were involved.

use thiserror::Error;

/// Coarse classification of a [`Dh1080Error`].
///
/// Callers on the IRC side usually only need to decide between "tell the
/// user the peer sent garbage" and "our own side is broken". This enum is
/// that decision, without making them match on every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Domain parameters could not be built. Key exchange is unavailable.
    Initialization,
    /// A wire string was not valid transport Base64 or was too long.
    MalformedInput,
    /// The peer's public value failed validation.
    InvalidPeerKey,
    /// An underlying primitive failed.
    Crypto,
    /// An operation was called in the wrong lifecycle state.
    State,
}

/// Errors that can occur during a DH1080 key exchange.
#[derive(Debug, Error)]
pub enum Dh1080Error {
    /// `init()` was called while the parameters were already loaded.
    #[error("domain parameters already initialized")]
    AlreadyInitialized,

    /// An operation needed the domain parameters before `init()` ran.
    #[error("domain parameters not initialized")]
    NotInitialized,

    /// The domain parameters could not be constructed.
    #[error("domain parameter initialization failed: {0}")]
    InitializationFailed(String),

    /// A wire string could not be decoded.
    #[error("malformed input: {0}")]
    MalformedInput(&'static str),

    /// A wire string decoded to more bytes than the modulus can hold.
    #[error("decoded key is {len} bytes, maximum is {max}")]
    KeyTooLong {
        /// Decoded length in bytes.
        len: usize,
        /// The modulus byte length.
        max: usize,
    },

    /// The peer's public value is outside `(1, p - 1)`.
    #[error("invalid public key received")]
    InvalidPublicKey,

    /// A cryptographic primitive reported failure.
    #[error("crypto failure: {0}")]
    CryptoFailure(String),

    /// A key-exchange session was asked to derive twice.
    #[error("key exchange already completed -- private key consumed")]
    SessionCompleted,
}

impl Dh1080Error {
    /// Map this error onto its [`ErrorKind`].
    pub fn kind(&self) -> ErrorKind {
        match self {
            Dh1080Error::InitializationFailed(_) => ErrorKind::Initialization,
            Dh1080Error::MalformedInput(_) | Dh1080Error::KeyTooLong { .. } => {
                ErrorKind::MalformedInput
            }
            Dh1080Error::InvalidPublicKey => ErrorKind::InvalidPeerKey,
            Dh1080Error::CryptoFailure(_) => ErrorKind::Crypto,
            Dh1080Error::AlreadyInitialized
            | Dh1080Error::NotInitialized
            | Dh1080Error::SessionCompleted => ErrorKind::State,
        }
    }

    /// Whether the failure should be blamed on the remote peer.
    pub fn is_peer_fault(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::MalformedInput | ErrorKind::InvalidPeerKey
        )
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Dh1080Error>;

//! # Key-Exchange Sessions
//!
//! A thin session wrapper over [`generate_keypair`] and
//! [`compute_shared_key`] for callers who'd rather not manage private wire
//! strings themselves.
//!
//! ## Protocol Flow
//!
//! 1. Alice creates a [`KeyExchange`] and sends `DH1080_INIT <public>`.
//! 2. Bob creates his own, completes it with Alice's public value, and
//!    answers `DH1080_FINISH <public>`.
//! 3. Alice completes hers with Bob's public value.
//! 4. Both now hold the same [`SharedKey`]; both private exponents are gone.
//!
//! A session completes at most once. A failed completion (garbage from the
//! peer, say) leaves the private half in place, so the caller can still
//! accept a well-formed retry of the same handshake.

use std::fmt;
use std::sync::Arc;

use tracing::debug;
use zeroize::Zeroizing;

use crate::config::{FINISH_COMMAND, INIT_COMMAND};
use crate::derive::{compute_shared_key, SharedKey};
use crate::error::{Dh1080Error, Result};
use crate::keypair::generate_keypair;
use crate::params::DomainParams;

/// Which side of the handshake a session is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// We sent `DH1080_INIT`.
    Initiator,
    /// We're answering with `DH1080_FINISH`.
    Responder,
}

impl Role {
    /// The command word this side sends its public value under.
    pub fn command(&self) -> &'static str {
        match self {
            Role::Initiator => INIT_COMMAND,
            Role::Responder => FINISH_COMMAND,
        }
    }
}

/// One side of a DH1080 handshake.
pub struct KeyExchange {
    params: Arc<DomainParams>,
    role: Role,
    /// `None` once the exchange has produced a key.
    private: Option<Zeroizing<String>>,
    public: String,
}

impl KeyExchange {
    /// Start a new session with a fresh key pair.
    pub fn new(params: Arc<DomainParams>, role: Role) -> Result<Self> {
        let (private, public) = generate_keypair(&params)?.into_parts();
        debug!(?role, "dh1080 key exchange started");
        Ok(Self {
            params,
            role,
            private: Some(private),
            public,
        })
    }

    /// Our public value, to be sent to the peer.
    pub fn public_wire(&self) -> &str {
        &self.public
    }

    /// Which side we are.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Whether [`complete`](Self::complete) has already succeeded.
    pub fn is_completed(&self) -> bool {
        self.private.is_none()
    }

    /// Derive the shared key from the peer's public value.
    ///
    /// On success the private exponent is wiped and any further call fails
    /// with [`Dh1080Error::SessionCompleted`].
    pub fn complete(&mut self, peer_wire: &str) -> Result<SharedKey> {
        let private = self
            .private
            .as_ref()
            .ok_or(Dh1080Error::SessionCompleted)?;

        let key = compute_shared_key(&self.params, private, peer_wire)?;
        self.private = None;
        debug!(role = ?self.role, "dh1080 key exchange completed");
        Ok(key)
    }
}

impl fmt::Debug for KeyExchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyExchange")
            .field("role", &self.role)
            .field("public", &self.public)
            .field("completed", &self.is_completed())
            .finish()
    }
}

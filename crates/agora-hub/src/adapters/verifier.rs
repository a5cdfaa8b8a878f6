//! # Meta-Transaction Verifier
//!
//! Boundary stand-in for the external signing/digest collaborator. Validates
//! deadline and per-signer nonce, then checks the signature bytes against a
//! keccak-256 digest of the signed fields. Replay protection lives entirely
//! here: a consumed nonce can never authorize a second call, so the hub
//! treats every recovered signer exactly like a direct caller.

use crate::errors::SignatureError;
use crate::ports::outbound::MetaTxVerifier;
use agora_types::{Address, Bytes, SignatureParams};
use sha3::{Digest, Keccak256};
use std::collections::HashMap;
use std::sync::RwLock;

const META_TX_TAG: &[u8] = b"agora.meta-tx.v1";

/// Nonce-tracking verifier with keccak digest signatures.
#[derive(Debug, Default)]
pub struct NonceTrackingVerifier {
    nonces: RwLock<HashMap<Address, u64>>,
}

impl NonceTrackingVerifier {
    /// Creates a verifier with all nonces at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Next expected nonce for a signer.
    #[must_use]
    pub fn nonce_of(&self, signer: Address) -> u64 {
        self.nonces.read().unwrap().get(&signer).copied().unwrap_or(0)
    }

    /// The digest a signer must produce over `(signer, nonce, deadline)`.
    /// Test helpers and the signing collaborator both derive it this way.
    #[must_use]
    pub fn digest(signer: Address, nonce: u64, deadline: u64) -> Bytes {
        let mut hasher = Keccak256::new();
        hasher.update(META_TX_TAG);
        hasher.update(signer.as_bytes());
        hasher.update(nonce.to_be_bytes());
        hasher.update(deadline.to_be_bytes());
        Bytes::from_slice(&hasher.finalize())
    }
}

impl MetaTxVerifier for NonceTrackingVerifier {
    fn recover(&self, params: &SignatureParams, now: u64) -> Result<Address, SignatureError> {
        if params.deadline < now {
            return Err(SignatureError::Expired {
                deadline: params.deadline,
                now,
            });
        }

        let mut nonces = self.nonces.write().unwrap();
        let expected = nonces.get(&params.signer).copied().unwrap_or(0);
        if params.nonce != expected {
            return Err(SignatureError::NonceInvalid {
                expected,
                got: params.nonce,
            });
        }

        let digest = Self::digest(params.signer, params.nonce, params.deadline);
        if params.signature != digest {
            return Err(SignatureError::SignatureInvalid);
        }

        // Consume the nonce only after the signature verified.
        nonces.insert(params.signer, expected + 1);
        Ok(params.signer)
    }
}

// =============================================================================
// TESTS
// =============================================================================

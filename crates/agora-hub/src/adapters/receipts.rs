//! # Receipt Deployer
//!
//! Derives deterministic addresses for the per-profile follow-receipt and
//! per-publication collect-receipt contracts, keccak-256 over a domain tag
//! and the record key. Deterministic derivation means a re-deployed hub
//! agrees with collaborators about receipt addresses without extra state.

use crate::ports::outbound::ReceiptDeployer;
use agora_types::{Address, ProfileId, PublicationRef};
use sha3::{Digest, Keccak256};

const FOLLOW_RECEIPT_TAG: &[u8] = b"agora.follow-receipt.v1";
const COLLECT_RECEIPT_TAG: &[u8] = b"agora.collect-receipt.v1";

/// Deterministic keccak-based receipt address derivation.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeccakReceiptDeployer;

impl KeccakReceiptDeployer {
    /// Creates the deployer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn derive(tag: &[u8], words: &[u64]) -> Address {
        let mut hasher = Keccak256::new();
        hasher.update(tag);
        for word in words {
            hasher.update(word.to_be_bytes());
        }
        let digest = hasher.finalize();
        // Last 20 bytes of the 32-byte digest, same truncation as contract
        // address derivation.
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&digest[12..]);
        Address::new(bytes)
    }
}

impl ReceiptDeployer for KeccakReceiptDeployer {
    fn deploy_follow_receipt(&self, profile: ProfileId) -> Address {
        Self::derive(FOLLOW_RECEIPT_TAG, &[profile.0])
    }

    fn deploy_collect_receipt(&self, publication: PublicationRef) -> Address {
        Self::derive(
            COLLECT_RECEIPT_TAG,
            &[publication.profile_id.0, publication.pub_id.0],
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================

//! # In-Memory Ownership Ledger
//!
//! Stand-in for the external NFT-style ownership ledger. Holds the single
//! source of truth for profile ownership; the hub only ever reads it through
//! the `OwnershipLedger` port. Transfers happen outside the hub — callers of
//! [`InMemoryLedger::transfer`] are expected to notify the hub through its
//! `on_profile_transfer` callback so the fresh executor configuration is
//! engaged.

use crate::ports::outbound::OwnershipLedger;
use agora_types::{Address, ProfileId};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory profile ownership ledger.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    owners: RwLock<HashMap<ProfileId, Address>>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Transfers a profile token to a new owner. Returns the previous owner,
    /// `None` if the token does not exist.
    pub fn transfer(&self, profile: ProfileId, to: Address) -> Option<Address> {
        let mut owners = self.owners.write().unwrap();
        owners.get(&profile).copied().map(|previous| {
            owners.insert(profile, to);
            previous
        })
    }
}

impl OwnershipLedger for InMemoryLedger {
    fn owner_of(&self, profile: ProfileId) -> Option<Address> {
        self.owners.read().unwrap().get(&profile).copied()
    }

    fn mint(&self, profile: ProfileId, to: Address) {
        self.owners.write().unwrap().insert(profile, to);
    }

    fn burn(&self, profile: ProfileId) {
        self.owners.write().unwrap().remove(&profile);
    }
}

// =============================================================================
// TESTS
// =============================================================================

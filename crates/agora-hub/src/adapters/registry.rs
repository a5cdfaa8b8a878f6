//! # Module Registry
//!
//! Binds module addresses to the policy-module implementations that run at
//! them. Whitelisting (may this address be attached?) stays in hub state
//! under governance control; the registry only answers address -> code.

use crate::ports::outbound::{CollectModule, FollowModule, ModuleDirectory, ReferenceModule};
use agora_types::Address;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// In-memory module directory.
#[derive(Default)]
pub struct ModuleRegistry {
    follow: RwLock<HashMap<Address, Arc<dyn FollowModule>>>,
    reference: RwLock<HashMap<Address, Arc<dyn ReferenceModule>>>,
    collect: RwLock<HashMap<Address, Arc<dyn CollectModule>>>,
}

impl ModuleRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a follow-module implementation to an address.
    pub fn bind_follow_module(&self, address: Address, module: Arc<dyn FollowModule>) {
        self.follow.write().unwrap().insert(address, module);
    }

    /// Binds a reference-module implementation to an address.
    pub fn bind_reference_module(&self, address: Address, module: Arc<dyn ReferenceModule>) {
        self.reference.write().unwrap().insert(address, module);
    }

    /// Binds a collect-module implementation to an address.
    pub fn bind_collect_module(&self, address: Address, module: Arc<dyn CollectModule>) {
        self.collect.write().unwrap().insert(address, module);
    }
}

impl ModuleDirectory for ModuleRegistry {
    fn follow_module(&self, address: Address) -> Option<Arc<dyn FollowModule>> {
        self.follow.read().unwrap().get(&address).cloned()
    }

    fn reference_module(&self, address: Address) -> Option<Arc<dyn ReferenceModule>> {
        self.reference.read().unwrap().get(&address).cloned()
    }

    fn collect_module(&self, address: Address) -> Option<Arc<dyn CollectModule>> {
        self.collect.read().unwrap().get(&address).cloned()
    }
}

impl std::fmt::Debug for ModuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleRegistry")
            .field("follow", &self.follow.read().unwrap().len())
            .field("reference", &self.reference.read().unwrap().len())
            .field("collect", &self.collect.read().unwrap().len())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================

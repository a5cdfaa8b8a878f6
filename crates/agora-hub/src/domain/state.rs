//! # Hub State
//!
//! The record store owned by the protocol core. All mutation goes through
//! the engines in this crate; the whole store is `Clone` so the service
//! layer can snapshot it before a mutating call and restore it on any error,
//! giving every entry point all-or-nothing semantics.

use crate::domain::entities::{
    DelegatedExecutorConfig, FollowBook, Profile, Publication, PublicationKind, ProtocolState,
};
use crate::errors::ValidationError;
use agora_types::{Address, HubView, ProfileId, PubId, PublicationRef};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// The complete mutable state of the hub.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HubState {
    /// Governance address. Set at genesis, mutated only by governance.
    pub governance: Address,
    /// Emergency admin, may only escalate protocol-state restrictiveness.
    pub emergency_admin: Option<Address>,
    /// Global pause state.
    pub protocol_state: ProtocolState,
    /// Last profile id handed out. Ids start at 1 and are never reused.
    pub profile_counter: u64,
    /// Profile records.
    pub profiles: HashMap<ProfileId, Profile>,
    /// Publication records keyed by `(profile, pub)`.
    pub publications: HashMap<PublicationRef, Publication>,
    /// Delegated-executor configurations per profile.
    pub executor_configs: HashMap<ProfileId, DelegatedExecutorConfig>,
    /// Directed block pairs `(blocker, blocked)`.
    pub blocks: HashSet<(ProfileId, ProfileId)>,
    /// Follow relationships per followed profile.
    pub follow_books: HashMap<ProfileId, FollowBook>,
    /// Addresses allowed to create profiles.
    pub profile_creator_whitelist: HashSet<Address>,
    /// Whitelisted follow-module addresses.
    pub follow_module_whitelist: HashSet<Address>,
    /// Whitelisted reference-module addresses.
    pub reference_module_whitelist: HashSet<Address>,
    /// Whitelisted collect-module addresses.
    pub collect_module_whitelist: HashSet<Address>,
}

impl HubState {
    /// Creates genesis state with the given governance address.
    #[must_use]
    pub fn genesis(governance: Address) -> Self {
        Self {
            governance,
            emergency_admin: None,
            protocol_state: ProtocolState::Unpaused,
            profile_counter: 0,
            profiles: HashMap::new(),
            publications: HashMap::new(),
            executor_configs: HashMap::new(),
            blocks: HashSet::new(),
            follow_books: HashMap::new(),
            profile_creator_whitelist: HashSet::new(),
            follow_module_whitelist: HashSet::new(),
            reference_module_whitelist: HashSet::new(),
            collect_module_whitelist: HashSet::new(),
        }
    }

    // =========================================================================
    // RECORD ACCESS
    // =========================================================================

    /// Looks up a profile record.
    pub fn profile(&self, id: ProfileId) -> Result<&Profile, ValidationError> {
        self.profiles
            .get(&id)
            .ok_or(ValidationError::ProfileNotFound(id))
    }

    /// Looks up a profile record mutably.
    pub fn profile_mut(&mut self, id: ProfileId) -> Result<&mut Profile, ValidationError> {
        self.profiles
            .get_mut(&id)
            .ok_or(ValidationError::ProfileNotFound(id))
    }

    /// Looks up a publication record.
    pub fn publication(&self, key: PublicationRef) -> Result<&Publication, ValidationError> {
        self.publications
            .get(&key)
            .ok_or(ValidationError::PublicationNotFound(key))
    }

    /// Looks up a publication record mutably.
    pub fn publication_mut(
        &mut self,
        key: PublicationRef,
    ) -> Result<&mut Publication, ValidationError> {
        self.publications
            .get_mut(&key)
            .ok_or(ValidationError::PublicationNotFound(key))
    }

    /// Classifies the publication under a key, `Nonexistent` if absent.
    #[must_use]
    pub fn publication_kind(&self, key: PublicationRef) -> PublicationKind {
        self.publications
            .get(&key)
            .map_or(PublicationKind::Nonexistent, |p| p.kind)
    }

    /// The delegated-executor configuration for a profile, defaulting to an
    /// empty generation-0 configuration.
    #[must_use]
    pub fn executor_config(&self, profile: ProfileId) -> DelegatedExecutorConfig {
        self.executor_configs
            .get(&profile)
            .cloned()
            .unwrap_or_default()
    }

    /// Mutable access to a profile's executor configuration, created on
    /// first touch.
    pub fn executor_config_mut(&mut self, profile: ProfileId) -> &mut DelegatedExecutorConfig {
        self.executor_configs.entry(profile).or_default()
    }

    /// Mutable access to a profile's follow book, created on first touch.
    pub fn follow_book_mut(&mut self, profile: ProfileId) -> &mut FollowBook {
        self.follow_books.entry(profile).or_default()
    }

    // =========================================================================
    // ID ALLOCATION
    // =========================================================================

    /// Allocates the next profile id. Ids start at 1; 0 stays reserved.
    pub fn next_profile_id(&mut self) -> ProfileId {
        self.profile_counter += 1;
        ProfileId(self.profile_counter)
    }

    /// Allocates the next publication id for a profile, bumping its counter.
    /// The counter moves before anything else happens in the creation flow,
    /// so reentrant module reads already see the new value.
    pub fn next_pub_id(&mut self, profile: ProfileId) -> Result<PubId, ValidationError> {
        let record = self.profile_mut(profile)?;
        record.pub_count += 1;
        Ok(PubId(record.pub_count))
    }

    // =========================================================================
    // BLOCK CHECKS
    // =========================================================================

    /// Fails if an active block exists between the two profiles in either
    /// direction. Called before any interaction and before any module hook.
    pub fn assert_not_blocked(
        &self,
        a: ProfileId,
        b: ProfileId,
    ) -> Result<(), ValidationError> {
        if self.blocks.contains(&(a, b)) {
            return Err(ValidationError::Blocked {
                blocker: a,
                blocked: b,
            });
        }
        if self.blocks.contains(&(b, a)) {
            return Err(ValidationError::Blocked {
                blocker: b,
                blocked: a,
            });
        }
        Ok(())
    }

    // =========================================================================
    // WHITELIST CHECKS
    // =========================================================================

    /// Fails unless the address is a whitelisted follow module.
    pub fn assert_follow_module_whitelisted(
        &self,
        module: Address,
    ) -> Result<(), ValidationError> {
        if self.follow_module_whitelist.contains(&module) {
            Ok(())
        } else {
            Err(ValidationError::ModuleNotWhitelisted(module))
        }
    }

    /// Fails unless the address is a whitelisted reference module.
    pub fn assert_reference_module_whitelisted(
        &self,
        module: Address,
    ) -> Result<(), ValidationError> {
        if self.reference_module_whitelist.contains(&module) {
            Ok(())
        } else {
            Err(ValidationError::ModuleNotWhitelisted(module))
        }
    }

    /// Fails unless the address is a whitelisted collect module.
    pub fn assert_collect_module_whitelisted(
        &self,
        module: Address,
    ) -> Result<(), ValidationError> {
        if self.collect_module_whitelist.contains(&module) {
            Ok(())
        } else {
            Err(ValidationError::ModuleNotWhitelisted(module))
        }
    }
}

impl HubView for HubState {
    fn is_following(&self, follower_profile: ProfileId, target_profile: ProfileId) -> bool {
        self.follow_books
            .get(&target_profile)
            .is_some_and(|book| book.is_following(follower_profile))
    }

    fn is_blocked_either_way(&self, a: ProfileId, b: ProfileId) -> bool {
        self.blocks.contains(&(a, b)) || self.blocks.contains(&(b, a))
    }
}

// =============================================================================
// TESTS
// =============================================================================

//! # Core Domain Entities
//!
//! The versioned records owned by the protocol core: profiles, publications,
//! delegated-executor configurations, follow books, and the protocol state.
//! No other component mutates these directly; policy modules only ever see
//! read-only views.

use agora_types::{Address, Bytes, FollowTokenId, ProfileId, PublicationRef};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// PROFILE
// =============================================================================

/// A profile record. The owner is held exclusively by the ownership ledger;
/// the hub only reads it through the `OwnershipLedger` port.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Number of publications created under this profile. Monotonic, never
    /// decreases; the next publication gets `pub_count + 1`.
    pub pub_count: u64,
    /// Follow module gating follows of this profile, if any.
    pub follow_module: Option<Address>,
    /// Blob the follow module returned at attachment, kept for informational
    /// reads. Empty when no module is attached.
    pub follow_module_init_result: Bytes,
    /// Follow-receipt contract, lazily deployed on first follow.
    pub follow_receipt: Option<Address>,
    /// Display image URI.
    pub image_uri: String,
    /// URI served by the follow-receipt contract.
    pub follow_receipt_uri: String,
    /// Free-form metadata URI.
    pub metadata_uri: String,
}

// =============================================================================
// PUBLICATION
// =============================================================================

/// Classification of a publication record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PublicationKind {
    /// No record exists under the queried key.
    #[default]
    Nonexistent,
    /// Standalone content, no pointer.
    Post,
    /// Content plus a pointer to the publication replied to.
    Comment,
    /// Content plus a pointer to the publication republished.
    Quote,
    /// Pointer only; no own content or modules.
    Mirror,
}

impl PublicationKind {
    /// Returns true if a publication of this kind can be pointed at by
    /// comments, quotes, and mirrors.
    #[must_use]
    pub fn is_pointable(&self) -> bool {
        matches!(self, Self::Post | Self::Comment | Self::Quote)
    }
}

/// A publication record, keyed by `(profile_id, pub_id)`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    /// What kind of record this is.
    pub kind: PublicationKind,
    /// Content URI. Empty for mirrors.
    pub content_uri: String,
    /// Pointer target for comments, quotes, and mirrors.
    pub pointed: Option<PublicationRef>,
    /// Collect module gating collects of this publication, if any.
    pub collect_module: Option<Address>,
    /// Reference module gating references to this publication, if any.
    pub reference_module: Option<Address>,
    /// Collect-receipt contract, lazily deployed on first collect.
    pub collect_receipt: Option<Address>,
    /// Number of collect receipts minted for this publication.
    pub collect_count: u64,
}

// =============================================================================
// DELEGATED EXECUTOR CONFIGURATION
// =============================================================================

/// Per-profile delegated-executor configuration.
///
/// Approvals are keyed by `(config_number, executor)`. Switching the active
/// configuration number revokes the whole previous approval set at once:
/// every map the active counter moves past is dropped, so those approvals
/// stay dead even if the profile later switches back to that number.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegatedExecutorConfig {
    /// The configuration number approvals are currently read from.
    pub active: u64,
    /// The configuration number that was active before the last switch.
    pub previous: u64,
    /// The highest configuration number ever written to. A fresh switch
    /// jumps past this, voiding every prior approval at once.
    pub max_set: u64,
    /// Approval maps, keyed by configuration number.
    pub approvals: HashMap<u64, HashMap<Address, bool>>,
}

impl DelegatedExecutorConfig {
    /// Returns true if `executor` is approved under the currently active
    /// configuration number. Read fresh on every call: a config switch
    /// immediately invalidates stale approvals.
    #[must_use]
    pub fn is_approved(&self, executor: Address) -> bool {
        self.is_approved_in(self.active, executor)
    }

    /// Returns the approval flag under a specific configuration number.
    #[must_use]
    pub fn is_approved_in(&self, config_number: u64, executor: Address) -> bool {
        self.approvals
            .get(&config_number)
            .and_then(|slot| slot.get(&executor))
            .copied()
            .unwrap_or(false)
    }

    /// Writes approvals into the named configuration slot, raising `max_set`
    /// if the slot number exceeds it.
    pub fn set_approvals(&mut self, config_number: u64, entries: &[(Address, bool)]) {
        let slot = self.approvals.entry(config_number).or_default();
        for (executor, approved) in entries {
            slot.insert(*executor, *approved);
        }
        if config_number > self.max_set {
            self.max_set = config_number;
        }
    }

    /// Makes the named slot the active configuration, recording the old one
    /// as previous. No-op if it is already active.
    ///
    /// Approvals under any number the active counter moves past are purged:
    /// switching back down to an old number finds an empty slot, so old
    /// approvals can never be reactivated without explicit re-approval.
    pub fn switch_to(&mut self, config_number: u64) {
        if config_number != self.active {
            self.previous = self.active;
            self.active = config_number;
        }
        if config_number > self.max_set {
            self.max_set = config_number;
        }
        self.approvals.retain(|number, _| *number >= self.active);
    }

    /// Switches to a never-used configuration number, atomically voiding all
    /// prior approvals without touching them. Invoked on ownership transfer.
    pub fn switch_to_fresh(&mut self) {
        let fresh = self.max_set + 1;
        self.switch_to(fresh);
    }
}

// =============================================================================
// FOLLOW BOOK
// =============================================================================

/// Follow relationships for a single followed profile, backed by its
/// follow-receipt token space.
///
/// Tokens survive unfollow unbound, so a later follow with an explicit token
/// id can re-attach (the transfer/re-follow flow).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowBook {
    /// The last follow token minted. Token ids start at 1.
    pub last_token: u64,
    /// Token -> currently bound follower profile, if any.
    pub tokens: HashMap<FollowTokenId, Option<ProfileId>>,
    /// Follower profile -> token it is bound to.
    pub by_follower: HashMap<ProfileId, FollowTokenId>,
}

impl FollowBook {
    /// Returns true if `follower` currently follows this profile.
    #[must_use]
    pub fn is_following(&self, follower: ProfileId) -> bool {
        self.by_follower.contains_key(&follower)
    }

    /// Returns the token `follower` is bound to, if following.
    #[must_use]
    pub fn token_of(&self, follower: ProfileId) -> Option<FollowTokenId> {
        self.by_follower.get(&follower).copied()
    }

    /// Mints a fresh token bound to `follower` and returns it.
    pub fn mint(&mut self, follower: ProfileId) -> FollowTokenId {
        self.last_token += 1;
        let token = FollowTokenId(self.last_token);
        self.tokens.insert(token, Some(follower));
        self.by_follower.insert(follower, token);
        token
    }

    /// Re-attaches an existing unbound token to `follower`. Returns false if
    /// the token does not exist or is bound to someone else.
    pub fn attach(&mut self, token: FollowTokenId, follower: ProfileId) -> bool {
        match self.tokens.get_mut(&token) {
            Some(binding @ None) => {
                *binding = Some(follower);
                self.by_follower.insert(follower, token);
                true
            }
            _ => false,
        }
    }

    /// Unbinds `follower`'s token, keeping the token itself alive. Returns
    /// false if `follower` was not following.
    pub fn detach(&mut self, follower: ProfileId) -> bool {
        match self.by_follower.remove(&follower) {
            Some(token) => {
                if let Some(binding) = self.tokens.get_mut(&token) {
                    *binding = None;
                }
                true
            }
            None => false,
        }
    }
}

// =============================================================================
// PROTOCOL STATE
// =============================================================================

/// Global protocol state, ordered by restrictiveness.
///
/// The emergency admin may only move this to a more restrictive value;
/// governance may set any value.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum ProtocolState {
    /// Nothing blocked.
    #[default]
    Unpaused,
    /// Content creation and graph mutation blocked; configuration,
    /// governance, and views still permitted.
    PublishingPaused,
    /// Everything but governance and views blocked.
    Paused,
}

// =============================================================================
// TESTS
// =============================================================================

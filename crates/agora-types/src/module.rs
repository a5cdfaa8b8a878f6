//! # Module Trust Boundary Types
//!
//! The data passed across the boundary between the protocol hub and
//! externally supplied policy modules, and the error type modules answer with.
//!
//! The calling convention is mutual distrust: the hub is the only permitted
//! caller into module hooks, and modules must verify `ctx.caller` is the hub
//! address they were configured with, answering [`ModuleError::NotHub`]
//! otherwise. The hub in turn treats any non-success return as a hard abort
//! of the triggering call.

use crate::{Address, Bytes, FollowTokenId, ProfileId, PublicationRef};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// MODULE CONTEXT
// =============================================================================

/// Context stamped onto every module hook invocation.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ModuleContext {
    /// Address performing the hook call. Modules reject anything that is not
    /// their configured hub address.
    pub caller: Address,
    /// The transaction executor: the address the hub authorized for the
    /// triggering entry point (owner, approved executor, or recovered signer).
    pub executor: Address,
    /// Call timestamp in unix seconds.
    pub timestamp: u64,
}

// =============================================================================
// READ-ONLY STATE VIEW
// =============================================================================

/// Read-only view of hub state offered to policy modules.
///
/// Modules never write core state; attribution decisions that need graph
/// facts (e.g. "is the commenter a follower?") go through this view.
pub trait HubView: Sync {
    /// Returns true if `follower_profile` currently follows `target_profile`.
    fn is_following(&self, follower_profile: ProfileId, target_profile: ProfileId) -> bool;

    /// Returns true if an active block exists in either direction.
    fn is_blocked_either_way(&self, a: ProfileId, b: ProfileId) -> bool;
}

// =============================================================================
// HOOK PARAMETERS
// =============================================================================

/// Parameters for a follow-module `process_follow` hook.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProcessFollowParams {
    /// Profile doing the following.
    pub follower_profile_id: ProfileId,
    /// Profile being followed (the module's owner profile).
    pub target_profile_id: ProfileId,
    /// Pre-minted follow token being re-attached, if any.
    pub follow_token_id: Option<FollowTokenId>,
    /// Opaque per-call data forwarded from the entry point.
    pub data: Bytes,
}

/// Parameters for a reference-module `process_comment` / `process_quote` /
/// `process_mirror` hook.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProcessReferenceParams {
    /// Profile authoring the new publication.
    pub profile_id: ProfileId,
    /// Identity of the new publication (already persisted by the hub).
    pub publication: PublicationRef,
    /// The publication being pointed at (the module's owner publication).
    pub pointed: PublicationRef,
    /// Intermediate publications through which the actor reached the target,
    /// for attribution logic.
    pub referrers: Vec<PublicationRef>,
    /// Opaque per-call data forwarded from the entry point.
    pub data: Bytes,
}

/// Parameters for a collect-module `process_collect` hook.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProcessCollectParams {
    /// Profile performing the collect.
    pub collector_profile_id: ProfileId,
    /// The publication being collected (the module's owner publication).
    pub collected: PublicationRef,
    /// Intermediate publications through which the collector reached the
    /// target, for attribution logic.
    pub referrers: Vec<PublicationRef>,
    /// Opaque per-call data forwarded from the entry point.
    pub data: Bytes,
}

// =============================================================================
// MODULE ERROR
// =============================================================================

/// Errors a policy module answers with. Any of these aborts the whole
/// triggering call with no partial state change.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModuleError {
    /// The hook was invoked by something other than the expected hub.
    #[error("not hub: expected {expected}, got {got}")]
    NotHub {
        /// The hub address the module trusts.
        expected: Address,
        /// The address that actually invoked the hook.
        got: Address,
    },

    /// The module's policy declined the action.
    #[error("module rejected: {0}")]
    Rejected(String),

    /// The configuration blob passed at attachment time was malformed.
    #[error("invalid module config: {0}")]
    InvalidConfig(String),

    /// The hook was invoked for an attachment point the module was never
    /// initialized for.
    #[error("module not initialized for {0}")]
    NotInitialized(String),
}

// =============================================================================
// TESTS
// =============================================================================

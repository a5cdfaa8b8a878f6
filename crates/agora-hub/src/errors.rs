//! # Error Types
//!
//! The hub's error taxonomy. Every error aborts the entire triggering call
//! with no partial state change; there is no local recovery or retry inside
//! the core. The caller resubmits.

use agora_types::{Address, FollowTokenId, ModuleError, ProfileId, PublicationRef};
use thiserror::Error;

// =============================================================================
// AUTHORIZATION ERRORS
// =============================================================================

/// The acting address is not entitled to the requested action.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthorizationError {
    /// Caller is neither the profile owner nor an approved executor under the
    /// current delegated-executor configuration.
    #[error("executor invalid: {executor} may not act for {profile:?}")]
    ExecutorInvalid {
        /// The rejected acting address.
        executor: Address,
        /// The profile it tried to act for.
        profile: ProfileId,
    },

    /// Caller must be the profile owner directly (executors do not suffice).
    #[error("not profile owner: {caller} does not own {profile:?}")]
    NotOwner {
        /// The rejected acting address.
        caller: Address,
        /// The profile it tried to act for.
        profile: ProfileId,
    },

    /// Governance-only call from a non-governance address.
    #[error("not governance: {0}")]
    NotGovernance(Address),

    /// Protocol-state change from an address that is neither governance nor
    /// the emergency admin.
    #[error("not governance or emergency admin: {0}")]
    NotGovernanceOrEmergencyAdmin(Address),

    /// The emergency admin tried to relax the protocol state. It may only
    /// escalate restrictiveness.
    #[error("emergency admin can only escalate protocol state")]
    EmergencyAdminEscalationOnly,

    /// Profile creation from an address not on the creator whitelist.
    #[error("profile creator not whitelisted: {0}")]
    CreatorNotWhitelisted(Address),
}

// =============================================================================
// STATE ERRORS
// =============================================================================

/// The protocol is in a state that forbids the action.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateError {
    /// The protocol is fully paused; everything but governance and views is
    /// blocked.
    #[error("protocol paused")]
    Paused,

    /// Publishing and graph mutation are paused; configuration and views
    /// still work.
    #[error("publishing paused")]
    PublishingPaused,
}

// =============================================================================
// VALIDATION ERRORS
// =============================================================================

/// The call's inputs do not describe a performable action.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required address parameter was the zero address.
    #[error("zero address")]
    ZeroAddress,

    /// Parallel input arrays had different lengths.
    #[error("array length mismatch: {left} vs {right}")]
    ArrayMismatch {
        /// Length of the first array.
        left: usize,
        /// Length of the second array.
        right: usize,
    },

    /// The named profile does not exist.
    #[error("profile not found: {0:?}")]
    ProfileNotFound(ProfileId),

    /// The named publication does not exist.
    #[error("publication not found: {0:?}")]
    PublicationNotFound(PublicationRef),

    /// A comment, quote, or mirror pointed at a mirror. Mirrors carry no
    /// content of their own and cannot be pointed at; re-point at the
    /// mirror's own target instead.
    #[error("pointed at a mirror: {0:?}")]
    PointedAtMirror(PublicationRef),

    /// A referrer-chain entry does not exist or does not reference the
    /// pointed publication.
    #[error("invalid referrer: {0:?}")]
    InvalidReferrer(PublicationRef),

    /// The module address is not on the governance whitelist.
    #[error("module not whitelisted: {0}")]
    ModuleNotWhitelisted(Address),

    /// The module address is whitelisted but no implementation is bound to
    /// it in the module registry.
    #[error("module not registered: {0}")]
    ModuleNotRegistered(Address),

    /// An active block exists between the two profiles, in either direction.
    #[error("blocked: interaction between {blocker:?} and {blocked:?}")]
    Blocked {
        /// The profile that set the block.
        blocker: ProfileId,
        /// The profile the block is directed at.
        blocked: ProfileId,
    },

    /// A profile tried to block or follow itself.
    #[error("self interaction: {0:?}")]
    SelfInteraction(ProfileId),

    /// Unfollow of a profile that is not currently followed.
    #[error("not following: {follower:?} does not follow {target:?}")]
    NotFollowing {
        /// The claimed follower.
        follower: ProfileId,
        /// The claimed followee.
        target: ProfileId,
    },

    /// Follow of a profile that is already followed.
    #[error("already following: {follower:?} already follows {target:?}")]
    AlreadyFollowing {
        /// The follower.
        follower: ProfileId,
        /// The followee.
        target: ProfileId,
    },

    /// Collect of a publication that has no collect module configured.
    #[error("collect disabled for {0:?}")]
    CollectDisabled(PublicationRef),

    /// The named follow token does not exist or is already bound to another
    /// follower.
    #[error("follow token unavailable: {0:?}")]
    FollowTokenUnavailable(FollowTokenId),
}

// =============================================================================
// SIGNATURE ERRORS
// =============================================================================

/// A meta-transaction signature failed validation at the boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SignatureError {
    /// The signature deadline has passed.
    #[error("signature expired: deadline {deadline} < now {now}")]
    Expired {
        /// The deadline carried by the signature.
        deadline: u64,
        /// The current time the verifier checked against.
        now: u64,
    },

    /// The nonce does not match the signer's next expected nonce.
    #[error("nonce invalid: expected {expected}, got {got}")]
    NonceInvalid {
        /// The signer's next expected nonce.
        expected: u64,
        /// The nonce carried by the signature.
        got: u64,
    },

    /// The signature bytes do not verify against the claimed signer.
    #[error("signature invalid")]
    SignatureInvalid,
}

// =============================================================================
// HUB ERROR
// =============================================================================

/// Top-level error for every hub entry point.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HubError {
    /// Caller not entitled to act.
    #[error(transparent)]
    Authorization(#[from] AuthorizationError),

    /// Protocol state forbids the action.
    #[error(transparent)]
    State(#[from] StateError),

    /// Inputs do not describe a performable action.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A policy module declined the action or was invoked incorrectly.
    #[error(transparent)]
    Module(#[from] ModuleError),

    /// Meta-transaction signature failed validation.
    #[error(transparent)]
    Signature(#[from] SignatureError),

    /// A collaborator-facing callback came from the wrong counterpart
    /// contract.
    #[error("caller mismatch: expected {expected}, got {actual}")]
    CallerMismatch {
        /// The registered counterpart for this callback.
        expected: Address,
        /// The address that actually called.
        actual: Address,
    },
}

// =============================================================================
// TESTS
// =============================================================================

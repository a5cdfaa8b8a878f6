//! # Identity & Access Resolver
//!
//! Decides, for every mutating action, whether the acting address is
//! entitled to act on behalf of a profile, and whether the protocol is in a
//! state that permits the action at all. Signature-recovered signers arrive
//! here already resolved and are treated identically to direct callers.

use crate::domain::entities::ProtocolState;
use crate::domain::state::HubState;
use crate::errors::{AuthorizationError, StateError};
use crate::ports::outbound::OwnershipLedger;
use agora_types::{Address, ProfileId};

// =============================================================================
// PROTOCOL-STATE GATE
// =============================================================================

/// The minimum openness an action requires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gate {
    /// Content creation and graph mutation: only permitted while fully
    /// unpaused.
    PublishingEnabled,
    /// Profile configuration: permitted unless fully paused.
    NotPaused,
}

/// Checks the current protocol state against an action's gate. Runs before
/// any side effect so a violation fails fast.
pub fn check_protocol_state(state: ProtocolState, gate: Gate) -> Result<(), StateError> {
    match (gate, state) {
        (_, ProtocolState::Paused) => Err(StateError::Paused),
        (Gate::PublishingEnabled, ProtocolState::PublishingPaused) => {
            Err(StateError::PublishingPaused)
        }
        _ => Ok(()),
    }
}

// =============================================================================
// ACTOR RESOLUTION
// =============================================================================

/// Authorizes `acting` to act for `profile`: it must be the current owner or
/// carry `approved = true` in the profile's *current* delegated-executor
/// configuration. The configuration number is read fresh, so a config switch
/// immediately invalidates stale approvals.
pub fn require_owner_or_executor(
    state: &HubState,
    ledger: &dyn OwnershipLedger,
    acting: Address,
    profile: ProfileId,
) -> Result<(), AuthorizationError> {
    if ledger.owner_of(profile) == Some(acting) {
        return Ok(());
    }
    if state.executor_config(profile).is_approved(acting) {
        return Ok(());
    }
    Err(AuthorizationError::ExecutorInvalid {
        executor: acting,
        profile,
    })
}

/// Authorizes `acting` as the profile's owner. Delegated executors do not
/// suffice (used by `burn_profile`).
pub fn require_owner(
    ledger: &dyn OwnershipLedger,
    acting: Address,
    profile: ProfileId,
) -> Result<(), AuthorizationError> {
    if ledger.owner_of(profile) == Some(acting) {
        Ok(())
    } else {
        Err(AuthorizationError::NotOwner {
            caller: acting,
            profile,
        })
    }
}

/// Authorizes `acting` as governance.
pub fn require_governance(state: &HubState, acting: Address) -> Result<(), AuthorizationError> {
    if acting == state.governance {
        Ok(())
    } else {
        Err(AuthorizationError::NotGovernance(acting))
    }
}

/// Authorizes a protocol-state change: governance may set anything, the
/// emergency admin may only escalate restrictiveness.
pub fn require_state_setter(
    state: &HubState,
    acting: Address,
    requested: ProtocolState,
) -> Result<(), AuthorizationError> {
    if acting == state.governance {
        return Ok(());
    }
    if state.emergency_admin == Some(acting) {
        if requested > state.protocol_state {
            return Ok(());
        }
        return Err(AuthorizationError::EmergencyAdminEscalationOnly);
    }
    Err(AuthorizationError::NotGovernanceOrEmergencyAdmin(acting))
}

// =============================================================================
// TESTS
// =============================================================================

//! # Domain Invariants
//!
//! Structural invariants of hub state, checked at runtime in tests and
//! debugging builds. The engines are written so these can never be violated;
//! the checks exist to catch regressions, not to gate production calls.

use crate::domain::entities::PublicationKind;
use crate::domain::state::HubState;
use agora_types::{ProfileId, PublicationRef};

// =============================================================================
// INVARIANT CHECKS
// =============================================================================

/// Publication counters cover exactly the records that exist: every profile
/// has a record for each pubId in `1..=pub_count`, and none beyond.
#[must_use]
pub fn check_pub_counter_coverage(state: &HubState) -> bool {
    for (profile, record) in &state.profiles {
        for n in 1..=record.pub_count {
            let key = PublicationRef::new(*profile, agora_types::PubId(n));
            if !state.publications.contains_key(&key) {
                return false;
            }
        }
    }
    state
        .publications
        .keys()
        .all(|key| match state.profiles.get(&key.profile_id) {
            Some(profile) => key.pub_id.0 >= 1 && key.pub_id.0 <= profile.pub_count,
            None => false,
        })
}

/// No executor configuration's active number exceeds the highest number ever
/// written; otherwise a fresh switch could collide with existing approvals.
#[must_use]
pub fn check_config_numbers(state: &HubState) -> bool {
    state
        .executor_configs
        .values()
        .all(|config| config.active <= config.max_set || config.approvals.is_empty())
}

/// No profile both blocks another and still carries it as a follower: a
/// block supersedes an existing follow.
#[must_use]
pub fn check_block_follow_exclusion(state: &HubState) -> bool {
    state.blocks.iter().all(|(blocker, blocked)| {
        !state
            .follow_books
            .get(blocker)
            .is_some_and(|book| book.is_following(*blocked))
    })
}

/// Mirrors persist no content and no own modules, and every pointer resolves
/// to an existing, pointable publication.
#[must_use]
pub fn check_publication_shape(state: &HubState) -> bool {
    state.publications.values().all(|record| match record.kind {
        PublicationKind::Mirror => {
            record.content_uri.is_empty()
                && record.collect_module.is_none()
                && record.reference_module.is_none()
                && pointer_resolves(state, record.pointed)
        }
        PublicationKind::Comment | PublicationKind::Quote => {
            pointer_resolves(state, record.pointed)
        }
        PublicationKind::Post => record.pointed.is_none(),
        PublicationKind::Nonexistent => false,
    })
}

fn pointer_resolves(state: &HubState, pointed: Option<PublicationRef>) -> bool {
    match pointed {
        Some(target) => state.publication_kind(target).is_pointable(),
        None => false,
    }
}

/// Checks all structural invariants at once.
#[must_use]
pub fn check_all_invariants(state: &HubState) -> InvariantCheckResult {
    let mut violations = Vec::new();

    if !check_pub_counter_coverage(state) {
        violations.push(InvariantViolation::PubCounterMismatch);
    }
    if !check_config_numbers(state) {
        violations.push(InvariantViolation::ConfigNumberOverrun);
    }
    if !check_block_follow_exclusion(state) {
        violations.push(InvariantViolation::FollowWhileBlocked);
    }
    if !check_publication_shape(state) {
        violations.push(InvariantViolation::MalformedPublication);
    }

    if violations.is_empty() {
        InvariantCheckResult::Valid
    } else {
        InvariantCheckResult::Invalid(violations)
    }
}

// =============================================================================
// INVARIANT TYPES
// =============================================================================

/// Result of checking all invariants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantCheckResult {
    /// All invariants hold.
    Valid,
    /// One or more invariants violated.
    Invalid(Vec<InvariantViolation>),
}

impl InvariantCheckResult {
    /// Returns true if all invariants hold.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Specific invariant violation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// A profile's publication counter disagrees with its records.
    PubCounterMismatch,
    /// An executor configuration's active number passed its max-ever-set.
    ConfigNumberOverrun,
    /// A blocked profile is still recorded as a follower of its blocker.
    FollowWhileBlocked,
    /// A publication record breaks its kind's shape rules.
    MalformedPublication,
}

/// Returns true if `follower` still appears bound anywhere in `target`'s
/// follow book. Helper for batch-atomicity assertions in tests.
#[must_use]
pub fn has_any_follow_binding(
    state: &HubState,
    follower: ProfileId,
    target: ProfileId,
) -> bool {
    state
        .follow_books
        .get(&target)
        .is_some_and(|book| book.is_following(follower))
}

// =============================================================================
// TESTS
// =============================================================================

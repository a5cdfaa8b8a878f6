//! # Graph Engine
//!
//! Relationship-store mutations (block flags, delegated-executor
//! configurations) and the follow/unfollow/collect flows, each gated by the
//! relevant policy module's accept/reject decision.
//!
//! Batch entry points are all-or-nothing: engines return the first error and
//! the service layer's snapshot/rollback discards every write the batch made
//! up to that point.

use crate::domain::state::HubState;
use crate::errors::{HubError, ValidationError};
use crate::events::HubEvent;
use crate::ports::outbound::{ModuleDirectory, ReceiptDeployer};
use agora_types::{
    Bytes, CollectParams, FollowTokenId, ModuleContext, ProcessCollectParams,
    ProcessFollowParams, ProfileId,
};
use tracing::debug;

// =============================================================================
// BLOCK STATUS
// =============================================================================

/// Sets or clears directed block flags in batch. Setting a block against a
/// profile that currently follows the blocker additionally forces an
/// unfollow, so a block supersedes an existing follow.
pub fn set_block_status(
    state: &mut HubState,
    events: &mut Vec<HubEvent>,
    by_profile: ProfileId,
    targets: &[ProfileId],
    statuses: &[bool],
) -> Result<(), HubError> {
    if targets.len() != statuses.len() {
        return Err(ValidationError::ArrayMismatch {
            left: targets.len(),
            right: statuses.len(),
        }
        .into());
    }
    state.profile(by_profile)?;

    for (target, blocked) in targets.iter().zip(statuses) {
        if *target == by_profile {
            return Err(ValidationError::SelfInteraction(by_profile).into());
        }
        state.profile(*target)?;

        if *blocked {
            state.blocks.insert((by_profile, *target));
            // No dangling follow-while-blocked state.
            if state.follow_book_mut(by_profile).detach(*target) {
                debug!(follower = %target, target = %by_profile, "block forced unfollow");
                events.push(HubEvent::Unfollowed {
                    follower: *target,
                    target: by_profile,
                });
            }
        } else {
            state.blocks.remove(&(by_profile, *target));
        }
        events.push(HubEvent::BlockStatusSet {
            by: by_profile,
            target: *target,
            blocked: *blocked,
        });
    }
    Ok(())
}

// =============================================================================
// DELEGATED EXECUTORS
// =============================================================================

/// Writes executor approvals into a named configuration slot, optionally
/// switching to it. The switch revokes whatever was approved under the old
/// number for good; switching back later finds an empty slot.
pub fn change_delegated_executors_config(
    state: &mut HubState,
    events: &mut Vec<HubEvent>,
    delegator_profile: ProfileId,
    executors: &[agora_types::Address],
    approvals: &[bool],
    config_number: u64,
    switch_to_given_config: bool,
) -> Result<(), HubError> {
    if executors.len() != approvals.len() {
        return Err(ValidationError::ArrayMismatch {
            left: executors.len(),
            right: approvals.len(),
        }
        .into());
    }
    state.profile(delegator_profile)?;

    let entries: Vec<_> = executors.iter().copied().zip(approvals.iter().copied()).collect();
    let config = state.executor_config_mut(delegator_profile);
    config.set_approvals(config_number, &entries);
    if switch_to_given_config {
        config.switch_to(config_number);
    }

    events.push(HubEvent::DelegatedExecutorsConfigChanged {
        profile: delegator_profile,
        config_number,
        switched: switch_to_given_config,
    });
    Ok(())
}

/// The current-config variant: writes approvals into the already-active slot
/// without changing which slot is active.
pub fn change_current_delegated_executors_config(
    state: &mut HubState,
    events: &mut Vec<HubEvent>,
    delegator_profile: ProfileId,
    executors: &[agora_types::Address],
    approvals: &[bool],
) -> Result<(), HubError> {
    let active = state.executor_config(delegator_profile).active;
    change_delegated_executors_config(
        state,
        events,
        delegator_profile,
        executors,
        approvals,
        active,
        false,
    )
}

/// Switches a profile to a never-used configuration number, voiding every
/// previously granted approval at once. Invoked on ownership transfer
/// (except the initial mint).
pub fn switch_to_fresh_config(
    state: &mut HubState,
    events: &mut Vec<HubEvent>,
    profile: ProfileId,
) -> Result<(), HubError> {
    state.profile(profile)?;
    let config = state.executor_config_mut(profile);
    config.switch_to_fresh();
    let fresh = config.active;

    events.push(HubEvent::DelegatedExecutorsConfigChanged {
        profile,
        config_number: fresh,
        switched: true,
    });
    Ok(())
}

// =============================================================================
// FOLLOW / UNFOLLOW
// =============================================================================

/// Follows a batch of target profiles. Per target, the target's follow
/// module (if any) gets the `process_follow` gate; a rejection for any
/// target aborts the whole batch.
#[allow(clippy::too_many_arguments)]
pub fn follow(
    state: &mut HubState,
    directory: &dyn ModuleDirectory,
    deployer: &dyn ReceiptDeployer,
    ctx: &ModuleContext,
    events: &mut Vec<HubEvent>,
    follower_profile: ProfileId,
    targets: &[ProfileId],
    follow_tokens: &[Option<FollowTokenId>],
    datas: &[Bytes],
) -> Result<Vec<FollowTokenId>, HubError> {
    if targets.len() != follow_tokens.len() {
        return Err(ValidationError::ArrayMismatch {
            left: targets.len(),
            right: follow_tokens.len(),
        }
        .into());
    }
    if targets.len() != datas.len() {
        return Err(ValidationError::ArrayMismatch {
            left: targets.len(),
            right: datas.len(),
        }
        .into());
    }
    state.profile(follower_profile)?;

    let mut assigned = Vec::with_capacity(targets.len());
    for ((target, token), data) in targets.iter().zip(follow_tokens).zip(datas) {
        assigned.push(follow_one(
            state,
            directory,
            deployer,
            ctx,
            events,
            follower_profile,
            *target,
            *token,
            data,
        )?);
    }
    Ok(assigned)
}

#[allow(clippy::too_many_arguments)]
fn follow_one(
    state: &mut HubState,
    directory: &dyn ModuleDirectory,
    deployer: &dyn ReceiptDeployer,
    ctx: &ModuleContext,
    events: &mut Vec<HubEvent>,
    follower_profile: ProfileId,
    target: ProfileId,
    token: Option<FollowTokenId>,
    data: &Bytes,
) -> Result<FollowTokenId, HubError> {
    if target == follower_profile {
        return Err(ValidationError::SelfInteraction(target).into());
    }
    state.profile(target)?;
    state.assert_not_blocked(follower_profile, target)?;
    if state.follow_books.get(&target).is_some_and(|b| b.is_following(follower_profile)) {
        return Err(ValidationError::AlreadyFollowing {
            follower: follower_profile,
            target,
        }
        .into());
    }

    // Lazily deploy the follow receipt on first follow of this profile.
    if state.profile(target)?.follow_receipt.is_none() {
        let receipt = deployer.deploy_follow_receipt(target);
        state.profile_mut(target)?.follow_receipt = Some(receipt);
    }

    // Relationship record first, module gate second.
    let book = state.follow_book_mut(target);
    let assigned = match token {
        Some(existing) => {
            if !book.attach(existing, follower_profile) {
                return Err(ValidationError::FollowTokenUnavailable(existing).into());
            }
            existing
        }
        None => book.mint(follower_profile),
    };

    if let Some(module_address) = state.profile(target)?.follow_module {
        let module = directory
            .follow_module(module_address)
            .ok_or(ValidationError::ModuleNotRegistered(module_address))?;
        module.process_follow(
            ctx,
            state,
            &ProcessFollowParams {
                follower_profile_id: follower_profile,
                target_profile_id: target,
                follow_token_id: token,
                data: data.clone(),
            },
        )?;
    }

    debug!(follower = %follower_profile, target = %target, token = %assigned, "followed");
    events.push(HubEvent::Followed {
        follower: follower_profile,
        target,
        token: assigned,
    });
    Ok(assigned)
}

/// Unfollows a batch of target profiles. Unconditional once
/// executor-authorized: no module hook runs.
pub fn unfollow(
    state: &mut HubState,
    events: &mut Vec<HubEvent>,
    follower_profile: ProfileId,
    targets: &[ProfileId],
) -> Result<(), HubError> {
    state.profile(follower_profile)?;
    for target in targets {
        state.profile(*target)?;
        if !state.follow_book_mut(*target).detach(follower_profile) {
            return Err(ValidationError::NotFollowing {
                follower: follower_profile,
                target: *target,
            }
            .into());
        }
        events.push(HubEvent::Unfollowed {
            follower: follower_profile,
            target: *target,
        });
    }
    Ok(())
}

// =============================================================================
// COLLECT
// =============================================================================

/// Collects a publication: the target's collect module gates the action, and
/// on acceptance a collect receipt is minted (deploying the per-publication
/// receipt contract on first collect).
pub fn collect(
    state: &mut HubState,
    directory: &dyn ModuleDirectory,
    deployer: &dyn ReceiptDeployer,
    ctx: &ModuleContext,
    events: &mut Vec<HubEvent>,
    params: &CollectParams,
) -> Result<u64, HubError> {
    state.profile(params.collector_profile_id)?;
    let target = params.target;
    let record = state.publication(target)?;
    let module_address = record
        .collect_module
        .ok_or(ValidationError::CollectDisabled(target))?;

    // Block short-circuits before the module is ever invoked.
    state.assert_not_blocked(params.collector_profile_id, target.profile_id)?;
    super::publication::validate_referrer_chain(state, target, &params.referrers)?;

    // Receipt bookkeeping first, module gate second.
    if state.publication(target)?.collect_receipt.is_none() {
        let receipt = deployer.deploy_collect_receipt(target);
        state.publication_mut(target)?.collect_receipt = Some(receipt);
    }
    let receipt_token = {
        let record = state.publication_mut(target)?;
        record.collect_count += 1;
        record.collect_count
    };

    let module = directory
        .collect_module(module_address)
        .ok_or(ValidationError::ModuleNotRegistered(module_address))?;
    module.process_collect(
        ctx,
        state,
        &ProcessCollectParams {
            collector_profile_id: params.collector_profile_id,
            collected: target,
            referrers: params.referrers.clone(),
            data: params.data.clone(),
        },
    )?;

    debug!(collector = %params.collector_profile_id, target = %target, receipt_token, "collected");
    events.push(HubEvent::Collected {
        collector: params.collector_profile_id,
        publication: target,
        receipt_token,
    });
    Ok(receipt_token)
}

// =============================================================================
// TESTS
// =============================================================================

//! # Publication Engine
//!
//! Creates content records (post/comment/mirror/quote), validates reference
//! targets and referrer chains, and dispatches to pluggable
//! reference/collect modules.
//!
//! Ordering rule, enforced at every call site in this module: the profile's
//! publication counter and the new record are persisted *before* any
//! untrusted module hook runs, so a module calling back into the hub reads
//! committed intermediate state and cannot corrupt the counters. Atomicity
//! across the whole call is the service layer's snapshot/rollback.

use crate::domain::entities::{Publication, PublicationKind};
use crate::domain::state::HubState;
use crate::errors::{HubError, ValidationError};
use crate::events::HubEvent;
use crate::ports::outbound::ModuleDirectory;
use agora_types::{
    Address, Bytes, CommentParams, MirrorParams, ModuleContext, PostParams,
    ProcessReferenceParams, ProfileId, PublicationRef, QuoteParams,
};
use tracing::debug;

// =============================================================================
// POST
// =============================================================================

/// Creates a post: content only, no pointer. Action modules are validated
/// against the governance whitelists and initialized at creation; the
/// reference module is configured but not invoked until someone points at
/// the new publication.
pub fn create_post(
    state: &mut HubState,
    directory: &dyn ModuleDirectory,
    ctx: &ModuleContext,
    events: &mut Vec<HubEvent>,
    params: &PostParams,
) -> Result<PublicationRef, HubError> {
    validate_action_modules(state, params.collect_module.as_ref(), params.reference_module.as_ref())?;

    let pub_id = state.next_pub_id(params.profile_id)?;
    let key = PublicationRef::new(params.profile_id, pub_id);
    state.publications.insert(
        key,
        Publication {
            kind: PublicationKind::Post,
            content_uri: params.content_uri.clone(),
            pointed: None,
            collect_module: params.collect_module.as_ref().map(|(a, _)| *a),
            reference_module: params.reference_module.as_ref().map(|(a, _)| *a),
            collect_receipt: None,
            collect_count: 0,
        },
    );

    // Record is persisted; only now may untrusted code run.
    initialize_action_modules(
        directory,
        ctx,
        key,
        params.collect_module.as_ref(),
        params.reference_module.as_ref(),
    )?;

    debug!(publication = %key, "post created");
    events.push(HubEvent::PostCreated {
        publication: key,
        content_uri: params.content_uri.clone(),
    });
    Ok(key)
}

// =============================================================================
// COMMENT / QUOTE
// =============================================================================

/// Creates a comment. The pointed publication must exist and be pointable;
/// its reference module (if any) gets the `process_comment` hook with the
/// full referrer chain.
pub fn create_comment(
    state: &mut HubState,
    directory: &dyn ModuleDirectory,
    ctx: &ModuleContext,
    events: &mut Vec<HubEvent>,
    params: &CommentParams,
) -> Result<PublicationRef, HubError> {
    let key = create_referencing_publication(
        state,
        directory,
        ctx,
        PublicationKind::Comment,
        params.profile_id,
        &params.content_uri,
        params.pointed,
        &params.referrers,
        &params.reference_module_data,
        params.collect_module.as_ref(),
        params.reference_module.as_ref(),
    )?;
    events.push(HubEvent::CommentCreated {
        publication: key,
        pointed: params.pointed,
    });
    Ok(key)
}

/// Creates a quote. Same validation as a comment; the pointed publication's
/// reference module gets the `process_quote` hook.
pub fn create_quote(
    state: &mut HubState,
    directory: &dyn ModuleDirectory,
    ctx: &ModuleContext,
    events: &mut Vec<HubEvent>,
    params: &QuoteParams,
) -> Result<PublicationRef, HubError> {
    let key = create_referencing_publication(
        state,
        directory,
        ctx,
        PublicationKind::Quote,
        params.profile_id,
        &params.content_uri,
        params.pointed,
        &params.referrers,
        &params.reference_module_data,
        params.collect_module.as_ref(),
        params.reference_module.as_ref(),
    )?;
    events.push(HubEvent::QuoteCreated {
        publication: key,
        pointed: params.pointed,
    });
    Ok(key)
}

// =============================================================================
// MIRROR
// =============================================================================

/// Creates a mirror: pointer only, no own content or modules persisted.
pub fn create_mirror(
    state: &mut HubState,
    directory: &dyn ModuleDirectory,
    ctx: &ModuleContext,
    events: &mut Vec<HubEvent>,
    params: &MirrorParams,
) -> Result<PublicationRef, HubError> {
    let key = create_referencing_publication(
        state,
        directory,
        ctx,
        PublicationKind::Mirror,
        params.profile_id,
        "",
        params.pointed,
        &params.referrers,
        &params.reference_module_data,
        None,
        None,
    )?;
    events.push(HubEvent::MirrorCreated {
        publication: key,
        pointed: params.pointed,
    });
    Ok(key)
}

// =============================================================================
// SHARED CREATION FLOW
// =============================================================================

/// The shared state machine for all pointer-carrying publications:
/// validate pointer -> allocate pubId -> persist record -> invoke the
/// pointed publication's reference-module gate.
#[allow(clippy::too_many_arguments)]
fn create_referencing_publication(
    state: &mut HubState,
    directory: &dyn ModuleDirectory,
    ctx: &ModuleContext,
    kind: PublicationKind,
    profile_id: ProfileId,
    content_uri: &str,
    pointed: PublicationRef,
    referrers: &[PublicationRef],
    reference_module_data: &Bytes,
    collect_module: Option<&(Address, Bytes)>,
    reference_module: Option<&(Address, Bytes)>,
) -> Result<PublicationRef, HubError> {
    validate_pointer(state, pointed)?;
    state.assert_not_blocked(profile_id, pointed.profile_id)?;
    validate_referrer_chain(state, pointed, referrers)?;
    validate_action_modules(state, collect_module, reference_module)?;

    let pub_id = state.next_pub_id(profile_id)?;
    let key = PublicationRef::new(profile_id, pub_id);
    state.publications.insert(
        key,
        Publication {
            kind,
            content_uri: content_uri.to_string(),
            pointed: Some(pointed),
            collect_module: collect_module.map(|(a, _)| *a),
            reference_module: reference_module.map(|(a, _)| *a),
            collect_receipt: None,
            collect_count: 0,
        },
    );

    initialize_action_modules(directory, ctx, key, collect_module, reference_module)?;

    // The pointed publication's reference module is the gate for this call.
    if let Some(module_address) = state.publication(pointed)?.reference_module {
        let module = directory
            .reference_module(module_address)
            .ok_or(ValidationError::ModuleNotRegistered(module_address))?;
        let hook_params = ProcessReferenceParams {
            profile_id,
            publication: key,
            pointed,
            referrers: referrers.to_vec(),
            data: reference_module_data.clone(),
        };
        let result = match kind {
            PublicationKind::Comment => module.process_comment(ctx, state, &hook_params),
            PublicationKind::Quote => module.process_quote(ctx, state, &hook_params),
            PublicationKind::Mirror => module.process_mirror(ctx, state, &hook_params),
            _ => unreachable!("only referencing kinds reach the reference gate"),
        };
        result?;
    }

    debug!(publication = %key, ?kind, pointed = %pointed, "referencing publication created");
    Ok(key)
}

/// The pointed publication must exist and not be a mirror. Pointing at a
/// mirror is rejected; callers re-point at the mirror's own target.
fn validate_pointer(state: &HubState, pointed: PublicationRef) -> Result<(), ValidationError> {
    match state.publication_kind(pointed) {
        PublicationKind::Nonexistent => Err(ValidationError::PublicationNotFound(pointed)),
        PublicationKind::Mirror => Err(ValidationError::PointedAtMirror(pointed)),
        _ => Ok(()),
    }
}

/// Every referrer must exist and reference the target publication, so the
/// chain handed to modules is verifiable attribution, not caller-asserted.
pub(crate) fn validate_referrer_chain(
    state: &HubState,
    target: PublicationRef,
    referrers: &[PublicationRef],
) -> Result<(), ValidationError> {
    for referrer in referrers {
        let record = state
            .publications
            .get(referrer)
            .ok_or(ValidationError::InvalidReferrer(*referrer))?;
        if record.pointed != Some(target) {
            return Err(ValidationError::InvalidReferrer(*referrer));
        }
    }
    Ok(())
}

/// Whitelist checks for the modules being attached to a new publication.
fn validate_action_modules(
    state: &HubState,
    collect_module: Option<&(Address, Bytes)>,
    reference_module: Option<&(Address, Bytes)>,
) -> Result<(), ValidationError> {
    if let Some((address, _)) = collect_module {
        state.assert_collect_module_whitelisted(*address)?;
    }
    if let Some((address, _)) = reference_module {
        state.assert_reference_module_whitelisted(*address)?;
    }
    Ok(())
}

/// Initialization hooks for freshly attached modules. Failures propagate and
/// abort the publication.
fn initialize_action_modules(
    directory: &dyn ModuleDirectory,
    ctx: &ModuleContext,
    key: PublicationRef,
    collect_module: Option<&(Address, Bytes)>,
    reference_module: Option<&(Address, Bytes)>,
) -> Result<(), HubError> {
    if let Some((address, init_data)) = collect_module {
        let module = directory
            .collect_module(*address)
            .ok_or(ValidationError::ModuleNotRegistered(*address))?;
        module.initialize_collect_module(ctx, key, init_data)?;
    }
    if let Some((address, init_data)) = reference_module {
        let module = directory
            .reference_module(*address)
            .ok_or(ValidationError::ModuleNotRegistered(*address))?;
        module.initialize_reference_module(ctx, key, init_data)?;
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================

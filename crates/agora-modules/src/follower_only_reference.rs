//! # Follower-Only Reference Module
//!
//! Permits comments, quotes, and mirrors of the attached publication only
//! from profiles that currently follow its author. The follow check runs at
//! reference time against live hub state, so an unfollow immediately closes
//! the gate.

use crate::ensure_hub;
use agora_hub::ports::outbound::ReferenceModule;
use agora_types::{
    Address, Bytes, HubView, ModuleContext, ModuleError, ProcessReferenceParams, PublicationRef,
};

/// Reference module restricting references to followers of the author.
#[derive(Debug, Clone, Copy)]
pub struct FollowerOnlyReferenceModule {
    hub: Address,
}

impl FollowerOnlyReferenceModule {
    /// Creates the module bound to the given hub.
    #[must_use]
    pub fn new(hub: Address) -> Self {
        Self { hub }
    }

    fn check(
        &self,
        ctx: &ModuleContext,
        view: &dyn HubView,
        params: &ProcessReferenceParams,
    ) -> Result<Bytes, ModuleError> {
        ensure_hub(self.hub, ctx)?;
        let author = params.pointed.profile_id;
        // The author references their own work freely.
        if params.profile_id == author || view.is_following(params.profile_id, author) {
            Ok(Bytes::new())
        } else {
            Err(ModuleError::Rejected(format!(
                "{:?} does not follow author {author:?}",
                params.profile_id
            )))
        }
    }
}

impl ReferenceModule for FollowerOnlyReferenceModule {
    fn initialize_reference_module(
        &self,
        ctx: &ModuleContext,
        _publication: PublicationRef,
        _data: &Bytes,
    ) -> Result<Bytes, ModuleError> {
        ensure_hub(self.hub, ctx)?;
        Ok(Bytes::new())
    }

    fn process_comment(
        &self,
        ctx: &ModuleContext,
        view: &dyn HubView,
        params: &ProcessReferenceParams,
    ) -> Result<Bytes, ModuleError> {
        self.check(ctx, view, params)
    }

    fn process_quote(
        &self,
        ctx: &ModuleContext,
        view: &dyn HubView,
        params: &ProcessReferenceParams,
    ) -> Result<Bytes, ModuleError> {
        self.check(ctx, view, params)
    }

    fn process_mirror(
        &self,
        ctx: &ModuleContext,
        view: &dyn HubView,
        params: &ProcessReferenceParams,
    ) -> Result<Bytes, ModuleError> {
        self.check(ctx, view, params)
    }
}

// =============================================================================
// TESTS
// =============================================================================

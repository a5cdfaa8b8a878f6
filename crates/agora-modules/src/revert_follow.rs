//! # Revert Follow Module
//!
//! Rejects every follow. A profile attaches this to become unfollowable;
//! existing follows are untouched.

use crate::ensure_hub;
use agora_hub::ports::outbound::FollowModule;
use agora_types::{
    Address, Bytes, HubView, ModuleContext, ModuleError, ProcessFollowParams, ProfileId,
};
use tracing::debug;

/// Follow module that declines every follow.
#[derive(Debug, Clone, Copy)]
pub struct RevertFollowModule {
    hub: Address,
}

impl RevertFollowModule {
    /// Creates the module bound to the given hub.
    #[must_use]
    pub fn new(hub: Address) -> Self {
        Self { hub }
    }
}

impl FollowModule for RevertFollowModule {
    fn initialize_follow_module(
        &self,
        ctx: &ModuleContext,
        profile: ProfileId,
        _data: &Bytes,
    ) -> Result<Bytes, ModuleError> {
        ensure_hub(self.hub, ctx)?;
        debug!(profile = %profile, "profile made unfollowable");
        Ok(Bytes::new())
    }

    fn process_follow(
        &self,
        ctx: &ModuleContext,
        _view: &dyn HubView,
        _params: &ProcessFollowParams,
    ) -> Result<Bytes, ModuleError> {
        ensure_hub(self.hub, ctx)?;
        Err(ModuleError::Rejected("profile is unfollowable".to_string()))
    }
}

// =============================================================================
// TESTS
// =============================================================================

//! # Agora Stock Policy Modules
//!
//! Reference implementations of the hub's policy-module ports. Each module
//! trusts exactly one hub address and refuses hooks from anyone else; the
//! hub, in turn, treats these as untrusted code and invokes them only after
//! its own records are persisted.
//!
//! | Module | Port | Policy |
//! |--------|------|--------|
//! | [`RevertFollowModule`] | follow | rejects every follow |
//! | [`FollowerOnlyReferenceModule`] | reference | comment/quote/mirror only by followers of the author |
//! | [`SimpleCollectModule`] | collect | collect limit, end timestamp, optional follower-only gate |
//!
//! Configuration blobs are JSON, decoded with serde at attachment time.
//! Economic settlement is out of scope; these modules gate, they never
//! charge.

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod follower_only_reference;
pub mod revert_follow;
pub mod simple_collect;

pub use follower_only_reference::FollowerOnlyReferenceModule;
pub use revert_follow::RevertFollowModule;
pub use simple_collect::{SimpleCollectConfig, SimpleCollectModule};

use agora_types::{Address, ModuleContext, ModuleError};

/// Rejects a hook invoked by anything other than the trusted hub.
pub(crate) fn ensure_hub(expected: Address, ctx: &ModuleContext) -> Result<(), ModuleError> {
    if ctx.caller == expected {
        Ok(())
    } else {
        Err(ModuleError::NotHub {
            expected,
            got: ctx.caller,
        })
    }
}

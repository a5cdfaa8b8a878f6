//! # Agora Shared Types
//!
//! Value objects and module-facing types shared between the protocol hub and
//! externally supplied policy modules.
//!
//! Everything here is plain data: identifiers, addresses, opaque byte blobs,
//! the parameter structs passed across the module trust boundary, and the
//! request payloads accepted by the hub's entry points. Behavior lives in
//! `agora-hub`.

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod address;
pub mod bytes;
pub mod ids;
pub mod module;
pub mod requests;

pub use address::Address;
pub use bytes::Bytes;
pub use ids::{FollowTokenId, ProfileId, PubId, PublicationRef};
pub use module::{
    HubView, ModuleContext, ModuleError, ProcessCollectParams, ProcessFollowParams,
    ProcessReferenceParams,
};
pub use requests::{
    CollectParams, CommentParams, CreateProfileParams, MirrorParams, PostParams, QuoteParams,
    SignatureParams,
};

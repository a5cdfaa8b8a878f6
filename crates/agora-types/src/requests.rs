//! # Entry-Point Request Payloads
//!
//! Parameter structs accepted by the hub's mutating entry points. These are
//! plain data; validation and authorization happen inside the hub.

use crate::{Address, Bytes, ProfileId, PublicationRef};
use serde::{Deserialize, Serialize};

/// Parameters for `create_profile`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateProfileParams {
    /// Address the new profile is minted to.
    pub to: Address,
    /// Optional follow module to attach, with its opaque init blob.
    pub follow_module: Option<(Address, Bytes)>,
}

/// Parameters for `post`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PostParams {
    /// Authoring profile.
    pub profile_id: ProfileId,
    /// Content URI.
    pub content_uri: String,
    /// Optional collect module with its init blob.
    pub collect_module: Option<(Address, Bytes)>,
    /// Optional reference module with its init blob. Configured at creation,
    /// invoked only when someone later points at this publication.
    pub reference_module: Option<(Address, Bytes)>,
}

/// Parameters for `comment`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CommentParams {
    /// Authoring profile.
    pub profile_id: ProfileId,
    /// Content URI.
    pub content_uri: String,
    /// The publication being commented on.
    pub pointed: PublicationRef,
    /// Intermediate publications through which the author reached the target.
    pub referrers: Vec<PublicationRef>,
    /// Opaque data forwarded to the pointed publication's reference module.
    pub reference_module_data: Bytes,
    /// Optional collect module for the new comment, with its init blob.
    pub collect_module: Option<(Address, Bytes)>,
    /// Optional reference module for the new comment, with its init blob.
    pub reference_module: Option<(Address, Bytes)>,
}

/// Parameters for `quote`. Same shape as a comment; the distinction is
/// semantic (a quote republishes, a comment replies) and is carried in the
/// publication kind and the module hook invoked.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuoteParams {
    /// Authoring profile.
    pub profile_id: ProfileId,
    /// Content URI.
    pub content_uri: String,
    /// The publication being quoted.
    pub pointed: PublicationRef,
    /// Intermediate publications through which the author reached the target.
    pub referrers: Vec<PublicationRef>,
    /// Opaque data forwarded to the pointed publication's reference module.
    pub reference_module_data: Bytes,
    /// Optional collect module for the new quote, with its init blob.
    pub collect_module: Option<(Address, Bytes)>,
    /// Optional reference module for the new quote, with its init blob.
    pub reference_module: Option<(Address, Bytes)>,
}

/// Parameters for `mirror`. A mirror persists only its pointer: no content,
/// no own modules.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MirrorParams {
    /// Mirroring profile.
    pub profile_id: ProfileId,
    /// The publication being mirrored.
    pub pointed: PublicationRef,
    /// Intermediate publications through which the author reached the target.
    pub referrers: Vec<PublicationRef>,
    /// Opaque data forwarded to the pointed publication's reference module.
    pub reference_module_data: Bytes,
}

/// Parameters for `collect`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CollectParams {
    /// Profile performing the collect.
    pub collector_profile_id: ProfileId,
    /// The publication being collected.
    pub target: PublicationRef,
    /// Intermediate publications through which the collector reached the
    /// target.
    pub referrers: Vec<PublicationRef>,
    /// Opaque data forwarded to the target's collect module.
    pub data: Bytes,
}

/// A structured meta-transaction signature, validated by the external
/// signing/digest collaborator. The resolved signer substitutes for the
/// direct caller in all authorization checks.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SignatureParams {
    /// Claimed signer address.
    pub signer: Address,
    /// Raw signature bytes, opaque to the hub.
    pub signature: Bytes,
    /// Replay-protection nonce, consumed on use.
    pub nonce: u64,
    /// Unix-seconds deadline after which the signature is void.
    pub deadline: u64,
}

// =============================================================================
// TESTS
// =============================================================================

//! # Event Schema
//!
//! Typed events appended to the hub's event log on every successful
//! mutation. A reverted call leaves the log untouched: engines write into a
//! pending buffer that the service only merges after the call commits.

use crate::domain::entities::ProtocolState;
use agora_types::{Address, FollowTokenId, ProfileId, PublicationRef};
use serde::{Deserialize, Serialize};

/// Which whitelist a governance whitelisting event touched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WhitelistKind {
    /// Addresses allowed to create profiles.
    ProfileCreator,
    /// Follow-module addresses.
    FollowModule,
    /// Reference-module addresses.
    ReferenceModule,
    /// Collect-module addresses.
    CollectModule,
}

/// One entry in the hub's event log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HubEvent {
    /// A profile was created.
    ProfileCreated {
        /// The new profile.
        profile: ProfileId,
        /// Address the profile token was minted to.
        to: Address,
        /// The whitelisted creator that made the call.
        creator: Address,
    },
    /// A profile's metadata URI was set.
    ProfileMetadataSet {
        /// The profile.
        profile: ProfileId,
        /// The new URI.
        uri: String,
    },
    /// A profile's image URI was set.
    ProfileImageSet {
        /// The profile.
        profile: ProfileId,
        /// The new URI.
        uri: String,
    },
    /// A profile's follow-receipt URI was set.
    FollowReceiptUriSet {
        /// The profile.
        profile: ProfileId,
        /// The new URI.
        uri: String,
    },
    /// A profile's follow module was set or cleared.
    FollowModuleSet {
        /// The profile.
        profile: ProfileId,
        /// The new module address, `None` if cleared.
        module: Option<Address>,
    },
    /// A profile token was burned.
    ProfileBurned {
        /// The profile.
        profile: ProfileId,
    },
    /// A delegated-executor configuration changed.
    DelegatedExecutorsConfigChanged {
        /// The delegator profile.
        profile: ProfileId,
        /// The configuration number written to.
        config_number: u64,
        /// Whether the call also made it the active configuration.
        switched: bool,
    },
    /// A directed block flag was set or cleared.
    BlockStatusSet {
        /// The profile setting the flag.
        by: ProfileId,
        /// The profile the flag is directed at.
        target: ProfileId,
        /// The new flag value.
        blocked: bool,
    },
    /// A post was created.
    PostCreated {
        /// The new publication.
        publication: PublicationRef,
        /// Its content URI.
        content_uri: String,
    },
    /// A comment was created.
    CommentCreated {
        /// The new publication.
        publication: PublicationRef,
        /// The publication commented on.
        pointed: PublicationRef,
    },
    /// A quote was created.
    QuoteCreated {
        /// The new publication.
        publication: PublicationRef,
        /// The publication quoted.
        pointed: PublicationRef,
    },
    /// A mirror was created.
    MirrorCreated {
        /// The new publication.
        publication: PublicationRef,
        /// The publication mirrored.
        pointed: PublicationRef,
    },
    /// A follow relationship was created or re-attached.
    Followed {
        /// The follower profile.
        follower: ProfileId,
        /// The followed profile.
        target: ProfileId,
        /// The follow token now binding them.
        token: FollowTokenId,
    },
    /// A follow relationship was removed.
    Unfollowed {
        /// The former follower profile.
        follower: ProfileId,
        /// The formerly followed profile.
        target: ProfileId,
    },
    /// A collect receipt was minted.
    Collected {
        /// The collecting profile.
        collector: ProfileId,
        /// The collected publication.
        publication: PublicationRef,
        /// The minted receipt token number.
        receipt_token: u64,
    },
    /// The protocol state changed.
    ProtocolStateSet {
        /// State before the call.
        previous: ProtocolState,
        /// State after the call.
        state: ProtocolState,
        /// Governance or the emergency admin.
        by: Address,
    },
    /// The governance address changed.
    GovernanceSet {
        /// Previous governance address.
        previous: Address,
        /// New governance address.
        governance: Address,
    },
    /// The emergency admin changed.
    EmergencyAdminSet {
        /// Previous admin, if any.
        previous: Option<Address>,
        /// New admin, if any.
        admin: Option<Address>,
    },
    /// A governance whitelist entry was set or cleared.
    Whitelisted {
        /// Which whitelist.
        kind: WhitelistKind,
        /// The address touched.
        address: Address,
        /// The new whitelist flag.
        whitelisted: bool,
    },
    /// A follow-receipt contract reported a token transfer.
    FollowReceiptTransferred {
        /// The profile whose receipt reported.
        profile: ProfileId,
        /// The transferred follow token.
        token: FollowTokenId,
        /// Sender.
        from: Address,
        /// Recipient.
        to: Address,
    },
    /// A collect-receipt contract reported a token transfer.
    CollectReceiptTransferred {
        /// The publication whose receipt reported.
        publication: PublicationRef,
        /// The transferred receipt token number.
        token: u64,
        /// Sender.
        from: Address,
        /// Recipient.
        to: Address,
    },
}

// =============================================================================
// TESTS
// =============================================================================

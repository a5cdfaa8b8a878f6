//! # Protocol Identifiers
//!
//! Newtype identifiers for profiles, publications, and follow tokens.
//!
//! Identifier 0 is reserved and never assigned: a zero id always refers to
//! nothing, which lets record lookups treat it uniformly as "not found".

use serde::{Deserialize, Serialize};
use std::fmt;

/// A profile identifier. Monotonic, never reused, 0 is reserved.
#[derive(
    Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct ProfileId(pub u64);

impl ProfileId {
    /// Returns true if this id can never name a profile.
    #[must_use]
    pub fn is_reserved(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "profile#{}", self.0)
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A publication identifier, scoped per profile and monotonic within it.
#[derive(
    Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct PubId(pub u64);

impl PubId {
    /// Returns true if this id can never name a publication.
    #[must_use]
    pub fn is_reserved(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for PubId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pub#{}", self.0)
    }
}

impl fmt::Display for PubId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A follow-token identifier, scoped to a single followed profile's follow
/// receipt. Tokens survive unfollow so they can be re-attached later.
#[derive(
    Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct FollowTokenId(pub u64);

impl fmt::Debug for FollowTokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "follow-token#{}", self.0)
    }
}

impl fmt::Display for FollowTokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A fully qualified publication key: `(profile, pub)`.
///
/// Used for pointers (comment/quote/mirror targets) and referrer chains.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PublicationRef {
    /// The authoring profile.
    pub profile_id: ProfileId,
    /// The publication within that profile.
    pub pub_id: PubId,
}

impl PublicationRef {
    /// Creates a publication reference.
    #[must_use]
    pub const fn new(profile_id: ProfileId, pub_id: PubId) -> Self {
        Self { profile_id, pub_id }
    }

    /// Returns true if either component is the reserved zero id.
    #[must_use]
    pub fn is_reserved(&self) -> bool {
        self.profile_id.is_reserved() || self.pub_id.is_reserved()
    }
}

impl fmt::Debug for PublicationRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.profile_id.0, self.pub_id.0)
    }
}

impl fmt::Display for PublicationRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.profile_id.0, self.pub_id.0)
    }
}

// =============================================================================
// TESTS
// =============================================================================

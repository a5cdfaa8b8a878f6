//! # Driving Port - SocialGraphApi
//!
//! Primary API of the hub. Every mutating method takes the acting address
//! explicitly (`caller`, the transaction-origin stand-in) and has a
//! `*_with_sig` twin that resolves the acting address from a structured
//! signature instead. The recovered signer substitutes for the caller in
//! every authorization check.
//!
//! Governance operations and profile creation are direct-only and live as
//! inherent methods on the service, not on this trait.

use crate::errors::HubError;
use agora_types::{
    Address, Bytes, CollectParams, CommentParams, CreateProfileParams, FollowTokenId,
    MirrorParams, PostParams, ProfileId, PubId, PublicationRef, QuoteParams, SignatureParams,
};
use async_trait::async_trait;

/// Primary API for the social graph hub.
///
/// All mutations run under a single write lock and commit atomically: any
/// error restores the pre-call state and leaves the event log untouched.
#[async_trait]
pub trait SocialGraphApi: Send + Sync {
    // =========================================================================
    // PROFILES
    // =========================================================================

    /// Creates a profile and mints its ownership token to `params.to`.
    ///
    /// # Errors
    /// - `CreatorNotWhitelisted` if `caller` is not a whitelisted creator
    /// - `ZeroAddress` if the recipient is the zero address
    /// - `ModuleNotWhitelisted` / `ModuleNotRegistered` for a bad follow module
    async fn create_profile(
        &self,
        caller: Address,
        params: CreateProfileParams,
    ) -> Result<ProfileId, HubError>;

    /// Sets a profile's metadata URI. Permitted while publishing is paused.
    async fn set_profile_metadata_uri(
        &self,
        caller: Address,
        profile: ProfileId,
        uri: String,
    ) -> Result<(), HubError>;

    /// Sets a profile's image URI.
    async fn set_profile_image_uri(
        &self,
        caller: Address,
        profile: ProfileId,
        uri: String,
    ) -> Result<(), HubError>;

    /// Sets the metadata URI served by the profile's follow receipt.
    async fn set_follow_receipt_uri(
        &self,
        caller: Address,
        profile: ProfileId,
        uri: String,
    ) -> Result<(), HubError>;

    /// Attaches, replaces, or clears a profile's follow module.
    async fn set_follow_module(
        &self,
        caller: Address,
        profile: ProfileId,
        module: Option<(Address, Bytes)>,
    ) -> Result<(), HubError>;

    /// Burns a profile's ownership token. Owner only; the profile's records
    /// stay readable but no further action can be authorized for it.
    async fn burn_profile(&self, caller: Address, profile: ProfileId) -> Result<(), HubError>;

    // =========================================================================
    // DELEGATED EXECUTORS / BLOCKING
    // =========================================================================

    /// Sets executor approvals in the given config and optionally switches
    /// the profile to it. Any `config_number` is accepted; one past the
    /// highest ever touched raises that high-water mark.
    async fn change_delegated_executors_config(
        &self,
        caller: Address,
        profile: ProfileId,
        executors: &[Address],
        approvals: &[bool],
        config_number: u64,
        switch_to_given_config: bool,
    ) -> Result<(), HubError>;

    /// Sets executor approvals in the profile's currently active config.
    async fn change_current_delegated_executors_config(
        &self,
        caller: Address,
        profile: ProfileId,
        executors: &[Address],
        approvals: &[bool],
    ) -> Result<(), HubError>;

    /// Batch (un)block. Blocking a current follower forces an unfollow in
    /// the same call.
    async fn set_block_status(
        &self,
        caller: Address,
        by_profile: ProfileId,
        targets: &[ProfileId],
        blocked: &[bool],
    ) -> Result<(), HubError>;

    // =========================================================================
    // PUBLICATIONS
    // =========================================================================

    /// Creates a root post. Returns the new publication reference.
    async fn post(&self, caller: Address, params: PostParams) -> Result<PublicationRef, HubError>;

    /// Creates a comment pointing at an existing post, comment, or quote.
    async fn comment(
        &self,
        caller: Address,
        params: CommentParams,
    ) -> Result<PublicationRef, HubError>;

    /// Creates a quote pointing at an existing post, comment, or quote.
    async fn quote(&self, caller: Address, params: QuoteParams)
        -> Result<PublicationRef, HubError>;

    /// Creates a mirror of an existing post, comment, or quote. Mirrors
    /// carry no content and cannot themselves be pointed at.
    async fn mirror(
        &self,
        caller: Address,
        params: MirrorParams,
    ) -> Result<PublicationRef, HubError>;

    // =========================================================================
    // GRAPH / COLLECT
    // =========================================================================

    /// Batch follow, all-or-nothing. `follow_tokens[i]` optionally re-attaches
    /// a previously minted unbound token. Returns the token bound per target.
    async fn follow(
        &self,
        caller: Address,
        follower_profile: ProfileId,
        targets: &[ProfileId],
        follow_tokens: &[Option<FollowTokenId>],
        datas: &[Bytes],
    ) -> Result<Vec<FollowTokenId>, HubError>;

    /// Batch unfollow. No module hook runs on unfollow; tokens stay minted
    /// but unbound.
    async fn unfollow(
        &self,
        caller: Address,
        follower_profile: ProfileId,
        targets: &[ProfileId],
    ) -> Result<(), HubError>;

    /// Collects a publication through its collect module. Returns the minted
    /// collect-receipt token id.
    async fn collect(&self, caller: Address, params: CollectParams) -> Result<u64, HubError>;

    // =========================================================================
    // META-TRANSACTION VARIANTS
    // =========================================================================

    /// [`Self::set_profile_metadata_uri`] with the caller recovered from `sig`.
    async fn set_profile_metadata_uri_with_sig(
        &self,
        sig: SignatureParams,
        profile: ProfileId,
        uri: String,
    ) -> Result<(), HubError>;

    /// [`Self::set_profile_image_uri`] with the caller recovered from `sig`.
    async fn set_profile_image_uri_with_sig(
        &self,
        sig: SignatureParams,
        profile: ProfileId,
        uri: String,
    ) -> Result<(), HubError>;

    /// [`Self::set_follow_receipt_uri`] with the caller recovered from `sig`.
    async fn set_follow_receipt_uri_with_sig(
        &self,
        sig: SignatureParams,
        profile: ProfileId,
        uri: String,
    ) -> Result<(), HubError>;

    /// [`Self::set_follow_module`] with the caller recovered from `sig`.
    async fn set_follow_module_with_sig(
        &self,
        sig: SignatureParams,
        profile: ProfileId,
        module: Option<(Address, Bytes)>,
    ) -> Result<(), HubError>;

    /// [`Self::burn_profile`] with the caller recovered from `sig`.
    async fn burn_profile_with_sig(
        &self,
        sig: SignatureParams,
        profile: ProfileId,
    ) -> Result<(), HubError>;

    /// [`Self::change_delegated_executors_config`] with the caller recovered
    /// from `sig`.
    async fn change_delegated_executors_config_with_sig(
        &self,
        sig: SignatureParams,
        profile: ProfileId,
        executors: &[Address],
        approvals: &[bool],
        config_number: u64,
        switch_to_given_config: bool,
    ) -> Result<(), HubError>;

    /// [`Self::change_current_delegated_executors_config`] with the caller
    /// recovered from `sig`.
    async fn change_current_delegated_executors_config_with_sig(
        &self,
        sig: SignatureParams,
        profile: ProfileId,
        executors: &[Address],
        approvals: &[bool],
    ) -> Result<(), HubError>;

    /// [`Self::set_block_status`] with the caller recovered from `sig`.
    async fn set_block_status_with_sig(
        &self,
        sig: SignatureParams,
        by_profile: ProfileId,
        targets: &[ProfileId],
        blocked: &[bool],
    ) -> Result<(), HubError>;

    /// [`Self::post`] with the caller recovered from `sig`.
    async fn post_with_sig(
        &self,
        sig: SignatureParams,
        params: PostParams,
    ) -> Result<PublicationRef, HubError>;

    /// [`Self::comment`] with the caller recovered from `sig`.
    async fn comment_with_sig(
        &self,
        sig: SignatureParams,
        params: CommentParams,
    ) -> Result<PublicationRef, HubError>;

    /// [`Self::quote`] with the caller recovered from `sig`.
    async fn quote_with_sig(
        &self,
        sig: SignatureParams,
        params: QuoteParams,
    ) -> Result<PublicationRef, HubError>;

    /// [`Self::mirror`] with the caller recovered from `sig`.
    async fn mirror_with_sig(
        &self,
        sig: SignatureParams,
        params: MirrorParams,
    ) -> Result<PublicationRef, HubError>;

    /// [`Self::follow`] with the caller recovered from `sig`.
    async fn follow_with_sig(
        &self,
        sig: SignatureParams,
        follower_profile: ProfileId,
        targets: &[ProfileId],
        follow_tokens: &[Option<FollowTokenId>],
        datas: &[Bytes],
    ) -> Result<Vec<FollowTokenId>, HubError>;

    /// [`Self::unfollow`] with the caller recovered from `sig`.
    async fn unfollow_with_sig(
        &self,
        sig: SignatureParams,
        follower_profile: ProfileId,
        targets: &[ProfileId],
    ) -> Result<(), HubError>;

    /// [`Self::collect`] with the caller recovered from `sig`.
    async fn collect_with_sig(
        &self,
        sig: SignatureParams,
        params: CollectParams,
    ) -> Result<u64, HubError>;

    // =========================================================================
    // RECEIPT CALLBACKS
    // =========================================================================

    /// Notification from a profile's follow-receipt contract that a token
    /// moved. `caller` must be that receipt's registered address.
    async fn on_follow_receipt_transfer(
        &self,
        caller: Address,
        profile: ProfileId,
        token: FollowTokenId,
        from: Address,
        to: Address,
    ) -> Result<(), HubError>;

    /// Notification from a publication's collect-receipt contract that a
    /// token moved. `caller` must be that receipt's registered address.
    async fn on_collect_receipt_transfer(
        &self,
        caller: Address,
        publication: PublicationRef,
        token: u64,
        from: Address,
        to: Address,
    ) -> Result<(), HubError>;

    /// Notification from the ownership ledger that a profile token moved.
    /// Engages a fresh executor config so the previous owner's delegations
    /// die with the transfer. Skipped internally for the initial mint.
    async fn on_profile_transfer(
        &self,
        profile: ProfileId,
        from: Address,
        to: Address,
    ) -> Result<(), HubError>;

    // =========================================================================
    // VIEWS
    // =========================================================================

    /// The kind of the publication at `publication`, `Nonexistent` included.
    async fn publication_kind(
        &self,
        publication: PublicationRef,
    ) -> crate::domain::PublicationKind;

    /// Whether `follower` currently follows `target`.
    async fn is_following(&self, follower: ProfileId, target: ProfileId) -> bool;

    /// Whether `by` has blocked `target` (one direction only).
    async fn is_blocked(&self, by: ProfileId, target: ProfileId) -> bool;

    /// Number of publications a profile has made. Monotonic, never reused.
    async fn publication_count(&self, profile: ProfileId) -> Option<PubId>;
}

//! # Driven Ports (SPI - Outbound)
//!
//! Interfaces the hub depends on. Adapters implement these to provide:
//! - policy modules (follow / reference / collect gates),
//! - the ownership ledger (NFT-style profile ownership),
//! - receipt-contract deployment,
//! - meta-transaction signature validation.
//!
//! Dependencies point inward: the engines call through these traits and
//! never know which adapter is behind them.

use crate::errors::SignatureError;
use agora_types::{
    Address, Bytes, HubView, ModuleContext, ModuleError, ProcessCollectParams,
    ProcessFollowParams, ProcessReferenceParams, ProfileId, PublicationRef, SignatureParams,
};
use std::sync::Arc;

// =============================================================================
// POLICY MODULE HOOKS
// =============================================================================

/// A follow module: gates follows of the profile it is attached to.
///
/// Hooks are synchronous and invoked with the hub's own counters already
/// updated, so a module reading back through [`HubView`] sees committed
/// intermediate state. Any error fully aborts the triggering call.
pub trait FollowModule: Send + Sync {
    /// Called when the module is attached to a profile. The returned blob is
    /// persisted alongside the attachment for informational reads.
    fn initialize_follow_module(
        &self,
        ctx: &ModuleContext,
        profile: ProfileId,
        data: &Bytes,
    ) -> Result<Bytes, ModuleError>;

    /// Accept/reject gate for one follow of the attached profile.
    fn process_follow(
        &self,
        ctx: &ModuleContext,
        view: &dyn HubView,
        params: &ProcessFollowParams,
    ) -> Result<Bytes, ModuleError>;
}

/// A reference module: gates comments, quotes, and mirrors pointing at the
/// publication it is attached to.
pub trait ReferenceModule: Send + Sync {
    /// Called when the module is attached to a publication at creation time.
    fn initialize_reference_module(
        &self,
        ctx: &ModuleContext,
        publication: PublicationRef,
        data: &Bytes,
    ) -> Result<Bytes, ModuleError>;

    /// Accept/reject gate for a comment pointing at the attached publication.
    fn process_comment(
        &self,
        ctx: &ModuleContext,
        view: &dyn HubView,
        params: &ProcessReferenceParams,
    ) -> Result<Bytes, ModuleError>;

    /// Accept/reject gate for a quote pointing at the attached publication.
    fn process_quote(
        &self,
        ctx: &ModuleContext,
        view: &dyn HubView,
        params: &ProcessReferenceParams,
    ) -> Result<Bytes, ModuleError>;

    /// Accept/reject gate for a mirror pointing at the attached publication.
    fn process_mirror(
        &self,
        ctx: &ModuleContext,
        view: &dyn HubView,
        params: &ProcessReferenceParams,
    ) -> Result<Bytes, ModuleError>;
}

/// A collect module: gates collects of the publication it is attached to.
pub trait CollectModule: Send + Sync {
    /// Called when the module is attached to a publication at creation time.
    fn initialize_collect_module(
        &self,
        ctx: &ModuleContext,
        publication: PublicationRef,
        data: &Bytes,
    ) -> Result<Bytes, ModuleError>;

    /// Accept/reject gate for one collect of the attached publication. The
    /// returned blob may carry a module-specific result payload.
    fn process_collect(
        &self,
        ctx: &ModuleContext,
        view: &dyn HubView,
        params: &ProcessCollectParams,
    ) -> Result<Bytes, ModuleError>;
}

// =============================================================================
// MODULE DIRECTORY
// =============================================================================

/// Resolves module addresses to the implementations bound to them.
///
/// Whitelisting (may this address be attached at all?) lives in hub state
/// and is governance-controlled; the directory only answers "what code runs
/// at this address".
pub trait ModuleDirectory: Send + Sync {
    /// The follow module bound to an address, if any.
    fn follow_module(&self, address: Address) -> Option<Arc<dyn FollowModule>>;

    /// The reference module bound to an address, if any.
    fn reference_module(&self, address: Address) -> Option<Arc<dyn ReferenceModule>>;

    /// The collect module bound to an address, if any.
    fn collect_module(&self, address: Address) -> Option<Arc<dyn CollectModule>>;
}

// =============================================================================
// OWNERSHIP LEDGER
// =============================================================================

/// The token-transfer/ownership ledger collaborator. Profile ownership is
/// exclusively owned by the ledger; the hub only reads it.
pub trait OwnershipLedger: Send + Sync {
    /// Current owner of a profile token, `None` if never minted or burned.
    fn owner_of(&self, profile: ProfileId) -> Option<Address>;

    /// Mints a profile token to `to`. Called by the hub at profile creation.
    fn mint(&self, profile: ProfileId, to: Address);

    /// Burns a profile token. Called by the hub at profile burn.
    fn burn(&self, profile: ProfileId);
}

// =============================================================================
// RECEIPT DEPLOYER
// =============================================================================

/// Deploys derivative receipt contracts: a follow receipt per profile on
/// first follow, a collect receipt per publication on first collect.
pub trait ReceiptDeployer: Send + Sync {
    /// Deploys (or derives) the follow-receipt contract for a profile.
    fn deploy_follow_receipt(&self, profile: ProfileId) -> Address;

    /// Deploys (or derives) the collect-receipt contract for a publication.
    fn deploy_collect_receipt(&self, publication: PublicationRef) -> Address;
}

// =============================================================================
// META-TRANSACTION VERIFIER
// =============================================================================

/// Validates the structured signature of a `*_with_sig` entry point and
/// resolves the signer the hub should treat as the caller.
///
/// Digest construction and replay protection live here, at the boundary; the
/// hub never re-derives them.
pub trait MetaTxVerifier: Send + Sync {
    /// Validates `params` against `now` (unix seconds) and returns the
    /// recovered signer, consuming the nonce.
    fn recover(&self, params: &SignatureParams, now: u64) -> Result<Address, SignatureError>;
}

// =============================================================================
// TESTS
// =============================================================================

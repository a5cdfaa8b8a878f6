//! Shared fixtures for the integration flows.

use agora_hub::adapters::{InMemoryLedger, KeccakReceiptDeployer, NonceTrackingVerifier};
use agora_hub::service::HubService;
use agora_hub::SocialGraphApi;
use agora_types::{Address, CreateProfileParams, ProfileId, SignatureParams};
use std::sync::{Arc, Once};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Installs the env-filtered subscriber once per test binary, so
/// `RUST_LOG=agora_hub=debug cargo test` surfaces the hub's tracing output.
fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// The hub service wired with all in-memory adapters.
pub type TestHub = HubService<InMemoryLedger, KeccakReceiptDeployer, NonceTrackingVerifier>;

/// The hub's own address, seen by modules as `ctx.caller`.
pub const HUB_ADDR: Address = Address::new([0xAA; 20]);

/// Genesis governance address.
pub const GOV: Address = Address::new([0x60; 20]);

/// A deterministic test address.
#[must_use]
pub fn addr(n: u8) -> Address {
    Address::new([n; 20])
}

/// Current unix time in seconds.
#[must_use]
pub fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Builds a hub with fresh in-memory adapters, returning the shared ledger
/// and verifier handles for direct manipulation.
#[must_use]
pub fn hub() -> (TestHub, Arc<InMemoryLedger>, Arc<NonceTrackingVerifier>) {
    init_tracing();
    let ledger = Arc::new(InMemoryLedger::new());
    let verifier = Arc::new(NonceTrackingVerifier::new());
    let service = HubService::new(
        HUB_ADDR,
        GOV,
        Arc::clone(&ledger),
        Arc::new(KeccakReceiptDeployer::new()),
        Arc::clone(&verifier),
    );
    (service, ledger, verifier)
}

/// Whitelists `owner` as a creator and creates a profile owned by them.
pub async fn profile_for(hub: &TestHub, owner: Address) -> ProfileId {
    hub.whitelist_profile_creator(GOV, owner, true)
        .await
        .expect("whitelist creator");
    hub.create_profile(
        owner,
        CreateProfileParams {
            to: owner,
            follow_module: None,
        },
    )
    .await
    .expect("create profile")
}

/// Produces a valid signature blob for the nonce-tracking verifier.
#[must_use]
pub fn signed(signer: Address, nonce: u64, deadline: u64) -> SignatureParams {
    SignatureParams {
        signer,
        signature: NonceTrackingVerifier::digest(signer, nonce, deadline),
        nonce,
        deadline,
    }
}

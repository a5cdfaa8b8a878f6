//! # Hub Service
//!
//! The protocol core behind [`SocialGraphApi`]. Owns the hub state under a
//! single async write lock, so mutations observe one global serialized
//! ordering. Every entry point resolves the acting address, checks the
//! protocol-state gate, runs the domain engines, and commits atomically:
//! the state is snapshotted before the call and restored on any error, and
//! pending events only reach the log after the call commits. Intermediate
//! writes stay visible to policy modules reading back through `HubView`
//! mid-call, which is exactly what the counters-before-hooks ordering needs.

use crate::adapters::ModuleRegistry;
use crate::domain::authorization::{
    check_protocol_state, require_governance, require_owner, require_owner_or_executor,
    require_state_setter, Gate,
};
use crate::domain::invariants::{check_all_invariants, InvariantCheckResult};
use crate::domain::{graph, publication as publication_engine};
use crate::domain::{
    HubState, Profile, ProtocolState, Publication, PublicationKind,
};
use crate::errors::{AuthorizationError, HubError, ValidationError};
use crate::events::{HubEvent, WhitelistKind};
use crate::ports::inbound::SocialGraphApi;
use crate::ports::outbound::{
    CollectModule, FollowModule, MetaTxVerifier, ModuleDirectory, OwnershipLedger,
    ReceiptDeployer, ReferenceModule,
};
use agora_types::{
    Address, Bytes, CollectParams, CommentParams, CreateProfileParams, FollowTokenId,
    MirrorParams, ModuleContext, PostParams, ProfileId, PubId, PublicationRef, QuoteParams,
    SignatureParams,
};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

// =============================================================================
// STATISTICS
// =============================================================================

/// Call statistics for the hub service.
#[derive(Debug, Default, Clone)]
pub struct HubStats {
    /// Total entry-point calls executed.
    pub calls_executed: u64,
    /// Calls that committed.
    pub calls_succeeded: u64,
    /// Calls that reverted; the snapshot was restored.
    pub calls_reverted: u64,
    /// Events appended to the log by committed calls.
    pub events_emitted: u64,
}

// =============================================================================
// SERVICE
// =============================================================================

/// The social graph hub service.
///
/// Generic over its driven-port collaborators so tests and deployments can
/// swap adapters without touching the core.
pub struct HubService<L, D, V>
where
    L: OwnershipLedger + 'static,
    D: ReceiptDeployer + 'static,
    V: MetaTxVerifier + 'static,
{
    /// The hub's own address, handed to policy modules as `ctx.caller` so
    /// they can enforce hub-only invocation.
    address: Address,
    state: Arc<RwLock<HubState>>,
    registry: Arc<ModuleRegistry>,
    ledger: Arc<L>,
    deployer: Arc<D>,
    verifier: Arc<V>,
    events: Arc<RwLock<Vec<HubEvent>>>,
    stats: Arc<RwLock<HubStats>>,
}

impl<L, D, V> HubService<L, D, V>
where
    L: OwnershipLedger + 'static,
    D: ReceiptDeployer + 'static,
    V: MetaTxVerifier + 'static,
{
    /// Creates a hub at `address` with genesis state under `governance`.
    pub fn new(
        address: Address,
        governance: Address,
        ledger: Arc<L>,
        deployer: Arc<D>,
        verifier: Arc<V>,
    ) -> Self {
        info!(%address, %governance, "hub service starting from genesis");
        Self {
            address,
            state: Arc::new(RwLock::new(HubState::genesis(governance))),
            registry: Arc::new(ModuleRegistry::new()),
            ledger,
            deployer,
            verifier,
            events: Arc::new(RwLock::new(Vec::new())),
            stats: Arc::new(RwLock::new(HubStats::default())),
        }
    }

    /// The hub's own address.
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    fn now() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }

    fn ctx(&self, executor: Address) -> ModuleContext {
        ModuleContext {
            caller: self.address,
            executor,
            timestamp: Self::now(),
        }
    }

    fn recover(&self, sig: &SignatureParams) -> Result<Address, HubError> {
        Ok(self.verifier.recover(sig, Self::now())?)
    }

    /// Runs one mutating call under the write lock with commit-or-rollback
    /// semantics. The closure writes events into a pending buffer that only
    /// merges into the log when the call returns `Ok`.
    async fn mutate<T>(
        &self,
        f: impl FnOnce(&mut HubState, &mut Vec<HubEvent>) -> Result<T, HubError>,
    ) -> Result<T, HubError> {
        let mut state = self.state.write().await;
        let snapshot = state.clone();
        let mut pending = Vec::new();

        let result = f(&mut state, &mut pending);

        let mut stats = self.stats.write().await;
        stats.calls_executed += 1;
        match result {
            Ok(value) => {
                stats.calls_succeeded += 1;
                stats.events_emitted += pending.len() as u64;
                drop(stats);
                self.events.write().await.extend(pending);
                Ok(value)
            }
            Err(err) => {
                stats.calls_reverted += 1;
                *state = snapshot;
                warn!(error = %err, "call reverted, state restored");
                Err(err)
            }
        }
    }

    // =========================================================================
    // GOVERNANCE (direct-only)
    // =========================================================================

    /// Transfers governance to a new address.
    #[instrument(skip(self))]
    pub async fn set_governance(&self, caller: Address, governance: Address) -> Result<(), HubError> {
        self.mutate(|state, events| {
            require_governance(state, caller)?;
            if governance.is_zero() {
                return Err(ValidationError::ZeroAddress.into());
            }
            let previous = state.governance;
            state.governance = governance;
            events.push(HubEvent::GovernanceSet {
                previous,
                governance,
            });
            Ok(())
        })
        .await
    }

    /// Sets or clears the emergency admin.
    #[instrument(skip(self))]
    pub async fn set_emergency_admin(
        &self,
        caller: Address,
        admin: Option<Address>,
    ) -> Result<(), HubError> {
        self.mutate(|state, events| {
            require_governance(state, caller)?;
            let previous = state.emergency_admin;
            state.emergency_admin = admin;
            events.push(HubEvent::EmergencyAdminSet { previous, admin });
            Ok(())
        })
        .await
    }

    /// Sets the protocol state. Governance may set anything; the emergency
    /// admin may only escalate restrictiveness. Works while fully paused,
    /// otherwise the pause could never be lifted.
    #[instrument(skip(self))]
    pub async fn set_protocol_state(
        &self,
        caller: Address,
        requested: ProtocolState,
    ) -> Result<(), HubError> {
        self.mutate(|state, events| {
            require_state_setter(state, caller, requested)?;
            let previous = state.protocol_state;
            state.protocol_state = requested;
            info!(?previous, ?requested, "protocol state changed");
            events.push(HubEvent::ProtocolStateSet {
                previous,
                state: requested,
                by: caller,
            });
            Ok(())
        })
        .await
    }

    /// Adds or removes a profile-creator whitelist entry.
    pub async fn whitelist_profile_creator(
        &self,
        caller: Address,
        address: Address,
        whitelisted: bool,
    ) -> Result<(), HubError> {
        self.set_whitelist(caller, WhitelistKind::ProfileCreator, address, whitelisted)
            .await
    }

    /// Adds or removes a follow-module whitelist entry.
    pub async fn whitelist_follow_module(
        &self,
        caller: Address,
        address: Address,
        whitelisted: bool,
    ) -> Result<(), HubError> {
        self.set_whitelist(caller, WhitelistKind::FollowModule, address, whitelisted)
            .await
    }

    /// Adds or removes a reference-module whitelist entry.
    pub async fn whitelist_reference_module(
        &self,
        caller: Address,
        address: Address,
        whitelisted: bool,
    ) -> Result<(), HubError> {
        self.set_whitelist(caller, WhitelistKind::ReferenceModule, address, whitelisted)
            .await
    }

    /// Adds or removes a collect-module whitelist entry.
    pub async fn whitelist_collect_module(
        &self,
        caller: Address,
        address: Address,
        whitelisted: bool,
    ) -> Result<(), HubError> {
        self.set_whitelist(caller, WhitelistKind::CollectModule, address, whitelisted)
            .await
    }

    #[instrument(skip(self))]
    async fn set_whitelist(
        &self,
        caller: Address,
        kind: WhitelistKind,
        address: Address,
        whitelisted: bool,
    ) -> Result<(), HubError> {
        self.mutate(|state, events| {
            require_governance(state, caller)?;
            let set = match kind {
                WhitelistKind::ProfileCreator => &mut state.profile_creator_whitelist,
                WhitelistKind::FollowModule => &mut state.follow_module_whitelist,
                WhitelistKind::ReferenceModule => &mut state.reference_module_whitelist,
                WhitelistKind::CollectModule => &mut state.collect_module_whitelist,
            };
            if whitelisted {
                set.insert(address);
            } else {
                set.remove(&address);
            }
            events.push(HubEvent::Whitelisted {
                kind,
                address,
                whitelisted,
            });
            Ok(())
        })
        .await
    }

    // =========================================================================
    // MODULE BINDING
    // =========================================================================

    /// Binds a follow-module implementation to an address. Whitelisting the
    /// address is a separate governance action.
    pub fn bind_follow_module(&self, address: Address, module: Arc<dyn FollowModule>) {
        self.registry.bind_follow_module(address, module);
    }

    /// Binds a reference-module implementation to an address.
    pub fn bind_reference_module(&self, address: Address, module: Arc<dyn ReferenceModule>) {
        self.registry.bind_reference_module(address, module);
    }

    /// Binds a collect-module implementation to an address.
    pub fn bind_collect_module(&self, address: Address, module: Arc<dyn CollectModule>) {
        self.registry.bind_collect_module(address, module);
    }

    // =========================================================================
    // VIEWS
    // =========================================================================

    /// Current governance address.
    pub async fn governance(&self) -> Address {
        self.state.read().await.governance
    }

    /// Current emergency admin, if set.
    pub async fn emergency_admin(&self) -> Option<Address> {
        self.state.read().await.emergency_admin
    }

    /// Current protocol state.
    pub async fn protocol_state(&self) -> ProtocolState {
        self.state.read().await.protocol_state
    }

    /// A profile record, `None` if never created.
    pub async fn profile(&self, id: ProfileId) -> Option<Profile> {
        self.state.read().await.profiles.get(&id).cloned()
    }

    /// A publication record, `None` if never created.
    pub async fn publication(&self, key: PublicationRef) -> Option<Publication> {
        self.state.read().await.publications.get(&key).cloned()
    }

    /// Total profiles ever created.
    pub async fn profile_count(&self) -> u64 {
        self.state.read().await.profile_counter
    }

    /// Whether `executor` is approved for `profile` under its active config.
    pub async fn is_delegated_executor_approved(
        &self,
        profile: ProfileId,
        executor: Address,
    ) -> bool {
        self.state
            .read()
            .await
            .executor_config(profile)
            .is_approved(executor)
    }

    /// The active delegated-executor config number for a profile.
    pub async fn delegated_executors_config_number(&self, profile: ProfileId) -> u64 {
        self.state.read().await.executor_config(profile).active
    }

    /// The follow token binding `follower` to `target`, if any.
    pub async fn follow_token_of(
        &self,
        follower: ProfileId,
        target: ProfileId,
    ) -> Option<FollowTokenId> {
        self.state
            .read()
            .await
            .follow_books
            .get(&target)
            .and_then(|book| book.token_of(follower))
    }

    /// Whether an address is on a governance whitelist.
    pub async fn is_whitelisted(&self, kind: WhitelistKind, address: Address) -> bool {
        let state = self.state.read().await;
        match kind {
            WhitelistKind::ProfileCreator => state.profile_creator_whitelist.contains(&address),
            WhitelistKind::FollowModule => state.follow_module_whitelist.contains(&address),
            WhitelistKind::ReferenceModule => state.reference_module_whitelist.contains(&address),
            WhitelistKind::CollectModule => state.collect_module_whitelist.contains(&address),
        }
    }

    /// Snapshot of the event log.
    pub async fn events(&self) -> Vec<HubEvent> {
        self.events.read().await.clone()
    }

    /// Snapshot of call statistics.
    pub async fn stats(&self) -> HubStats {
        self.stats.read().await.clone()
    }

    /// Runs the structural invariant checks against current state.
    pub async fn check_invariants(&self) -> InvariantCheckResult {
        check_all_invariants(&*self.state.read().await)
    }
}

// =============================================================================
// SOCIAL GRAPH API
// =============================================================================

#[async_trait]
impl<L, D, V> SocialGraphApi for HubService<L, D, V>
where
    L: OwnershipLedger + 'static,
    D: ReceiptDeployer + 'static,
    V: MetaTxVerifier + 'static,
{
    #[instrument(skip(self, params))]
    async fn create_profile(
        &self,
        caller: Address,
        params: CreateProfileParams,
    ) -> Result<ProfileId, HubError> {
        let ctx = self.ctx(caller);
        self.mutate(|state, events| {
            check_protocol_state(state.protocol_state, Gate::NotPaused)?;
            if !state.profile_creator_whitelist.contains(&caller) {
                return Err(AuthorizationError::CreatorNotWhitelisted(caller).into());
            }
            if params.to.is_zero() {
                return Err(ValidationError::ZeroAddress.into());
            }

            let id = state.next_profile_id();
            state.profiles.insert(id, Profile::default());

            if let Some((module_address, init_data)) = &params.follow_module {
                state.assert_follow_module_whitelisted(*module_address)?;
                let module = self
                    .registry
                    .follow_module(*module_address)
                    .ok_or(ValidationError::ModuleNotRegistered(*module_address))?;
                state.profile_mut(id)?.follow_module = Some(*module_address);
                // Record persisted first; the module may read back through
                // the view.
                let init_result = module.initialize_follow_module(&ctx, id, init_data)?;
                state.profile_mut(id)?.follow_module_init_result = init_result;
            }

            self.ledger.mint(id, params.to);
            debug!(profile = %id, to = %params.to, "profile created");
            events.push(HubEvent::ProfileCreated {
                profile: id,
                to: params.to,
                creator: caller,
            });
            Ok(id)
        })
        .await
    }

    #[instrument(skip(self, uri))]
    async fn set_profile_metadata_uri(
        &self,
        caller: Address,
        profile: ProfileId,
        uri: String,
    ) -> Result<(), HubError> {
        self.mutate(|state, events| {
            check_protocol_state(state.protocol_state, Gate::NotPaused)?;
            require_owner_or_executor(state, self.ledger.as_ref(), caller, profile)?;
            state.profile_mut(profile)?.metadata_uri = uri.clone();
            events.push(HubEvent::ProfileMetadataSet { profile, uri });
            Ok(())
        })
        .await
    }

    #[instrument(skip(self, uri))]
    async fn set_profile_image_uri(
        &self,
        caller: Address,
        profile: ProfileId,
        uri: String,
    ) -> Result<(), HubError> {
        self.mutate(|state, events| {
            check_protocol_state(state.protocol_state, Gate::NotPaused)?;
            require_owner_or_executor(state, self.ledger.as_ref(), caller, profile)?;
            state.profile_mut(profile)?.image_uri = uri.clone();
            events.push(HubEvent::ProfileImageSet { profile, uri });
            Ok(())
        })
        .await
    }

    #[instrument(skip(self, uri))]
    async fn set_follow_receipt_uri(
        &self,
        caller: Address,
        profile: ProfileId,
        uri: String,
    ) -> Result<(), HubError> {
        self.mutate(|state, events| {
            check_protocol_state(state.protocol_state, Gate::NotPaused)?;
            require_owner_or_executor(state, self.ledger.as_ref(), caller, profile)?;
            state.profile_mut(profile)?.follow_receipt_uri = uri.clone();
            events.push(HubEvent::FollowReceiptUriSet { profile, uri });
            Ok(())
        })
        .await
    }

    #[instrument(skip(self, module))]
    async fn set_follow_module(
        &self,
        caller: Address,
        profile: ProfileId,
        module: Option<(Address, Bytes)>,
    ) -> Result<(), HubError> {
        let ctx = self.ctx(caller);
        self.mutate(|state, events| {
            check_protocol_state(state.protocol_state, Gate::NotPaused)?;
            require_owner_or_executor(state, self.ledger.as_ref(), caller, profile)?;
            state.profile(profile)?;

            match &module {
                Some((module_address, init_data)) => {
                    state.assert_follow_module_whitelisted(*module_address)?;
                    let implementation = self
                        .registry
                        .follow_module(*module_address)
                        .ok_or(ValidationError::ModuleNotRegistered(*module_address))?;
                    state.profile_mut(profile)?.follow_module = Some(*module_address);
                    let init_result =
                        implementation.initialize_follow_module(&ctx, profile, init_data)?;
                    state.profile_mut(profile)?.follow_module_init_result = init_result;
                }
                None => {
                    let record = state.profile_mut(profile)?;
                    record.follow_module = None;
                    record.follow_module_init_result = Bytes::new();
                }
            }
            events.push(HubEvent::FollowModuleSet {
                profile,
                module: module.as_ref().map(|(a, _)| *a),
            });
            Ok(())
        })
        .await
    }

    #[instrument(skip(self))]
    async fn burn_profile(&self, caller: Address, profile: ProfileId) -> Result<(), HubError> {
        self.mutate(|state, events| {
            check_protocol_state(state.protocol_state, Gate::NotPaused)?;
            state.profile(profile)?;
            require_owner(self.ledger.as_ref(), caller, profile)?;
            // Records stay readable; only the ownership token goes away, so
            // nothing can be authorized for the profile anymore.
            self.ledger.burn(profile);
            events.push(HubEvent::ProfileBurned { profile });
            Ok(())
        })
        .await
    }

    #[instrument(skip(self, executors, approvals))]
    async fn change_delegated_executors_config(
        &self,
        caller: Address,
        profile: ProfileId,
        executors: &[Address],
        approvals: &[bool],
        config_number: u64,
        switch_to_given_config: bool,
    ) -> Result<(), HubError> {
        self.mutate(|state, events| {
            check_protocol_state(state.protocol_state, Gate::NotPaused)?;
            // Owner only: an executor must not be able to grant itself or
            // others approvals.
            require_owner(self.ledger.as_ref(), caller, profile)?;
            graph::change_delegated_executors_config(
                state,
                events,
                profile,
                executors,
                approvals,
                config_number,
                switch_to_given_config,
            )
        })
        .await
    }

    #[instrument(skip(self, executors, approvals))]
    async fn change_current_delegated_executors_config(
        &self,
        caller: Address,
        profile: ProfileId,
        executors: &[Address],
        approvals: &[bool],
    ) -> Result<(), HubError> {
        self.mutate(|state, events| {
            check_protocol_state(state.protocol_state, Gate::NotPaused)?;
            require_owner(self.ledger.as_ref(), caller, profile)?;
            graph::change_current_delegated_executors_config(
                state, events, profile, executors, approvals,
            )
        })
        .await
    }

    #[instrument(skip(self, targets, blocked))]
    async fn set_block_status(
        &self,
        caller: Address,
        by_profile: ProfileId,
        targets: &[ProfileId],
        blocked: &[bool],
    ) -> Result<(), HubError> {
        self.mutate(|state, events| {
            check_protocol_state(state.protocol_state, Gate::PublishingEnabled)?;
            require_owner_or_executor(state, self.ledger.as_ref(), caller, by_profile)?;
            graph::set_block_status(state, events, by_profile, targets, blocked)
        })
        .await
    }

    #[instrument(skip(self, params))]
    async fn post(&self, caller: Address, params: PostParams) -> Result<PublicationRef, HubError> {
        let ctx = self.ctx(caller);
        self.mutate(|state, events| {
            check_protocol_state(state.protocol_state, Gate::PublishingEnabled)?;
            require_owner_or_executor(state, self.ledger.as_ref(), caller, params.profile_id)?;
            publication_engine::create_post(state, self.registry.as_ref(), &ctx, events, &params)
        })
        .await
    }

    #[instrument(skip(self, params))]
    async fn comment(
        &self,
        caller: Address,
        params: CommentParams,
    ) -> Result<PublicationRef, HubError> {
        let ctx = self.ctx(caller);
        self.mutate(|state, events| {
            check_protocol_state(state.protocol_state, Gate::PublishingEnabled)?;
            require_owner_or_executor(state, self.ledger.as_ref(), caller, params.profile_id)?;
            publication_engine::create_comment(state, self.registry.as_ref(), &ctx, events, &params)
        })
        .await
    }

    #[instrument(skip(self, params))]
    async fn quote(
        &self,
        caller: Address,
        params: QuoteParams,
    ) -> Result<PublicationRef, HubError> {
        let ctx = self.ctx(caller);
        self.mutate(|state, events| {
            check_protocol_state(state.protocol_state, Gate::PublishingEnabled)?;
            require_owner_or_executor(state, self.ledger.as_ref(), caller, params.profile_id)?;
            publication_engine::create_quote(state, self.registry.as_ref(), &ctx, events, &params)
        })
        .await
    }

    #[instrument(skip(self, params))]
    async fn mirror(
        &self,
        caller: Address,
        params: MirrorParams,
    ) -> Result<PublicationRef, HubError> {
        let ctx = self.ctx(caller);
        self.mutate(|state, events| {
            check_protocol_state(state.protocol_state, Gate::PublishingEnabled)?;
            require_owner_or_executor(state, self.ledger.as_ref(), caller, params.profile_id)?;
            publication_engine::create_mirror(state, self.registry.as_ref(), &ctx, events, &params)
        })
        .await
    }

    #[instrument(skip(self, targets, follow_tokens, datas))]
    async fn follow(
        &self,
        caller: Address,
        follower_profile: ProfileId,
        targets: &[ProfileId],
        follow_tokens: &[Option<FollowTokenId>],
        datas: &[Bytes],
    ) -> Result<Vec<FollowTokenId>, HubError> {
        let ctx = self.ctx(caller);
        self.mutate(|state, events| {
            check_protocol_state(state.protocol_state, Gate::PublishingEnabled)?;
            require_owner_or_executor(state, self.ledger.as_ref(), caller, follower_profile)?;
            graph::follow(
                state,
                self.registry.as_ref(),
                self.deployer.as_ref(),
                &ctx,
                events,
                follower_profile,
                targets,
                follow_tokens,
                datas,
            )
        })
        .await
    }

    #[instrument(skip(self, targets))]
    async fn unfollow(
        &self,
        caller: Address,
        follower_profile: ProfileId,
        targets: &[ProfileId],
    ) -> Result<(), HubError> {
        self.mutate(|state, events| {
            check_protocol_state(state.protocol_state, Gate::PublishingEnabled)?;
            require_owner_or_executor(state, self.ledger.as_ref(), caller, follower_profile)?;
            graph::unfollow(state, events, follower_profile, targets)
        })
        .await
    }

    #[instrument(skip(self, params))]
    async fn collect(&self, caller: Address, params: CollectParams) -> Result<u64, HubError> {
        let ctx = self.ctx(caller);
        self.mutate(|state, events| {
            check_protocol_state(state.protocol_state, Gate::PublishingEnabled)?;
            require_owner_or_executor(
                state,
                self.ledger.as_ref(),
                caller,
                params.collector_profile_id,
            )?;
            graph::collect(
                state,
                self.registry.as_ref(),
                self.deployer.as_ref(),
                &ctx,
                events,
                &params,
            )
        })
        .await
    }

    // =========================================================================
    // META-TRANSACTION VARIANTS
    // =========================================================================

    async fn set_profile_metadata_uri_with_sig(
        &self,
        sig: SignatureParams,
        profile: ProfileId,
        uri: String,
    ) -> Result<(), HubError> {
        let caller = self.recover(&sig)?;
        self.set_profile_metadata_uri(caller, profile, uri).await
    }

    async fn set_profile_image_uri_with_sig(
        &self,
        sig: SignatureParams,
        profile: ProfileId,
        uri: String,
    ) -> Result<(), HubError> {
        let caller = self.recover(&sig)?;
        self.set_profile_image_uri(caller, profile, uri).await
    }

    async fn set_follow_receipt_uri_with_sig(
        &self,
        sig: SignatureParams,
        profile: ProfileId,
        uri: String,
    ) -> Result<(), HubError> {
        let caller = self.recover(&sig)?;
        self.set_follow_receipt_uri(caller, profile, uri).await
    }

    async fn set_follow_module_with_sig(
        &self,
        sig: SignatureParams,
        profile: ProfileId,
        module: Option<(Address, Bytes)>,
    ) -> Result<(), HubError> {
        let caller = self.recover(&sig)?;
        self.set_follow_module(caller, profile, module).await
    }

    async fn burn_profile_with_sig(
        &self,
        sig: SignatureParams,
        profile: ProfileId,
    ) -> Result<(), HubError> {
        let caller = self.recover(&sig)?;
        self.burn_profile(caller, profile).await
    }

    async fn change_delegated_executors_config_with_sig(
        &self,
        sig: SignatureParams,
        profile: ProfileId,
        executors: &[Address],
        approvals: &[bool],
        config_number: u64,
        switch_to_given_config: bool,
    ) -> Result<(), HubError> {
        let caller = self.recover(&sig)?;
        self.change_delegated_executors_config(
            caller,
            profile,
            executors,
            approvals,
            config_number,
            switch_to_given_config,
        )
        .await
    }

    async fn change_current_delegated_executors_config_with_sig(
        &self,
        sig: SignatureParams,
        profile: ProfileId,
        executors: &[Address],
        approvals: &[bool],
    ) -> Result<(), HubError> {
        let caller = self.recover(&sig)?;
        self.change_current_delegated_executors_config(caller, profile, executors, approvals)
            .await
    }

    async fn set_block_status_with_sig(
        &self,
        sig: SignatureParams,
        by_profile: ProfileId,
        targets: &[ProfileId],
        blocked: &[bool],
    ) -> Result<(), HubError> {
        let caller = self.recover(&sig)?;
        self.set_block_status(caller, by_profile, targets, blocked)
            .await
    }

    async fn post_with_sig(
        &self,
        sig: SignatureParams,
        params: PostParams,
    ) -> Result<PublicationRef, HubError> {
        let caller = self.recover(&sig)?;
        self.post(caller, params).await
    }

    async fn comment_with_sig(
        &self,
        sig: SignatureParams,
        params: CommentParams,
    ) -> Result<PublicationRef, HubError> {
        let caller = self.recover(&sig)?;
        self.comment(caller, params).await
    }

    async fn quote_with_sig(
        &self,
        sig: SignatureParams,
        params: QuoteParams,
    ) -> Result<PublicationRef, HubError> {
        let caller = self.recover(&sig)?;
        self.quote(caller, params).await
    }

    async fn mirror_with_sig(
        &self,
        sig: SignatureParams,
        params: MirrorParams,
    ) -> Result<PublicationRef, HubError> {
        let caller = self.recover(&sig)?;
        self.mirror(caller, params).await
    }

    async fn follow_with_sig(
        &self,
        sig: SignatureParams,
        follower_profile: ProfileId,
        targets: &[ProfileId],
        follow_tokens: &[Option<FollowTokenId>],
        datas: &[Bytes],
    ) -> Result<Vec<FollowTokenId>, HubError> {
        let caller = self.recover(&sig)?;
        self.follow(caller, follower_profile, targets, follow_tokens, datas)
            .await
    }

    async fn unfollow_with_sig(
        &self,
        sig: SignatureParams,
        follower_profile: ProfileId,
        targets: &[ProfileId],
    ) -> Result<(), HubError> {
        let caller = self.recover(&sig)?;
        self.unfollow(caller, follower_profile, targets).await
    }

    async fn collect_with_sig(
        &self,
        sig: SignatureParams,
        params: CollectParams,
    ) -> Result<u64, HubError> {
        let caller = self.recover(&sig)?;
        self.collect(caller, params).await
    }

    // =========================================================================
    // CALLBACKS
    // =========================================================================

    #[instrument(skip(self))]
    async fn on_follow_receipt_transfer(
        &self,
        caller: Address,
        profile: ProfileId,
        token: FollowTokenId,
        from: Address,
        to: Address,
    ) -> Result<(), HubError> {
        self.mutate(|state, events| {
            // No receipt deployed means no contract may report transfers.
            let expected = state.profile(profile)?.follow_receipt;
            if expected != Some(caller) {
                return Err(HubError::CallerMismatch {
                    expected: expected.unwrap_or(Address::ZERO),
                    actual: caller,
                });
            }
            events.push(HubEvent::FollowReceiptTransferred {
                profile,
                token,
                from,
                to,
            });
            Ok(())
        })
        .await
    }

    #[instrument(skip(self))]
    async fn on_collect_receipt_transfer(
        &self,
        caller: Address,
        publication: PublicationRef,
        token: u64,
        from: Address,
        to: Address,
    ) -> Result<(), HubError> {
        self.mutate(|state, events| {
            let expected = state.publication(publication)?.collect_receipt;
            if expected != Some(caller) {
                return Err(HubError::CallerMismatch {
                    expected: expected.unwrap_or(Address::ZERO),
                    actual: caller,
                });
            }
            events.push(HubEvent::CollectReceiptTransferred {
                publication,
                token,
                from,
                to,
            });
            Ok(())
        })
        .await
    }

    #[instrument(skip(self))]
    async fn on_profile_transfer(
        &self,
        profile: ProfileId,
        from: Address,
        to: Address,
    ) -> Result<(), HubError> {
        // Initial mint carries no prior approvals to void.
        if from.is_zero() {
            return Ok(());
        }
        self.mutate(|state, events| {
            debug!(profile = %profile, %from, %to, "ownership moved, voiding executor approvals");
            graph::switch_to_fresh_config(state, events, profile)
        })
        .await
    }

    // =========================================================================
    // VIEWS
    // =========================================================================

    async fn publication_kind(&self, publication: PublicationRef) -> PublicationKind {
        self.state.read().await.publication_kind(publication)
    }

    async fn is_following(&self, follower: ProfileId, target: ProfileId) -> bool {
        self.state
            .read()
            .await
            .follow_books
            .get(&target)
            .is_some_and(|book| book.is_following(follower))
    }

    async fn is_blocked(&self, by: ProfileId, target: ProfileId) -> bool {
        self.state.read().await.blocks.contains(&(by, target))
    }

    async fn publication_count(&self, profile: ProfileId) -> Option<PubId> {
        self.state
            .read()
            .await
            .profiles
            .get(&profile)
            .map(|p| PubId(p.pub_count))
    }
}

// =============================================================================
// TESTS
// =============================================================================

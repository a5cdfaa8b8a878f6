//! Governance, pause states, delegated executors, and profile lifecycle.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::{addr, hub, profile_for, GOV};
    use agora_hub::errors::{AuthorizationError, HubError, StateError};
    use agora_hub::{HubEvent, ProtocolState, SocialGraphApi, WhitelistKind};
    use agora_types::{Bytes, CreateProfileParams, PostParams, ProfileId};

    fn post_params(profile: ProfileId) -> PostParams {
        PostParams {
            profile_id: profile,
            content_uri: "ipfs://post".to_string(),
            collect_module: None,
            reference_module: None,
        }
    }

    // =========================================================================
    // WHITELISTS AND GOVERNANCE HANDOVER
    // =========================================================================

    #[tokio::test]
    async fn test_creator_whitelist_gates_profile_creation() {
        let (hub, _, _) = hub();
        let alice = addr(1);
        let params = CreateProfileParams {
            to: alice,
            follow_module: None,
        };

        let err = hub.create_profile(alice, params.clone()).await.unwrap_err();
        assert!(matches!(
            err,
            HubError::Authorization(AuthorizationError::CreatorNotWhitelisted(_))
        ));

        hub.whitelist_profile_creator(GOV, alice, true).await.unwrap();
        hub.create_profile(alice, params.clone()).await.unwrap();
        assert!(hub.is_whitelisted(WhitelistKind::ProfileCreator, alice).await);

        // Removal closes the gate again.
        hub.whitelist_profile_creator(GOV, alice, false).await.unwrap();
        let err = hub.create_profile(alice, params).await.unwrap_err();
        assert!(matches!(
            err,
            HubError::Authorization(AuthorizationError::CreatorNotWhitelisted(_))
        ));
    }

    #[tokio::test]
    async fn test_governance_handover() {
        let (hub, _, _) = hub();
        let successor = addr(9);

        let err = hub
            .whitelist_profile_creator(successor, addr(1), true)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            HubError::Authorization(AuthorizationError::NotGovernance(_))
        ));

        hub.set_governance(GOV, successor).await.unwrap();
        assert_eq!(hub.governance().await, successor);

        // Old governance is powerless, the successor rules.
        let err = hub.set_governance(GOV, addr(10)).await.unwrap_err();
        assert!(matches!(
            err,
            HubError::Authorization(AuthorizationError::NotGovernance(_))
        ));
        hub.whitelist_profile_creator(successor, addr(1), true).await.unwrap();
    }

    // =========================================================================
    // PAUSE STATES
    // =========================================================================

    #[tokio::test]
    async fn test_publishing_pause_scenario() {
        let (hub, _, _) = hub();
        let alice = addr(1);
        let bob = addr(2);
        let pa = profile_for(&hub, alice).await;
        let pb = profile_for(&hub, bob).await;

        hub.set_protocol_state(GOV, ProtocolState::PublishingPaused)
            .await
            .unwrap();

        // Content and graph mutation halt.
        let err = hub.post(alice, post_params(pa)).await.unwrap_err();
        assert!(matches!(err, HubError::State(StateError::PublishingPaused)));
        let err = hub
            .follow(bob, pb, &[pa], &[None], &[Bytes::new()])
            .await
            .unwrap_err();
        assert!(matches!(err, HubError::State(StateError::PublishingPaused)));

        // Profile configuration and views keep working.
        hub.set_profile_metadata_uri(alice, pa, "ipfs://meta".to_string())
            .await
            .unwrap();
        assert_eq!(hub.profile(pa).await.unwrap().metadata_uri, "ipfs://meta");

        // Full pause halts configuration too.
        hub.set_protocol_state(GOV, ProtocolState::Paused).await.unwrap();
        let err = hub
            .set_profile_metadata_uri(alice, pa, "ipfs://meta2".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, HubError::State(StateError::Paused)));

        // Unpause restores everything.
        hub.set_protocol_state(GOV, ProtocolState::Unpaused).await.unwrap();
        hub.post(alice, post_params(pa)).await.unwrap();
    }

    #[tokio::test]
    async fn test_emergency_admin_cannot_relax() {
        let (hub, _, _) = hub();
        let admin = addr(9);
        hub.set_emergency_admin(GOV, Some(admin)).await.unwrap();

        hub.set_protocol_state(admin, ProtocolState::PublishingPaused)
            .await
            .unwrap();
        hub.set_protocol_state(admin, ProtocolState::Paused).await.unwrap();

        for relaxed in [ProtocolState::PublishingPaused, ProtocolState::Unpaused] {
            let err = hub.set_protocol_state(admin, relaxed).await.unwrap_err();
            assert!(matches!(
                err,
                HubError::Authorization(AuthorizationError::EmergencyAdminEscalationOnly)
            ));
        }

        hub.set_protocol_state(GOV, ProtocolState::Unpaused).await.unwrap();
        assert_eq!(hub.protocol_state().await, ProtocolState::Unpaused);
    }

    // =========================================================================
    // DELEGATED EXECUTORS
    // =========================================================================

    #[tokio::test]
    async fn test_executor_acts_until_config_switch() {
        let (hub, _, _) = hub();
        let alice = addr(1);
        let executor = addr(5);
        let pa = profile_for(&hub, alice).await;

        hub.change_delegated_executors_config(alice, pa, &[executor], &[true], 0, true)
            .await
            .unwrap();
        hub.post(executor, post_params(pa)).await.unwrap();

        // Switching to a fresh config number revokes without listing anyone.
        hub.change_delegated_executors_config(alice, pa, &[], &[], 1, true)
            .await
            .unwrap();
        assert!(!hub.is_delegated_executor_approved(pa, executor).await);
        let err = hub.post(executor, post_params(pa)).await.unwrap_err();
        assert!(matches!(
            err,
            HubError::Authorization(AuthorizationError::ExecutorInvalid { .. })
        ));

        // Switching back to the old number does not resurrect its approvals.
        hub.change_delegated_executors_config(alice, pa, &[], &[], 0, true)
            .await
            .unwrap();
        assert!(!hub.is_delegated_executor_approved(pa, executor).await);
        let err = hub.post(executor, post_params(pa)).await.unwrap_err();
        assert!(matches!(
            err,
            HubError::Authorization(AuthorizationError::ExecutorInvalid { .. })
        ));

        // Only an explicit re-approval brings the executor back.
        hub.change_current_delegated_executors_config(alice, pa, &[executor], &[true])
            .await
            .unwrap();
        hub.post(executor, post_params(pa)).await.unwrap();
    }

    #[tokio::test]
    async fn test_executor_cannot_grant_approvals() {
        let (hub, _, _) = hub();
        let alice = addr(1);
        let executor = addr(5);
        let pa = profile_for(&hub, alice).await;

        hub.change_delegated_executors_config(alice, pa, &[executor], &[true], 0, true)
            .await
            .unwrap();

        // An approved executor may act, but not extend approvals.
        let err = hub
            .change_current_delegated_executors_config(executor, pa, &[addr(6)], &[true])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            HubError::Authorization(AuthorizationError::NotOwner { .. })
        ));
    }

    #[tokio::test]
    async fn test_profile_uris_round_trip() {
        let (hub, _, _) = hub();
        let alice = addr(1);
        let pa = profile_for(&hub, alice).await;

        hub.set_profile_metadata_uri(alice, pa, "ipfs://meta".to_string())
            .await
            .unwrap();
        hub.set_profile_image_uri(alice, pa, "ipfs://image".to_string())
            .await
            .unwrap();
        hub.set_follow_receipt_uri(alice, pa, "ipfs://receipt".to_string())
            .await
            .unwrap();

        let profile = hub.profile(pa).await.unwrap();
        assert_eq!(profile.metadata_uri, "ipfs://meta");
        assert_eq!(profile.image_uri, "ipfs://image");
        assert_eq!(profile.follow_receipt_uri, "ipfs://receipt");

        // A second write replaces, never appends.
        hub.set_profile_metadata_uri(alice, pa, "ipfs://meta2".to_string())
            .await
            .unwrap();
        assert_eq!(hub.profile(pa).await.unwrap().metadata_uri, "ipfs://meta2");
    }

    #[tokio::test]
    async fn test_transfer_voids_approvals_and_burn_ends_authorization() {
        let (hub, ledger, _) = hub();
        let alice = addr(1);
        let bob = addr(2);
        let executor = addr(5);
        let pa = profile_for(&hub, alice).await;

        hub.change_delegated_executors_config(alice, pa, &[executor], &[true], 0, true)
            .await
            .unwrap();

        let from = ledger.transfer(pa, bob).unwrap();
        hub.on_profile_transfer(pa, from, bob).await.unwrap();

        // Approvals died with the transfer; the new owner acts directly.
        assert!(!hub.is_delegated_executor_approved(pa, executor).await);
        hub.post(bob, post_params(pa)).await.unwrap();
        let err = hub.post(alice, post_params(pa)).await.unwrap_err();
        assert!(matches!(err, HubError::Authorization(_)));

        // Burn is owner-only, then nothing can act for the profile.
        let err = hub.burn_profile(alice, pa).await.unwrap_err();
        assert!(matches!(
            err,
            HubError::Authorization(AuthorizationError::NotOwner { .. })
        ));
        hub.burn_profile(bob, pa).await.unwrap();
        assert!(matches!(
            hub.events().await.last(),
            Some(HubEvent::ProfileBurned { .. })
        ));
        let err = hub.post(bob, post_params(pa)).await.unwrap_err();
        assert!(matches!(err, HubError::Authorization(_)));

        // Records stay readable after the burn.
        assert!(hub.profile(pa).await.is_some());
    }
}

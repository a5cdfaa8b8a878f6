//! Stock policy modules exercised through the hub end to end.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::{addr, hub, profile_for, TestHub, GOV, HUB_ADDR};
    use agora_hub::errors::{HubError, ValidationError};
    use agora_hub::SocialGraphApi;
    use agora_modules::{
        FollowerOnlyReferenceModule, RevertFollowModule, SimpleCollectConfig, SimpleCollectModule,
    };
    use agora_types::{
        Address, Bytes, CollectParams, CommentParams, CreateProfileParams, MirrorParams,
        PostParams, ProfileId, PublicationRef,
    };
    use std::sync::Arc;

    const REVERT_FOLLOW: Address = Address::new([0xF1; 20]);
    const FOLLOWER_ONLY: Address = Address::new([0xF2; 20]);
    const SIMPLE_COLLECT: Address = Address::new([0xF3; 20]);

    async fn bind_stock_modules(hub: &TestHub) {
        hub.bind_follow_module(REVERT_FOLLOW, Arc::new(RevertFollowModule::new(HUB_ADDR)));
        hub.bind_reference_module(
            FOLLOWER_ONLY,
            Arc::new(FollowerOnlyReferenceModule::new(HUB_ADDR)),
        );
        hub.bind_collect_module(SIMPLE_COLLECT, Arc::new(SimpleCollectModule::new(HUB_ADDR)));
        hub.whitelist_follow_module(GOV, REVERT_FOLLOW, true).await.unwrap();
        hub.whitelist_reference_module(GOV, FOLLOWER_ONLY, true).await.unwrap();
        hub.whitelist_collect_module(GOV, SIMPLE_COLLECT, true).await.unwrap();
    }

    fn collect_params(collector: ProfileId, target: PublicationRef) -> CollectParams {
        CollectParams {
            collector_profile_id: collector,
            target,
            referrers: vec![],
            data: Bytes::new(),
        }
    }

    #[tokio::test]
    async fn test_revert_follow_module_makes_profile_unfollowable() {
        let (hub, _, _) = hub();
        bind_stock_modules(&hub).await;
        let alice = addr(1);
        let bob = addr(2);
        let pa = profile_for(&hub, alice).await;
        let pb = profile_for(&hub, bob).await;

        hub.follow(bob, pb, &[pa], &[None], &[Bytes::new()]).await.unwrap();

        // Attaching the module stops new follows without touching existing
        // ones.
        hub.set_follow_module(alice, pa, Some((REVERT_FOLLOW, Bytes::new())))
            .await
            .unwrap();
        assert!(hub.is_following(pb, pa).await);

        let carol = addr(3);
        let pc = profile_for(&hub, carol).await;
        let err = hub
            .follow(carol, pc, &[pa], &[None], &[Bytes::new()])
            .await
            .unwrap_err();
        assert!(matches!(err, HubError::Module(_)));
        assert!(!hub.is_following(pc, pa).await);

        // Clearing the module reopens follows.
        hub.set_follow_module(alice, pa, None).await.unwrap();
        hub.follow(carol, pc, &[pa], &[None], &[Bytes::new()]).await.unwrap();
    }

    #[tokio::test]
    async fn test_follower_only_reference_gate() {
        let (hub, _, _) = hub();
        bind_stock_modules(&hub).await;
        let alice = addr(1);
        let bob = addr(2);
        let pa = profile_for(&hub, alice).await;
        let pb = profile_for(&hub, bob).await;

        let gated = hub
            .post(
                alice,
                PostParams {
                    profile_id: pa,
                    content_uri: "ipfs://gated".to_string(),
                    collect_module: None,
                    reference_module: Some((FOLLOWER_ONLY, Bytes::new())),
                },
            )
            .await
            .unwrap();

        let comment = CommentParams {
            profile_id: pb,
            content_uri: "ipfs://reply".to_string(),
            pointed: gated,
            referrers: vec![],
            reference_module_data: Bytes::new(),
            collect_module: None,
            reference_module: None,
        };

        // Stranger rejected, follower passes, unfollow closes the gate again.
        let err = hub.comment(bob, comment.clone()).await.unwrap_err();
        assert!(matches!(err, HubError::Module(_)));

        hub.follow(bob, pb, &[pa], &[None], &[Bytes::new()]).await.unwrap();
        hub.comment(bob, comment.clone()).await.unwrap();
        hub.mirror(
            bob,
            MirrorParams {
                profile_id: pb,
                pointed: gated,
                referrers: vec![],
                reference_module_data: Bytes::new(),
            },
        )
        .await
        .unwrap();

        hub.unfollow(bob, pb, &[pa]).await.unwrap();
        let err = hub.comment(bob, comment).await.unwrap_err();
        assert!(matches!(err, HubError::Module(_)));
    }

    #[tokio::test]
    async fn test_simple_collect_limit_and_receipts() {
        let (hub, _, _) = hub();
        bind_stock_modules(&hub).await;
        let alice = addr(1);
        let pa = profile_for(&hub, alice).await;

        let config = serde_json::to_vec(&SimpleCollectConfig {
            collect_limit: Some(2),
            end_timestamp: None,
            follower_only: false,
        })
        .unwrap();
        let publication = hub
            .post(
                alice,
                PostParams {
                    profile_id: pa,
                    content_uri: "ipfs://collectible".to_string(),
                    collect_module: Some((SIMPLE_COLLECT, Bytes::from_vec(config))),
                    reference_module: None,
                },
            )
            .await
            .unwrap();

        let collectors = [addr(2), addr(3), addr(4)];
        let mut profiles = Vec::new();
        for owner in collectors {
            profiles.push(profile_for(&hub, owner).await);
        }

        let t1 = hub
            .collect(collectors[0], collect_params(profiles[0], publication))
            .await
            .unwrap();
        let t2 = hub
            .collect(collectors[1], collect_params(profiles[1], publication))
            .await
            .unwrap();
        assert_eq!((t1, t2), (1, 2));

        // Receipt contract deployed lazily on first collect.
        let record = hub.publication(publication).await.unwrap();
        assert!(record.collect_receipt.is_some());
        assert_eq!(record.collect_count, 2);

        // Third collect hits the limit and rolls back fully.
        let err = hub
            .collect(collectors[2], collect_params(profiles[2], publication))
            .await
            .unwrap_err();
        assert!(matches!(err, HubError::Module(_)));
        assert_eq!(hub.publication(publication).await.unwrap().collect_count, 2);
        assert!(hub.check_invariants().await.is_valid());
    }

    #[tokio::test]
    async fn test_collect_without_module_is_disabled() {
        let (hub, _, _) = hub();
        let alice = addr(1);
        let bob = addr(2);
        let pa = profile_for(&hub, alice).await;
        let pb = profile_for(&hub, bob).await;

        let plain = hub
            .post(
                alice,
                PostParams {
                    profile_id: pa,
                    content_uri: "ipfs://plain".to_string(),
                    collect_module: None,
                    reference_module: None,
                },
            )
            .await
            .unwrap();

        let err = hub.collect(bob, collect_params(pb, plain)).await.unwrap_err();
        assert!(matches!(
            err,
            HubError::Validation(ValidationError::CollectDisabled(_))
        ));
    }

    #[tokio::test]
    async fn test_unwhitelisted_or_unbound_module_rejected() {
        let (hub, _, _) = hub();
        bind_stock_modules(&hub).await;
        let alice = addr(1);
        let pa = profile_for(&hub, alice).await;

        // Bound in the registry but never whitelisted.
        let rogue = addr(0xEE);
        hub.bind_collect_module(rogue, Arc::new(SimpleCollectModule::new(HUB_ADDR)));
        let err = hub
            .post(
                alice,
                PostParams {
                    profile_id: pa,
                    content_uri: "ipfs://x".to_string(),
                    collect_module: Some((rogue, Bytes::new())),
                    reference_module: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            HubError::Validation(ValidationError::ModuleNotWhitelisted(_))
        ));

        // Whitelisted but nothing bound at the address.
        let ghost = addr(0xED);
        hub.whitelist_follow_module(GOV, ghost, true).await.unwrap();
        let err = hub
            .create_profile(
                alice,
                CreateProfileParams {
                    to: alice,
                    follow_module: Some((ghost, Bytes::new())),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            HubError::Validation(ValidationError::ModuleNotRegistered(_))
        ));
    }
}

//! Publication and graph flows: counters, pointers, referrers, blocks, and
//! batch-follow atomicity.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::{addr, hub, profile_for, GOV, HUB_ADDR};
    use agora_hub::errors::{HubError, ValidationError};
    use agora_hub::{HubEvent, PublicationKind, SocialGraphApi};
    use agora_modules::RevertFollowModule;
    use agora_types::{
        Bytes, CommentParams, CreateProfileParams, FollowTokenId, MirrorParams, PostParams,
        ProfileId, PubId, PublicationRef, QuoteParams,
    };
    use std::sync::Arc;

    fn post_params(profile: ProfileId, uri: &str) -> PostParams {
        PostParams {
            profile_id: profile,
            content_uri: uri.to_string(),
            collect_module: None,
            reference_module: None,
        }
    }

    fn comment_params(profile: ProfileId, pointed: PublicationRef) -> CommentParams {
        CommentParams {
            profile_id: profile,
            content_uri: "ipfs://comment".to_string(),
            pointed,
            referrers: vec![],
            reference_module_data: Bytes::new(),
            collect_module: None,
            reference_module: None,
        }
    }

    fn mirror_params(profile: ProfileId, pointed: PublicationRef) -> MirrorParams {
        MirrorParams {
            profile_id: profile,
            pointed,
            referrers: vec![],
            reference_module_data: Bytes::new(),
        }
    }

    // =========================================================================
    // COUNTERS AND POINTERS
    // =========================================================================

    #[tokio::test]
    async fn test_pub_ids_are_sequential_and_never_reused() {
        let (hub, _, _) = hub();
        let alice = addr(1);
        let profile = profile_for(&hub, alice).await;

        let p1 = hub.post(alice, post_params(profile, "ipfs://1")).await.unwrap();
        let p2 = hub.post(alice, post_params(profile, "ipfs://2")).await.unwrap();
        assert_eq!(p1.pub_id, PubId(1));
        assert_eq!(p2.pub_id, PubId(2));

        // A reverted call must not consume an id.
        let bad = PublicationRef::new(ProfileId(42), PubId(1));
        hub.comment(alice, comment_params(profile, bad)).await.unwrap_err();

        let p3 = hub.comment(alice, comment_params(profile, p1)).await.unwrap();
        assert_eq!(p3.pub_id, PubId(3));
        assert_eq!(hub.publication_count(profile).await, Some(PubId(3)));
        assert!(hub.check_invariants().await.is_valid());
    }

    #[tokio::test]
    async fn test_comment_quote_mirror_chain() {
        let (hub, _, _) = hub();
        let alice = addr(1);
        let bob = addr(2);
        let pa = profile_for(&hub, alice).await;
        let pb = profile_for(&hub, bob).await;

        let root = hub.post(alice, post_params(pa, "ipfs://root")).await.unwrap();
        let comment = hub.comment(bob, comment_params(pb, root)).await.unwrap();
        assert_eq!(hub.publication_kind(comment).await, PublicationKind::Comment);

        // Comments are themselves pointable.
        let quote = hub
            .quote(
                alice,
                QuoteParams {
                    profile_id: pa,
                    content_uri: "ipfs://quote".to_string(),
                    pointed: comment,
                    referrers: vec![],
                    reference_module_data: Bytes::new(),
                    collect_module: None,
                    reference_module: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(hub.publication_kind(quote).await, PublicationKind::Quote);

        let mirror = hub.mirror(bob, mirror_params(pb, quote)).await.unwrap();
        let record = hub.publication(mirror).await.unwrap();
        assert_eq!(record.kind, PublicationKind::Mirror);
        assert_eq!(record.pointed, Some(quote));
        assert!(record.content_uri.is_empty());
    }

    #[tokio::test]
    async fn test_pointing_at_mirror_or_nothing_rejected() {
        let (hub, _, _) = hub();
        let alice = addr(1);
        let profile = profile_for(&hub, alice).await;

        let root = hub.post(alice, post_params(profile, "ipfs://root")).await.unwrap();
        let mirror = hub.mirror(alice, mirror_params(profile, root)).await.unwrap();

        let err = hub
            .comment(alice, comment_params(profile, mirror))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            HubError::Validation(ValidationError::PointedAtMirror(_))
        ));

        let ghost = PublicationRef::new(profile, PubId(999));
        let err = hub.mirror(alice, mirror_params(profile, ghost)).await.unwrap_err();
        assert!(matches!(
            err,
            HubError::Validation(ValidationError::PublicationNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_referrer_must_reference_pointed_publication() {
        let (hub, _, _) = hub();
        let alice = addr(1);
        let bob = addr(2);
        let pa = profile_for(&hub, alice).await;
        let pb = profile_for(&hub, bob).await;

        let root = hub.post(alice, post_params(pa, "ipfs://root")).await.unwrap();
        let other = hub.post(alice, post_params(pa, "ipfs://other")).await.unwrap();
        let mirror_of_root = hub.mirror(bob, mirror_params(pb, root)).await.unwrap();

        // A mirror of the pointed publication is a valid referrer.
        let mut params = comment_params(pb, root);
        params.referrers = vec![mirror_of_root];
        hub.comment(bob, params).await.unwrap();

        // An unrelated publication is not.
        let mut params = comment_params(pb, root);
        params.referrers = vec![other];
        let err = hub.comment(bob, params).await.unwrap_err();
        assert!(matches!(
            err,
            HubError::Validation(ValidationError::InvalidReferrer(_))
        ));
    }

    // =========================================================================
    // BLOCKING
    // =========================================================================

    #[tokio::test]
    async fn test_block_is_bidirectional_and_forces_unfollow() {
        let (hub, _, _) = hub();
        let alice = addr(1);
        let bob = addr(2);
        let pa = profile_for(&hub, alice).await;
        let pb = profile_for(&hub, bob).await;

        let root = hub.post(alice, post_params(pa, "ipfs://root")).await.unwrap();
        hub.follow(bob, pb, &[pa], &[None], &[Bytes::new()]).await.unwrap();
        assert!(hub.is_following(pb, pa).await);

        hub.set_block_status(alice, pa, &[pb], &[true]).await.unwrap();

        // The block dissolved the follow.
        assert!(!hub.is_following(pb, pa).await);
        assert!(hub.check_invariants().await.is_valid());

        // Blocked side cannot interact with the blocker.
        let err = hub.comment(bob, comment_params(pb, root)).await.unwrap_err();
        assert!(matches!(err, HubError::Validation(ValidationError::Blocked { .. })));
        let err = hub
            .follow(bob, pb, &[pa], &[None], &[Bytes::new()])
            .await
            .unwrap_err();
        assert!(matches!(err, HubError::Validation(ValidationError::Blocked { .. })));

        // And the blocker cannot interact with the blocked either.
        let bob_post = hub.post(bob, post_params(pb, "ipfs://bob")).await.unwrap();
        let err = hub.comment(alice, comment_params(pa, bob_post)).await.unwrap_err();
        assert!(matches!(err, HubError::Validation(ValidationError::Blocked { .. })));

        // Unblock restores interaction.
        hub.set_block_status(alice, pa, &[pb], &[false]).await.unwrap();
        hub.follow(bob, pb, &[pa], &[None], &[Bytes::new()]).await.unwrap();
    }

    // =========================================================================
    // FOLLOW TOKENS AND BATCH ATOMICITY
    // =========================================================================

    #[tokio::test]
    async fn test_follow_token_survives_unfollow_and_reattaches() {
        let (hub, _, _) = hub();
        let alice = addr(1);
        let bob = addr(2);
        let pa = profile_for(&hub, alice).await;
        let pb = profile_for(&hub, bob).await;

        let tokens = hub.follow(bob, pb, &[pa], &[None], &[Bytes::new()]).await.unwrap();
        let token = tokens[0];
        assert_eq!(token, FollowTokenId(1));

        hub.unfollow(bob, pb, &[pa]).await.unwrap();
        assert!(!hub.is_following(pb, pa).await);
        assert_eq!(hub.follow_token_of(pb, pa).await, None);

        // Explicit re-attach of the unbound token.
        let tokens = hub
            .follow(bob, pb, &[pa], &[Some(token)], &[Bytes::new()])
            .await
            .unwrap();
        assert_eq!(tokens[0], token);
        assert_eq!(hub.follow_token_of(pb, pa).await, Some(token));
    }

    #[tokio::test]
    async fn test_batch_follow_is_all_or_nothing() {
        let (hub, _, _) = hub();
        let alice = addr(1);
        let follow_module = addr(0xF0);
        let p1 = profile_for(&hub, addr(10)).await;
        let p2 = profile_for(&hub, addr(11)).await;
        let follower = profile_for(&hub, alice).await;

        // Third target rejects every follow.
        hub.bind_follow_module(follow_module, Arc::new(RevertFollowModule::new(HUB_ADDR)));
        hub.whitelist_follow_module(GOV, follow_module, true).await.unwrap();
        hub.whitelist_profile_creator(GOV, addr(12), true).await.unwrap();
        let p3 = hub
            .create_profile(
                addr(12),
                CreateProfileParams {
                    to: addr(12),
                    follow_module: Some((follow_module, Bytes::new())),
                },
            )
            .await
            .unwrap();

        let err = hub
            .follow(
                alice,
                follower,
                &[p1, p2, p3],
                &[None, None, None],
                &[Bytes::new(), Bytes::new(), Bytes::new()],
            )
            .await
            .unwrap_err();
        assert!(matches!(err, HubError::Module(_)));

        // The first two targets were rolled back with the third.
        assert!(!hub.is_following(follower, p1).await);
        assert!(!hub.is_following(follower, p2).await);
        assert!(!hub.is_following(follower, p3).await);
        assert!(!hub
            .events()
            .await
            .iter()
            .any(|e| matches!(e, HubEvent::Followed { .. })));
        assert!(hub.check_invariants().await.is_valid());
    }

    #[tokio::test]
    async fn test_random_follow_churn_preserves_invariants() {
        use rand::{rngs::StdRng, Rng, SeedableRng};

        let (hub, _, _) = hub();
        let mut rng = StdRng::seed_from_u64(7);
        let owners: Vec<_> = (1u8..=5).map(addr).collect();
        let mut profiles = Vec::new();
        for owner in &owners {
            profiles.push(profile_for(&hub, *owner).await);
        }

        for _ in 0..200 {
            let a = rng.gen_range(0..profiles.len());
            let b = rng.gen_range(0..profiles.len());
            if a == b {
                continue;
            }
            let (follower, target) = (profiles[a], profiles[b]);
            // Errors (already-following, not-following) are expected churn;
            // the structural invariants must hold regardless.
            if rng.gen_bool(0.6) {
                let _ = hub
                    .follow(owners[a], follower, &[target], &[None], &[Bytes::new()])
                    .await;
            } else {
                let _ = hub.unfollow(owners[a], follower, &[target]).await;
            }
        }
        assert!(hub.check_invariants().await.is_valid());
    }

    #[tokio::test]
    async fn test_self_follow_and_double_follow_rejected() {
        let (hub, _, _) = hub();
        let alice = addr(1);
        let bob = addr(2);
        let pa = profile_for(&hub, alice).await;
        let pb = profile_for(&hub, bob).await;

        let err = hub
            .follow(alice, pa, &[pa], &[None], &[Bytes::new()])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            HubError::Validation(ValidationError::SelfInteraction(_))
        ));

        hub.follow(bob, pb, &[pa], &[None], &[Bytes::new()]).await.unwrap();
        let err = hub
            .follow(bob, pb, &[pa], &[None], &[Bytes::new()])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            HubError::Validation(ValidationError::AlreadyFollowing { .. })
        ));
    }
}

//! Signature-relayed entry points: recovery, replay protection, expiry, and
//! authorization of the recovered signer.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::{addr, hub, now, profile_for, signed};
    use agora_hub::errors::{AuthorizationError, HubError, SignatureError};
    use agora_hub::{PublicationKind, SocialGraphApi};
    use agora_types::{Bytes, PostParams, ProfileId};

    fn post_params(profile: ProfileId) -> PostParams {
        PostParams {
            profile_id: profile,
            content_uri: "ipfs://signed-post".to_string(),
            collect_module: None,
            reference_module: None,
        }
    }

    #[tokio::test]
    async fn test_signed_post_and_nonce_sequence() {
        let (hub, _, verifier) = hub();
        let alice = addr(1);
        let pa = profile_for(&hub, alice).await;
        let deadline = now() + 3600;

        let key = hub
            .post_with_sig(signed(alice, 0, deadline), post_params(pa))
            .await
            .unwrap();
        assert_eq!(hub.publication_kind(key).await, PublicationKind::Post);
        assert_eq!(verifier.nonce_of(alice), 1);

        // The next call must carry the next nonce.
        hub.post_with_sig(signed(alice, 1, deadline), post_params(pa))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_replay_and_expiry_rejected() {
        let (hub, _, _) = hub();
        let alice = addr(1);
        let pa = profile_for(&hub, alice).await;
        let deadline = now() + 3600;

        let sig = signed(alice, 0, deadline);
        hub.post_with_sig(sig.clone(), post_params(pa)).await.unwrap();

        let err = hub.post_with_sig(sig, post_params(pa)).await.unwrap_err();
        assert!(matches!(
            err,
            HubError::Signature(SignatureError::NonceInvalid { .. })
        ));

        let err = hub
            .post_with_sig(signed(alice, 1, now().saturating_sub(10)), post_params(pa))
            .await
            .unwrap_err();
        assert!(matches!(err, HubError::Signature(SignatureError::Expired { .. })));
    }

    #[tokio::test]
    async fn test_forged_signature_rejected() {
        let (hub, _, _) = hub();
        let alice = addr(1);
        let pa = profile_for(&hub, alice).await;
        let deadline = now() + 3600;

        let mut sig = signed(alice, 0, deadline);
        sig.signature = Bytes::from_slice(&[0u8; 32]);
        let err = hub.post_with_sig(sig, post_params(pa)).await.unwrap_err();
        assert!(matches!(
            err,
            HubError::Signature(SignatureError::SignatureInvalid)
        ));
    }

    #[tokio::test]
    async fn test_recovered_signer_still_needs_authorization() {
        let (hub, _, _) = hub();
        let alice = addr(1);
        let mallory = addr(13);
        let pa = profile_for(&hub, alice).await;
        let deadline = now() + 3600;

        // A valid signature from the wrong signer recovers fine but fails
        // the owner-or-executor check exactly like a direct caller would.
        let err = hub
            .post_with_sig(signed(mallory, 0, deadline), post_params(pa))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            HubError::Authorization(AuthorizationError::ExecutorInvalid { .. })
        ));

        // Once approved as an executor, the same signer's next signature
        // works.
        hub.change_delegated_executors_config(alice, pa, &[mallory], &[true], 0, true)
            .await
            .unwrap();
        hub.post_with_sig(signed(mallory, 1, deadline), post_params(pa))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_signed_graph_and_config_calls() {
        let (hub, _, _) = hub();
        let alice = addr(1);
        let bob = addr(2);
        let pa = profile_for(&hub, alice).await;
        let pb = profile_for(&hub, bob).await;
        let deadline = now() + 3600;

        hub.follow_with_sig(signed(bob, 0, deadline), pb, &[pa], &[None], &[Bytes::new()])
            .await
            .unwrap();
        assert!(hub.is_following(pb, pa).await);

        hub.unfollow_with_sig(signed(bob, 1, deadline), pb, &[pa])
            .await
            .unwrap();
        assert!(!hub.is_following(pb, pa).await);

        hub.set_block_status_with_sig(signed(alice, 0, deadline), pa, &[pb], &[true])
            .await
            .unwrap();
        assert!(hub.is_blocked(pa, pb).await);

        hub.set_profile_metadata_uri_with_sig(
            signed(alice, 1, deadline),
            pa,
            "ipfs://signed-meta".to_string(),
        )
        .await
        .unwrap();
        assert_eq!(
            hub.profile(pa).await.unwrap().metadata_uri,
            "ipfs://signed-meta"
        );
    }

    #[tokio::test]
    async fn test_signed_executor_config_calls() {
        let (hub, _, _) = hub();
        let alice = addr(1);
        let executor = addr(5);
        let pa = profile_for(&hub, alice).await;
        let deadline = now() + 3600;

        // Given-config variant, signed by the owner.
        hub.change_delegated_executors_config_with_sig(
            signed(alice, 0, deadline),
            pa,
            &[executor],
            &[true],
            0,
            true,
        )
        .await
        .unwrap();
        assert!(hub.is_delegated_executor_approved(pa, executor).await);

        // Current-config variant revokes in place.
        hub.change_current_delegated_executors_config_with_sig(
            signed(alice, 1, deadline),
            pa,
            &[executor],
            &[false],
        )
        .await
        .unwrap();
        assert!(!hub.is_delegated_executor_approved(pa, executor).await);

        // A signer who is not the owner is refused like a direct caller.
        let err = hub
            .change_current_delegated_executors_config_with_sig(
                signed(executor, 0, deadline),
                pa,
                &[executor],
                &[true],
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            HubError::Authorization(AuthorizationError::NotOwner { .. })
        ));
    }
}

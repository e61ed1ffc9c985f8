//! Open profile creation and lookup tests.

use identra::record::{OProfileOptions, RecordKind};

use super::helpers::*;

#[tokio::test]
async fn add_oprofile_then_fetch_returns_exactly_that_profile() {
    let manager = setup_manager();
    let user = create_named_user(&manager, "alice").await;

    let profile = manager
        .add_oprofile(OProfileOptions {
            user_id: user.id.clone(),
            provider: Some("box".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(profile.kind, RecordKind::OProfile);

    let profiles = manager.get_oprofiles_of_user(&user.id).await.unwrap();
    assert_eq!(profiles, vec![profile]);
}

#[tokio::test]
async fn oprofile_preserves_opaque_provider_data() {
    let manager = setup_manager();
    let user = create_named_user(&manager, "alice").await;

    let detail = serde_json::json!({"login": "alice", "emails": ["a@example.com"]});
    let oauth = serde_json::json!({"access_token": "tok", "refresh_token": "ref"});
    manager
        .add_oprofile(OProfileOptions {
            id: Some("profile-1".to_string()),
            user_id: user.id.clone(),
            provider: Some("box".to_string()),
            detail: Some(detail.clone()),
            oauth: Some(oauth.clone()),
        })
        .await
        .unwrap();

    let profiles = manager.get_oprofiles_of_user(&user.id).await.unwrap();
    assert_eq!(profiles.len(), 1);
    assert_eq!(profiles[0].id, "profile-1");
    assert_eq!(profiles[0].detail, Some(detail));
    assert_eq!(profiles[0].oauth, Some(oauth));
}

#[tokio::test]
async fn profiles_are_scoped_to_their_user() {
    let manager = setup_manager();
    let alice = create_named_user(&manager, "alice").await;
    let bob = create_named_user(&manager, "bob").await;

    manager
        .add_oprofile(OProfileOptions {
            user_id: alice.id.clone(),
            provider: Some("box".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(manager.get_oprofiles_of_user(&alice.id).await.unwrap().len(), 1);
    assert!(manager.get_oprofiles_of_user(&bob.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn profiles_of_unknown_user_are_empty() {
    let manager = setup_manager();
    let profiles = manager.get_oprofiles_of_user("no-such-user").await.unwrap();
    assert!(profiles.is_empty());
}

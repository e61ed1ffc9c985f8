//! Key creation and lookup tests.

use identra::record::KeyLevel;

use super::helpers::*;

#[tokio::test]
async fn create_key_for_user_is_normal_level() {
    let manager = setup_manager();
    let user = create_named_user(&manager, "alice").await;

    let key = manager.create_key_for_user(&user.id).await.unwrap();
    assert_eq!(key.level, KeyLevel::Normal);
    assert_eq!(key.user_id, user.id);
    assert!(!key.id.is_empty());
    assert_eq!(key.expired_at, None);
}

#[tokio::test]
async fn get_key_round_trips() {
    let manager = setup_manager();
    let user = create_named_user(&manager, "alice").await;

    let key = manager.create_key_for_user(&user.id).await.unwrap();
    let fetched = manager.get_key(&key.id).await.unwrap();
    assert_eq!(fetched, Some(key));
}

#[tokio::test]
async fn get_key_on_unknown_id_is_absent_not_an_error() {
    let manager = setup_manager();
    assert_eq!(manager.get_key("no-such-key").await.unwrap(), None);
}

#[tokio::test]
async fn get_keys_of_user_returns_all_keys() {
    let manager = setup_manager();
    let user = create_named_user(&manager, "alice").await;

    manager.create_key_for_user(&user.id).await.unwrap();
    manager.create_key_for_user(&user.id).await.unwrap();

    let keys = manager.get_keys_of_user(&user.id).await.unwrap();
    // Root key from creation plus the two normal keys.
    assert_eq!(keys.len(), 3);
    let roots = keys.iter().filter(|k| k.level == KeyLevel::Root).count();
    assert_eq!(roots, 1);
    assert!(keys.iter().all(|k| k.user_id == user.id));
}

#[tokio::test]
async fn keys_of_unknown_user_are_empty() {
    let manager = setup_manager();
    let keys = manager.get_keys_of_user("no-such-user").await.unwrap();
    assert!(keys.is_empty());
}

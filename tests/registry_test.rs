mod common;

use playlist_inbox::{error::ConfigError, management::PlaylistRegistry};
use tempfile::tempdir;

#[tokio::test]
async fn test_missing_store_opens_empty() {
    let dir = tempdir().unwrap();
    let registry = common::registry(&dir).await;

    assert!(registry.list().await.is_empty());
    assert!(matches!(
        registry.default_playlist().await,
        Err(ConfigError::NoDefaultPlaylist)
    ));
}

#[tokio::test]
async fn test_create_playlist_moves_default() {
    let dir = tempdir().unwrap();
    let registry = common::registry(&dir).await;

    let first = registry.create_playlist("remote-a").await.unwrap();
    let second = registry.create_playlist("remote-b").await.unwrap();
    let third = registry.create_playlist("remote-c").await.unwrap();

    assert_eq!((first.id, second.id, third.id), (1, 2, 3));

    let defaults: Vec<_> = registry
        .list()
        .await
        .into_iter()
        .filter(|r| r.is_default)
        .collect();
    assert_eq!(defaults, vec![third.clone()]);
    assert_eq!(registry.default_playlist().await.unwrap(), third);
}

#[tokio::test]
async fn test_records_survive_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("playlists.json");

    {
        let registry = PlaylistRegistry::open(&path).await.unwrap();
        registry.create_playlist("remote-a").await.unwrap();
        registry.create_playlist("remote-b").await.unwrap();
    }

    let reopened = PlaylistRegistry::open(&path).await.unwrap();
    let records = reopened.list().await;
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].remote_key, "remote-a");
    assert!(!records[0].is_default);
    assert!(records[1].is_default);

    // no temp file left behind
    assert!(!dir.path().join("playlists.json.tmp").exists());
}

#[tokio::test]
async fn test_resolve_by_local_id() {
    let dir = tempdir().unwrap();
    let registry = common::registry(&dir).await;
    let created = registry.create_playlist("remote-a").await.unwrap();

    assert_eq!(registry.resolve("1").await, Some(created.clone()));
    assert_eq!(registry.resolve(" 1 ").await, Some(created));
}

#[tokio::test]
async fn test_resolve_malformed_or_unknown_id() {
    let dir = tempdir().unwrap();
    let registry = common::registry(&dir).await;
    registry.create_playlist("remote-a").await.unwrap();

    assert_eq!(registry.resolve("party").await, None);
    assert_eq!(registry.resolve("").await, None);
    assert_eq!(registry.resolve("-1").await, None);
    assert_eq!(registry.resolve("42").await, None);
}

#[tokio::test]
async fn test_corrupt_store_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("playlists.json");
    std::fs::write(&path, "not json").unwrap();

    assert!(PlaylistRegistry::open(&path).await.is_err());
}

#[tokio::test]
async fn test_failed_write_keeps_previous_state() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("playlists.json");
    let registry = PlaylistRegistry::open(&path).await.unwrap();
    let first = registry.create_playlist("remote-a").await.unwrap();

    // a directory where the temp file should go makes the write fail
    std::fs::create_dir(dir.path().join("playlists.json.tmp")).unwrap();

    assert!(registry.create_playlist("remote-b").await.is_err());
    assert_eq!(registry.list().await, vec![first.clone()]);
    assert_eq!(registry.default_playlist().await.unwrap(), first);
}

#[tokio::test]
async fn test_registries_sharing_a_store_see_each_other() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("playlists.json");
    let server = PlaylistRegistry::open(&path).await.unwrap();
    let operator = PlaylistRegistry::open(&path).await.unwrap();

    let from_operator = operator.create_playlist("remote-a").await.unwrap();
    assert_eq!(server.default_playlist().await.unwrap(), from_operator);
    assert_eq!(server.resolve("1").await, Some(from_operator));

    let from_server = server.create_playlist("remote-b").await.unwrap();
    assert_eq!(from_server.id, 2);

    let records = PlaylistRegistry::open(&path).await.unwrap().list().await;
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].remote_key, "remote-a");
    assert_eq!(records[1].remote_key, "remote-b");
    assert_eq!(records.iter().filter(|r| r.is_default).count(), 1);
    assert_eq!(operator.default_playlist().await.unwrap(), from_server);
}

mod common;

use playlist_inbox::{
    error::{ApiError, AuthError, CatalogError},
    spotify::CatalogClient,
};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, body_string_contains, header, method, path, query_param},
};

#[tokio::test]
async fn test_search_returns_first_track() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Yesterday"))
        .and(query_param("type", "track"))
        .and(query_param("limit", "1"))
        .and(header("authorization", "Bearer valid"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(common::search_hit("Yesterday", "The Beatles")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let catalog = CatalogClient::new(server.uri());
    let session = common::session(&server, "valid");

    let track = catalog.search(&session, "Yesterday").await.unwrap().unwrap();
    assert_eq!(track.key, "spotify:track:t1");
    assert_eq!(track.name, "Yesterday");
    assert_eq!(track.artist, "The Beatles");
}

#[tokio::test]
async fn test_search_joins_multiple_artists() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tracks": {
                "items": [{
                    "id": "t9",
                    "name": "Under Pressure",
                    "uri": "spotify:track:t9",
                    "artists": [
                        { "id": "a1", "name": "Queen" },
                        { "id": "a2", "name": "David Bowie" }
                    ]
                }],
                "total": 1
            }
        })))
        .mount(&server)
        .await;

    let catalog = CatalogClient::new(server.uri());
    let session = common::session(&server, "valid");

    let track = catalog.search(&session, "pressure").await.unwrap().unwrap();
    assert_eq!(track.artist, "Queen, David Bowie");
}

#[tokio::test]
async fn test_search_without_results_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::search_miss()))
        .mount(&server)
        .await;

    let catalog = CatalogClient::new(server.uri());
    let session = common::session(&server, "valid");

    assert_eq!(catalog.search(&session, "zzzz").await.unwrap(), None);
}

#[tokio::test]
async fn test_unauthorized_refreshes_once_and_retries_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/playlists/p1/tracks"))
        .and(header("authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/playlists/p1/tracks"))
        .and(header("authorization", "Bearer fresh"))
        .and(body_json(json!({ "uris": ["spotify:track:t1"] })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "snapshot_id": "s1" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/playlists/p1"))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(common::playlist_details("Office", "https://open.spotify.com/p1")),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=refresh-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "fresh",
            "expires_in": 3600,
            "scope": "playlist-modify-public"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let catalog = CatalogClient::new(server.uri());
    let session = common::session(&server, "stale");

    let snapshot = catalog
        .add_track(&session, "p1", "spotify:track:t1")
        .await
        .unwrap();
    assert_eq!(snapshot.name, "Office");
    assert_eq!(snapshot.short_url, "https://open.spotify.com/p1");

    // refresh token was not rotated, so the old one is kept
    let current = session.tokens().current_credential().await;
    assert_eq!(current.access_token, "fresh");
    assert_eq!(current.refresh_token, "refresh-1");
}

#[tokio::test]
async fn test_second_unauthorized_is_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/playlists/p1/tracks"))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "fresh",
            "refresh_token": "refresh-2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let catalog = CatalogClient::new(server.uri());
    let session = common::session(&server, "stale");

    let err = catalog
        .add_track(&session, "p1", "spotify:track:t1")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Auth(AuthError::StillUnauthorized)));

    // a rotated refresh token replaces the old one
    assert_eq!(
        session.tokens().current_credential().await.refresh_token,
        "refresh-2"
    );
}

#[tokio::test]
async fn test_rejected_refresh_is_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "error": "invalid_grant" })))
        .expect(1)
        .mount(&server)
        .await;

    let catalog = CatalogClient::new(server.uri());
    let session = common::session(&server, "stale");

    let err = catalog.search(&session, "Yesterday").await.unwrap_err();
    assert!(matches!(err, ApiError::Auth(AuthError::Rejected { .. })));
    assert_eq!(
        session.tokens().current_credential().await.access_token,
        "stale"
    );
}

#[tokio::test]
async fn test_refresh_without_access_token_is_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "scope": "x" })))
        .mount(&server)
        .await;

    let catalog = CatalogClient::new(server.uri());
    let session = common::session(&server, "stale");

    let err = catalog.search(&session, "Yesterday").await.unwrap_err();
    assert!(matches!(err, ApiError::Auth(AuthError::MissingAccessToken)));
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let catalog = CatalogClient::new(server.uri());
    let session = common::session(&server, "valid");

    let err = catalog.search(&session, "Yesterday").await.unwrap_err();
    match err {
        ApiError::Catalog(CatalogError::Status { status, body }) => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(body, "boom");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_bad_request_is_catalog_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/playlists/p1/tracks"))
        .respond_with(ResponseTemplate::new(400))
        .expect(1)
        .mount(&server)
        .await;

    let catalog = CatalogClient::new(server.uri());
    let session = common::session(&server, "valid");

    let err = catalog
        .add_track(&session, "p1", "spotify:track:t1")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Catalog(CatalogError::Status { .. })));
}

#[tokio::test]
async fn test_unexpected_payload_is_catalog_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "albums": {} })))
        .mount(&server)
        .await;

    let catalog = CatalogClient::new(server.uri());
    let session = common::session(&server, "valid");

    let err = catalog.search(&session, "Yesterday").await.unwrap_err();
    assert!(matches!(err, ApiError::Catalog(CatalogError::Payload(_))));
}

#[tokio::test]
async fn test_create_playlist_for_account() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/owner/playlists"))
        .and(body_json(json!({
            "name": "Office Radio",
            "description": "",
            "public": true
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "id": "p42", "name": "Office Radio" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let catalog = CatalogClient::new(format!("{}/", server.uri()));
    let session = common::session(&server, "valid");

    assert_eq!(
        catalog
            .create_playlist(&session, "Office Radio")
            .await
            .unwrap(),
        "p42"
    );
}

//! Server client integration tests against a mock HTTP server

use encore_server_client::{EncoreServerClient, ServerConfig};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> EncoreServerClient {
    EncoreServerClient::new(ServerConfig::new(server.uri())).unwrap()
}

// ===== Play Logging =====

#[tokio::test]
async fn log_track_posts_expected_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/logger/track/log"))
        .and(body_json(json!({
            "trackhash": "abc123",
            "duration": 30,
            "source": "al:albumhash"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client.log_track("abc123", 30, "al:albumhash").await.unwrap();
}

#[tokio::test]
async fn log_track_sends_bearer_token_when_configured() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/logger/track/log"))
        .and(header("authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let config = ServerConfig::new(server.uri()).with_token("secret-token");
    let client = EncoreServerClient::new(config).unwrap();
    client.log_track("abc123", 30, "search").await.unwrap();
}

#[tokio::test]
async fn log_track_surfaces_server_errors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/logger/track/log"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database unavailable"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let error = client.log_track("abc123", 30, "search").await.unwrap_err();

    let message = error.to_string();
    assert!(message.contains("500"), "unexpected error: {message}");
    assert!(message.contains("database unavailable"));
}

// ===== Artwork Prefetch =====

#[tokio::test]
async fn prefetch_artwork_busts_caches_per_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/img/thumbnail/abc123.webp"))
        .and(query_param("nocache", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0u8; 64]))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/img/thumbnail/abc123.webp"))
        .and(query_param("nocache", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0u8; 64]))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client.prefetch_artwork("abc123.webp").await;
    client.prefetch_artwork("abc123.webp").await;
}

#[tokio::test]
async fn prefetch_artwork_swallows_failures() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    // Must not panic or return: prefetch is best-effort
    client.prefetch_artwork("missing.webp").await;
}

#[tokio::test]
async fn prefetch_artwork_tolerates_unreachable_server() {
    // Nothing listens here; the call must still complete quietly
    let client =
        EncoreServerClient::new(ServerConfig::new("http://127.0.0.1:1")).unwrap();
    client.prefetch_artwork("abc123.webp").await;
}

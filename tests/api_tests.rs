//! Integration tests for GET /api/skin.

mod common;

use axum::http::header::{CACHE_CONTROL, CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::StatusCode;
use base64::Engine;
use common::{skin_png, MockUpstream, TestServer, LEGACY_LOOKUP, SERVICES_LOOKUP, SESSION_PROFILE};
use serde_json::json;

const UUID: &str = "069a79f444e94726a5befca90e38aaf5";
const TEXTURE_URL: &str = "https://textures.minecraft.net/texture/1a4af718455d4aab";

fn session_profile(texture_url: &str) -> serde_json::Value {
    let textures = json!({
        "timestamp": 1700000000000u64,
        "profileName": "Notch",
        "textures": { "SKIN": { "url": texture_url } }
    });
    let value = base64::engine::general_purpose::STANDARD.encode(textures.to_string());
    json!({
        "id": UUID,
        "name": "Notch",
        "properties": [{ "name": "textures", "value": value }]
    })
}

/// Lookup without embedded skins, then session profile, then the image.
fn session_path_upstream(skin: Vec<u8>) -> MockUpstream {
    MockUpstream::new()
        .json(
            &format!("{SERVICES_LOOKUP}/Notch"),
            json!({ "id": UUID, "name": "Notch" }),
        )
        .json(&format!("{SESSION_PROFILE}/{UUID}"), session_profile(TEXTURE_URL))
        .respond(TEXTURE_URL, 200, skin)
}

#[tokio::test]
async fn resolves_skin_through_session_profile() {
    let skin = skin_png();
    let server = TestServer::new(session_path_upstream(skin.clone()));

    let (status, response) = server.request("GET", "/api/skin?username=Notch").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response.headers()[CONTENT_TYPE], "image/png");
    assert_eq!(response.headers()[CACHE_CONTROL], "no-store");
    assert_eq!(
        response.headers()[CONTENT_LENGTH],
        skin.len().to_string().as_str()
    );

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(body.as_ref(), skin.as_slice());
    assert_eq!(
        server.upstream.calls(),
        vec![
            format!("{SERVICES_LOOKUP}/Notch"),
            format!("{SESSION_PROFILE}/{UUID}"),
            TEXTURE_URL.to_string(),
        ]
    );
}

#[tokio::test]
async fn short_username_is_rejected_without_network() {
    let server = TestServer::new(MockUpstream::new());

    let (status, body) = server.get_json("/api/skin?username=ab").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_username");
    assert_eq!(
        body["message"],
        "Username must be 3-16 characters: letters, numbers, underscore."
    );
    assert!(body.get("trace").is_none());
    assert!(server.upstream.calls().is_empty());
}

#[tokio::test]
async fn debug_invalid_username_carries_empty_trace() {
    let server = TestServer::new(MockUpstream::new());

    let (status, body) = server.get_json("/api/skin?username=ab&debug=1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_username");
    assert_eq!(body["trace"], json!([]));
    assert!(server.upstream.calls().is_empty());
}

#[tokio::test]
async fn missing_username_is_rejected() {
    let server = TestServer::new(MockUpstream::new());
    let (status, body) = server.get_json("/api/skin").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_username");
    assert!(server.upstream.calls().is_empty());
}

#[tokio::test]
async fn username_is_trimmed_before_validation() {
    let server = TestServer::new(session_path_upstream(skin_png()));
    let (status, _) = server.request("GET", "/api/skin?username=%20Notch%20").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn unknown_account_on_both_sources_is_404() {
    let name = "Xy9_NoSuchAcct";
    let server = TestServer::new(
        MockUpstream::new()
            .respond(&format!("{SERVICES_LOOKUP}/{name}"), 404, Vec::new())
            .respond(&format!("{LEGACY_LOOKUP}/{name}"), 204, Vec::new()),
    );

    let (status, body) = server
        .get_json(&format!("/api/skin?username={name}"))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "username_not_found");
    assert_eq!(body["message"], "Username not found.");
    assert!(body.get("trace").is_none());
    assert_eq!(server.upstream.calls().len(), 2);
}

#[tokio::test]
async fn transport_fault_on_first_source_is_503_without_fallback() {
    let server = TestServer::new(MockUpstream::new().fail(&format!("{SERVICES_LOOKUP}/Notch")));

    let (status, body) = server.get_json("/api/skin?username=Notch").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "network_failure");
    assert_eq!(
        server.upstream.calls(),
        vec![format!("{SERVICES_LOOKUP}/Notch")]
    );
}

#[tokio::test]
async fn broken_session_profile_is_502() {
    let server = TestServer::new(
        MockUpstream::new()
            .json(
                &format!("{SERVICES_LOOKUP}/Notch"),
                json!({ "id": UUID, "name": "Notch" }),
            )
            .respond(&format!("{SESSION_PROFILE}/{UUID}"), 500, b"oops".to_vec()),
    );

    let (status, body) = server.get_json("/api/skin?username=Notch").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "upstream_failure");
    assert_eq!(body["message"], "Mojang APIs returned an invalid response.");
}

#[tokio::test]
async fn other_methods_are_405() {
    let server = TestServer::new(MockUpstream::new());
    for method in ["POST", "PUT", "DELETE"] {
        let (status, response) = server.request(method, "/api/skin?username=Notch").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            response.headers()[CONTENT_TYPE],
            "application/json; charset=utf-8"
        );
    }
    assert!(server.upstream.calls().is_empty());
}

#[tokio::test]
async fn debug_success_returns_json_with_trace() {
    let skin = skin_png();
    let server = TestServer::new(session_path_upstream(skin.clone()));

    let (status, body) = server.get_json("/api/skin?username=Notch&debug=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], "ok");
    assert_eq!(body["message"], "Skin resolved successfully.");
    assert_eq!(body["bytes"], skin.len());

    let steps: Vec<&str> = body["trace"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["step"].as_str().unwrap())
        .collect();
    assert_eq!(steps.first(), Some(&"uuid_lookup_minecraftservices"));
    assert!(steps.contains(&"session_profile_lookup"));
    assert_eq!(steps.last(), Some(&"skin_fetch_from_session_profile"));
}

#[tokio::test]
async fn debug_failure_attaches_trace() {
    let server = TestServer::new(MockUpstream::new().fail(&format!("{SERVICES_LOOKUP}/Notch")));

    let (status, body) = server.get_json("/api/skin?username=Notch&debug=1").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    let trace = body["trace"].as_array().unwrap();
    assert!(!trace.is_empty());
    assert_eq!(trace.last().unwrap()["step"], "final");
    assert!(trace.iter().all(|entry| entry["time"].is_string()));
}

//! Common test utilities: a scripted upstream and a router wired to it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use image::RgbaImage;
use skinpack_lib::api::create_router;
use skinpack_lib::core::resolver::{Accept, TransportError, Upstream, UpstreamResponse};
use skinpack_lib::core::skin::encode_png;
use skinpack_lib::core::state::{AppState, Settings};
use tower::ServiceExt;

#[allow(dead_code)]
pub const SERVICES_LOOKUP: &str =
    "https://api.minecraftservices.com/minecraft/profile/lookup/name";
#[allow(dead_code)]
pub const LEGACY_LOOKUP: &str = "https://api.mojang.com/users/profiles/minecraft";
#[allow(dead_code)]
pub const SESSION_PROFILE: &str = "https://sessionserver.mojang.com/session/minecraft/profile";

enum Reply {
    Response(UpstreamResponse),
    Transport,
}

/// Upstream answering from a URL table. Every call is recorded;
/// unscripted URLs fail the test.
#[derive(Default)]
pub struct MockUpstream {
    replies: HashMap<String, Reply>,
    calls: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl MockUpstream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, url: &str, status: u16, body: Vec<u8>) -> Self {
        self.replies.insert(
            url.to_string(),
            Reply::Response(UpstreamResponse {
                status,
                content_type: None,
                body,
            }),
        );
        self
    }

    pub fn json(self, url: &str, value: serde_json::Value) -> Self {
        self.respond(url, 200, serde_json::to_vec(&value).unwrap())
    }

    pub fn fail(mut self, url: &str) -> Self {
        self.replies.insert(url.to_string(), Reply::Transport);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Upstream for MockUpstream {
    async fn get(&self, url: &str, _accept: Accept) -> Result<UpstreamResponse, TransportError> {
        self.calls.lock().unwrap().push(url.to_string());
        match self.replies.get(url) {
            Some(Reply::Response(response)) => Ok(response.clone()),
            Some(Reply::Transport) => Err(TransportError("connection refused".into())),
            None => panic!("unexpected upstream call to {url}"),
        }
    }
}

/// Router plus a handle on the upstream behind it.
#[allow(dead_code)]
pub struct TestServer {
    pub router: axum::Router,
    pub upstream: Arc<MockUpstream>,
}

#[allow(dead_code)]
impl TestServer {
    pub fn new(upstream: MockUpstream) -> Self {
        let upstream = Arc::new(upstream);
        let state = AppState::with_upstream(Settings::default(), upstream.clone());
        Self {
            router: create_router(state),
            upstream,
        }
    }

    pub async fn request(&self, method: &str, uri: &str) -> (StatusCode, Response<Body>) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = self.router.clone().oneshot(request).await.unwrap();
        (response.status(), response)
    }

    /// Status plus body parsed as JSON (`Null` when empty or not JSON).
    pub async fn get_json(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let (status, response) = self.request("GET", uri).await;
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    }
}

#[allow(dead_code)]
pub fn skin_png() -> Vec<u8> {
    let mut image = RgbaImage::new(64, 64);
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        *pixel = image::Rgba([x as u8 * 3, y as u8 * 3, 90, 255]);
    }
    encode_png(&image).unwrap()
}

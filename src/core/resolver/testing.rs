use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::upstream::{Accept, TransportError, Upstream, UpstreamResponse};

enum Scripted {
    Response(UpstreamResponse),
    Transport,
}

/// In-memory upstream answering from a URL table and recording every call.
/// Unscripted URLs panic so an unexpected request fails the test loudly.
#[derive(Default)]
pub struct ScriptedUpstream {
    responses: HashMap<String, Scripted>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedUpstream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn body(mut self, url: &str, status: u16, body: &[u8]) -> Self {
        self.responses.insert(
            url.to_string(),
            Scripted::Response(UpstreamResponse {
                status,
                content_type: None,
                body: body.to_vec(),
            }),
        );
        self
    }

    pub fn status(self, url: &str, status: u16) -> Self {
        self.body(url, status, b"")
    }

    pub fn json(self, url: &str, value: serde_json::Value) -> Self {
        let body = serde_json::to_vec(&value).unwrap();
        self.body(url, 200, &body)
    }

    pub fn transport_error(mut self, url: &str) -> Self {
        self.responses.insert(url.to_string(), Scripted::Transport);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Upstream for ScriptedUpstream {
    async fn get(&self, url: &str, _accept: Accept) -> Result<UpstreamResponse, TransportError> {
        self.calls.lock().unwrap().push(url.to_string());
        match self.responses.get(url) {
            Some(Scripted::Response(response)) => Ok(response.clone()),
            Some(Scripted::Transport) => Err(TransportError("connection reset".into())),
            None => panic!("unexpected upstream call to {url}"),
        }
    }
}

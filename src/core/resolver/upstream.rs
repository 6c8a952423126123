// ─── Upstream transport seam ───
// Everything the resolver needs from HTTP, behind one trait so the
// resolution rules can be exercised without a network.

use std::time::Instant;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use super::trace::{ResolutionTrace, TraceEntry};

/// Which representation a request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accept {
    Json,
    Png,
}

impl Accept {
    pub fn header_value(self) -> &'static str {
        match self {
            Accept::Json => "application/json",
            Accept::Png => "image/png",
        }
    }
}

/// A fully-read upstream response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl UpstreamResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request never produced a complete response (DNS, connect, reset, body read).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

#[async_trait]
pub trait Upstream: Send + Sync {
    async fn get(&self, url: &str, accept: Accept) -> Result<UpstreamResponse, TransportError>;
}

/// Classification of a JSON lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonLookup {
    Found(serde_json::Value),
    /// HTTP 204 or 404.
    NotFound,
    /// Any other non-success status, or a success with an unparseable body.
    Failed { status: u16 },
}

/// GET `url` as JSON and classify the answer, recording one trace entry.
///
/// Only a transport fault is an `Err`; every HTTP answer is a `JsonLookup`.
pub async fn fetch_json(
    upstream: &dyn Upstream,
    url: &str,
    step: &str,
    trace: &mut ResolutionTrace,
) -> Result<JsonLookup, TransportError> {
    let started = Instant::now();
    let response = match upstream.get(url, Accept::Json).await {
        Ok(response) => response,
        Err(err) => {
            debug!("{step}: network error for {url}: {err}");
            trace.push(
                TraceEntry::new(step)
                    .phase("fetch_json")
                    .url(url)
                    .outcome("network_error")
                    .duration_ms(started.elapsed().as_millis())
                    .error(&err),
            );
            return Err(err);
        }
    };

    debug!("{step}: HTTP {} from {url}", response.status);
    trace.push(
        TraceEntry::new(step)
            .phase("fetch_json")
            .url(url)
            .status(response.status)
            .duration_ms(started.elapsed().as_millis()),
    );

    if response.status == 204 || response.status == 404 {
        return Ok(JsonLookup::NotFound);
    }
    if !response.is_success() {
        return Ok(JsonLookup::Failed {
            status: response.status,
        });
    }

    match serde_json::from_slice(&response.body) {
        Ok(value) => Ok(JsonLookup::Found(value)),
        Err(err) => {
            trace.push(
                TraceEntry::new(step)
                    .phase("parse_json")
                    .url(url)
                    .outcome("malformed_body")
                    .error(err),
            );
            Ok(JsonLookup::Failed {
                status: response.status,
            })
        }
    }
}

/// Trim and force `https://` on a texture URL. Empty stays empty.
pub fn normalize_https_url(url: &str) -> String {
    let trimmed = url.trim();
    match trimmed.get(..7) {
        Some(prefix) if prefix.eq_ignore_ascii_case("http://") => {
            format!("https://{}", &trimmed[7..])
        }
        _ => trimmed.to_string(),
    }
}

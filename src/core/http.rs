use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_ENCODING, CONTENT_TYPE};
use reqwest::Client;

use crate::core::resolver::{Accept, TransportError, Upstream, UpstreamResponse};

pub const APP_USER_AGENT: &str = "Offline-Minecraft-Skin-Converter/1.0";

/// Shared client for every upstream call.
///
/// `timeout` of `None` keeps the transport default.
pub fn build_http_client(user_agent: &str, timeout: Option<Duration>) -> Result<Client, reqwest::Error> {
    let mut default_headers = HeaderMap::new();
    default_headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("identity"));

    let mut builder = Client::builder()
        .user_agent(user_agent)
        .default_headers(default_headers);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}

/// [`Upstream`] backed by a real reqwest client.
#[derive(Clone)]
pub struct ReqwestUpstream {
    client: Client,
}

impl ReqwestUpstream {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Upstream for ReqwestUpstream {
    async fn get(&self, url: &str, accept: Accept) -> Result<UpstreamResponse, TransportError> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, accept.header_value())
            .send()
            .await
            .map_err(|err| TransportError(err.to_string()))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        // Not-found answers are classified by status alone.
        if status == 204 || status == 404 {
            return Ok(UpstreamResponse {
                status,
                content_type,
                body: Vec::new(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| TransportError(err.to_string()))?;

        Ok(UpstreamResponse {
            status,
            content_type,
            body: body.to_vec(),
        })
    }
}

use std::sync::Arc;

use tracing::debug;

use super::settings::Settings;
use crate::core::error::SkinPackResult;
use crate::core::http::{build_http_client, ReqwestUpstream};
use crate::core::pack::PackAssembler;
use crate::core::resolver::{SkinResolver, Upstream};

/// Shared, read-only state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub resolver: Arc<SkinResolver>,
    pub assembler: Arc<PackAssembler>,
}

impl AppState {
    /// Wire a resolver over an arbitrary upstream (tests use a scripted one).
    pub fn with_upstream(settings: Settings, upstream: Arc<dyn Upstream>) -> Self {
        let resolver = SkinResolver::new(upstream, settings.endpoints.clone());
        Self {
            settings: Arc::new(settings),
            resolver: Arc::new(resolver),
            assembler: Arc::new(PackAssembler::default()),
        }
    }

    /// Production wiring: one reqwest client for every upstream call.
    pub fn from_settings(settings: Settings) -> SkinPackResult<Self> {
        let client = build_http_client(&settings.user_agent, settings.request_timeout())?;
        debug!(
            "HTTP client ready (user agent {:?}, timeout {:?})",
            settings.user_agent,
            settings.request_timeout()
        );
        Ok(Self::with_upstream(
            settings,
            Arc::new(ReqwestUpstream::new(client)),
        ))
    }
}

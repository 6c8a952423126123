use std::time::Instant;

use tracing::{debug, warn};

use super::outcome::ResolutionOutcome;
use super::trace::{ResolutionTrace, TraceEntry};
use super::upstream::{normalize_https_url, Accept, Upstream};

const PHASE: &str = "skin_image_fetch";

/// Download the raw bytes behind a texture URL.
///
/// Non-success status and empty bodies are `UpstreamFailure`; a transport
/// fault is `NetworkFailure`. An empty URL fails without a request.
pub async fn fetch_skin_image(
    upstream: &dyn Upstream,
    skin_url: &str,
    step: &str,
    trace: &mut ResolutionTrace,
) -> ResolutionOutcome {
    let url = normalize_https_url(skin_url);
    if url.is_empty() {
        trace.push(
            TraceEntry::new(step)
                .phase(PHASE)
                .outcome("missing_or_invalid_url"),
        );
        return ResolutionOutcome::UpstreamFailure;
    }

    let started = Instant::now();
    let response = match upstream.get(&url, Accept::Png).await {
        Ok(response) => response,
        Err(err) => {
            warn!("Skin download from {url} failed: {err}");
            trace.push(
                TraceEntry::new(step)
                    .phase(PHASE)
                    .url(&url)
                    .outcome("network_error")
                    .duration_ms(started.elapsed().as_millis())
                    .error(err),
            );
            return ResolutionOutcome::NetworkFailure;
        }
    };

    trace.push(
        TraceEntry::new(step)
            .phase(PHASE)
            .url(&url)
            .status(response.status)
            .content_type(response.content_type.as_deref())
            .duration_ms(started.elapsed().as_millis()),
    );

    if !response.is_success() {
        return ResolutionOutcome::UpstreamFailure;
    }
    if response.body.is_empty() {
        trace.push(
            TraceEntry::new(step)
                .phase(PHASE)
                .outcome("empty_response_body"),
        );
        return ResolutionOutcome::UpstreamFailure;
    }

    debug!("Downloaded skin: {url} ({} bytes)", response.body.len());
    trace.push(
        TraceEntry::new(step)
            .phase(PHASE)
            .outcome("ok")
            .bytes(response.body.len()),
    );
    ResolutionOutcome::Ok(response.body)
}

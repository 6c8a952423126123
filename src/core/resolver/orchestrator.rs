// ─── Skin resolution ───
// Username → skin bytes. Account lookup, optional direct image,
// then the session-profile fallback. Every path ends in exactly one
// ResolutionOutcome; nothing is retried.

use std::sync::Arc;

use tracing::{info, warn};

use super::account::{resolve_uuid, AccountLookup, AccountResolution, AccountSource};
use super::endpoints::UpstreamEndpoints;
use super::image_fetch::fetch_skin_image;
use super::outcome::ResolutionOutcome;
use super::textures::{extract_skin_url, ExtractionError};
use super::trace::{ResolutionTrace, TraceEntry};
use super::upstream::{fetch_json, JsonLookup, Upstream};
use crate::core::username::Username;

/// Where a resolution currently is.
#[derive(Debug)]
enum Stage {
    ResolvingAccount,
    ResolvingDirectImage(AccountLookup),
    ResolvingSessionProfile { uuid: String },
    ResolvingImageFromProfile { skin_url: String },
    Done(ResolutionOutcome),
}

/// Stateless resolver shared by every request.
pub struct SkinResolver {
    upstream: Arc<dyn Upstream>,
    endpoints: UpstreamEndpoints,
    sources: Vec<AccountSource>,
}

impl SkinResolver {
    pub fn new(upstream: Arc<dyn Upstream>, endpoints: UpstreamEndpoints) -> Self {
        Self {
            upstream,
            endpoints,
            sources: AccountSource::DEFAULT_ORDER.to_vec(),
        }
    }

    pub fn endpoints(&self) -> &UpstreamEndpoints {
        &self.endpoints
    }

    /// Resolve `username` to raw skin bytes, recording each call in `trace`.
    pub async fn resolve(
        &self,
        username: &Username,
        trace: &mut ResolutionTrace,
    ) -> ResolutionOutcome {
        info!("Resolving skin for {username}");

        let mut stage = Stage::ResolvingAccount;
        let outcome = loop {
            stage = match stage {
                Stage::ResolvingAccount => self.resolve_account(username, trace).await,
                Stage::ResolvingDirectImage(lookup) => self.fetch_direct_image(lookup, trace).await,
                Stage::ResolvingSessionProfile { uuid } => {
                    self.resolve_session_profile(&uuid, trace).await
                }
                Stage::ResolvingImageFromProfile { skin_url } => Stage::Done(
                    fetch_skin_image(
                        self.upstream.as_ref(),
                        &skin_url,
                        "skin_fetch_from_session_profile",
                        trace,
                    )
                    .await,
                ),
                Stage::Done(outcome) => break outcome,
            };
        };

        match &outcome {
            ResolutionOutcome::Ok(bytes) => {
                info!("Resolved skin for {username} ({} bytes)", bytes.len())
            }
            other => warn!("Skin resolution for {username} ended with {}", other.label()),
        }
        outcome
    }

    async fn resolve_account(&self, username: &Username, trace: &mut ResolutionTrace) -> Stage {
        let resolution = resolve_uuid(
            self.upstream.as_ref(),
            &self.endpoints,
            &self.sources,
            username,
            trace,
        )
        .await;

        match resolution {
            AccountResolution::Found(lookup) if lookup.direct_skin_url.is_some() => {
                Stage::ResolvingDirectImage(lookup)
            }
            AccountResolution::Found(lookup) => {
                Stage::ResolvingSessionProfile { uuid: lookup.uuid }
            }
            AccountResolution::NotFound => {
                finish(trace, "username_not_found", ResolutionOutcome::NotFound)
            }
            AccountResolution::NetworkFailure => finish(
                trace,
                "network_failure_during_uuid_lookup",
                ResolutionOutcome::NetworkFailure,
            ),
            AccountResolution::UpstreamFailure => finish(
                trace,
                "upstream_failure_during_uuid_lookup",
                ResolutionOutcome::UpstreamFailure,
            ),
        }
    }

    /// `Ok` and `NetworkFailure` end the resolution here; anything else
    /// falls back to the session profile.
    async fn fetch_direct_image(&self, lookup: AccountLookup, trace: &mut ResolutionTrace) -> Stage {
        let skin_url = lookup.direct_skin_url.unwrap_or_default();
        let outcome = fetch_skin_image(
            self.upstream.as_ref(),
            &skin_url,
            "direct_skin_fetch_from_lookup",
            trace,
        )
        .await;

        match outcome {
            ResolutionOutcome::Ok(_) | ResolutionOutcome::NetworkFailure => Stage::Done(outcome),
            _ => Stage::ResolvingSessionProfile { uuid: lookup.uuid },
        }
    }

    async fn resolve_session_profile(&self, uuid: &str, trace: &mut ResolutionTrace) -> Stage {
        let url = self.endpoints.session_profile_url(uuid);

        let payload = match fetch_json(self.upstream.as_ref(), &url, "session_profile_lookup", trace).await {
            Ok(JsonLookup::Found(payload)) => payload,
            Ok(JsonLookup::NotFound) => {
                return finish(trace, "session_profile_not_found", ResolutionOutcome::NotFound)
            }
            Ok(JsonLookup::Failed { status }) => {
                trace.push(
                    TraceEntry::new("final")
                        .outcome("session_profile_upstream_failure")
                        .status(status),
                );
                return Stage::Done(ResolutionOutcome::UpstreamFailure);
            }
            Err(_) => {
                return finish(
                    trace,
                    "session_profile_network_failure",
                    ResolutionOutcome::UpstreamFailure,
                )
            }
        };

        match extract_skin_url(payload) {
            Ok(skin_url) => Stage::ResolvingImageFromProfile { skin_url },
            Err(err) => {
                let step = if matches!(err, ExtractionError::MissingSkinUrl) {
                    "session_profile_missing_skin_url"
                } else {
                    "session_profile_parse_error"
                };
                trace.push(TraceEntry::new(step).error(err));
                Stage::Done(ResolutionOutcome::UpstreamFailure)
            }
        }
    }
}

fn finish(trace: &mut ResolutionTrace, outcome_label: &'static str, outcome: ResolutionOutcome) -> Stage {
    trace.push(TraceEntry::new("final").outcome(outcome_label));
    Stage::Done(outcome)
}

// ─── Account lookup ───
// Username → account id, trying each lookup source in order.

use serde::Deserialize;
use tracing::{debug, warn};

use super::endpoints::{join, UpstreamEndpoints};
use super::trace::{ResolutionTrace, TraceEntry};
use super::upstream::{fetch_json, normalize_https_url, JsonLookup, Upstream};
use crate::core::username::Username;

/// Result of a successful account lookup. Lives for one resolution only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountLookup {
    pub uuid: String,
    /// Present only when the source embeds skin records.
    pub direct_skin_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountResolution {
    Found(AccountLookup),
    /// Every source explicitly reported not-found.
    NotFound,
    /// At least one source answered with something unusable.
    UpstreamFailure,
    /// A transport fault aborted the chain.
    NetworkFailure,
}

/// An upstream API that maps a username to an account id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountSource {
    /// Minecraft services profile lookup. Carries skin records.
    MinecraftServices,
    /// Legacy Mojang name → uuid endpoint.
    MojangLegacy,
}

impl AccountSource {
    pub const DEFAULT_ORDER: [AccountSource; 2] =
        [AccountSource::MinecraftServices, AccountSource::MojangLegacy];

    pub fn label(self) -> &'static str {
        match self {
            AccountSource::MinecraftServices => "minecraftservices",
            AccountSource::MojangLegacy => "mojang",
        }
    }

    pub fn lookup_url(self, endpoints: &UpstreamEndpoints, username: &Username) -> String {
        let base = match self {
            AccountSource::MinecraftServices => &endpoints.profile_lookup,
            AccountSource::MojangLegacy => &endpoints.legacy_lookup,
        };
        join(base, username.as_str())
    }

    fn embeds_skins(self) -> bool {
        matches!(self, AccountSource::MinecraftServices)
    }
}

#[derive(Debug, Deserialize)]
struct LookupProfile {
    id: Option<String>,
    #[serde(default)]
    skins: Option<Vec<LookupSkin>>,
}

#[derive(Debug, Deserialize)]
struct LookupSkin {
    url: Option<String>,
    state: Option<String>,
}

/// The skin flagged `ACTIVE`, else the first with a URL, else none.
fn pick_skin_url(skins: &[LookupSkin]) -> Option<String> {
    let with_url = |skin: &&LookupSkin| skin.url.as_deref().is_some_and(|url| !url.is_empty());

    let active = skins.iter().filter(with_url).find(|skin| {
        skin.state
            .as_deref()
            .is_some_and(|state| state.eq_ignore_ascii_case("ACTIVE"))
    });
    let chosen = active.or_else(|| skins.iter().find(with_url))?;

    let url = normalize_https_url(chosen.url.as_deref().unwrap_or_default());
    (!url.is_empty()).then_some(url)
}

/// What a single source said about the username.
#[derive(Debug)]
enum SourceVerdict {
    Resolved(AccountLookup),
    NotFound,
    Upstream,
    Network,
}

impl SourceVerdict {
    /// Stop the chain here instead of asking the next source.
    fn short_circuits(&self) -> bool {
        matches!(self, SourceVerdict::Resolved(_) | SourceVerdict::Network)
    }
}

async fn ask_source(
    upstream: &dyn Upstream,
    endpoints: &UpstreamEndpoints,
    source: AccountSource,
    username: &Username,
    trace: &mut ResolutionTrace,
) -> SourceVerdict {
    let url = source.lookup_url(endpoints, username);
    let step = format!("uuid_lookup_{}", source.label());

    let lookup = match fetch_json(upstream, &url, &step, trace).await {
        Ok(lookup) => lookup,
        Err(err) => {
            warn!("Account lookup via {} hit a network error: {err}", source.label());
            trace.push(TraceEntry::new("uuid_lookup_network_failure").error(err));
            return SourceVerdict::Network;
        }
    };

    let failed_status = match lookup {
        JsonLookup::Found(payload) => {
            match serde_json::from_value::<LookupProfile>(payload) {
                Ok(LookupProfile {
                    id: Some(uuid),
                    skins,
                }) if !uuid.is_empty() => {
                    let direct_skin_url = if source.embeds_skins() {
                        pick_skin_url(skins.as_deref().unwrap_or_default())
                    } else {
                        None
                    };
                    trace.push(
                        TraceEntry::new("uuid_resolved")
                            .source(source.label())
                            .uuid(&uuid)
                            .has_skin_url(direct_skin_url.is_some()),
                    );
                    debug!("{username} resolved to {uuid} via {}", source.label());
                    return SourceVerdict::Resolved(AccountLookup {
                        uuid,
                        direct_skin_url,
                    });
                }
                _ => 200,
            }
        }
        JsonLookup::NotFound => {
            trace.push(TraceEntry::new("uuid_not_found_on_source").source(source.label()));
            return SourceVerdict::NotFound;
        }
        JsonLookup::Failed { status } => status,
    };

    trace.push(
        TraceEntry::new("uuid_source_upstream_error")
            .source(source.label())
            .status(failed_status),
    );
    SourceVerdict::Upstream
}

/// Resolve `username` against `sources` in order.
///
/// The first id wins. A transport fault aborts the chain without asking
/// the remaining sources. Exhaustion yields `NotFound` only when every
/// source said not-found, `UpstreamFailure` otherwise.
pub async fn resolve_uuid(
    upstream: &dyn Upstream,
    endpoints: &UpstreamEndpoints,
    sources: &[AccountSource],
    username: &Username,
    trace: &mut ResolutionTrace,
) -> AccountResolution {
    let mut saw_upstream_error = false;

    for &source in sources {
        let verdict = ask_source(upstream, endpoints, source, username, trace).await;
        if verdict.short_circuits() {
            return match verdict {
                SourceVerdict::Resolved(lookup) => AccountResolution::Found(lookup),
                _ => AccountResolution::NetworkFailure,
            };
        }
        if matches!(verdict, SourceVerdict::Upstream) {
            saw_upstream_error = true;
        }
    }

    if saw_upstream_error {
        AccountResolution::UpstreamFailure
    } else {
        AccountResolution::NotFound
    }
}

mod account;
mod endpoints;
mod image_fetch;
mod orchestrator;
mod outcome;
mod textures;
mod trace;
mod upstream;

#[cfg(test)]
pub(crate) mod testing;

pub use account::{resolve_uuid, AccountLookup, AccountResolution, AccountSource};
pub use endpoints::{to_undashed_uuid, UpstreamEndpoints};
pub use image_fetch::fetch_skin_image;
pub use orchestrator::SkinResolver;
pub use outcome::ResolutionOutcome;
pub use textures::{extract_skin_url, ExtractionError, ProfileTextures, SessionProfile};
pub use trace::{ResolutionTrace, TraceEntry};
pub use upstream::{
    fetch_json, normalize_https_url, Accept, JsonLookup, TransportError, Upstream,
    UpstreamResponse,
};

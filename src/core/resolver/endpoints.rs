use serde::{Deserialize, Serialize};

pub const MINECRAFT_SERVICES_LOOKUP: &str =
    "https://api.minecraftservices.com/minecraft/profile/lookup/name";
pub const MOJANG_LEGACY_LOOKUP: &str = "https://api.mojang.com/users/profiles/minecraft";
pub const SESSION_PROFILE: &str = "https://sessionserver.mojang.com/session/minecraft/profile";

/// Base URLs of the three upstream APIs. Overridable from settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UpstreamEndpoints {
    pub profile_lookup: String,
    pub legacy_lookup: String,
    pub session_profile: String,
}

impl Default for UpstreamEndpoints {
    fn default() -> Self {
        Self {
            profile_lookup: MINECRAFT_SERVICES_LOOKUP.into(),
            legacy_lookup: MOJANG_LEGACY_LOOKUP.into(),
            session_profile: SESSION_PROFILE.into(),
        }
    }
}

impl UpstreamEndpoints {
    /// `<session_profile>/<uuid>` with the uuid undashed and lower-cased.
    pub fn session_profile_url(&self, uuid: &str) -> String {
        join(&self.session_profile, &to_undashed_uuid(uuid))
    }
}

pub(crate) fn join(base: &str, segment: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), segment)
}

pub fn to_undashed_uuid(uuid: &str) -> String {
    uuid.replace('-', "").to_lowercase()
}

// ─── Session profile textures ───
// Pulls the skin URL out of the base64 `textures` property of a session profile.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use serde::Deserialize;
use thiserror::Error;

use super::upstream::normalize_https_url;

/// Standard alphabet, with or without trailing `=` padding.
const TEXTURES_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Session profile as returned by the session server.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionProfile {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub properties: Vec<ProfileProperty>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileProperty {
    pub name: String,
    /// Base64-encoded JSON.
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub signature: Option<String>,
}

/// Decoded `textures` property.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileTextures {
    #[serde(default)]
    pub textures: TextureSet,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[allow(non_snake_case)]
pub struct TextureSet {
    #[serde(default)]
    pub SKIN: Option<TextureInfo>,
    #[serde(default)]
    pub CAPE: Option<TextureInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextureInfo {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("session profile is not a valid profile object: {0}")]
    MalformedProfile(String),
    #[error("session profile has no textures property")]
    MissingTextures,
    #[error("textures property is not valid base64: {0}")]
    Base64(String),
    #[error("textures property is not valid JSON: {0}")]
    MalformedTextures(String),
    #[error("textures property has no skin URL")]
    MissingSkinUrl,
}

impl ProfileTextures {
    pub fn decode(encoded: &str) -> Result<Self, ExtractionError> {
        let raw = TEXTURES_ENGINE
            .decode(encoded.trim())
            .map_err(|err| ExtractionError::Base64(err.to_string()))?;
        serde_json::from_slice(&raw).map_err(|err| ExtractionError::MalformedTextures(err.to_string()))
    }

    /// Normalized `https://` skin URL, if any.
    pub fn skin_url(&self) -> Option<String> {
        let url = normalize_https_url(&self.textures.SKIN.as_ref()?.url);
        (!url.is_empty()).then_some(url)
    }
}

impl SessionProfile {
    pub fn textures(&self) -> Result<ProfileTextures, ExtractionError> {
        let property = self
            .properties
            .iter()
            .find(|property| property.name == "textures" && !property.value.is_empty())
            .ok_or(ExtractionError::MissingTextures)?;
        ProfileTextures::decode(&property.value)
    }
}

/// Locate, decode and read the skin URL of a raw session profile payload.
pub fn extract_skin_url(payload: serde_json::Value) -> Result<String, ExtractionError> {
    let profile: SessionProfile = serde_json::from_value(payload)
        .map_err(|err| ExtractionError::MalformedProfile(err.to_string()))?;
    profile
        .textures()?
        .skin_url()
        .ok_or(ExtractionError::MissingSkinUrl)
}

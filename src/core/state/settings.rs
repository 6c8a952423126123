use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::error::{SkinPackError, SkinPackResult};
use crate::core::http::APP_USER_AGENT;
use crate::core::resolver::UpstreamEndpoints;

const APP_DIR_NAME: &str = "skinpack";
const SETTINGS_FILE: &str = "settings.json";

pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8787;

pub const PORT_ENV: &str = "PORT";
pub const BIND_ENV: &str = "SKINPACK_BIND";

/// Runtime configuration. Every field falls back to its default when
/// missing from the JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub bind_address: String,
    pub port: u16,
    pub user_agent: String,
    /// `None` keeps the HTTP client's own default.
    pub request_timeout_secs: Option<u64>,
    pub endpoints: UpstreamEndpoints,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            user_agent: APP_USER_AGENT.to_string(),
            request_timeout_secs: None,
            endpoints: UpstreamEndpoints::default(),
        }
    }
}

impl Settings {
    /// Read settings from `explicit`, or from the per-user config file when
    /// it exists, then apply environment overrides.
    ///
    /// An explicit path that cannot be read is an error; a missing default
    /// file just means defaults.
    pub fn load(explicit: Option<&Path>) -> SkinPackResult<Self> {
        let settings = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match default_settings_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => {
                    debug!("No settings file found, using defaults");
                    Self::default()
                }
            },
        };
        settings.with_env_overrides(|key| std::env::var(key).ok())
    }

    pub fn from_file(path: &Path) -> SkinPackResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| SkinPackError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = serde_json::from_str(&raw).map_err(|err| {
            SkinPackError::Config(format!("{}: {err}", path.display()))
        })?;
        info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// `PORT` and `SKINPACK_BIND` win over whatever the file said.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> SkinPackResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(PORT_ENV).filter(|value| !value.trim().is_empty()) {
            self.port = raw
                .trim()
                .parse()
                .map_err(|_| SkinPackError::Config(format!("{PORT_ENV}={raw:?} is not a port")))?;
        }
        if let Some(raw) = lookup(BIND_ENV).filter(|value| !value.trim().is_empty()) {
            self.bind_address = raw.trim().to_string();
        }
        Ok(self)
    }

    pub fn socket_addr(&self) -> SkinPackResult<SocketAddr> {
        let ip: IpAddr = self.bind_address.parse().map_err(|_| {
            SkinPackError::Config(format!("bind address {:?} is not an IP", self.bind_address))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// `<config_dir>/skinpack/settings.json`, if the platform has a config dir.
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join(APP_DIR_NAME).join(SETTINGS_FILE))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_listen_locally_on_8787() {
        let settings = Settings::default();
        assert_eq!(
            settings.socket_addr().unwrap(),
            "127.0.0.1:8787".parse().unwrap()
        );
        assert_eq!(settings.user_agent, "Offline-Minecraft-Skin-Converter/1.0");
        assert!(settings.request_timeout().is_none());
    }

    #[test]
    fn env_overrides_port_and_bind() {
        let settings = Settings::default()
            .with_env_overrides(env(&[("PORT", "9000"), ("SKINPACK_BIND", "0.0.0.0")]))
            .unwrap();
        assert_eq!(settings.port, 9000);
        assert_eq!(settings.bind_address, "0.0.0.0");
    }

    #[test]
    fn bad_port_is_a_config_error() {
        let err = Settings::default()
            .with_env_overrides(env(&[("PORT", "eighty")]))
            .unwrap_err();
        assert!(matches!(err, SkinPackError::Config(_)));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "port": 1234, "request_timeout_secs": 5 }"#).unwrap();

        let settings = Settings::from_file(&path).unwrap();
        assert_eq!(settings.port, 1234);
        assert_eq!(settings.request_timeout(), Some(Duration::from_secs(5)));
        assert_eq!(settings.bind_address, DEFAULT_BIND_ADDRESS);
        assert_eq!(settings.endpoints, UpstreamEndpoints::default());
    }

    #[test]
    fn explicit_path_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "user_agent": "skinpack-tests/2" }"#).unwrap();
        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.user_agent, "skinpack-tests/2");
    }

    #[test]
    fn missing_explicit_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::from_file(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, SkinPackError::Io { .. }));
    }
}

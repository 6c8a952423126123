use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification shared by every failure the crate can surface.
///
/// Adapters map on this instead of on individual variants, so the
/// HTTP layer and the CLI agree on what the user is told.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad username, non-PNG upload, unknown version. The user must fix it.
    InvalidInput,
    /// No such account.
    NotFound,
    /// A third-party API answered with something unusable.
    UpstreamFailure,
    /// Transport-level fault while talking to a third-party API.
    NetworkFailure,
    /// Image or archive pipeline fault on this machine.
    LocalProcessingFailure,
}

/// Why a candidate skin image was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkinValidationError {
    #[error("the skin must be a PNG file")]
    NotPng,

    #[error("the skin must be 64x64 pixels, got {width}x{height}")]
    WrongFormat { width: u32, height: u32 },
}

/// Central error type for the skin resolver and pack builder.
/// Every module returns `Result<T, SkinPackError>`.
#[derive(Debug, Error)]
pub enum SkinPackError {
    // ── IO ──────────────────────────────────────────────
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── Input ───────────────────────────────────────────
    #[error("Invalid username: {0:?}")]
    InvalidUsername(String),

    #[error("Invalid skin: {0}")]
    InvalidSkin(#[from] SkinValidationError),

    #[error("Unknown Minecraft version: {0}")]
    UnknownVersion(String),

    #[error("No skin loaded")]
    NoSkinLoaded,

    // ── Resolution ──────────────────────────────────────
    #[error("Username not found: {0}")]
    UsernameNotFound(String),

    #[error("Mojang APIs returned an invalid response for {0}")]
    UpstreamFailure(String),

    #[error("Network error while resolving {0}")]
    NetworkFailure(String),

    // ── Local pipeline ──────────────────────────────────
    #[error("Pack icon generation failed: {0}")]
    PackIcon(String),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    // ── Configuration ───────────────────────────────────
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Convenience alias used throughout the crate.
pub type SkinPackResult<T> = Result<T, SkinPackError>;

impl SkinPackError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidUsername(_)
            | Self::InvalidSkin(_)
            | Self::UnknownVersion(_)
            | Self::NoSkinLoaded
            | Self::Config(_) => ErrorKind::InvalidInput,
            Self::UsernameNotFound(_) => ErrorKind::NotFound,
            Self::UpstreamFailure(_) => ErrorKind::UpstreamFailure,
            Self::NetworkFailure(_) => ErrorKind::NetworkFailure,
            Self::Io { .. }
            | Self::PackIcon(_)
            | Self::Zip(_)
            | Self::Json(_)
            | Self::Http(_) => ErrorKind::LocalProcessingFailure,
        }
    }
}

impl From<std::io::Error> for SkinPackError {
    fn from(source: std::io::Error) -> Self {
        SkinPackError::Io {
            path: PathBuf::new(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_invalid_input() {
        let err = SkinPackError::from(SkinValidationError::WrongFormat {
            width: 64,
            height: 32,
        });
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(
            err.to_string(),
            "Invalid skin: the skin must be 64x64 pixels, got 64x32"
        );
    }

    #[test]
    fn icon_failures_are_local() {
        let err = SkinPackError::PackIcon("decode".into());
        assert_eq!(err.kind(), ErrorKind::LocalProcessingFailure);
    }
}

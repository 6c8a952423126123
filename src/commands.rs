use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::core::error::{SkinPackError, SkinPackResult};
use crate::core::pack::{PackFormat, VERSION_OPTIONS};
use crate::core::resolver::{ResolutionTrace, TraceEntry};
use crate::core::skin::SkinUpload;
use crate::core::state::{AppState, SkinSession};

#[derive(Debug, Clone, Serialize)]
pub struct MinecraftVersionInfo {
    pub id: &'static str,
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pack_format: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_format: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_format: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchSkinResponse {
    pub path: PathBuf,
    pub bytes: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<Vec<TraceEntry>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildPackResponse {
    pub path: PathBuf,
    pub version: &'static str,
    pub bytes: usize,
}

/// Every selectable target version, newest first.
pub fn list_versions() -> Vec<MinecraftVersionInfo> {
    VERSION_OPTIONS
        .iter()
        .map(|option| {
            let (pack_format, min_format, max_format) = match option.format {
                PackFormat::Single(format) => (Some(format), None, None),
                PackFormat::Range { min, max } => (None, Some(min), Some(max)),
            };
            MinecraftVersionInfo {
                id: option.id,
                label: option.label,
                pack_format,
                min_format,
                max_format,
            }
        })
        .collect()
}

/// Resolve `username` and write the skin to `out` (default `<username>.png`).
///
/// The image is validated before anything touches the disk.
pub async fn fetch_skin(
    state: &AppState,
    username: &str,
    out: Option<PathBuf>,
    debug: bool,
) -> SkinPackResult<FetchSkinResponse> {
    let mut trace = if debug {
        ResolutionTrace::enabled()
    } else {
        ResolutionTrace::disabled()
    };

    let mut session = SkinSession::new();
    let loaded = match session
        .load_from_username(&state.resolver, username, &mut trace)
        .await
    {
        Ok(loaded) => loaded,
        Err(err) => {
            if trace.is_enabled() {
                if let Ok(entries) = serde_json::to_string(trace.entries()) {
                    warn!("Resolution trace: {entries}");
                }
            }
            return Err(err);
        }
    };

    let path = out.unwrap_or_else(|| PathBuf::from(&loaded.display_name));
    write_file(&path, loaded.image.as_bytes()).await?;
    info!("Saved skin for {} to {}", username.trim(), path.display());

    Ok(FetchSkinResponse {
        path,
        bytes: loaded.image.as_bytes().len(),
        trace: trace.into_entries(),
    })
}

/// Build a resource pack from the PNG at `skin_path`.
pub async fn build_pack(
    state: &AppState,
    skin_path: &Path,
    version_id: Option<&str>,
    out: Option<PathBuf>,
) -> SkinPackResult<BuildPackResponse> {
    let bytes = tokio::fs::read(skin_path)
        .await
        .map_err(|source| SkinPackError::Io {
            path: skin_path.to_path_buf(),
            source,
        })?;

    let mut upload = SkinUpload::new(bytes);
    if let Some(name) = skin_path.file_name() {
        upload = upload.with_file_name(name.to_string_lossy());
    }

    let mut session = SkinSession::new();
    if let Some(id) = version_id {
        session.select_version(id)?;
    }
    session.load_upload(upload)?;

    let archive = session.build_pack(&state.assembler)?;
    let path = out.unwrap_or_else(|| PathBuf::from(&archive.file_name));
    write_file(&path, &archive.bytes).await?;
    info!("Wrote {} ({} bytes)", path.display(), archive.bytes.len());

    Ok(BuildPackResponse {
        path,
        version: session.selected_version().id,
        bytes: archive.bytes.len(),
    })
}

async fn write_file(path: &Path, bytes: &[u8]) -> SkinPackResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| SkinPackError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
    }
    tokio::fs::write(path, bytes)
        .await
        .map_err(|source| SkinPackError::Io {
            path: path.to_path_buf(),
            source,
        })
}

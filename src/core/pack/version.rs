// ─── Target versions ───
// Which pack_format (or min/max range) each selectable game version needs.

use serde::Serialize;

use crate::core::error::{SkinPackError, SkinPackResult};

/// Pack metadata shape. A version carries exactly one of the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PackFormat {
    Single(u32),
    Range { min: u32, max: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionOption {
    pub id: &'static str,
    pub label: &'static str,
    pub format: PackFormat,
}

const fn single(id: &'static str, label: &'static str, pack_format: u32) -> VersionOption {
    VersionOption {
        id,
        label,
        format: PackFormat::Single(pack_format),
    }
}

const fn range(id: &'static str, label: &'static str, min: u32, max: u32) -> VersionOption {
    VersionOption {
        id,
        label,
        format: PackFormat::Range { min, max },
    }
}

pub const DEFAULT_VERSION_ID: &str = "1.21.11";

/// Newest first.
pub static VERSION_OPTIONS: [VersionOption; 22] = [
    range("1.21.11", "1.21.11", 75, 75),
    range("1.21.9", "1.21.9", 69, 69),
    single("1.21.8", "1.21.8", 64),
    single("1.21.6", "1.21.6", 63),
    single("1.21.5", "1.21.5", 55),
    single("1.21.4", "1.21.4", 46),
    single("1.21-1.21.3", "1.21 - 1.21.3", 34),
    single("1.20.5-1.20.6", "1.20.5 - 1.20.6", 32),
    single("1.20.3-1.20.4", "1.20.3 - 1.20.4", 22),
    single("1.20.2", "1.20.2", 18),
    single("1.20-1.20.1", "1.20 - 1.20.1", 15),
    single("1.19.4", "1.19.4", 13),
    single("1.19.3", "1.19.3", 12),
    single("1.19-1.19.2", "1.19 - 1.19.2", 9),
    single("1.18-1.18.2", "1.18 - 1.18.2", 8),
    single("1.17-1.17.1", "1.17 - 1.17.1", 7),
    single("1.16.2-1.16.5", "1.16.2 - 1.16.5", 6),
    single("1.15-1.16.1", "1.15 - 1.16.1", 5),
    single("1.13-1.14.4", "1.13 - 1.14.4", 4),
    single("1.11-1.12.2", "1.11 - 1.12.2", 3),
    single("1.9-1.10.2", "1.9 - 1.10.2", 2),
    single("1.6.1-1.8.9", "1.6.1 - 1.8.9", 1),
];

/// Look up a version option by its id (e.g. `"1.20.2"`).
pub fn find_version(id: &str) -> SkinPackResult<&'static VersionOption> {
    VERSION_OPTIONS
        .iter()
        .find(|option| option.id == id.trim())
        .ok_or_else(|| SkinPackError::UnknownVersion(id.to_string()))
}

pub fn default_version() -> &'static VersionOption {
    VERSION_OPTIONS
        .iter()
        .find(|option| option.id == DEFAULT_VERSION_ID)
        .unwrap_or(&VERSION_OPTIONS[0])
}

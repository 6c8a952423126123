// ─── Pack assembler ───
// Lays out the resource pack and serialises it to one zip blob.
//
//   skin_pack/README.txt
//   skin_pack/pack.mcmeta
//   skin_pack/pack.png
//   skin_pack/assets/minecraft/textures/entity/<name>.png
//   skin_pack/assets/minecraft/textures/entity/player/slim/<name>.png
//   skin_pack/assets/minecraft/textures/entity/player/wide/<name>.png

use std::io::{Cursor, Write};

use tracing::{debug, info};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::manifest::PackManifest;
use super::version::VersionOption;
use crate::core::error::SkinPackResult;
use crate::core::skin::{generate_pack_icon, SkinImage};

pub const PACK_ROOT: &str = "skin_pack";
pub const ENTITY_TEXTURES_DIR: &str = "assets/minecraft/textures/entity";
pub const ARCHIVE_FILE_NAME: &str = "skin_pack.zip";

/// Every character the base game can hand out as a default skin.
pub const DEFAULT_SKIN_NAMES: [&str; 9] = [
    "Steve", "Alex", "Ari", "Kai", "Noor", "Sunny", "Zuri", "Efe", "Makena",
];

pub const PACK_README: &str = "This is a resource pack for Minecraft Java Edition, generated locally to work offline. \
It replaces all 9 default game skins (including Steve, Alex, Ari, etc.) with your custom skin.\n\n\
Created by 1337rod :)";

pub const PACK_DESCRIPTION: &str =
    "Locally generated skin pack to replace default Minecraft skins. Works offline.";

const PLAYER_MODELS: [&str; 2] = ["slim", "wide"];

/// One file inside the pack, path relative to the archive root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackEntry {
    pub path: String,
    pub bytes: Vec<u8>,
}

impl PackEntry {
    fn new(path: String, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            path,
            bytes: bytes.into(),
        }
    }
}

/// A finished pack, ready to be written out or served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkinPackArchive {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct PackAssembler {
    names: Vec<String>,
    readme: String,
    description: String,
}

impl Default for PackAssembler {
    fn default() -> Self {
        Self::with_names(DEFAULT_SKIN_NAMES)
    }
}

impl PackAssembler {
    /// Names are lower-cased for file naming; repeats are dropped.
    pub fn with_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut unique: Vec<String> = Vec::new();
        for name in names {
            let lowered = name.as_ref().trim().to_lowercase();
            if !lowered.is_empty() && !unique.contains(&lowered) {
                unique.push(lowered);
            }
        }
        Self {
            names: unique,
            readme: PACK_README.to_string(),
            description: PACK_DESCRIPTION.to_string(),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Every file of the pack, in archive order.
    pub fn entries(&self, skin: &SkinImage, version: &VersionOption) -> SkinPackResult<Vec<PackEntry>> {
        let manifest = PackManifest::new(self.description.as_str(), version.format).to_json()?;
        let icon = generate_pack_icon(skin)?;

        let mut entries = Vec::with_capacity(3 + self.names.len() * 3);
        entries.push(PackEntry::new(rooted("README.txt"), self.readme.as_bytes()));
        entries.push(PackEntry::new(rooted("pack.mcmeta"), manifest.into_bytes()));
        entries.push(PackEntry::new(rooted("pack.png"), icon));

        for name in &self.names {
            let file = format!("{name}.png");
            entries.push(PackEntry::new(
                rooted(&format!("{ENTITY_TEXTURES_DIR}/{file}")),
                skin.as_bytes(),
            ));
            for model in PLAYER_MODELS {
                entries.push(PackEntry::new(
                    rooted(&format!("{ENTITY_TEXTURES_DIR}/player/{model}/{file}")),
                    skin.as_bytes(),
                ));
            }
        }
        Ok(entries)
    }

    /// Build the zip. Nothing is returned unless every entry was written.
    pub fn assemble(&self, skin: &SkinImage, version: &VersionOption) -> SkinPackResult<SkinPackArchive> {
        let entries = self.entries(skin, version)?;
        let bytes = write_zip(&entries)?;
        info!(
            "Assembled skin pack for {} ({} entries, {} bytes)",
            version.id,
            entries.len(),
            bytes.len()
        );
        Ok(SkinPackArchive {
            file_name: ARCHIVE_FILE_NAME.to_string(),
            bytes,
        })
    }
}

fn rooted(path: &str) -> String {
    format!("{PACK_ROOT}/{path}")
}

/// Fixed timestamp and permissions keep identical input byte-identical.
fn entry_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default())
        .unix_permissions(0o644)
}

fn write_zip(entries: &[PackEntry]) -> SkinPackResult<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = entry_options();
    for entry in entries {
        zip.start_file(entry.path.as_str(), options)?;
        zip.write_all(&entry.bytes)?;
        debug!("Packed {} ({} bytes)", entry.path, entry.bytes.len());
    }
    Ok(zip.finish()?.into_inner())
}

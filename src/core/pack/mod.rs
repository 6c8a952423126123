mod assembler;
mod manifest;
mod version;

pub use assembler::{
    PackAssembler, PackEntry, SkinPackArchive, ARCHIVE_FILE_NAME, DEFAULT_SKIN_NAMES,
    ENTITY_TEXTURES_DIR, PACK_DESCRIPTION, PACK_README, PACK_ROOT,
};
pub use manifest::PackManifest;
pub use version::{
    default_version, find_version, PackFormat, VersionOption, DEFAULT_VERSION_ID, VERSION_OPTIONS,
};

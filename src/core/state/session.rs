use tracing::{debug, info};

use crate::core::error::{SkinPackError, SkinPackResult};
use crate::core::pack::{default_version, find_version, PackAssembler, SkinPackArchive, VersionOption};
use crate::core::resolver::{ResolutionTrace, SkinResolver};
use crate::core::skin::{validate_upload, SkinImage, SkinUpload};
use crate::core::username::Username;

/// The skin currently held by a session, with the name it came in under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedSkin {
    pub image: SkinImage,
    pub display_name: String,
}

/// One user's working set: at most one loaded skin and one selected version.
#[derive(Debug, Clone)]
pub struct SkinSession {
    skin: Option<LoadedSkin>,
    version: &'static VersionOption,
}

impl Default for SkinSession {
    fn default() -> Self {
        Self {
            skin: None,
            version: default_version(),
        }
    }
}

impl SkinSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loaded_skin(&self) -> Option<&LoadedSkin> {
        self.skin.as_ref()
    }

    pub fn selected_version(&self) -> &'static VersionOption {
        self.version
    }

    /// Validate and keep `upload`. A rejected upload leaves the previous
    /// skin in place.
    pub fn load_upload(&mut self, upload: SkinUpload) -> SkinPackResult<&LoadedSkin> {
        let display_name = upload
            .file_name
            .clone()
            .unwrap_or_else(|| "skin.png".to_string());
        let image = validate_upload(upload)?;
        debug!("Loaded skin {display_name}");
        Ok(&*self.skin.insert(LoadedSkin {
            image,
            display_name,
        }))
    }

    /// Resolve `raw_username` and load the result as `<username>.png`.
    pub async fn load_from_username(
        &mut self,
        resolver: &SkinResolver,
        raw_username: &str,
        trace: &mut ResolutionTrace,
    ) -> SkinPackResult<&LoadedSkin> {
        let username = Username::parse(raw_username.trim())?;
        let bytes = resolver.resolve(&username, trace).await.into_result(&username)?;
        let upload = SkinUpload::new(bytes)
            .with_file_name(format!("{username}.png"))
            .with_content_type("image/png");
        self.load_upload(upload)
    }

    pub fn select_version(&mut self, id: &str) -> SkinPackResult<&'static VersionOption> {
        self.version = find_version(id)?;
        Ok(self.version)
    }

    pub fn clear(&mut self) {
        self.skin = None;
    }

    /// Assemble a pack from the loaded skin for the selected version.
    pub fn build_pack(&self, assembler: &PackAssembler) -> SkinPackResult<SkinPackArchive> {
        let skin = self.skin.as_ref().ok_or(SkinPackError::NoSkinLoaded)?;
        info!(
            "Building pack from {} for {}",
            skin.display_name, self.version.label
        );
        assembler.assemble(&skin.image, self.version)
    }
}

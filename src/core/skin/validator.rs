use image::ImageFormat;

use crate::core::error::SkinValidationError;

/// Skins are exactly this many pixels wide and tall.
pub const SKIN_SIZE: u32 = 64;

/// A candidate skin as handed in by the user, before any checks.
#[derive(Debug, Clone, Default)]
pub struct SkinUpload {
    pub bytes: Vec<u8>,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
}

impl SkinUpload {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            ..Self::default()
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Declared type is `image/png`, or no type and a `.png` name.
    pub fn declares_png(&self) -> bool {
        match self.content_type.as_deref().map(str::trim) {
            Some(content_type) if !content_type.is_empty() => {
                content_type.eq_ignore_ascii_case("image/png")
            }
            _ => self
                .file_name
                .as_deref()
                .is_some_and(|name| name.to_ascii_lowercase().ends_with(".png")),
        }
    }
}

/// PNG bytes known to decode to a 64×64 image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkinImage {
    bytes: Vec<u8>,
}

impl SkinImage {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Sniff and decode `bytes`; returns the dimensions of a valid skin.
pub fn validate_skin_png(bytes: &[u8]) -> Result<(u32, u32), SkinValidationError> {
    let format = image::guess_format(bytes).map_err(|_| SkinValidationError::NotPng)?;
    if format != ImageFormat::Png {
        return Err(SkinValidationError::NotPng);
    }

    let image = image::load_from_memory_with_format(bytes, ImageFormat::Png)
        .map_err(|_| SkinValidationError::NotPng)?;
    let (width, height) = (image.width(), image.height());
    if width != SKIN_SIZE || height != SKIN_SIZE {
        return Err(SkinValidationError::WrongFormat { width, height });
    }
    Ok((width, height))
}

/// Gate every upload: declared PNG-ness first, then content.
pub fn validate_upload(upload: SkinUpload) -> Result<SkinImage, SkinValidationError> {
    if !upload.declares_png() {
        return Err(SkinValidationError::NotPng);
    }
    validate_skin_png(&upload.bytes)?;
    Ok(SkinImage {
        bytes: upload.bytes,
    })
}

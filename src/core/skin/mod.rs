mod icon;
mod validator;

use image::{codecs::png::PngEncoder, ExtendedColorType, ImageEncoder, RgbaImage};

use crate::core::error::{SkinPackError, SkinPackResult};

pub use icon::{compose_face, generate_pack_icon, upscale_nearest, ICON_SIZE};
pub use validator::{validate_skin_png, validate_upload, SkinImage, SkinUpload, SKIN_SIZE};

/// Encode an RGBA buffer as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> SkinPackResult<Vec<u8>> {
    let (width, height) = image.dimensions();
    let mut output = Vec::<u8>::new();
    PngEncoder::new(&mut output)
        .write_image(image.as_raw(), width, height, ExtendedColorType::Rgba8)
        .map_err(|err| SkinPackError::PackIcon(format!("could not encode PNG: {err}")))?;
    Ok(output)
}

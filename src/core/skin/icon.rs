// ─── Pack icon ───
// Face (8,8) + hat overlay (40,8), composited and blown up to 128×128
// with nearest-neighbour sampling.

use image::{imageops, ImageFormat, RgbaImage};
use tracing::debug;

use super::encode_png;
use super::validator::SkinImage;
use crate::core::error::{SkinPackError, SkinPackResult};

pub const FACE_SIZE: u32 = 8;
pub const FACE_ORIGIN: (u32, u32) = (8, 8);
pub const HAT_ORIGIN: (u32, u32) = (40, 8);
pub const ICON_SIZE: u32 = 128;
const SCALE: u32 = ICON_SIZE / FACE_SIZE;

/// Composite the face and hat layers of a decoded skin into one 8×8 image.
pub fn compose_face(skin: &RgbaImage) -> SkinPackResult<RgbaImage> {
    let needed_width = HAT_ORIGIN.0 + FACE_SIZE;
    let needed_height = FACE_ORIGIN.1 + FACE_SIZE;
    if skin.width() < needed_width || skin.height() < needed_height {
        return Err(SkinPackError::PackIcon(format!(
            "skin is {}x{}, too small to hold a face",
            skin.width(),
            skin.height()
        )));
    }

    let mut face =
        imageops::crop_imm(skin, FACE_ORIGIN.0, FACE_ORIGIN.1, FACE_SIZE, FACE_SIZE).to_image();
    let hat = imageops::crop_imm(skin, HAT_ORIGIN.0, HAT_ORIGIN.1, FACE_SIZE, FACE_SIZE).to_image();
    imageops::overlay(&mut face, &hat, 0, 0);
    Ok(face)
}

/// Replicate every source pixel into a `SCALE`×`SCALE` block.
pub fn upscale_nearest(face: &RgbaImage) -> RgbaImage {
    RgbaImage::from_fn(face.width() * SCALE, face.height() * SCALE, |x, y| {
        *face.get_pixel(x / SCALE, y / SCALE)
    })
}

/// Build the 128×128 `pack.png` for a validated skin.
pub fn generate_pack_icon(skin: &SkinImage) -> SkinPackResult<Vec<u8>> {
    let decoded = image::load_from_memory_with_format(skin.as_bytes(), ImageFormat::Png)
        .map_err(|err| SkinPackError::PackIcon(format!("could not read skin: {err}")))?
        .to_rgba8();

    let face = compose_face(&decoded)?;
    let icon = upscale_nearest(&face);
    let bytes = encode_png(&icon)?;

    debug!("Generated pack icon ({} bytes)", bytes.len());
    Ok(bytes)
}

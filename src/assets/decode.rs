use anyhow::Context;

use crate::{
    assets::store::RasterSource,
    foundation::error::{GraydriftError, GraydriftResult},
};

/// Decode an encoded image (PNG, JPEG, ...) into a straight-alpha RGBA8 source.
pub fn decode_image(bytes: &[u8]) -> GraydriftResult<RasterSource> {
    let dyn_img = image::load_from_memory(bytes)
        .context("decode image from memory")
        .map_err(|e| GraydriftError::frame_decode(format!("{e:#}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    RasterSource::new(width, height, rgba.into_raw())
}

/// Read and decode an image file. Convenience loader for [`crate::Playlist::load`].
pub fn decode_image_file(path: &str) -> GraydriftResult<RasterSource> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("read image file '{path}'"))
        .map_err(|e| GraydriftError::frame_decode(format!("{e:#}")))?;
    decode_image(&bytes)
}

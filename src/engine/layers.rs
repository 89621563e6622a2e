use crate::foundation::{
    core::FrameSize,
    error::{GraydriftError, GraydriftResult},
};

/// One of the two fixed output surfaces the engine writes into.
///
/// The buffer is sized once from the store's [`FrameSize`] and only ever
/// overwritten in place afterwards; hosts read it (plus the opacity) after
/// each `update` and push it to their own 2D surface.
#[derive(Clone, Debug)]
pub struct RasterLayer {
    rgba: Vec<u8>,
    opacity: f32,
}

impl RasterLayer {
    pub(crate) fn with_size(size: FrameSize) -> Self {
        Self {
            rgba: vec![0u8; size.byte_len()],
            opacity: 0.0,
        }
    }

    /// Pixel bytes in row-major straight RGBA8, common frame size.
    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    /// Layer opacity in `[0, 1]`.
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Overwrite the layer contents without reallocating.
    pub(crate) fn write(&mut self, src: &[u8]) -> GraydriftResult<()> {
        if src.len() != self.rgba.len() {
            return Err(GraydriftError::validation(
                "layer write expects a buffer of the common frame size",
            ));
        }
        self.rgba.copy_from_slice(src);
        Ok(())
    }

    pub(crate) fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }
}

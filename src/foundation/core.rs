use crate::foundation::error::{GraydriftError, GraydriftResult};

/// On-screen pixel box of the container the playlist renders into.
///
/// Supplied once by the host before `load()`; the common frame size is derived
/// from it and never changes afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContainerBox {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ContainerBox {
    /// Create a validated container box (both sides must be non-zero).
    pub fn new(width: u32, height: u32) -> GraydriftResult<Self> {
        if width == 0 || height == 0 {
            return Err(GraydriftError::validation(
                "ContainerBox sides must be > 0",
            ));
        }
        Ok(Self { width, height })
    }
}

/// Common pixel dimensions shared by every frame in a store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl FrameSize {
    /// Number of pixels in one frame.
    pub fn pixel_count(self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Byte length of one tightly packed RGBA8 frame.
    pub fn byte_len(self) -> usize {
        self.pixel_count() * 4
    }
}

/// Validate that `rgba` is a tightly packed RGBA8 buffer for `width * height`.
pub(crate) fn expect_rgba_len(rgba: &[u8], width: u32, height: u32) -> GraydriftResult<()> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| GraydriftError::validation("rgba buffer size overflow"))?;
    if rgba.len() != expected {
        return Err(GraydriftError::validation(format!(
            "rgba buffer must be width*height*4 bytes: got {}, expected {expected}",
            rgba.len()
        )));
    }
    Ok(())
}

use std::sync::Arc;

use crate::foundation::{
    core::{ContainerBox, FrameSize, expect_rgba_len},
    error::{GraydriftError, GraydriftResult},
};

/// Decoded raster handed across the image-source boundary.
///
/// Straight (non-premultiplied) RGBA8, row-major, tightly packed.
#[derive(Clone, Debug)]
pub struct RasterSource {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl RasterSource {
    /// Create a validated source; `rgba` must be exactly `width * height * 4` bytes.
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> GraydriftResult<Self> {
        if width == 0 || height == 0 {
            return Err(GraydriftError::validation(
                "RasterSource dimensions must be > 0",
            ));
        }
        expect_rgba_len(&rgba, width, height)?;
        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }
}

/// Immutable, size-normalized frame owned by a [`FrameStore`].
#[derive(Clone, Debug)]
pub struct SourceFrame {
    size: FrameSize,
    /// Pixel bytes in row-major straight RGBA8.
    rgba: Arc<Vec<u8>>,
}

impl SourceFrame {
    pub fn size(&self) -> FrameSize {
        self.size
    }

    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }
}

/// Ordered arena of size-normalized frames.
///
/// Populated once by [`FrameStore::load`]; read-only afterwards. Every frame
/// shares the same [`FrameSize`].
#[derive(Clone, Debug)]
pub struct FrameStore {
    size: FrameSize,
    frames: Vec<SourceFrame>,
}

impl FrameStore {
    /// Build a store from already-decoded sources.
    ///
    /// The common size is the largest uniform scale-to-fit of the maximum
    /// source dimensions into `container`, never upscaling. Every source is
    /// resampled into that size so each frame fills the same canvas. Fails
    /// with `InsufficientFrames` for fewer than two sources; any invalid
    /// source aborts the whole load.
    #[tracing::instrument(skip(sources))]
    pub fn load(sources: &[RasterSource], container: ContainerBox) -> GraydriftResult<Self> {
        if sources.len() < 2 {
            return Err(GraydriftError::InsufficientFrames {
                got: sources.len(),
            });
        }

        let size = common_size(sources, container)?;
        let mut frames = Vec::with_capacity(sources.len());
        for source in sources {
            frames.push(SourceFrame {
                size,
                rgba: Arc::new(resample(source, size)?),
            });
        }

        tracing::debug!(
            frames = frames.len(),
            width = size.width,
            height = size.height,
            "frame store loaded"
        );
        Ok(Self { size, frames })
    }

    /// Build a store by running `loader` over `paths`, fail-fast on the first
    /// decode error (no partial stores).
    pub fn load_with<F>(
        paths: &[String],
        mut loader: F,
        container: ContainerBox,
    ) -> GraydriftResult<Self>
    where
        F: FnMut(&str) -> GraydriftResult<RasterSource>,
    {
        if paths.len() < 2 {
            return Err(GraydriftError::InsufficientFrames { got: paths.len() });
        }
        let mut sources = Vec::with_capacity(paths.len());
        for path in paths {
            sources.push(loader(path)?);
        }
        Self::load(&sources, container)
    }

    pub fn size(&self) -> FrameSize {
        self.size
    }

    /// Number of frames in the store, always >= 2 for a loaded store.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Companion to [`len`](Self::len); a loaded store is never empty.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frame(&self, index: usize) -> Option<&SourceFrame> {
        self.frames.get(index)
    }
}

/// Compute the shared frame size: scale the maximum source dimensions to fit
/// the container, uniformly, capped at 1 (no upscaling), floored to integers.
fn common_size(sources: &[RasterSource], container: ContainerBox) -> GraydriftResult<FrameSize> {
    let max_w = sources.iter().map(RasterSource::width).max().unwrap_or(0);
    let max_h = sources.iter().map(RasterSource::height).max().unwrap_or(0);

    let scale = (f64::from(container.width) / f64::from(max_w))
        .min(f64::from(container.height) / f64::from(max_h))
        .min(1.0);

    let width = (f64::from(max_w) * scale).floor() as u32;
    let height = (f64::from(max_h) * scale).floor() as u32;
    if width == 0 || height == 0 {
        return Err(GraydriftError::validation(
            "container is too small to fit a single pixel of the frames",
        ));
    }

    Ok(FrameSize { width, height })
}

fn resample(source: &RasterSource, size: FrameSize) -> GraydriftResult<Vec<u8>> {
    if source.width() == size.width && source.height() == size.height {
        return Ok(source.rgba().to_vec());
    }

    let img = image::RgbaImage::from_raw(source.width(), source.height(), source.rgba().to_vec())
        .ok_or_else(|| GraydriftError::validation("raster source bytes do not match dimensions"))?;
    let resized = image::imageops::resize(
        &img,
        size.width,
        size.height,
        image::imageops::FilterType::Triangle,
    );
    Ok(resized.into_raw())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, px: [u8; 4]) -> RasterSource {
        RasterSource::new(width, height, px.repeat((width * height) as usize)).unwrap()
    }

    fn container(w: u32, h: u32) -> ContainerBox {
        ContainerBox::new(w, h).unwrap()
    }

    #[test]
    fn load_requires_two_sources() {
        let err = FrameStore::load(&[solid(2, 2, [1, 2, 3, 4])], container(10, 10)).unwrap_err();
        assert!(matches!(
            err,
            GraydriftError::InsufficientFrames { got: 1 }
        ));
    }

    #[test]
    fn load_keeps_native_size_when_container_is_larger() {
        let store = FrameStore::load(
            &[solid(4, 3, [10, 20, 30, 255]), solid(4, 3, [0, 0, 0, 255])],
            container(100, 100),
        )
        .unwrap();
        assert_eq!(
            store.size(),
            FrameSize {
                width: 4,
                height: 3
            }
        );
        assert_eq!(store.len(), 2);
        assert_eq!(store.frame(0).unwrap().rgba(), solid(4, 3, [10, 20, 30, 255]).rgba());
    }

    #[test]
    fn load_scales_down_to_fit_container() {
        let store = FrameStore::load(
            &[solid(8, 4, [1, 1, 1, 255]), solid(8, 4, [2, 2, 2, 255])],
            container(4, 4),
        )
        .unwrap();
        // scale = min(4/8, 4/4, 1) = 0.5
        assert_eq!(
            store.size(),
            FrameSize {
                width: 4,
                height: 2
            }
        );
    }

    #[test]
    fn all_frames_share_the_common_size() {
        let store = FrameStore::load(
            &[solid(8, 8, [9, 9, 9, 255]), solid(2, 2, [7, 7, 7, 255])],
            container(8, 8),
        )
        .unwrap();
        for i in 0..store.len() {
            let frame = store.frame(i).unwrap();
            assert_eq!(frame.size(), store.size());
            assert_eq!(frame.rgba().len(), store.size().byte_len());
        }
    }

    #[test]
    fn load_with_aborts_on_first_loader_failure() {
        let paths = vec!["a".to_string(), "bad".to_string(), "c".to_string()];
        let mut calls = 0usize;
        let result = FrameStore::load_with(
            &paths,
            |path| {
                calls += 1;
                if path == "bad" {
                    Err(GraydriftError::frame_decode("bad frame"))
                } else {
                    Ok(solid(2, 2, [1, 2, 3, 4]))
                }
            },
            container(10, 10),
        );
        assert!(matches!(result, Err(GraydriftError::FrameDecode(_))));
        assert_eq!(calls, 2);
    }

    #[test]
    fn raster_source_validates_byte_length() {
        assert!(RasterSource::new(2, 2, vec![0u8; 15]).is_err());
        assert!(RasterSource::new(0, 2, vec![]).is_err());
    }
}

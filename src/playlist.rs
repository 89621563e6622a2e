use crate::{
    assets::store::{FrameStore, RasterSource},
    engine::{
        layers::RasterLayer,
        markers::marker_active,
        transition::{DEFAULT_MAX_PIXELATION, TransitionEngine},
    },
    foundation::{
        core::ContainerBox,
        error::{GraydriftError, GraydriftResult},
    },
};

/// Host-facing playlist configuration.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct PlaylistOptions {
    /// Image source locations, handed one by one to the loader.
    pub images: Vec<String>,
    /// Engine-wide maximum pixelation block size.
    #[serde(default = "default_max_pixelation")]
    pub max_pixelation: u32,
    /// Activate the engine as soon as the load succeeds.
    #[serde(default = "default_auto_activate")]
    pub auto_activate: bool,
}

fn default_max_pixelation() -> u32 {
    DEFAULT_MAX_PIXELATION
}

fn default_auto_activate() -> bool {
    true
}

/// Dither-transition playlist: owns the frame store, the engine and the
/// marker state, and wires them to the host's driver/render boundaries.
///
/// `destroy()` releases everything and turns every later call into a no-op;
/// a failed load never constructs a playlist, so nothing renders.
#[derive(Debug)]
pub struct Playlist {
    engine: Option<TransitionEngine>,
}

impl Playlist {
    /// Load every image through `loader`, build the store and the engine.
    ///
    /// Fail-fast: fewer than two images is `InsufficientFrames`, any loader
    /// failure aborts the whole load with no partial playlist. Honors
    /// `auto_activate`.
    #[tracing::instrument(skip(options, loader), fields(images = options.images.len()))]
    pub fn load<F>(
        options: &PlaylistOptions,
        loader: F,
        container: ContainerBox,
    ) -> GraydriftResult<Self>
    where
        F: FnMut(&str) -> GraydriftResult<RasterSource>,
    {
        let store = FrameStore::load_with(&options.images, loader, container)?;
        Self::from_store(store, options)
    }

    /// Build a playlist from already-decoded sources.
    pub fn from_sources(
        sources: &[RasterSource],
        options: &PlaylistOptions,
        container: ContainerBox,
    ) -> GraydriftResult<Self> {
        let store = FrameStore::load(sources, container)?;
        Self::from_store(store, options)
    }

    fn from_store(store: FrameStore, options: &PlaylistOptions) -> GraydriftResult<Self> {
        let mut engine = TransitionEngine::new(store, options.max_pixelation)?;
        if options.auto_activate {
            engine.activate();
        }
        Ok(Self {
            engine: Some(engine),
        })
    }

    pub fn activate(&mut self) {
        if let Some(engine) = self.engine.as_mut() {
            engine.activate();
        }
    }

    pub fn deactivate(&mut self) {
        if let Some(engine) = self.engine.as_mut() {
            engine.deactivate();
        }
    }

    /// Drive the playlist with the external progress scalar.
    ///
    /// No-op when deactivated or destroyed.
    pub fn update(&mut self, total_progress: f32) -> GraydriftResult<()> {
        match self.engine.as_mut() {
            Some(engine) => engine.update(total_progress),
            None => Ok(()),
        }
    }

    /// Release all buffers and detach from the driver. Idempotent.
    pub fn destroy(&mut self) {
        if self.engine.take().is_some() {
            tracing::debug!("playlist destroyed");
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.engine.is_none()
    }

    /// Read handles for the two output layers, in (front, back) order.
    pub fn layers(&self) -> Option<(&RasterLayer, &RasterLayer)> {
        self.engine
            .as_ref()
            .map(|e| (e.layer_a(), e.layer_b()))
    }

    pub fn frame_count(&self) -> usize {
        self.engine.as_ref().map_or(0, TransitionEngine::frame_count)
    }

    /// Is the given progress marker active for the current transition state?
    pub fn marker_active(&self, marker_index: usize) -> bool {
        match self.engine.as_ref() {
            Some(engine) => {
                let state = engine.state();
                marker_active(marker_index, state.pair_index, state.local_progress)
            }
            None => false,
        }
    }
}

impl Drop for Playlist {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl PlaylistOptions {
    /// Options with defaults for everything but the image list.
    pub fn new(images: Vec<String>) -> GraydriftResult<Self> {
        if images.len() < 2 {
            return Err(GraydriftError::InsufficientFrames { got: images.len() });
        }
        Ok(Self {
            images,
            max_pixelation: default_max_pixelation(),
            auto_activate: default_auto_activate(),
        })
    }
}

use crate::{
    assets::store::{FrameStore, SourceFrame},
    effects::{dither::dither_frame, pixelate::pixelate},
    engine::{
        layers::RasterLayer,
        phase::{
            Phase, TransitionState, block_ramp_down, block_ramp_up, resolve_phase,
            resolve_transition,
        },
    },
    foundation::error::{GraydriftError, GraydriftResult},
};

/// Engine-wide maximum pixelation block size when none is configured.
pub const DEFAULT_MAX_PIXELATION: u32 = 16;

/// Pull-based two-layer compositor over a [`FrameStore`].
///
/// The external driver calls [`update`](Self::update) once per tick; the call
/// fully recomputes both layers before returning. The two layer buffers are
/// allocated once and reused across updates.
#[derive(Debug)]
pub struct TransitionEngine {
    store: FrameStore,
    max_pixelation: u32,
    active: bool,
    state: TransitionState,
    layer_a: RasterLayer,
    layer_b: RasterLayer,
}

impl TransitionEngine {
    /// Create an inactive engine over a loaded store.
    pub fn new(store: FrameStore, max_pixelation: u32) -> GraydriftResult<Self> {
        if store.len() < 2 {
            return Err(GraydriftError::InsufficientFrames { got: store.len() });
        }
        if max_pixelation < 1 {
            return Err(GraydriftError::validation("max_pixelation must be >= 1"));
        }

        let size = store.size();
        Ok(Self {
            store,
            max_pixelation,
            active: false,
            state: TransitionState {
                pair_index: 0,
                local_progress: 0.0,
            },
            layer_a: RasterLayer::with_size(size),
            layer_b: RasterLayer::with_size(size),
        })
    }

    pub fn activate(&mut self) {
        self.active = true;
        tracing::debug!("transition engine activated");
    }

    pub fn deactivate(&mut self) {
        self.active = false;
        tracing::debug!("transition engine deactivated");
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Front (ping) output layer.
    pub fn layer_a(&self) -> &RasterLayer {
        &self.layer_a
    }

    /// Back (pong) output layer.
    pub fn layer_b(&self) -> &RasterLayer {
        &self.layer_b
    }

    /// Transition state derived by the most recent [`update`](Self::update).
    pub fn state(&self) -> TransitionState {
        self.state
    }

    pub fn frame_count(&self) -> usize {
        self.store.len()
    }

    /// Recompute both layers for the given total progress.
    ///
    /// No-op while deactivated. Non-finite progress is clamped to the nearest
    /// valid bound (NaN to 0) and logged, never propagated as an error.
    pub fn update(&mut self, total_progress: f32) -> GraydriftResult<()> {
        if !self.active {
            return Ok(());
        }

        let total = sanitize_progress(total_progress);
        let state = resolve_transition(total, self.store.len());
        self.state = state;

        let frame_a = self
            .store
            .frame(state.pair_index)
            .ok_or_else(|| GraydriftError::validation("pair_index out of range"))?;
        let frame_b = self
            .store
            .frame(state.pair_index + 1)
            .ok_or_else(|| GraydriftError::validation("pair_index + 1 out of range"))?;

        match resolve_phase(state.local_progress) {
            Phase::RestA => {
                self.layer_a.write(frame_a.rgba())?;
                self.layer_a.set_opacity(1.0);
                self.layer_b.set_opacity(0.0);
            }
            Phase::DitherIn { t } => {
                let dithered = dither_frame(frame_a, 1.0)?;
                self.layer_a.write(frame_a.rgba())?;
                self.layer_b.write(&dithered)?;
                self.layer_a.set_opacity(1.0 - t);
                self.layer_b.set_opacity(t);
            }
            Phase::PixelateIn { t } => {
                let size = self.store.size();
                let dithered = dither_frame(frame_a, 1.0)?;
                let block = block_ramp_up(t, self.max_pixelation);
                let mosaic = pixelate(&dithered, size.width, size.height, block)?;
                self.layer_a.write(&dithered)?;
                self.layer_b.write(&mosaic)?;
                self.layer_a.set_opacity(1.0 - t);
                self.layer_b.set_opacity(t);
            }
            Phase::PixelSwap { t } => {
                // The two sides are independent frame pipelines; each dither
                // pass stays sequential internally.
                let size = self.store.size();
                let max_block = self.max_pixelation;
                let (mosaic_a, mosaic_b) = rayon::join(
                    || pixelated_dither(frame_a, size.width, size.height, max_block),
                    || pixelated_dither(frame_b, size.width, size.height, max_block),
                );
                // Resolve both results before the first write so an error
                // cannot leave the pair half-updated.
                let (mosaic_a, mosaic_b) = (mosaic_a?, mosaic_b?);
                self.layer_a.write(&mosaic_a)?;
                self.layer_b.write(&mosaic_b)?;
                self.layer_a.set_opacity(1.0 - t);
                self.layer_b.set_opacity(t);
            }
            Phase::PixelateOut { t } => {
                let size = self.store.size();
                let dithered = dither_frame(frame_b, 1.0)?;
                let block = block_ramp_down(t, self.max_pixelation);
                let mosaic = pixelate(&dithered, size.width, size.height, block)?;
                self.layer_a.write(&mosaic)?;
                self.layer_b.write(&dithered)?;
                self.layer_a.set_opacity(1.0 - t);
                self.layer_b.set_opacity(t);
            }
            Phase::DitherOut { t } => {
                // Layer roles flip: A carries the plain incoming image and
                // fades in while the dithered form on B fades out.
                let dithered = dither_frame(frame_b, 1.0)?;
                self.layer_a.write(frame_b.rgba())?;
                self.layer_b.write(&dithered)?;
                self.layer_a.set_opacity(t);
                self.layer_b.set_opacity(1.0 - t);
            }
            Phase::RestB => {
                self.layer_a.write(frame_b.rgba())?;
                self.layer_a.set_opacity(1.0);
                self.layer_b.set_opacity(0.0);
            }
        }

        Ok(())
    }
}

fn pixelated_dither(
    frame: &SourceFrame,
    width: u32,
    height: u32,
    block: u32,
) -> GraydriftResult<Vec<u8>> {
    let dithered = dither_frame(frame, 1.0)?;
    pixelate(&dithered, width, height, block)
}

fn sanitize_progress(total_progress: f32) -> f32 {
    if total_progress.is_finite() {
        return total_progress.clamp(0.0, 1.0);
    }
    let clamped = if total_progress == f32::INFINITY {
        1.0
    } else {
        0.0
    };
    tracing::warn!(
        progress = total_progress,
        clamped,
        "non-finite progress clamped"
    );
    clamped
}

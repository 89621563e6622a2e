//! Graydrift is a progressive dither-transition compositing engine.
//!
//! Given an ordered set of raster images and one continuous progress scalar
//! (scroll position, animation time, ...), it renders a two-layer composite
//! that walks each consecutive image pair through a fixed phase schedule:
//! plain image, grayscale error-diffusion dither, block pixelation, then the
//! same road back out into the next image.
//!
//! # Pipeline overview
//!
//! 1. **Load**: decoded [`RasterSource`]s are normalized to one common size
//!    in an immutable [`FrameStore`].
//! 2. **Update**: the host calls [`Playlist::update`] (or
//!    [`TransitionEngine::update`]) once per tick; the engine maps progress
//!    onto a frame pair and one of seven phase windows, runs the grayscale /
//!    Floyd-Steinberg / mosaic pipelines, and overwrites the two fixed
//!    [`RasterLayer`] buffers.
//! 3. **Render**: the host reads both layers (pixels + opacity) and pushes
//!    them to its own 2D surface.
//!
//! The numeric core is pure and deterministic: same frames, same progress,
//! same bytes. No IO happens after load, and `unsafe` is forbidden.
#![forbid(unsafe_code)]

pub mod assets;
pub mod effects;
pub mod engine;
pub mod foundation;
pub mod playlist;

pub use assets::decode::{decode_image, decode_image_file};
pub use assets::store::{FrameStore, RasterSource, SourceFrame};
pub use effects::dither::{DITHER_THRESHOLD, apply_dither, dither_frame, to_grayscale};
pub use effects::pixelate::pixelate;
pub use engine::layers::RasterLayer;
pub use engine::markers::{active_markers, marker_active};
pub use engine::phase::{
    Phase, TransitionState, block_ramp_down, block_ramp_up, resolve_phase, resolve_transition,
};
pub use engine::transition::{DEFAULT_MAX_PIXELATION, TransitionEngine};
pub use foundation::core::{ContainerBox, FrameSize};
pub use foundation::error::{GraydriftError, GraydriftResult};
pub use playlist::{Playlist, PlaylistOptions};

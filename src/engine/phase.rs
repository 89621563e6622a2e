//! Progress mapping and the fixed 7-window phase schedule.
//!
//! The window breakpoints (0.2 / 0.35 / 0.45 / 0.55 / 0.65 / 0.8) and the
//! red-channel-only dithering upstream are part of the visual signature of
//! the transition and are not to be retuned.

/// Derived per update from the single external progress scalar; never stored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionState {
    /// Index of the frame pair being blended, in `[0, frame_count - 2]`.
    pub pair_index: usize,
    /// Position inside that pair's transition, in `[0, 1]`.
    pub local_progress: f32,
}

/// One of the seven phase windows. `t` is the window-local interpolation
/// fraction, not the pair-local progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Phase {
    /// `[0, 0.2)`: image A plain, layer B dark.
    RestA,
    /// `[0.2, 0.35)`: image A fades into its dithered form.
    DitherIn { t: f32 },
    /// `[0.35, 0.45)`: dithered A fades into its pixelated form, block size ramping up.
    PixelateIn { t: f32 },
    /// `[0.45, 0.55)`: fully pixelated A crossfades into fully pixelated B.
    PixelSwap { t: f32 },
    /// `[0.55, 0.65)`: pixelated B sharpens back into dithered B.
    PixelateOut { t: f32 },
    /// `[0.65, 0.8)`: dithered B fades into plain image B (layer roles flip here).
    DitherOut { t: f32 },
    /// `[0.8, 1.0]`: image B plain, layer B dark.
    RestB,
}

/// Map total playlist progress onto a frame pair and its local progress.
///
/// `total_progress` is assumed finite and is clamped to `[0, 1]`; progress at
/// or above 0.999 snaps the local progress to the terminal phase so the last
/// frame renders clean. For a monotonically increasing input the resulting
/// `pair_index` is non-decreasing.
pub fn resolve_transition(total_progress: f32, frame_count: usize) -> TransitionState {
    debug_assert!(frame_count >= 2);
    let transitions = frame_count.saturating_sub(1).max(1);
    let total = total_progress.clamp(0.0, 1.0);

    let scaled = total * transitions as f32;
    let pair_index = (scaled.floor() as usize).min(transitions - 1);
    let local_progress = if total >= 0.999 {
        1.0
    } else {
        (scaled - scaled.floor()).min(1.0)
    };

    TransitionState {
        pair_index,
        local_progress,
    }
}

/// Dispatch a pair-local progress value to its phase window, first match wins.
pub fn resolve_phase(local_progress: f32) -> Phase {
    let p = local_progress.clamp(0.0, 1.0);
    if p < 0.2 {
        Phase::RestA
    } else if p < 0.35 {
        Phase::DitherIn {
            t: (p - 0.2) / 0.15,
        }
    } else if p < 0.45 {
        Phase::PixelateIn {
            t: (p - 0.35) / 0.10,
        }
    } else if p < 0.55 {
        Phase::PixelSwap {
            t: (p - 0.45) / 0.10,
        }
    } else if p < 0.65 {
        Phase::PixelateOut {
            t: (p - 0.55) / 0.10,
        }
    } else if p < 0.8 {
        Phase::DitherOut {
            t: (p - 0.65) / 0.15,
        }
    } else {
        Phase::RestB
    }
}

/// Block size while pixelation is building up: 1 at `t = 0`, `max_block` at `t = 1`.
pub fn block_ramp_up(t: f32, max_block: u32) -> u32 {
    let span = max_block.saturating_sub(1) as f32;
    let b = (1.0 + t.clamp(0.0, 1.0) * span).round() as u32;
    b.clamp(1, max_block.max(1))
}

/// Block size while pixelation is dissolving: `max_block` at `t = 0`, 1 at `t = 1`.
pub fn block_ramp_down(t: f32, max_block: u32) -> u32 {
    let span = max_block.saturating_sub(1) as f32;
    let step = (t.clamp(0.0, 1.0) * span).round() as u32;
    max_block.saturating_sub(step).max(1)
}

//! Progress-marker activation policy.
//!
//! Pure data: which dot in a host-rendered marker strip should light up for a
//! given transition state. The host owns the markup; the engine never reaches
//! into it.

/// Is marker `marker_index` active for the given pair and local progress?
///
/// Early in a transition only the outgoing frame's marker is lit, late only
/// the incoming frame's, and both in between.
pub fn marker_active(marker_index: usize, pair_index: usize, local_progress: f32) -> bool {
    if local_progress < 0.2 {
        marker_index == pair_index
    } else if local_progress > 0.8 {
        marker_index == pair_index + 1
    } else {
        marker_index == pair_index || marker_index == pair_index + 1
    }
}

/// All active marker indices for a strip of `frame_count` markers.
pub fn active_markers(frame_count: usize, pair_index: usize, local_progress: f32) -> Vec<usize> {
    (0..frame_count)
        .filter(|&i| marker_active(i, pair_index, local_progress))
        .collect()
}

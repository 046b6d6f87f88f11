//! # Body-Scale Estimator
//!
//! Derives the per-clip normalization constant: mean vertical nose-to-ankle
//! distance over frames where that distance clears a noise floor. Frames
//! below the floor (partial occlusion, subject walking out of frame) are
//! excluded from the mean, not zeroed.
//!
//! The scale is only ever used as a divisor. It approximates the subject's
//! height in image units and must not be compared across clips shot with
//! different cameras or framing.

use crate::models::LandmarkFrame;

/// Noise floor for the whole-clip estimate feeding classification.
pub const CLIP_NOISE_FLOOR: f32 = 0.05;

/// Tighter floor for the hit-window estimate feeding metric normalization.
pub const WINDOW_NOISE_FLOOR: f32 = 0.1;

/// Scale used when no frame clears the floor.
pub const FALLBACK_BODY_SCALE: f32 = 0.5;

/// Estimate the body scale over a set of frames.
///
/// Returns a strictly positive value: the mean of qualifying nose-to-ankle
/// distances, or [`FALLBACK_BODY_SCALE`] when none qualify.
pub fn estimate_body_scale(frames: &[LandmarkFrame], noise_floor: f32) -> f32 {
    let mut sum = 0.0f32;
    let mut count = 0usize;

    for frame in frames {
        let height = (frame.ankle_midpoint_y() - frame.nose.y).abs();
        if height > noise_floor {
            sum += height;
            count += 1;
        }
    }

    if count == 0 {
        FALLBACK_BODY_SCALE
    } else {
        sum / count as f32
    }
}

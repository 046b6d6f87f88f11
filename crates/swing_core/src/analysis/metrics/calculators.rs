//! # Metric Calculators
//!
//! Independent, pure, stateless functions over landmark frames. Every
//! distance and speed is divided by the hit-window body scale before any
//! reference bound applies, which makes the outputs camera-scale-invariant.
//! Each calculator clips its own output to [0,1].
//!
//! The linear rescale bounds (e.g. "0.4 body heights above the nose maps
//! to 1.0") encode what a well-executed club-level swing looks like on the
//! reference footage; they are fixed, not adaptive.

use crate::models::LandmarkFrame;

/// Frames searched on each side of the velocity peak for the contact point.
const CONTACT_SEARCH_HALF_WIDTH: usize = 5;

/// Frames searched on each side of the peak when comparing the highest-wrist
/// index against the peak-velocity index.
const TIMING_SEARCH_HALF_WIDTH: usize = 15;

/// Frame offset at or beyond which timing scores 0.
const TIMING_TOLERANCE_FRAMES: f32 = 12.0;

/// Contact height: how far above the nose the higher wrist gets near the
/// peak. "At or slightly below the nose" maps to 0, ~0.4 body heights above
/// maps to 1.
pub fn contact_height(frames: &[LandmarkFrame], peak: usize, body_scale: f32) -> f32 {
    let start = peak.saturating_sub(CONTACT_SEARCH_HALF_WIDTH);
    let end = (peak + CONTACT_SEARCH_HALF_WIDTH).min(frames.len());

    let mut min_wrist_y = 1.0f32;
    for frame in &frames[start..end] {
        min_wrist_y = min_wrist_y.min(frame.high_wrist_y());
    }

    let nose_y = frames[peak].nose.y;
    let ratio = (nose_y - min_wrist_y) / body_scale;
    ((ratio + 0.1) / 0.5).clamp(0.0, 1.0)
}

/// Swing amplitude: cumulative wrist travel over the window. One body height
/// of travel is a minimal swing; four is a full one.
pub fn swing_amplitude(window: &[LandmarkFrame], body_scale: f32) -> f32 {
    let ratio = wrist_path_length(window) / body_scale;
    ((ratio - 1.0) / 3.0).clamp(0.0, 1.0)
}

/// Coordination: shoulder-width contraction across the window as a torso
/// rotation proxy. A near-constant projected width means no rotation.
pub fn coordination(window: &[LandmarkFrame]) -> f32 {
    if window.is_empty() {
        return 0.5;
    }

    let mut min_w = f32::MAX;
    let mut max_w = f32::MIN;
    for frame in window {
        let w = frame.shoulder_width();
        min_w = min_w.min(w);
        max_w = max_w.max(w);
    }

    let rotation = 1.0 - min_w / (max_w + 0.001);
    ((rotation - 0.1) / 0.4).clamp(0.0, 1.0)
}

/// Downward velocity: peak downward wrist speed in body heights per second,
/// rescaled between 2.0 (slow) and 8.0 (fast).
pub fn downward_velocity(
    frames: &[LandmarkFrame],
    start: usize,
    end: usize,
    body_scale: f32,
    fps: f32,
) -> f32 {
    let mut max_vel = 0.0f32;
    for i in start..end {
        let vel = (frames[i + 1].right_wrist.y - frames[i].right_wrist.y) * fps;
        max_vel = max_vel.max(vel);
    }

    let normalized = max_vel / body_scale;
    ((normalized - 2.0) / 6.0).clamp(0.0, 1.0)
}

/// Timing: distance in frames between the highest wrist position and the
/// velocity peak. Contact at full extension scores 1; a dozen frames of lag
/// (about 0.4 s at 30 fps, allowing natural follow-through) scores 0.
pub fn timing(frames: &[LandmarkFrame], peak: usize) -> f32 {
    let start = peak.saturating_sub(TIMING_SEARCH_HALF_WIDTH);
    let end = (peak + TIMING_SEARCH_HALF_WIDTH).min(frames.len());

    let mut min_wrist_y = 1.0f32;
    let mut highest_idx = peak;
    for (i, frame) in frames.iter().enumerate().take(end).skip(start) {
        if frame.right_wrist.y < min_wrist_y {
            min_wrist_y = frame.right_wrist.y;
            highest_idx = i;
        }
    }

    let offset = highest_idx.abs_diff(peak) as f32;
    (1.0 - offset / TIMING_TOLERANCE_FRAMES).clamp(0.0, 1.0)
}

/// Follow-through height shortly after the peak, a proxy for how high the
/// shuttle was sent on a lift.
pub fn follow_through_height(frames: &[LandmarkFrame], peak: usize, body_scale: f32) -> f32 {
    let idx = (peak + 10).min(frames.len() - 1);
    let ratio = (frames[idx].nose.y - frames[idx].right_wrist.y) / body_scale;
    ((ratio + 0.2) / 0.5).clamp(0.0, 1.0)
}

/// Simplicity: net displacement over total path length of the wrist. A
/// perfectly straight stroke scores 1; loops and hesitation lower it.
pub fn simplicity(window: &[LandmarkFrame]) -> f32 {
    if window.len() < 2 {
        return 1.0;
    }

    let total = wrist_path_length(window);
    if total == 0.0 {
        return 1.0;
    }

    let displacement = window[window.len() - 1]
        .right_wrist
        .distance_to(&window[0].right_wrist);
    (displacement / total).clamp(0.0, 1.0)
}

/// Stability: inverse of nose positional spread across the window, a proxy
/// for whole-body sway during the stroke.
pub fn stability(window: &[LandmarkFrame], body_scale: f32) -> f32 {
    let xs: Vec<f32> = window.iter().map(|f| f.nose.x).collect();
    let ys: Vec<f32> = window.iter().map(|f| f.nose.y).collect();

    let spread = (variance(&xs) + variance(&ys)).sqrt();
    let normalized = spread / body_scale;
    (1.0 - normalized / 0.1).clamp(0.0, 1.0)
}

/// Net tightness proxy: spread of the elbow-to-shoulder distance. A quiet
/// hitting arm keeps the racket face controlled at the net.
pub fn net_tightness(window: &[LandmarkFrame], body_scale: f32) -> f32 {
    let dists: Vec<f32> = window
        .iter()
        .map(|f| f.right_elbow.distance_to(&f.right_shoulder))
        .collect();

    let spread = variance(&dists).sqrt();
    let normalized = spread / body_scale;
    (1.0 - normalized / 0.05).clamp(0.0, 1.0)
}

/// Inverted speed score for shots that want a soft touch: peak per-frame
/// wrist displacement below 0.02 body heights scores 1, above 0.1 scores 0.
pub fn swing_speed_low(
    frames: &[LandmarkFrame],
    start: usize,
    end: usize,
    body_scale: f32,
) -> f32 {
    let mut max_dist = 0.0f32;
    for i in start..end {
        let dist = frames[i + 1].right_wrist.distance_to(&frames[i].right_wrist);
        max_dist = max_dist.max(dist);
    }

    let speed = max_dist / body_scale;
    (1.0 - (speed - 0.02) / 0.08).clamp(0.0, 1.0)
}

fn wrist_path_length(window: &[LandmarkFrame]) -> f32 {
    let mut total = 0.0f32;
    for i in 1..window.len() {
        total += window[i].right_wrist.distance_to(&window[i - 1].right_wrist);
    }
    total
}

fn variance(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = values.iter().sum::<f32>() / values.len() as f32;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f32>() / values.len() as f32
}

//! # Action Classifier
//!
//! Heuristic decision procedure mapping a landmark sequence to one of the
//! five swing categories. No training or adaptation: the clip is reduced to
//! four scale-normalized scalars and pushed through a fixed decision tree.
//!
//! ## Algorithm
//! 1. Estimate BodyScale over the whole clip.
//! 2. Per frame: wrist reach above the nose; per frame pair: wrist speed and
//!    its signed vertical component (positive = toward the floor).
//! 3. Reduce to max reach, max speed, max downward speed, wrist-height
//!    variance.
//! 4. Reach separates overhead from underhand; speed, direction and variance
//!    split the families into the five categories.
//!
//! Overhead/underhand separation by reach is robust to camera angle; the
//! secondary cutoffs are not, see [`ClassifierThresholds`].

use serde::{Deserialize, Serialize};
use tracing::info;

use super::body_scale::{estimate_body_scale, CLIP_NOISE_FLOOR};
use crate::models::{ActionType, LandmarkSequence};

/// Decision cutoffs for the classifier tree.
///
/// Hand-tuned against the reference recording setup (single fixed camera,
/// subject roughly centered). A deployment with different camera placement
/// must recalibrate these against labeled clips; nothing here is computed
/// adaptively at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierThresholds {
    /// Wrist reach above the nose (in body heights) separating the overhead
    /// family from the underhand family.
    pub overhead_reach: f32,
    /// Peak normalized wrist speed at or below which an overhead shot is a
    /// drop.
    pub drop_max_velocity: f32,
    /// Peak downward wrist speed (body heights per frame) above which a fast
    /// overhead shot is a smash rather than a clear.
    pub smash_downward_velocity: f32,
    /// Normalized wrist-height variance below which an underhand shot is a
    /// net shot rather than a lift.
    pub net_shot_variance: f32,
}

impl Default for ClassifierThresholds {
    fn default() -> Self {
        Self {
            overhead_reach: 0.15,
            drop_max_velocity: 0.12,
            smash_downward_velocity: 0.05,
            net_shot_variance: 0.005,
        }
    }
}

/// The four scalars the decision tree consumes.
#[derive(Debug, Clone, Copy, Default)]
pub struct MotionSummary {
    /// Max wrist height above the nose, in body heights.
    pub max_reach: f32,
    /// Max per-frame wrist displacement, in body heights.
    pub max_velocity: f32,
    /// Max signed vertical wrist displacement (positive = down), in body
    /// heights. May be negative for a purely rising swing.
    pub max_downward_velocity: f32,
    /// Variance of the normalized higher-wrist height over the clip.
    pub wrist_height_variance: f32,
}

/// Reduce a sequence to the classifier scalars.
///
/// Sequences with fewer than two frames have no velocity samples; the
/// velocity scalars are defined as 0 so the decision tree stays total.
pub fn summarize_motion(sequence: &LandmarkSequence, body_scale: f32) -> MotionSummary {
    let frames = &sequence.frames;

    let mut reaches = Vec::with_capacity(frames.len());
    let mut wrist_heights = Vec::with_capacity(frames.len());
    let mut velocities = Vec::new();
    let mut downward = Vec::new();

    for (i, frame) in frames.iter().enumerate() {
        let wrist_y = frame.high_wrist_y();
        wrist_heights.push(wrist_y / body_scale);
        reaches.push((frame.nose.y - wrist_y) / body_scale);

        if i > 0 {
            let prev = &frames[i - 1];
            let dist = frame.right_wrist.distance_to(&prev.right_wrist);
            velocities.push(dist / body_scale);
            downward.push((frame.right_wrist.y - prev.right_wrist.y) / body_scale);
        }
    }

    MotionSummary {
        max_reach: max_of(&reaches),
        max_velocity: max_of(&velocities),
        max_downward_velocity: max_of(&downward),
        wrist_height_variance: variance(&wrist_heights),
    }
}

/// Classify the clip. Empty sequences cannot be classified.
pub fn classify(sequence: &LandmarkSequence, thresholds: &ClassifierThresholds) -> ActionType {
    if sequence.is_empty() {
        return ActionType::Unknown;
    }

    let body_scale = estimate_body_scale(&sequence.frames, CLIP_NOISE_FLOOR);
    let summary = summarize_motion(sequence, body_scale);

    info!(
        max_reach = summary.max_reach,
        max_velocity = summary.max_velocity,
        max_downward_velocity = summary.max_downward_velocity,
        wrist_height_variance = summary.wrist_height_variance,
        "action classification scalars"
    );

    decide(&summary, thresholds)
}

fn decide(summary: &MotionSummary, t: &ClassifierThresholds) -> ActionType {
    if summary.max_reach > t.overhead_reach {
        if summary.max_velocity <= t.drop_max_velocity {
            ActionType::Drop
        } else if summary.max_downward_velocity > t.smash_downward_velocity {
            ActionType::Smash
        } else {
            ActionType::Clear
        }
    } else if summary.wrist_height_variance < t.net_shot_variance {
        ActionType::NetShot
    } else {
        ActionType::Lift
    }
}

fn max_of(values: &[f32]) -> f32 {
    values.iter().copied().fold(None, |acc: Option<f32>, v| {
        Some(acc.map_or(v, |a| a.max(v)))
    })
    .unwrap_or(0.0)
}

fn variance(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = values.iter().sum::<f32>() / values.len() as f32;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f32>() / values.len() as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Landmark, LandmarkFrame};

    /// Frame with a fixed standing body (nose 0.3, ankles 0.9, scale 0.6)
    /// and the right wrist at the given point.
    fn frame(wrist_x: f32, wrist_y: f32) -> LandmarkFrame {
        LandmarkFrame {
            nose: Landmark::new(0.5, 0.3),
            left_wrist: Landmark::new(0.45, 0.6),
            right_wrist: Landmark::new(wrist_x, wrist_y),
            left_shoulder: Landmark::new(0.42, 0.42),
            right_shoulder: Landmark::new(0.58, 0.42),
            left_hip: Landmark::new(0.45, 0.62),
            right_hip: Landmark::new(0.55, 0.62),
            left_ankle: Landmark::new(0.45, 0.9),
            right_ankle: Landmark::new(0.55, 0.9),
            left_elbow: Landmark::new(0.4, 0.5),
            right_elbow: Landmark::new(0.6, 0.5),
        }
    }

    fn sequence(wrists: &[(f32, f32)]) -> LandmarkSequence {
        LandmarkSequence::new(wrists.iter().map(|&(x, y)| frame(x, y)).collect(), 30.0)
    }

    #[test]
    fn test_fast_downward_overhead_is_smash() {
        // Wrist snaps above the nose then whips down.
        let seq = sequence(&[(0.5, 0.5), (0.5, 0.12), (0.55, 0.5)]);
        assert_eq!(classify(&seq, &ClassifierThresholds::default()), ActionType::Smash);
    }

    #[test]
    fn test_fast_rising_overhead_is_clear() {
        let seq = sequence(&[(0.5, 0.6), (0.5, 0.2), (0.5, 0.1)]);
        assert_eq!(classify(&seq, &ClassifierThresholds::default()), ActionType::Clear);
    }

    #[test]
    fn test_slow_overhead_is_drop() {
        let ys = [0.5, 0.44, 0.38, 0.32, 0.26, 0.2, 0.14];
        let wrists: Vec<(f32, f32)> = ys.iter().map(|&y| (0.5, y)).collect();
        let seq = sequence(&wrists);
        assert_eq!(classify(&seq, &ClassifierThresholds::default()), ActionType::Drop);
    }

    #[test]
    fn test_quiet_underhand_wrist_is_net_shot() {
        let seq = sequence(&[(0.5, 0.55), (0.5, 0.552), (0.5, 0.548)]);
        assert_eq!(classify(&seq, &ClassifierThresholds::default()), ActionType::NetShot);
    }

    #[test]
    fn test_swinging_underhand_wrist_is_lift() {
        let seq = sequence(&[(0.5, 0.8), (0.5, 0.7), (0.5, 0.55), (0.5, 0.45), (0.5, 0.4)]);
        assert_eq!(classify(&seq, &ClassifierThresholds::default()), ActionType::Lift);
    }

    #[test]
    fn test_single_frame_is_deterministic() {
        // No velocity samples: both velocity scalars are 0, so an overhead
        // single frame lands in the drop branch.
        let seq = sequence(&[(0.5, 0.1)]);
        assert_eq!(classify(&seq, &ClassifierThresholds::default()), ActionType::Drop);
    }

    #[test]
    fn test_empty_sequence_is_unknown() {
        let seq = LandmarkSequence::new(vec![], 30.0);
        assert_eq!(classify(&seq, &ClassifierThresholds::default()), ActionType::Unknown);
    }

    #[test]
    fn test_max_of_keeps_sign() {
        // A purely rising swing has a negative max downward velocity; the
        // reduction must not floor it at zero.
        assert!(max_of(&[-0.4, -0.1, -0.3]) < 0.0);
        assert_eq!(max_of(&[]), 0.0);
    }
}

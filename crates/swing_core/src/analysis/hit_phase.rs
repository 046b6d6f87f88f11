//! # Hit-Phase Locator
//!
//! Finds the swing's velocity peak and brackets it with a fixed-width
//! analysis window. Metric extraction operates on this window so that
//! preparation and recovery footage does not dilute the swing itself.

use crate::models::LandmarkSequence;

/// Frames kept on each side of the velocity peak.
pub const HIT_WINDOW_HALF_WIDTH: usize = 15;

/// The localized swing event: inclusive frame range plus the peak index.
///
/// Invariant: `start <= peak <= end`, all within sequence bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitWindow {
    pub start: usize,
    pub end: usize,
    pub peak: usize,
}

impl HitWindow {
    /// Number of frames the window spans.
    pub fn frame_count(&self) -> usize {
        self.end - self.start + 1
    }
}

/// Locate the hit phase from per-frame wrist displacement.
///
/// Total for every input: sequences too short to carry a velocity sample
/// collapse to a window at index 0, and a single-frame sequence returns
/// `(0, 0, 0)`.
pub fn locate_hit_phase(sequence: &LandmarkSequence) -> HitWindow {
    let frames = &sequence.frames;
    let last = frames.len().saturating_sub(1);

    if frames.len() < 2 {
        return HitWindow {
            start: 0,
            end: last,
            peak: 0,
        };
    }

    // Displacement between frame i-1 and i attributes the sample to frame i,
    // hence the +1 on the winning index.
    let mut peak = 1usize;
    let mut peak_speed = f32::MIN;
    for i in 1..frames.len() {
        let speed = frames[i].right_wrist.distance_to(&frames[i - 1].right_wrist);
        if speed > peak_speed {
            peak_speed = speed;
            peak = i;
        }
    }

    HitWindow {
        start: peak.saturating_sub(HIT_WINDOW_HALF_WIDTH),
        end: (peak + HIT_WINDOW_HALF_WIDTH).min(last),
        peak,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Landmark, LandmarkFrame, LandmarkSequence};

    fn frame(wrist_x: f32) -> LandmarkFrame {
        let p = Landmark::new(0.5, 0.5);
        LandmarkFrame {
            nose: Landmark::new(0.5, 0.3),
            left_wrist: p,
            right_wrist: Landmark::new(wrist_x, 0.5),
            left_shoulder: p,
            right_shoulder: p,
            left_hip: p,
            right_hip: p,
            left_ankle: Landmark::new(0.45, 0.9),
            right_ankle: Landmark::new(0.55, 0.9),
            left_elbow: p,
            right_elbow: p,
        }
    }

    /// Slow wrist drift with one large jump into the given frame index.
    fn sequence_with_spike(len: usize, spike_at: usize) -> LandmarkSequence {
        let mut x = 0.1f32;
        let mut frames = Vec::with_capacity(len);
        for i in 0..len {
            if i == spike_at {
                x += 0.3;
            } else if i > 0 {
                x += 0.001;
            }
            frames.push(frame(x));
        }
        LandmarkSequence::new(frames, 30.0)
    }

    #[test]
    fn test_peak_at_spike_with_clamped_window() {
        let seq = sequence_with_spike(60, 30);
        let window = locate_hit_phase(&seq);
        assert_eq!(window.peak, 30);
        assert_eq!(window.start, 15);
        assert_eq!(window.end, 45);
        assert_eq!(window.frame_count(), 31);
    }

    #[test]
    fn test_window_clamps_at_sequence_edges() {
        let seq = sequence_with_spike(20, 2);
        let window = locate_hit_phase(&seq);
        assert_eq!(window.peak, 2);
        assert_eq!(window.start, 0);
        assert_eq!(window.end, 17);
    }

    #[test]
    fn test_single_frame_sequence() {
        let seq = LandmarkSequence::new(vec![frame(0.5)], 30.0);
        assert_eq!(
            locate_hit_phase(&seq),
            HitWindow { start: 0, end: 0, peak: 0 }
        );
    }

    #[test]
    fn test_empty_sequence() {
        let seq = LandmarkSequence::new(vec![], 30.0);
        assert_eq!(
            locate_hit_phase(&seq),
            HitWindow { start: 0, end: 0, peak: 0 }
        );
    }

    #[test]
    fn test_invariant_start_peak_end() {
        for len in [2usize, 5, 31, 100] {
            for spike in [1usize, len / 2, len - 1] {
                let seq = sequence_with_spike(len, spike.max(1));
                let w = locate_hit_phase(&seq);
                assert!(w.start <= w.peak && w.peak <= w.end, "len={} spike={}", len, spike);
                assert!(w.end < len);
            }
        }
    }
}

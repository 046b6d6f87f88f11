//! # Metric Engine
//!
//! Per-action-type feature extraction over the hit window. Each action
//! selects a fixed vocabulary of metric names; the engine runs the
//! calculators that exist for that action and backfills the rest with a
//! neutral default so downstream consumers never see a missing key.
//!
//! Adding an action type means extending [`vocabulary`] and the match in
//! [`compute_metrics`] together; both are closed over [`ActionType`] so the
//! compiler flags an incomplete addition.

pub mod calculators;

use crate::analysis::body_scale::{estimate_body_scale, WINDOW_NOISE_FLOOR};
use crate::analysis::hit_phase::HitWindow;
use crate::models::{ActionType, LandmarkSequence, MetricSet};

/// Neutral value for vocabulary entries no calculator produced.
pub const NEUTRAL_METRIC: f32 = 0.5;

/// Mid-range placeholder for torso-facing metrics of power shots; single
/// fixed-camera footage carries no depth cue to compute them from.
const OVERHEAD_PLACEHOLDER: f32 = 0.6;

/// Contact spread needs repeated shots; a single-swing clip gets a fixed
/// value.
const CONTACT_VARIANCE_PLACEHOLDER: f32 = 0.3;

/// Metric names an action's downstream consumers may rely on.
pub fn vocabulary(action: ActionType) -> &'static [&'static str] {
    match action {
        ActionType::Smash | ActionType::Clear => &[
            "contact_height",
            "swing_amplitude",
            "coordination",
            "downward_velocity",
            "timing",
            "direction_stability",
            "stability",
        ],
        ActionType::Drop => &[
            "contact_height",
            "swing_amplitude",
            "stability",
            "downward_velocity",
            "timing",
        ],
        ActionType::Lift => &[
            "contact_height",
            "estimated_shuttle_height",
            "simplicity",
            "stability",
            "contact_height_variance",
        ],
        ActionType::NetShot => &[
            "contact_height",
            "net_tightness_proxy",
            "swing_speed_low",
            "simplicity",
        ],
        ActionType::Unknown => &[],
    }
}

/// Compute the metric set for a classified clip.
///
/// The window sub-sequence drives most calculators; contact, timing and
/// follow-through search around the peak in the full sequence. The returned
/// set is total over the action's vocabulary.
pub fn compute_metrics(
    sequence: &LandmarkSequence,
    action: ActionType,
    window: HitWindow,
) -> MetricSet {
    let mut metrics = MetricSet::new();
    if sequence.is_empty() || action == ActionType::Unknown {
        return metrics;
    }

    let frames = &sequence.frames;
    let window_frames = &frames[window.start..=window.end];
    let body_scale = estimate_body_scale(window_frames, WINDOW_NOISE_FLOOR);

    let mut put = |name: &str, value: f32| {
        metrics.insert(name.to_string(), value);
    };

    put(
        "contact_height",
        calculators::contact_height(frames, window.peak, body_scale),
    );

    match action {
        ActionType::Smash | ActionType::Clear => {
            put(
                "swing_amplitude",
                calculators::swing_amplitude(window_frames, body_scale),
            );
            put("coordination", calculators::coordination(window_frames));
            put(
                "downward_velocity",
                calculators::downward_velocity(
                    frames,
                    window.start,
                    window.end,
                    body_scale,
                    sequence.fps,
                ),
            );
            put("timing", calculators::timing(frames, window.peak));
            put("direction_stability", OVERHEAD_PLACEHOLDER);
            put("stability", OVERHEAD_PLACEHOLDER);
        }
        ActionType::Drop => {
            put(
                "swing_amplitude",
                calculators::swing_amplitude(window_frames, body_scale),
            );
            put("stability", calculators::stability(window_frames, body_scale));
            put(
                "downward_velocity",
                calculators::downward_velocity(
                    frames,
                    window.start,
                    window.end,
                    body_scale,
                    sequence.fps,
                ),
            );
            put("timing", calculators::timing(frames, window.peak));
        }
        ActionType::Lift => {
            put(
                "estimated_shuttle_height",
                calculators::follow_through_height(frames, window.peak, body_scale),
            );
            put("simplicity", calculators::simplicity(window_frames));
            put("stability", calculators::stability(window_frames, body_scale));
            put("contact_height_variance", CONTACT_VARIANCE_PLACEHOLDER);
        }
        ActionType::NetShot => {
            put(
                "net_tightness_proxy",
                calculators::net_tightness(window_frames, body_scale),
            );
            put(
                "swing_speed_low",
                calculators::swing_speed_low(frames, window.start, window.end, body_scale),
            );
            put("simplicity", calculators::simplicity(window_frames));
        }
        ActionType::Unknown => unreachable!("guarded above"),
    }

    for name in vocabulary(action) {
        metrics
            .entry((*name).to_string())
            .or_insert(NEUTRAL_METRIC);
    }

    metrics
}

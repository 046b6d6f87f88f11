//! # Analysis Pipeline
//!
//! Per-clip swing assessment: a pure, synchronous pipeline from landmark
//! sequence to [`AnalysisResult`].
//!
//! ## Submodules
//!
//! - `body_scale` - per-clip normalization constant
//! - `classifier` - heuristic action-type decision tree
//! - `hit_phase` - velocity-peak window location
//! - `metrics` - per-action feature extraction
//!
//! ## Pipeline
//!
//! classify → locate hit window → extract metrics → evaluate rules →
//! score → compose feedback. Configuration tables are parsed once and
//! shared read-only, so analyses may run concurrently without locking;
//! the only I/O in the whole flow is the optional augmentation call.

pub mod body_scale;
pub mod classifier;
pub mod hit_phase;
pub mod metrics;

pub use classifier::ClassifierThresholds;
pub use hit_phase::HitWindow;

use crate::data::embedded;
use crate::feedback::{self, DisabledAugmentor, FeedbackAugmentor};
use crate::models::{ActionType, AnalysisResult, FeedbackSource, LandmarkSequence, MetricSet};
use crate::rules;
use crate::scoring;

/// Skill tier assumed when the caller does not name one.
pub const DEFAULT_SKILL_LEVEL: &str = "beginner";

/// Per-call inputs beyond the sequence itself.
#[derive(Debug, Default)]
pub struct AnalyzeOptions {
    /// Pin the action type (user-declared drill) instead of classifying.
    pub forced_action: Option<ActionType>,
    /// Skill tier whose thresholds the assessment assumes.
    pub skill_level: Option<String>,
    /// Contact-point snapshot passed through to the augmentor and result.
    pub keyframe_base64: Option<String>,
}

/// The analysis pipeline and its immutable per-process configuration.
pub struct SwingAnalyzer {
    classifier_thresholds: ClassifierThresholds,
    augmentor: Box<dyn FeedbackAugmentor>,
}

impl Default for SwingAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SwingAnalyzer {
    /// Analyzer with default thresholds and augmentation disabled.
    pub fn new() -> Self {
        Self {
            classifier_thresholds: ClassifierThresholds::default(),
            augmentor: Box::new(DisabledAugmentor),
        }
    }

    pub fn with_augmentor(mut self, augmentor: Box<dyn FeedbackAugmentor>) -> Self {
        self.augmentor = augmentor;
        self
    }

    pub fn with_classifier_thresholds(mut self, thresholds: ClassifierThresholds) -> Self {
        self.classifier_thresholds = thresholds;
        self
    }

    /// Run the full pipeline on one clip.
    ///
    /// Always returns a complete result: degenerate input or an action the
    /// rule configuration does not cover produce the defined empty-result
    /// sentinel rather than an error.
    pub fn analyze(&self, sequence: &LandmarkSequence, options: &AnalyzeOptions) -> AnalysisResult {
        let level = options
            .skill_level
            .as_deref()
            .unwrap_or(DEFAULT_SKILL_LEVEL);

        if sequence.is_empty() {
            return self.unsupported_result(ActionType::Unknown, level, options);
        }

        let action = options
            .forced_action
            .unwrap_or_else(|| classifier::classify(sequence, &self.classifier_thresholds));

        if !embedded::rule_book().supports(action) {
            return self.unsupported_result(action, level, options);
        }

        let window = hit_phase::locate_hit_phase(sequence);
        let metric_set = metrics::compute_metrics(sequence, action, window);
        let issues = rules::evaluate_rules(
            action,
            &metric_set,
            embedded::rule_book(),
            embedded::threshold_table(),
            embedded::template_book(),
        );
        let score = scoring::calculate_score(action, &metric_set, embedded::weight_table());

        let composed = feedback::compose_feedback(
            action,
            score,
            &metric_set,
            &issues,
            options.keyframe_base64.as_deref(),
            self.augmentor.as_ref(),
            embedded::template_book(),
        );

        AnalysisResult {
            action,
            level_assumption: level.to_string(),
            score,
            metrics: metric_set,
            issues,
            positive_feedback: composed.summary,
            next_training_focus: composed.training_focus,
            keyframe_base64: options.keyframe_base64.clone(),
            feedback_source: composed.source,
        }
    }

    fn unsupported_result(
        &self,
        action: ActionType,
        level: &str,
        options: &AnalyzeOptions,
    ) -> AnalysisResult {
        AnalysisResult {
            action,
            level_assumption: level.to_string(),
            score: 0,
            metrics: MetricSet::new(),
            issues: Vec::new(),
            positive_feedback: embedded::template_book().summaries.unsupported.clone(),
            next_training_focus: Vec::new(),
            keyframe_base64: options.keyframe_base64.clone(),
            feedback_source: FeedbackSource::Template,
        }
    }
}

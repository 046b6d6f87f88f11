//! # Feedback Composer
//!
//! Deterministic template selection with an optional external-augmentation
//! hook. The deterministic path always produces a complete bilingual
//! summary and training foci; augmentation, when it succeeds, supersedes
//! that output and flips the provenance flag. Augmentation failure of any
//! kind silently keeps the deterministic output.

pub mod augment;
pub mod templates;

pub use augment::{
    AugmentRequest, AugmentedFeedback, DisabledAugmentor, FeedbackAugmentor, HttpAugmentor,
};
pub use templates::TemplateBook;

use crate::models::{ActionType, FeedbackSource, Issue, LocalizedText, MetricSet};

/// Score above which the summary congratulates rather than coaches.
pub const CONGRATULATION_SCORE: u8 = 75;

/// Upper bound on training foci in a result.
const MAX_TRAINING_FOCUS: usize = 3;

/// Foci taken from issues (or generic defaults) on the deterministic path.
const FALLBACK_FOCUS_COUNT: usize = 2;

/// Summary feedback plus training foci, with provenance.
#[derive(Debug, Clone)]
pub struct ComposedFeedback {
    pub summary: LocalizedText,
    pub training_focus: Vec<LocalizedText>,
    pub source: FeedbackSource,
}

/// Compose the feedback block for an analyzed swing.
pub fn compose_feedback(
    action: ActionType,
    score: u8,
    metrics: &MetricSet,
    issues: &[Issue],
    keyframe_base64: Option<&str>,
    augmentor: &dyn FeedbackAugmentor,
    templates: &TemplateBook,
) -> ComposedFeedback {
    let request = AugmentRequest {
        action,
        score,
        metrics,
        issues,
        keyframe_base64,
    };

    if let Some(augmented) = augmentor.augment(&request) {
        let mut focus = augmented.next_training_focus;
        focus.truncate(MAX_TRAINING_FOCUS);
        return ComposedFeedback {
            summary: augmented.positive_feedback,
            training_focus: focus,
            source: FeedbackSource::Augmented,
        };
    }

    let summary = if issues.is_empty() {
        templates.summaries.perfect.clone()
    } else if score > CONGRATULATION_SCORE {
        templates.summaries.smooth.clone()
    } else {
        templates.summaries.developing.clone()
    };

    // Issues arrive in priority order, so the first two suggestions are the
    // highest-priority corrections.
    let mut training_focus: Vec<LocalizedText> = issues
        .iter()
        .take(FALLBACK_FOCUS_COUNT)
        .map(|issue| issue.suggestion.clone())
        .collect();
    if training_focus.is_empty() {
        training_focus = templates
            .default_focus
            .iter()
            .take(FALLBACK_FOCUS_COUNT)
            .cloned()
            .collect();
    }

    ComposedFeedback {
        summary,
        training_focus,
        source: FeedbackSource::Template,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::embedded;

    struct MalformedAugmentor;

    impl FeedbackAugmentor for MalformedAugmentor {
        fn augment(&self, _request: &AugmentRequest<'_>) -> Option<AugmentedFeedback> {
            // Simulates a live collaborator that answered with prose instead
            // of the agreed JSON payload.
            augment::parse_payload("Sure! Here is my feedback: great smash.")
        }
    }

    struct CannedAugmentor;

    impl FeedbackAugmentor for CannedAugmentor {
        fn augment(&self, _request: &AugmentRequest<'_>) -> Option<AugmentedFeedback> {
            augment::parse_payload(
                r#"{ "positive_feedback": { "zh": "爆发力好", "en": "Explosive power" },
                     "next_training_focus": [
                        { "zh": "步法训练", "en": "Footwork drills" },
                        { "zh": "核心训练", "en": "Core training" }
                     ] }"#,
            )
        }
    }

    fn issue(tag: &str, suggestion_en: &str) -> Issue {
        Issue {
            tag: tag.to_string(),
            level: "warning".to_string(),
            coach_tip: LocalizedText::new("提示", "tip"),
            suggestion: LocalizedText::new("建议", suggestion_en),
        }
    }

    #[test]
    fn test_zero_issues_selects_perfect_message() {
        let composed = compose_feedback(
            ActionType::Smash,
            90,
            &MetricSet::new(),
            &[],
            None,
            &DisabledAugmentor,
            embedded::template_book(),
        );
        assert_eq!(composed.summary, embedded::template_book().summaries.perfect);
        assert_eq!(composed.source, FeedbackSource::Template);
        assert_eq!(composed.training_focus.len(), 2);
        assert_eq!(composed.training_focus[0].en, "Maintain current form");
    }

    #[test]
    fn test_high_score_with_issues_selects_smooth_message() {
        let issues = vec![issue("contact_point_low", "raise contact")];
        let composed = compose_feedback(
            ActionType::Smash,
            84,
            &MetricSet::new(),
            &issues,
            None,
            &DisabledAugmentor,
            embedded::template_book(),
        );
        assert_eq!(composed.summary, embedded::template_book().summaries.smooth);
    }

    #[test]
    fn test_low_score_selects_developing_message() {
        let issues = vec![issue("contact_point_low", "raise contact")];
        let composed = compose_feedback(
            ActionType::Smash,
            40,
            &MetricSet::new(),
            &issues,
            None,
            &DisabledAugmentor,
            embedded::template_book(),
        );
        assert_eq!(composed.summary, embedded::template_book().summaries.developing);
    }

    #[test]
    fn test_foci_come_from_top_two_issues() {
        let issues = vec![
            issue("first", "fix the first thing"),
            issue("second", "fix the second thing"),
            issue("third", "fix the third thing"),
        ];
        let composed = compose_feedback(
            ActionType::Smash,
            50,
            &MetricSet::new(),
            &issues,
            None,
            &DisabledAugmentor,
            embedded::template_book(),
        );
        assert_eq!(composed.training_focus.len(), 2);
        assert_eq!(composed.training_focus[0].en, "fix the first thing");
        assert_eq!(composed.training_focus[1].en, "fix the second thing");
    }

    #[test]
    fn test_malformed_augmentation_keeps_template_provenance() {
        let composed = compose_feedback(
            ActionType::Smash,
            80,
            &MetricSet::new(),
            &[],
            None,
            &MalformedAugmentor,
            embedded::template_book(),
        );
        assert_eq!(composed.source, FeedbackSource::Template);
        assert_eq!(composed.summary, embedded::template_book().summaries.perfect);
    }

    #[test]
    fn test_well_formed_augmentation_supersedes_templates() {
        let composed = compose_feedback(
            ActionType::Smash,
            80,
            &MetricSet::new(),
            &[],
            None,
            &CannedAugmentor,
            embedded::template_book(),
        );
        assert_eq!(composed.source, FeedbackSource::Augmented);
        assert_eq!(composed.summary.en, "Explosive power");
        assert_eq!(composed.training_focus.len(), 2);
    }
}

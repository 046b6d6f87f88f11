//! # Embedded Configuration Resources
//!
//! The three rule tables and the coaching template book are embedded into
//! the binary at compile time and parsed once on first access. Parsed
//! tables are immutable and shared read-only across concurrent analyses.
//!
//! A malformed embedded resource is a build defect: the accessors panic on
//! first use rather than propagating an error through every analysis call.
//! Per-action gaps inside a well-formed resource degrade silently instead.

use std::sync::OnceLock;

use once_cell::sync::Lazy;

use crate::feedback::templates::TemplateBook;
use crate::rules::config::{RuleBook, ThresholdTable, WeightTable};

// =============================================================================
// Embedded resource text
// =============================================================================

pub const ISSUE_RULES_JSON: &str = include_str!("../../../../data/rules/issue_rules.json");

pub const LEVEL_THRESHOLDS_JSON: &str =
    include_str!("../../../../data/rules/level_thresholds.json");

pub const SCORING_WEIGHTS_JSON: &str =
    include_str!("../../../../data/rules/scoring_weights.json");

pub const COACH_TEMPLATES_YAML: &str =
    include_str!("../../../../data/feedback/coach_templates.yaml");

// =============================================================================
// Parsed statics
// =============================================================================

static RULE_BOOK: OnceLock<RuleBook> = OnceLock::new();
static THRESHOLD_TABLE: OnceLock<ThresholdTable> = OnceLock::new();
static WEIGHT_TABLE: OnceLock<WeightTable> = OnceLock::new();

static TEMPLATE_BOOK: Lazy<TemplateBook> = Lazy::new(|| {
    TemplateBook::from_yaml(COACH_TEMPLATES_YAML).expect("Failed to parse coach_templates.yaml")
});

// =============================================================================
// Accessors
// =============================================================================

/// Issue rules, ordered per action. First call parses, later calls return
/// the cached book.
pub fn rule_book() -> &'static RuleBook {
    RULE_BOOK.get_or_init(|| {
        RuleBook::from_json(ISSUE_RULES_JSON).expect("Failed to parse issue_rules.json")
    })
}

/// Per-action/metric/level thresholds.
pub fn threshold_table() -> &'static ThresholdTable {
    THRESHOLD_TABLE.get_or_init(|| {
        ThresholdTable::from_json(LEVEL_THRESHOLDS_JSON)
            .expect("Failed to parse level_thresholds.json")
    })
}

/// Per-action scoring weights.
pub fn weight_table() -> &'static WeightTable {
    WEIGHT_TABLE.get_or_init(|| {
        WeightTable::from_json(SCORING_WEIGHTS_JSON).expect("Failed to parse scoring_weights.json")
    })
}

/// Bilingual coaching templates.
pub fn template_book() -> &'static TemplateBook {
    &TEMPLATE_BOOK
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActionType;

    #[test]
    fn test_all_embedded_resources_parse() {
        let supported = [
            ActionType::Smash,
            ActionType::Clear,
            ActionType::Drop,
            ActionType::Lift,
            ActionType::NetShot,
        ];
        for action in supported {
            assert!(rule_book().supports(action), "{:?} missing rules", action);
            assert!(
                weight_table().weights_for(action).is_some(),
                "{:?} missing weights",
                action
            );
        }
        assert!(!rule_book().supports(ActionType::Unknown));
    }

    #[test]
    fn test_every_rule_has_a_threshold_row() {
        for action in [
            ActionType::Smash,
            ActionType::Clear,
            ActionType::Drop,
            ActionType::Lift,
            ActionType::NetShot,
        ] {
            for rule in rule_book().rules_for(action).unwrap() {
                assert!(
                    threshold_table()
                        .lookup(action, &rule.def.metric, &rule.def.level)
                        .is_some(),
                    "{:?}/{} has no threshold",
                    action,
                    rule.tag
                );
            }
        }
    }

    #[test]
    fn test_weights_are_non_negative() {
        for action in [
            ActionType::Smash,
            ActionType::Clear,
            ActionType::Drop,
            ActionType::Lift,
            ActionType::NetShot,
        ] {
            for (metric, weight) in weight_table().weights_for(action).unwrap() {
                assert!(*weight >= 0.0, "{:?}/{} negative weight", action, metric);
            }
        }
    }
}

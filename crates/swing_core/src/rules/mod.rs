//! # Rule Evaluator
//!
//! Config-driven threshold comparison producing ranked issues. Rules run in
//! (priority, tag) order and fire independently; a missing metric, threshold
//! row or level entry skips that rule silently instead of raising.

pub mod config;

use tracing::debug;

pub use config::{Comparison, OrderedRule, RuleBook, RuleDef, ThresholdTable, WeightTable};

use crate::feedback::templates::TemplateBook;
use crate::models::{ActionType, Issue, MetricSet};

/// Severity every fired rule currently carries.
const ISSUE_LEVEL: &str = "warning";

/// Evaluate an action's rules against a metric set.
///
/// Returns issues in ascending rule-priority order. An action absent from
/// the rule book yields no issues; callers that need to distinguish
/// "unsupported" from "clean" check [`RuleBook::supports`] first.
pub fn evaluate_rules(
    action: ActionType,
    metrics: &MetricSet,
    rule_book: &RuleBook,
    thresholds: &ThresholdTable,
    templates: &TemplateBook,
) -> Vec<Issue> {
    let Some(rules) = rule_book.rules_for(action) else {
        return Vec::new();
    };

    let mut issues = Vec::new();
    for rule in rules {
        let Some(&value) = metrics.get(&rule.def.metric) else {
            debug!(tag = %rule.tag, metric = %rule.def.metric, "rule skipped: metric not produced");
            continue;
        };
        let Some(threshold) = thresholds.lookup(action, &rule.def.metric, &rule.def.level) else {
            debug!(tag = %rule.tag, level = %rule.def.level, "rule skipped: threshold not configured");
            continue;
        };

        if rule.def.op.matches(value, threshold) {
            let text = templates.issue_text(&rule.tag);
            issues.push(Issue {
                tag: rule.tag.clone(),
                level: ISSUE_LEVEL.to_string(),
                coach_tip: text.tip,
                suggestion: text.suggestion,
            });
        }
    }

    issues
}

//! # Rule Configuration Tables
//!
//! Serde bindings for the three configuration resources: issue rules,
//! level thresholds and scoring weights. The raw rule maps are flattened at
//! load time into explicit per-action lists ordered by (priority, tag), so
//! evaluation order never depends on map insertion order.
//!
//! Missing or unparsable configuration for an action degrades that action
//! (no rules fire, score 0) rather than failing the pipeline; lookups here
//! therefore all return `Option`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::ActionType;

/// Comparison a rule applies between a metric value and its threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparison {
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = ">")]
    GreaterThan,
}

impl Comparison {
    pub fn matches(&self, value: f32, threshold: f32) -> bool {
        match self {
            Comparison::LessThan => value < threshold,
            Comparison::GreaterThan => value > threshold,
        }
    }
}

/// One configured rule as it appears in the resource file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleDef {
    /// Metric name the rule reads.
    pub metric: String,
    pub op: Comparison,
    /// Level key resolved against the threshold table, not a literal number.
    pub level: String,
    /// Ordering key for emitted issues; lower fires (and is listed) first.
    pub priority: u32,
}

/// A rule with its tag, in final evaluation order.
#[derive(Debug, Clone)]
pub struct OrderedRule {
    pub tag: String,
    pub def: RuleDef,
}

/// All issue rules, per action, pre-sorted for evaluation.
#[derive(Debug, Clone, Default)]
pub struct RuleBook {
    actions: BTreeMap<String, Vec<OrderedRule>>,
}

impl RuleBook {
    /// Parse the rule resource and build the ordered per-action lists.
    ///
    /// Ties on priority are broken by tag so the order is deterministic
    /// regardless of how the resource file is arranged.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let parsed: BTreeMap<String, BTreeMap<String, RuleDef>> = serde_json::from_str(raw)?;

        let mut actions = BTreeMap::new();
        for (action, rules) in parsed {
            let mut list: Vec<OrderedRule> = rules
                .into_iter()
                .map(|(tag, def)| OrderedRule { tag, def })
                .collect();
            list.sort_by(|a, b| {
                a.def
                    .priority
                    .cmp(&b.def.priority)
                    .then_with(|| a.tag.cmp(&b.tag))
            });
            actions.insert(action, list);
        }

        Ok(Self { actions })
    }

    /// Ordered rules for an action, `None` when the action is unconfigured.
    pub fn rules_for(&self, action: ActionType) -> Option<&[OrderedRule]> {
        self.actions.get(action.as_str()).map(Vec::as_slice)
    }

    pub fn supports(&self, action: ActionType) -> bool {
        self.actions.contains_key(action.as_str())
    }
}

/// Literal thresholds per action, metric and skill level.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThresholdTable {
    actions: BTreeMap<String, BTreeMap<String, BTreeMap<String, f32>>>,
}

impl ThresholdTable {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn lookup(&self, action: ActionType, metric: &str, level: &str) -> Option<f32> {
        self.actions
            .get(action.as_str())?
            .get(metric)?
            .get(level)
            .copied()
    }
}

/// Per-action scoring weights.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightTable {
    actions: BTreeMap<String, ActionWeights>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ActionWeights {
    metrics: BTreeMap<String, f32>,
}

impl WeightTable {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Weight map for an action, `None` when the action is unconfigured.
    pub fn weights_for(&self, action: ActionType) -> Option<&BTreeMap<String, f32>> {
        self.actions.get(action.as_str()).map(|w| &w.metrics)
    }
}

//! # Analysis Result Types
//!
//! The terminal aggregate of one clip analysis and everything it carries:
//! action classification, normalized metrics, detected issues and bilingual
//! coaching text. All user-facing strings are zh/en pairs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Normalized technique metrics keyed by name, each value in [0,1].
///
/// BTreeMap keeps iteration (and therefore logging and scoring) order
/// deterministic across runs.
pub type MetricSet = BTreeMap<String, f32>;

/// The closed set of swing categories the engine can classify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Smash,
    Clear,
    Drop,
    Lift,
    NetShot,
    /// Classification could not run or the caller forced an unrecognized name.
    Unknown,
}

impl ActionType {
    /// Parse an action name; anything unrecognized maps to `Unknown`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "smash" => ActionType::Smash,
            "clear" => ActionType::Clear,
            "drop" => ActionType::Drop,
            "lift" => ActionType::Lift,
            "net_shot" => ActionType::NetShot,
            _ => ActionType::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::Smash => "smash",
            ActionType::Clear => "clear",
            ActionType::Drop => "drop",
            ActionType::Lift => "lift",
            ActionType::NetShot => "net_shot",
            ActionType::Unknown => "unknown",
        }
    }

    /// Overhead shots share the power-oriented metric family.
    pub fn is_overhead(&self) -> bool {
        matches!(self, ActionType::Smash | ActionType::Clear | ActionType::Drop)
    }
}

/// A bilingual text pair. Every string shown to a player carries both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub zh: String,
    pub en: String,
}

impl LocalizedText {
    pub fn new(zh: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            zh: zh.into(),
            en: en.into(),
        }
    }
}

/// A detected technique deficiency derived from a fired rule.
///
/// Produced, never mutated; ordered by the originating rule's priority.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    /// Rule name that fired.
    pub tag: String,
    /// Severity label, currently always "warning".
    pub level: String,
    /// Short bilingual diagnosis.
    pub coach_tip: LocalizedText,
    /// Longer bilingual correction advice.
    pub suggestion: LocalizedText,
}

/// Where the summary feedback came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackSource {
    /// Deterministic template lookup.
    Template,
    /// The external generation collaborator supplied the text.
    Augmented,
}

/// The complete assessment for one analyzed clip.
///
/// Always returned whole for any input sequence; degenerate inputs produce
/// defined degenerate contents rather than a partial or missing result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub action: ActionType,
    /// Skill tier the caller asked the assessment to assume.
    pub level_assumption: String,
    /// Weighted technique score, 0-100.
    pub score: u8,
    pub metrics: MetricSet,
    /// Fired rules in ascending priority order.
    pub issues: Vec<Issue>,
    pub positive_feedback: LocalizedText,
    /// 0-3 bilingual training foci.
    pub next_training_focus: Vec<LocalizedText>,
    /// Contact-point snapshot passed through from the caller, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyframe_base64: Option<String>,
    pub feedback_source: FeedbackSource,
}

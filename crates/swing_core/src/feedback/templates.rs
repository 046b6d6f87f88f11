//! # Coaching Template Book
//!
//! Static bilingual text resource: per-tag issue templates, the fixed
//! summary messages and the generic fallbacks. Loaded once from the
//! embedded YAML resource.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::models::LocalizedText;

/// Tip/suggestion text pair for one issue tag.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IssueTemplate {
    pub tip: LocalizedText,
    pub suggestion: LocalizedText,
}

/// The fixed summary messages the deterministic composer selects from.
#[derive(Debug, Clone, Deserialize)]
pub struct SummaryMessages {
    /// Zero issues detected.
    pub perfect: LocalizedText,
    /// Issues present but the score clears the congratulation bar.
    pub smooth: LocalizedText,
    /// Issues present, score below the bar.
    pub developing: LocalizedText,
    /// Action type the engine has no configuration for.
    pub unsupported: LocalizedText,
}

/// The full template resource.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateBook {
    issues: BTreeMap<String, IssueTemplate>,
    fallback_issue: IssueTemplate,
    pub summaries: SummaryMessages,
    pub default_focus: Vec<LocalizedText>,
}

impl TemplateBook {
    pub fn from_yaml(raw: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(raw)
    }

    /// Text for a tag. Tags without a dedicated entry get the generic
    /// fallback with the tag interpolated into it.
    pub fn issue_text(&self, tag: &str) -> IssueTemplate {
        match self.issues.get(tag) {
            Some(template) => template.clone(),
            None => IssueTemplate {
                tip: interpolate(&self.fallback_issue.tip, tag),
                suggestion: interpolate(&self.fallback_issue.suggestion, tag),
            },
        }
    }
}

fn interpolate(text: &LocalizedText, tag: &str) -> LocalizedText {
    LocalizedText {
        zh: text.zh.replace("{tag}", tag),
        en: text.en.replace("{tag}", tag),
    }
}

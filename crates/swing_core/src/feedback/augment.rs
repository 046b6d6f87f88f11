//! # Feedback Augmentation Capability
//!
//! Optional external text/vision generation. The composer holds this
//! capability behind a trait with two implementations: [`DisabledAugmentor`]
//! (always declines) and [`HttpAugmentor`] (network call with a bounded
//! timeout). Implementations swallow their own failures; a `None` return is
//! the only failure signal the composer ever sees, so augmentation problems
//! can never break an analysis.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::{ActionType, Issue, LocalizedText, MetricSet};

/// Wall-clock bound on one augmentation call.
pub const DEFAULT_AUGMENT_TIMEOUT: Duration = Duration::from_secs(20);

/// Everything the collaborator is told about one analyzed swing.
#[derive(Debug, Clone, Serialize)]
pub struct AugmentRequest<'a> {
    pub action: ActionType,
    pub score: u8,
    pub metrics: &'a MetricSet,
    pub issues: &'a [Issue],
    /// Contact-point snapshot as a base64 JPEG data URL, if the caller has
    /// one.
    pub keyframe_base64: Option<&'a str>,
}

/// A well-formed augmented payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AugmentedFeedback {
    pub positive_feedback: LocalizedText,
    pub next_training_focus: Vec<LocalizedText>,
}

/// Capability to replace the deterministic feedback with generated text.
pub trait FeedbackAugmentor: Send + Sync {
    /// Produce augmented feedback, or `None` to keep the deterministic path.
    fn augment(&self, request: &AugmentRequest<'_>) -> Option<AugmentedFeedback>;
}

/// Augmentor used when no generation backend is configured.
#[derive(Debug, Default)]
pub struct DisabledAugmentor;

impl FeedbackAugmentor for DisabledAugmentor {
    fn augment(&self, _request: &AugmentRequest<'_>) -> Option<AugmentedFeedback> {
        None
    }
}

/// Live augmentor talking to a generative language endpoint.
pub struct HttpAugmentor {
    endpoint: String,
    api_key: String,
    client: reqwest::blocking::Client,
}

impl HttpAugmentor {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, reqwest::Error> {
        Self::with_timeout(endpoint, api_key, DEFAULT_AUGMENT_TIMEOUT)
    }

    pub fn with_timeout(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            client,
        })
    }

    fn request_feedback(
        &self,
        request: &AugmentRequest<'_>,
    ) -> Result<AugmentedFeedback, String> {
        let mut parts = vec![WirePart::text(build_prompt(request))];
        if let Some(keyframe) = request.keyframe_base64 {
            parts.push(WirePart::inline_jpeg(strip_data_url_header(keyframe)));
        }

        let body = WireRequest {
            contents: vec![WireContent { parts }],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .map_err(|e| e.to_string())?;

        if !response.status().is_success() {
            return Err(format!("endpoint returned {}", response.status()));
        }

        let wire: WireResponse = response.json().map_err(|e| e.to_string())?;
        let text = wire
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.as_str())
            .ok_or_else(|| "response carried no candidates".to_string())?;

        parse_payload(text).ok_or_else(|| "malformed augmentation payload".to_string())
    }
}

impl FeedbackAugmentor for HttpAugmentor {
    fn augment(&self, request: &AugmentRequest<'_>) -> Option<AugmentedFeedback> {
        match self.request_feedback(request) {
            Ok(feedback) => Some(feedback),
            Err(reason) => {
                warn!(%reason, "feedback augmentation failed, keeping template output");
                None
            }
        }
    }
}

/// Parse and validate the collaborator's text as an augmented payload.
///
/// Generation models wrap JSON in markdown fences more often than not; the
/// fences are stripped before parsing. Empty summary strings or an empty
/// focus list count as malformed.
pub(crate) fn parse_payload(text: &str) -> Option<AugmentedFeedback> {
    let cleaned = strip_code_fences(text);
    let parsed: AugmentedFeedback = serde_json::from_str(cleaned).ok()?;

    if parsed.positive_feedback.zh.trim().is_empty()
        || parsed.positive_feedback.en.trim().is_empty()
        || parsed.next_training_focus.is_empty()
    {
        return None;
    }
    Some(parsed)
}

fn build_prompt(request: &AugmentRequest<'_>) -> String {
    let metrics_json = serde_json::to_string(request.metrics).unwrap_or_default();
    let issues_json = serde_json::to_string(request.issues).unwrap_or_default();

    format!(
        "You are a professional badminton coach reviewing motion-capture \
         analysis of a student's swing.\n\
         Action: {}\n\
         Score: {}/100\n\
         Biomechanical metrics (0-1 scale): {}\n\
         Identified issues: {}\n\
         \n\
         Provide \"positive_feedback\" (1-2 encouraging sentences naming the \
         main characteristic) and \"next_training_focus\" (2-3 actionable \
         drills). Answer strictly as JSON without markdown fences:\n\
         {{\"positive_feedback\": {{\"zh\": \"...\", \"en\": \"...\"}}, \
         \"next_training_focus\": [{{\"zh\": \"...\", \"en\": \"...\"}}]}}",
        request.action.as_str(),
        request.score,
        metrics_json,
        issues_json,
    )
}

fn strip_code_fences(text: &str) -> &str {
    let mut t = text.trim();
    if let Some(rest) = t.strip_prefix("```json") {
        t = rest;
    } else if let Some(rest) = t.strip_prefix("```") {
        t = rest;
    }
    if let Some(rest) = t.strip_suffix("```") {
        t = rest;
    }
    t.trim()
}

fn strip_data_url_header(data: &str) -> &str {
    match data.split_once(',') {
        Some((_, rest)) => rest,
        None => data,
    }
}

// =============================================================================
// Wire format
// =============================================================================

#[derive(Serialize)]
struct WireRequest {
    contents: Vec<WireContent>,
}

#[derive(Serialize)]
struct WireContent {
    parts: Vec<WirePart>,
}

#[derive(Serialize)]
struct WirePart {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<WireBlob>,
}

impl WirePart {
    fn text(text: String) -> Self {
        Self {
            text: Some(text),
            inline_data: None,
        }
    }

    fn inline_jpeg(base64_data: &str) -> Self {
        Self {
            text: None,
            inline_data: Some(WireBlob {
                mime_type: "image/jpeg".to_string(),
                data: base64_data.to_string(),
            }),
        }
    }
}

#[derive(Serialize)]
struct WireBlob {
    mime_type: String,
    data: String,
}

#[derive(Deserialize)]
struct WireResponse {
    #[serde(default)]
    candidates: Vec<WireCandidate>,
}

#[derive(Deserialize)]
struct WireCandidate {
    content: WireCandidateContent,
}

#[derive(Deserialize)]
struct WireCandidateContent {
    #[serde(default)]
    parts: Vec<WireTextPart>,
}

#[derive(Deserialize)]
struct WireTextPart {
    text: String,
}

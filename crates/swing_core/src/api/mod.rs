//! # JSON API
//!
//! Boundary for the surrounding service layer: a landmark sequence in, an
//! [`AnalysisResult`](crate::models::AnalysisResult) out, both as JSON
//! strings. Unparsable input is the one failure mode; it returns an error
//! object instead of a result.

use serde::Deserialize;

use crate::analysis::{AnalyzeOptions, SwingAnalyzer};
use crate::error::Result;
use crate::models::{ActionType, LandmarkFrame, LandmarkSequence};

/// Error codes surfaced in the JSON error object.
pub mod error_codes {
    pub const REQUEST_PARSE: &str = "E_REQUEST_PARSE";
}

/// One analysis request as the service layer sends it.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// Frame rate of the source clip.
    pub fps: f32,
    /// Landmark frames in clip order, detected frames only.
    pub frames: Vec<LandmarkFrame>,
    /// Optional user-declared action name; unrecognized names analyze as
    /// unsupported.
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub keyframe_base64: Option<String>,
}

/// Analyze a clip with a default (augmentation-disabled) analyzer.
pub fn analyze_swing_json(request_json: &str) -> String {
    analyze_swing_json_with(&SwingAnalyzer::new(), request_json)
}

/// Analyze a clip with a caller-configured analyzer.
pub fn analyze_swing_json_with(analyzer: &SwingAnalyzer, request_json: &str) -> String {
    match run(analyzer, request_json) {
        Ok(body) => body,
        Err(err) => serde_json::json!({
            "error": format!("{}: {}", error_codes::REQUEST_PARSE, err),
        })
        .to_string(),
    }
}

fn run(analyzer: &SwingAnalyzer, request_json: &str) -> Result<String> {
    let request: AnalyzeRequest = serde_json::from_str(request_json)?;

    let sequence = LandmarkSequence::new(request.frames, request.fps);
    let options = AnalyzeOptions {
        forced_action: request.action.as_deref().map(ActionType::from_name),
        skill_level: request.level,
        keyframe_base64: request.keyframe_base64,
    };

    let result = analyzer.analyze(&sequence, &options);
    Ok(serde_json::to_string(&result)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn frame_json(wrist_y: f32) -> Value {
        let point = |x: f32, y: f32| serde_json::json!({ "x": x, "y": y });
        serde_json::json!({
            "nose": point(0.5, 0.3),
            "left_wrist": point(0.45, 0.6),
            "right_wrist": point(0.5, wrist_y),
            "left_shoulder": point(0.42, 0.42),
            "right_shoulder": point(0.58, 0.42),
            "left_hip": point(0.45, 0.62),
            "right_hip": point(0.55, 0.62),
            "left_ankle": point(0.45, 0.9),
            "right_ankle": point(0.55, 0.9),
            "left_elbow": point(0.4, 0.5),
            "right_elbow": point(0.6, 0.5),
        })
    }

    #[test]
    fn test_round_trip_analysis() {
        let request = serde_json::json!({
            "fps": 30.0,
            "frames": [frame_json(0.5), frame_json(0.12), frame_json(0.5)],
        })
        .to_string();

        let response: Value = serde_json::from_str(&analyze_swing_json(&request)).unwrap();
        assert_eq!(response["action"], "smash");
        assert_eq!(response["feedback_source"], "template");
        assert!(response["score"].as_u64().unwrap() <= 100);
        assert!(response["metrics"]["contact_height"].is_number());
    }

    #[test]
    fn test_unsupported_declared_action() {
        let request = serde_json::json!({
            "fps": 30.0,
            "frames": [frame_json(0.5)],
            "action": "cartwheel",
        })
        .to_string();

        let response: Value = serde_json::from_str(&analyze_swing_json(&request)).unwrap();
        assert_eq!(response["action"], "unknown");
        assert_eq!(response["score"], 0);
        assert_eq!(response["issues"].as_array().unwrap().len(), 0);
        assert_eq!(response["metrics"].as_object().unwrap().len(), 0);
        assert_eq!(response["positive_feedback"]["zh"], "不支持的动作类型");
        assert_eq!(response["positive_feedback"]["en"], "Unsupported action type");
    }

    #[test]
    fn test_unparsable_request_returns_error_object() {
        let response: Value =
            serde_json::from_str(&analyze_swing_json("definitely not json")).unwrap();
        let message = response["error"].as_str().unwrap();
        assert!(message.starts_with(error_codes::REQUEST_PARSE));
    }

    #[test]
    fn test_empty_frame_list_degenerates() {
        let request = serde_json::json!({ "fps": 30.0, "frames": [] }).to_string();
        let response: Value = serde_json::from_str(&analyze_swing_json(&request)).unwrap();
        assert_eq!(response["action"], "unknown");
        assert_eq!(response["score"], 0);
    }
}

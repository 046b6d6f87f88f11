//! # swing_core - Badminton Swing Analysis Engine
//!
//! Turns a sequence of body-landmark observations (one skeleton pose per
//! video frame, produced by an external pose estimator) into a structured
//! motion-quality assessment: action-type classification, normalized
//! biomechanical metrics, detected technique issues and a 0-100 score,
//! with bilingual coaching feedback.
//!
//! ## Features
//! - Deterministic: identical input and configuration always produce the
//!   identical result
//! - Scale-normalized: every metric is divided by the estimated body height,
//!   so nothing depends on camera distance
//! - Config-driven rules, thresholds and scoring weights, embedded at
//!   compile time
//! - Optional feedback augmentation through an external generation service,
//!   always degrading to local templates on failure

pub mod analysis;
pub mod api;
pub mod data;
pub mod error;
pub mod feedback;
pub mod models;
pub mod rules;
pub mod scoring;

// Re-export the main entry points
pub use analysis::{AnalyzeOptions, ClassifierThresholds, HitWindow, SwingAnalyzer};
pub use api::{analyze_swing_json, analyze_swing_json_with, AnalyzeRequest};
pub use error::{CoreError, Result};
pub use feedback::{DisabledAugmentor, FeedbackAugmentor, HttpAugmentor};
pub use models::{
    ActionType, AnalysisResult, FeedbackSource, Issue, Landmark, LandmarkFrame,
    LandmarkSequence, LocalizedText, MetricSet,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

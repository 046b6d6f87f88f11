//! Data model: landmark input types and the analysis result aggregate.

pub mod landmark;
pub mod result;

pub use landmark::{Landmark, LandmarkFrame, LandmarkSequence};
pub use result::{
    ActionType, AnalysisResult, FeedbackSource, Issue, LocalizedText, MetricSet,
};

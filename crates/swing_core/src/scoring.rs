//! # Scorer
//!
//! Weighted aggregation of a metric set into a single 0-100 score. Metrics
//! listed in the action's weight table but absent from the set contribute
//! the neutral default, so a partially-computed set neither inflates nor
//! deflates the denominator.

use crate::analysis::metrics::NEUTRAL_METRIC;
use crate::models::{ActionType, MetricSet};
use crate::rules::config::WeightTable;

/// Compute the technique score for an action.
///
/// An action with no weight configuration, or an empty weight set, is
/// defined to score 0.
pub fn calculate_score(action: ActionType, metrics: &MetricSet, weights: &WeightTable) -> u8 {
    let Some(table) = weights.weights_for(action) else {
        return 0;
    };

    let mut total_score = 0.0f32;
    let mut total_weight = 0.0f32;
    for (metric, &weight) in table {
        let value = metrics.get(metric).copied().unwrap_or(NEUTRAL_METRIC);
        total_score += value * 100.0 * weight;
        total_weight += weight;
    }

    if total_weight == 0.0 {
        return 0;
    }

    (total_score / total_weight).round().clamp(0.0, 100.0) as u8
}

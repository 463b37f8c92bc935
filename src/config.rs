use serde::{Deserialize, Serialize};

/// Absolute tolerance for the sum of a position's four probabilities
pub const PROB_TOLERANCE: f64 = 1e-4;

/// Smallest probability that does not trigger smoothing. Also used as the
/// pseudocount when smoothing is applied.
pub const MIN_PROB: f64 = 1e-3;

/// Numeric thresholds used by validation and smoothing.
///
/// Missing fields fall back to [`PROB_TOLERANCE`] and [`MIN_PROB`], so a
/// partial config such as `{"min_prob": 0.01}` is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub tolerance: f64,
    pub min_prob: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            tolerance: PROB_TOLERANCE,
            min_prob: MIN_PROB,
        }
    }
}

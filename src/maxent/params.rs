use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::feature::{FeatureMode, DEFAULT_CUTOFF};

/// Default number of training passes
pub const DEFAULT_ITERATIONS: u32 = 30;

/// Training configuration
///
/// Defaults match the tweet sentiment setup: 30 passes, cutoff 2,
/// binary presence features, no regularization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingParams {
    /// exact number of passes over the samples, no early stopping
    pub iterations: u32,
    /// minimum corpus-wide occurrences for a token to become a feature
    pub cutoff: u32,
    /// step size, scaled down by the correction constant of each run
    pub learning_rate: f64,
    /// L2 penalty on weights and bias (0.0 disables it)
    pub l2: f64,
    pub feature_mode: FeatureMode,
}

impl Default for TrainingParams {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            cutoff: DEFAULT_CUTOFF,
            learning_rate: 1.0,
            l2: 0.0,
            feature_mode: FeatureMode::Presence,
        }
    }
}

impl TrainingParams {
    /// `learning_rate` and `l2` must be finite and non-negative
    pub fn validate(&self) -> Result<()> {
        if !self.learning_rate.is_finite() || self.learning_rate < 0.0 {
            return Err(Error::InvalidParameter(format!("learning_rate {}", self.learning_rate)));
        }
        if !self.l2.is_finite() || self.l2 < 0.0 {
            return Err(Error::InvalidParameter(format!("l2 {}", self.l2)));
        }
        Ok(())
    }

    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_cutoff(mut self, cutoff: u32) -> Self {
        self.cutoff = cutoff;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_l2(mut self, l2: f64) -> Self {
        self.l2 = l2;
        self
    }

    pub fn with_feature_mode(mut self, feature_mode: FeatureMode) -> Self {
        self.feature_mode = feature_mode;
        self
    }
}

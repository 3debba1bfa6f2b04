use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{EsgError, FeatureVector, RiskLabel};

use super::RiskClassifier;

/// A pre-trained linear scorer loaded from a JSON coefficient file.
///
/// Scores `w · x + b` over the six contract features and reports high risk
/// strictly above `threshold`. The coefficients are produced by an external
/// training procedure; this crate only consumes them. Weight order matches
/// [`FEATURE_COLUMNS`](crate::core::FEATURE_COLUMNS) exactly, the same
/// nameless-at-inference contract every predictor here lives under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    /// One weight per contract feature, in contract order.
    pub weights: [f64; 6],
    pub bias: f64,
    /// Decision boundary on the raw score.
    pub threshold: f64,
}

impl LinearModel {
    /// Loads coefficients from a JSON file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or does not parse as a coefficient
    /// set.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, EsgError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Parses coefficients from a JSON string.
    ///
    /// # Errors
    ///
    /// Fails if the string does not parse as a coefficient set.
    pub fn from_json(raw: &str) -> Result<Self, EsgError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// The raw decision score for a feature vector.
    #[must_use]
    pub fn score(&self, features: &FeatureVector) -> f64 {
        self.weights
            .iter()
            .zip(features.as_slice())
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.bias
    }
}

impl RiskClassifier for LinearModel {
    fn predict(&self, features: &FeatureVector) -> Result<RiskLabel, EsgError> {
        Ok(if self.score(features) > self.threshold {
            RiskLabel::High
        } else {
            RiskLabel::Low
        })
    }
}

//! The risk-classifier contract.
//!
//! The core consumes a pre-trained binary predictor as an opaque capability
//! with a single `predict` operation; training is out of scope. What this
//! module owns is the *contract*: exactly six finite floats, in the fixed
//! order of [`FEATURE_COLUMNS`](crate::core::FEATURE_COLUMNS), mapping to
//! exactly one of two labels.

mod model;

pub use model::LinearModel;

use crate::core::{EsgError, FeatureVector, RiskLabel};

/// A pre-trained binary risk predictor.
///
/// One method, object-safe, so the underlying model family (tree ensemble,
/// linear, neural) can vary without touching the simulator. Implementations
/// must be stateless and side-effect free: repeated calls with the same
/// features return the same label.
pub trait RiskClassifier: Send + Sync {
    /// Scores one feature vector into a binary label.
    ///
    /// # Errors
    ///
    /// Implementations may fail with a feature-validation error; the
    /// bundled predictors never do once input passes the adapter.
    fn predict(&self, features: &FeatureVector) -> Result<RiskLabel, EsgError>;
}

impl<C: RiskClassifier + ?Sized> RiskClassifier for &C {
    fn predict(&self, features: &FeatureVector) -> Result<RiskLabel, EsgError> {
        (**self).predict(features)
    }
}

impl<C: RiskClassifier + ?Sized> RiskClassifier for Box<C> {
    fn predict(&self, features: &FeatureVector) -> Result<RiskLabel, EsgError> {
        (**self).predict(features)
    }
}

/// The validating adapter over an opaque predictor.
///
/// Enforces the feature contract before forwarding: every component must
/// be a finite float. A NaN (e.g. from a missing financial fundamental) is
/// rejected with a feature-validation error rather than silently scored.
#[derive(Debug, Clone)]
pub struct ValidatingClassifier<C> {
    inner: C,
}

impl<C: RiskClassifier> ValidatingClassifier<C> {
    /// Wraps a predictor with contract validation.
    #[must_use]
    pub const fn new(inner: C) -> Self {
        Self { inner }
    }

    /// The wrapped predictor.
    pub const fn inner(&self) -> &C {
        &self.inner
    }
}

impl<C: RiskClassifier> RiskClassifier for ValidatingClassifier<C> {
    fn predict(&self, features: &FeatureVector) -> Result<RiskLabel, EsgError> {
        if !features.is_finite() {
            return Err(EsgError::FeatureValidation(format!(
                "non-finite feature in {:?}",
                features.as_slice()
            )));
        }
        self.inner.predict(features)
    }
}

/// A cutoff rule on the total ESG score: high risk strictly above the
/// cutoff. The simplest member of the predictor family, and the workhorse
/// of the test suite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutoffClassifier {
    cutoff: f64,
}

impl CutoffClassifier {
    /// A classifier reporting high risk for `esg_score > cutoff`.
    #[must_use]
    pub const fn new(cutoff: f64) -> Self {
        Self { cutoff }
    }

    #[must_use]
    pub const fn cutoff(&self) -> f64 {
        self.cutoff
    }
}

impl RiskClassifier for CutoffClassifier {
    fn predict(&self, features: &FeatureVector) -> Result<RiskLabel, EsgError> {
        Ok(if features.esg_score() > self.cutoff {
            RiskLabel::High
        } else {
            RiskLabel::Low
        })
    }
}

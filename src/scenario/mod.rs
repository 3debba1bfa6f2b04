//! The scenario simulator: what-if ESG improvements for one company.
//!
//! A scenario substitutes a hypothetical total ESG score into a company's
//! feature vector, leaving every other feature unchanged, and re-scores it
//! through the live classifier. The stored risk flag is ground truth only
//! for the current score and is never consulted for a hypothetical label.

mod search;

use serde::Serialize;

use crate::analyzer::EsgAnalyzer;
use crate::classifier::RiskClassifier;
use crate::core::{EsgError, FeatureVector, RiskDelta, RiskLabel};
use search::candidate_scores;

/// Default step size for the threshold search, in ESG score points.
pub const DEFAULT_STEP: f64 = 0.1;

/// The result of a single what-if simulation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioOutcome {
    pub symbol: String,
    /// The company's current total ESG score.
    pub current_score: f64,
    /// The hypothetical score after the proposed reduction.
    pub new_score: f64,
    /// The stored risk flag for the current score.
    pub current_label: RiskLabel,
    /// The classifier's prediction for the hypothetical score.
    pub new_label: RiskLabel,
    /// Qualitative direction of the label change.
    pub delta: RiskDelta,
}

/// The result of a successful threshold search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThresholdOutcome {
    pub symbol: String,
    pub current_score: f64,
    /// The highest candidate score at which the classifier reports low
    /// risk; the recommended ESG target.
    pub target_score: f64,
    /// Score reduction needed to reach the target (0 when already low
    /// risk).
    pub reduction: f64,
    /// How many search steps were taken before the label flipped.
    pub steps: u64,
}

impl ThresholdOutcome {
    /// True when the company is already predicted low risk at its current
    /// score, so no reduction is needed.
    #[must_use]
    pub const fn already_low_risk(&self) -> bool {
        self.steps == 0
    }
}

/// One label transition observed during a full-range scan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlipPoint {
    /// The candidate score at which the prediction changed.
    pub score: f64,
    pub from: RiskLabel,
    pub to: RiskLabel,
}

/// A builder for what-if scenarios on a single company.
///
/// Created by [`EsgAnalyzer::scenario`]. Configure the proposed reduction
/// and search step, then call one of the terminal operations.
///
/// # Example
///
/// ```no_run
/// # use esg_risk_rs::{CutoffClassifier, EsgAnalyzer, EsgError, SchemaStore};
/// # fn main() -> Result<(), EsgError> {
/// # let store = SchemaStore::open("esg_risk.db")?;
/// # let analyzer = EsgAnalyzer::from_store(&store, CutoffClassifier::new(30.0))?;
/// let outcome = analyzer.scenario("AAPL").reduction(5.0).simulate()?;
/// println!("{}: {}", outcome.new_label.as_str(), outcome.delta.as_str());
///
/// let target = analyzer.scenario("AAPL").find_threshold()?;
/// println!("recommended ESG target: <= {:.1}", target.target_score);
/// # Ok(())
/// # }
/// ```
pub struct ScenarioBuilder<'a> {
    analyzer: &'a EsgAnalyzer,
    symbol: String,
    reduction: f64,
    step: f64,
}

impl<'a> ScenarioBuilder<'a> {
    /// Creates a scenario builder for a given symbol.
    pub fn new(analyzer: &'a EsgAnalyzer, symbol: impl Into<String>) -> Self {
        Self {
            analyzer,
            symbol: symbol.into(),
            reduction: 0.0,
            step: DEFAULT_STEP,
        }
    }

    /// Sets the proposed ESG score reduction. Must be non-negative; a
    /// reduction of 0 makes [`simulate`](Self::simulate) a no-op re-score
    /// of the current features.
    #[must_use]
    pub const fn reduction(mut self, points: f64) -> Self {
        self.reduction = points;
        self
    }

    /// Overrides the threshold-search step size (default 0.1 points).
    #[must_use]
    pub const fn step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    fn current(&self) -> Result<(FeatureVector, f64, RiskLabel), EsgError> {
        let record = self.analyzer.company(&self.symbol)?;
        Ok((record.features(), record.esg_score, record.risk_flag))
    }

    /// Applies the proposed reduction and re-scores through the
    /// classifier.
    ///
    /// # Errors
    ///
    /// Fails on an unknown symbol, a negative or non-finite reduction, or
    /// a feature-validation error from the classifier boundary.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self), err, fields(symbol = %self.symbol, reduction = self.reduction))
    )]
    pub fn simulate(&self) -> Result<ScenarioOutcome, EsgError> {
        if !self.reduction.is_finite() || self.reduction < 0.0 {
            return Err(EsgError::FeatureValidation(format!(
                "reduction must be a non-negative finite number, got {}",
                self.reduction
            )));
        }
        let (features, current_score, current_label) = self.current()?;
        let new_score = current_score - self.reduction;
        let new_label = self
            .analyzer
            .classifier()
            .predict(&features.with_esg_score(new_score))?;
        Ok(ScenarioOutcome {
            symbol: self.symbol.clone(),
            current_score,
            new_score,
            current_label,
            new_label,
            delta: RiskDelta::from_labels(current_label, new_label),
        })
    }

    /// Finds the minimal ESG score reduction that achieves a low-risk
    /// prediction, searching downward from the current score toward 0 in
    /// fixed steps. The first low-risk candidate (highest score) is the
    /// recommended target; a company already predicted low risk returns
    /// its current score with zero reduction.
    ///
    /// The search assumes the classifier's predicted risk does not
    /// decrease as the ESG score worsens. That holds for the bundled
    /// cutoff rule but is *not* guaranteed for an arbitrary predictor
    /// trained on six correlated features; for those, the first flip found
    /// is reported as the threshold, which may not be the only one. Verify
    /// with [`scan_flips`](Self::scan_flips) before trusting the target
    /// for a non-monotonic classifier.
    ///
    /// For a fixed classifier and step size the result is deterministic.
    ///
    /// # Errors
    ///
    /// Fails on an unknown symbol, an invalid step, a feature-validation
    /// error, or with [`EsgError::ThresholdUnreachable`] when no candidate
    /// down to and including 0 is predicted low risk.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self), err, fields(symbol = %self.symbol, step = self.step))
    )]
    pub fn find_threshold(&self) -> Result<ThresholdOutcome, EsgError> {
        self.validate_step()?;
        let (features, current_score, _) = self.current()?;
        let classifier = self.analyzer.classifier();

        for (n, candidate) in candidate_scores(current_score, self.step).into_iter().enumerate() {
            let label = classifier.predict(&features.with_esg_score(candidate))?;
            if label == RiskLabel::Low {
                return Ok(ThresholdOutcome {
                    symbol: self.symbol.clone(),
                    current_score,
                    target_score: candidate,
                    reduction: current_score - candidate,
                    steps: n as u64,
                });
            }
        }

        Err(EsgError::ThresholdUnreachable {
            symbol: self.symbol.clone(),
            floor: 0.0,
        })
    }

    /// Scans the entire candidate sequence from the current score down to
    /// 0 and reports every label transition, for checking empirically
    /// whether the classifier is monotonic in the ESG score before
    /// trusting [`find_threshold`](Self::find_threshold). A monotonic
    /// classifier yields at most one flip.
    ///
    /// # Errors
    ///
    /// Fails on an unknown symbol, an invalid step, or a
    /// feature-validation error.
    pub fn scan_flips(&self) -> Result<Vec<FlipPoint>, EsgError> {
        self.validate_step()?;
        let (features, current_score, _) = self.current()?;
        let classifier = self.analyzer.classifier();

        let mut flips = Vec::new();
        let mut prev: Option<RiskLabel> = None;
        for candidate in candidate_scores(current_score, self.step) {
            let label = classifier.predict(&features.with_esg_score(candidate))?;
            if let Some(from) = prev
                && from != label
            {
                flips.push(FlipPoint {
                    score: candidate,
                    from,
                    to: label,
                });
            }
            prev = Some(label);
        }
        Ok(flips)
    }

    fn validate_step(&self) -> Result<(), EsgError> {
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(EsgError::FeatureValidation(format!(
                "search step must be a positive finite number, got {}",
                self.step
            )));
        }
        Ok(())
    }
}

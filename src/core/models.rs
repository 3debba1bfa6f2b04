use serde::{Deserialize, Serialize};

use crate::core::EsgError;

/* ----- RISK LABELS (shared by etl/, classifier/, scenario/) ----- */

/// The binary risk label. Ordinal: `Low < High`, so deltas between labels
/// are well-defined comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLabel {
    /// Low risk (stored as 0).
    Low,
    /// High risk (stored as 1).
    High,
}

impl RiskLabel {
    /// The integer encoding used in the schema store (0 = low, 1 = high).
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        match self {
            Self::Low => 0,
            Self::High => 1,
        }
    }

    /// Decodes the store's integer encoding. Anything other than 0 or 1 is
    /// rejected.
    pub fn from_i64(v: i64) -> Result<Self, EsgError> {
        match v {
            0 => Ok(Self::Low),
            1 => Ok(Self::High),
            other => Err(EsgError::DataIntegrity {
                table: "company_esg_risk".into(),
                reason: format!("risk_flag must be 0 or 1, got {other}"),
            }),
        }
    }

    #[must_use]
    pub const fn is_high(self) -> bool {
        matches!(self, Self::High)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::High => "High",
        }
    }
}

/// The qualitative direction of a label change between the stored risk flag
/// and a re-scored hypothetical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskDelta {
    /// The hypothetical label is lower than the current one.
    Reduced,
    /// The hypothetical label is higher than the current one.
    Increased,
    /// No change in label.
    NoChange,
}

impl RiskDelta {
    /// Compares two ordinal labels (`old` before the scenario, `new` after).
    #[must_use]
    pub fn from_labels(old: RiskLabel, new: RiskLabel) -> Self {
        match new.cmp(&old) {
            std::cmp::Ordering::Less => Self::Reduced,
            std::cmp::Ordering::Greater => Self::Increased,
            std::cmp::Ordering::Equal => Self::NoChange,
        }
    }

    /// Display string used by the presentation layer.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reduced => "Risk Reduced",
            Self::Increased => "Risk Increased",
            Self::NoChange => "No Change",
        }
    }
}

/* ----- FEATURE VECTOR (the classifier contract) ----- */

/// Column names of the classifier features, in the only order the predictor
/// accepts. The predictor has no feature names at inference time, so any
/// reordering silently corrupts predictions.
pub const FEATURE_COLUMNS: [&str; 6] = [
    "esg_score",
    "environment_score",
    "social_score",
    "governance_score",
    "debt_to_equity",
    "roe",
];

/// A fixed-order numeric tuple fed to the classifier:
/// `[total ESG, environment, social, governance, debt-to-equity, ROE]`.
///
/// Construction never validates; validation happens at the classifier
/// boundary (see [`crate::classifier::ValidatingClassifier`]), which rejects
/// non-finite components instead of forwarding them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureVector([f64; 6]);

impl FeatureVector {
    /// Builds a feature vector from its six components, in contract order.
    #[must_use]
    pub const fn new(
        esg_score: f64,
        environment: f64,
        social: f64,
        governance: f64,
        debt_to_equity: f64,
        roe: f64,
    ) -> Self {
        Self([esg_score, environment, social, governance, debt_to_equity, roe])
    }

    /// Builds the feature vector for a merged row. Missing financials map
    /// to NaN so the classifier boundary rejects them explicitly rather
    /// than scoring an imputed value.
    #[must_use]
    pub fn from_record(record: &CompanyRecord) -> Self {
        Self::new(
            record.esg_score,
            record.environment_score,
            record.social_score,
            record.governance_score,
            record.debt_to_equity.unwrap_or(f64::NAN),
            record.roe.unwrap_or(f64::NAN),
        )
    }

    /// The total ESG risk score component.
    #[must_use]
    pub const fn esg_score(&self) -> f64 {
        self.0[0]
    }

    /// Returns a copy with the total ESG score replaced and every other
    /// component unchanged. This is the only substitution scenarios perform.
    #[must_use]
    pub const fn with_esg_score(mut self, esg_score: f64) -> Self {
        self.0[0] = esg_score;
        self
    }

    /// The components in contract order.
    #[must_use]
    pub const fn as_slice(&self) -> &[f64; 6] {
        &self.0
    }

    /// True when every component is a finite float.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }
}

/* ----- RAW SOURCE ROWS (ingest boundary) ----- */

/// One row of the raw ESG ratings source, keyed by ticker symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEsgRow {
    pub symbol: String,
    pub name: String,
    pub sector: Option<String>,
    /// Total ESG risk score; lower is better in this dataset's convention.
    pub esg_score: f64,
    pub environment_score: f64,
    pub social_score: f64,
    pub governance_score: f64,
}

/// One row of the raw financial fundamentals source, keyed by ticker symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFinancialRow {
    pub symbol: String,
    pub debt_to_equity: Option<f64>,
    pub roe: Option<f64>,
}

/* ----- MERGED ROW ----- */

/// One row of the merged analytical table: ESG ratings and financial
/// fundamentals joined on symbol, plus the fields the pipeline derives.
///
/// The stored `risk_flag` is ground truth only for the *current*
/// `esg_score`. Hypothetically modified scores must be re-scored through
/// the live classifier; the flag is never valid for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyRecord {
    /// Ticker symbol; unique, non-empty key of the merged table.
    pub symbol: String,
    pub name: String,
    pub sector: Option<String>,
    pub esg_score: f64,
    pub environment_score: f64,
    pub social_score: f64,
    pub governance_score: f64,
    pub debt_to_equity: Option<f64>,
    pub roe: Option<f64>,
    /// Min-max normalized ESG score in [0, 1], scaled over the full merged
    /// population at pipeline time. Invalidated by any population change.
    pub esg_score_normalized: f64,
    /// Binary risk label assigned once at data-preparation time.
    pub risk_flag: RiskLabel,
}

impl CompanyRecord {
    /// The classifier features for this row, in contract order.
    #[must_use]
    pub fn features(&self) -> FeatureVector {
        FeatureVector::from_record(self)
    }
}

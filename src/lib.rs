//! esg-risk-rs: ESG risk analytics core.
//!
//! Ingests per-company ESG ratings and financial fundamentals into a
//! SQLite schema store, merges them into one analytical table, derives a
//! binary risk label, and supports what-if simulation: apply a
//! hypothetical ESG improvement, re-score through a pre-trained
//! classifier, and search for the minimum ESG score at which a company
//! crosses from high to low predicted risk.
//!
//! The pipeline is batch and single-session: build the merged table and
//! classifier once, then share the [`EsgAnalyzer`] by reference.
//!
//! ```no_run
//! use esg_risk_rs::{CutoffClassifier, EsgAnalyzer, EsgError, EtlPipeline, SchemaStore};
//!
//! # fn main() -> Result<(), EsgError> {
//! let mut store = SchemaStore::open("esg_risk.db")?;
//! let table = EtlPipeline::new().run(&mut store)?;
//!
//! let analyzer = EsgAnalyzer::new(table, CutoffClassifier::new(30.0));
//! let target = analyzer.scenario("MSFT").find_threshold()?;
//! println!("recommended ESG target: <= {:.1}", target.target_score);
//! # Ok(())
//! # }
//! ```

pub mod advisory;
pub mod analyzer;
pub mod classifier;
pub mod core;
pub mod etl;
pub mod normalize;
pub mod scenario;
pub mod store;

pub use advisory::{AdvisoryService, advice_prompt, best_effort_advice};
pub use analyzer::{EsgAnalyzer, PortfolioSummary};
pub use classifier::{CutoffClassifier, LinearModel, RiskClassifier, ValidatingClassifier};
pub use crate::core::{
    CompanyRecord, EsgError, FEATURE_COLUMNS, FeatureVector, MergedTable, RawEsgRow,
    RawFinancialRow, RiskDelta, RiskLabel,
};
pub use etl::{DEFAULT_RISK_CUTOFF, EtlConfig, EtlPipeline};
pub use scenario::{
    DEFAULT_STEP, FlipPoint, ScenarioBuilder, ScenarioOutcome, ThresholdOutcome,
};
pub use store::{SchemaStore, TableCounts};

#[cfg(feature = "dataframe")]
pub use crate::core::dataframe::ToDataFrame;

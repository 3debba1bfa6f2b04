//! The long-lived session handle: merged table + classifier, constructed
//! once at startup and passed by reference into the simulator and the
//! presentation layer.

use serde::Serialize;

use crate::classifier::{RiskClassifier, ValidatingClassifier};
use crate::core::{CompanyRecord, EsgError, MergedTable, RiskLabel};
use crate::scenario::ScenarioBuilder;
use crate::store::SchemaStore;

/// Portfolio-level aggregates over the merged table, as shown in the
/// analyst dashboard's summary header.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PortfolioSummary {
    /// Number of companies in the merged table.
    pub companies: usize,
    /// Number flagged high risk.
    pub high_risk: usize,
    /// High-risk share of the portfolio, 0 for an empty table.
    pub high_risk_ratio: f64,
    /// Mean total ESG risk score, 0 for an empty table.
    pub mean_esg_score: f64,
}

/// A high-level interface over one merged snapshot and one classifier.
///
/// An `EsgAnalyzer` is created once per analyst session with a
/// [`MergedTable`] and a boxed [`RiskClassifier`], then shared by
/// reference. The classifier is always reached through the validating
/// adapter, so malformed feature vectors fail loudly at this boundary.
///
/// # Example
///
/// ```no_run
/// use esg_risk_rs::{CutoffClassifier, EsgAnalyzer, EsgError, SchemaStore};
///
/// # fn main() -> Result<(), EsgError> {
/// let store = SchemaStore::open("esg_risk.db")?;
/// let analyzer = EsgAnalyzer::from_store(&store, CutoffClassifier::new(30.0))?;
///
/// let summary = analyzer.summary();
/// println!("{} companies, {} high risk", summary.companies, summary.high_risk);
///
/// let outcome = analyzer.scenario("MSFT").reduction(10.0).simulate()?;
/// println!("new label: {}", outcome.new_label.as_str());
/// # Ok(())
/// # }
/// ```
pub struct EsgAnalyzer {
    table: MergedTable,
    classifier: ValidatingClassifier<Box<dyn RiskClassifier>>,
}

impl EsgAnalyzer {
    /// Creates an analyzer over an already-built merged table.
    #[must_use]
    pub fn new(table: MergedTable, classifier: impl RiskClassifier + 'static) -> Self {
        Self {
            table,
            classifier: ValidatingClassifier::new(Box::new(classifier)),
        }
    }

    /// Creates an analyzer from the snapshot published in a store.
    ///
    /// # Errors
    ///
    /// Fails if the snapshot cannot be loaded or violates the merged-table
    /// invariants.
    pub fn from_store(
        store: &SchemaStore,
        classifier: impl RiskClassifier + 'static,
    ) -> Result<Self, EsgError> {
        Ok(Self::new(store.load_merged()?, classifier))
    }

    /// The merged table backing this session.
    #[must_use]
    pub const fn table(&self) -> &MergedTable {
        &self.table
    }

    /// The validated classifier boundary. Everything that re-scores a
    /// hypothetical goes through here, never through the stored risk flag.
    pub(crate) const fn classifier(&self) -> &ValidatingClassifier<Box<dyn RiskClassifier>> {
        &self.classifier
    }

    /* ---------------- Company lookups ---------------- */

    /// Looks up one company by symbol.
    ///
    /// # Errors
    ///
    /// Fails with `UnknownSymbol` if the symbol is not in the merged table.
    pub fn company(&self, symbol: &str) -> Result<&CompanyRecord, EsgError> {
        self.table.require(symbol)
    }

    /// All companies, in pipeline output order.
    pub fn companies(&self) -> impl Iterator<Item = &CompanyRecord> {
        self.table.iter()
    }

    /// Starts a what-if scenario for one company.
    #[must_use]
    pub fn scenario<'a>(&'a self, symbol: &str) -> ScenarioBuilder<'a> {
        ScenarioBuilder::new(self, symbol)
    }

    /// Re-scores a company's *current* features through the live
    /// classifier. With a zero reduction this is what a scenario reports.
    ///
    /// # Errors
    ///
    /// Fails on an unknown symbol or a feature-validation error (e.g.
    /// missing financial fundamentals).
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    pub fn predict_current(&self, symbol: &str) -> Result<RiskLabel, EsgError> {
        let record = self.table.require(symbol)?;
        self.classifier.predict(&record.features())
    }

    /* ---------------- Portfolio queries ---------------- */

    /// Portfolio-level aggregates over the merged table.
    #[must_use]
    pub fn summary(&self) -> PortfolioSummary {
        let companies = self.table.len();
        let high_risk = self
            .table
            .iter()
            .filter(|r| r.risk_flag.is_high())
            .count();
        let (high_risk_ratio, mean_esg_score) = if companies == 0 {
            (0.0, 0.0)
        } else {
            #[allow(clippy::cast_precision_loss)]
            let n = companies as f64;
            let total: f64 = self.table.iter().map(|r| r.esg_score).sum();
            #[allow(clippy::cast_precision_loss)]
            let ratio = high_risk as f64 / n;
            (ratio, total / n)
        };
        PortfolioSummary {
            companies,
            high_risk,
            high_risk_ratio,
            mean_esg_score,
        }
    }

    /// The `n` companies with the highest total ESG risk score, worst
    /// first. Ties keep pipeline output order.
    #[must_use]
    pub fn riskiest(&self, n: usize) -> Vec<&CompanyRecord> {
        let mut rows: Vec<&CompanyRecord> = self.table.iter().collect();
        rows.sort_by(|a, b| {
            b.esg_score
                .partial_cmp(&a.esg_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        rows.truncate(n);
        rows
    }

    /// Distinct sector names, sorted. Companies without a sector are
    /// skipped.
    #[must_use]
    pub fn sectors(&self) -> Vec<String> {
        let mut out: Vec<String> = self
            .table
            .iter()
            .filter_map(|r| r.sector.clone())
            .collect();
        out.sort();
        out.dedup();
        out
    }

    /// Companies in one sector, in pipeline output order.
    #[must_use]
    pub fn companies_in_sector(&self, sector: &str) -> Vec<&CompanyRecord> {
        self.table
            .iter()
            .filter(|r| r.sector.as_deref() == Some(sector))
            .collect()
    }
}

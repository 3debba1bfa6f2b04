//! The ETL pipeline: validate → join → derive → normalize → publish.
//!
//! Each run reads the raw source tables, inner-joins them on symbol,
//! derives the risk flag and the normalized ESG score, and publishes the
//! merged snapshot wholesale. A failed run publishes nothing; the previous
//! snapshot stays live.

use std::collections::HashMap;

use crate::core::{CompanyRecord, EsgError, MergedTable, RawEsgRow, RawFinancialRow, RiskLabel};
use crate::normalize::min_max;
use crate::store::SchemaStore;

/// Default ESG score above which a company is flagged high risk. This is
/// the floor of the Sustainalytics "high risk" band, which the source
/// dataset's ratings follow.
pub const DEFAULT_RISK_CUTOFF: f64 = 30.0;

/// Configuration for a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EtlConfig {
    /// Total ESG score strictly above which `risk_flag` is assigned
    /// [`RiskLabel::High`].
    pub risk_cutoff: f64,
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self {
            risk_cutoff: DEFAULT_RISK_CUTOFF,
        }
    }
}

/// The ETL pipeline. Stateless apart from its configuration; one instance
/// can drive any number of runs.
#[derive(Debug, Clone, Default)]
pub struct EtlPipeline {
    config: EtlConfig,
}

impl EtlPipeline {
    /// A pipeline with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A pipeline with an explicit configuration.
    #[must_use]
    pub const fn with_config(config: EtlConfig) -> Self {
        Self { config }
    }

    /// Runs the full pipeline against a store: loads both raw tables,
    /// merges them, and publishes the result, fully overwriting the
    /// previous snapshot.
    ///
    /// # Errors
    ///
    /// Fails with a data-integrity error on join-key violations, a
    /// degenerate-input error on a zero-variance ESG column, or a storage
    /// error. In every failure case the previously published snapshot is
    /// left untouched.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, err))]
    pub fn run(&self, store: &mut SchemaStore) -> Result<MergedTable, EsgError> {
        let esg = store.load_raw_esg()?;
        let financials = store.load_raw_financials()?;
        let merged = self.merge(&esg, &financials)?;
        store.publish_merged(merged.rows())?;
        #[cfg(feature = "tracing")]
        tracing::info!(rows = merged.len(), "published merged snapshot");
        Ok(merged)
    }

    /// The pure merge stage: validate both sources, inner-join on symbol,
    /// derive the risk flag, and normalize the ESG score over the merged
    /// population. No side effects.
    ///
    /// Join policy: companies missing from either source are dropped. The
    /// merged table is the intersection of the two key sets, by design.
    ///
    /// # Errors
    ///
    /// Fails with a data-integrity error if either source has an empty or
    /// duplicated symbol, or with a degenerate-input error if the merged
    /// ESG column has zero variance (normalization would be undefined).
    pub fn merge(
        &self,
        esg: &[RawEsgRow],
        financials: &[RawFinancialRow],
    ) -> Result<MergedTable, EsgError> {
        validate_join_key("esg_data", esg.iter().map(|r| r.symbol.as_str()))?;
        validate_join_key("financial_data", financials.iter().map(|r| r.symbol.as_str()))?;

        let by_symbol: HashMap<&str, &RawFinancialRow> =
            financials.iter().map(|r| (r.symbol.as_str(), r)).collect();

        // Inner join, keeping the ESG source's row order.
        let mut joined: Vec<(&RawEsgRow, &RawFinancialRow)> = Vec::new();
        for row in esg {
            if let Some(&fin) = by_symbol.get(row.symbol.as_str()) {
                joined.push((row, fin));
            }
        }

        let scores: Vec<f64> = joined.iter().map(|(e, _)| e.esg_score).collect();
        let normalized = min_max(&scores)?;

        let rows = joined
            .into_iter()
            .zip(normalized)
            .map(|((e, f), esg_score_normalized)| CompanyRecord {
                symbol: e.symbol.clone(),
                name: e.name.clone(),
                sector: e.sector.clone(),
                esg_score: e.esg_score,
                environment_score: e.environment_score,
                social_score: e.social_score,
                governance_score: e.governance_score,
                debt_to_equity: f.debt_to_equity,
                roe: f.roe,
                esg_score_normalized,
                risk_flag: self.label_for(e.esg_score),
            })
            .collect();

        MergedTable::new(rows)
    }

    /// The label rule applied at data-preparation time.
    #[must_use]
    pub fn label_for(&self, esg_score: f64) -> RiskLabel {
        if esg_score > self.config.risk_cutoff {
            RiskLabel::High
        } else {
            RiskLabel::Low
        }
    }
}

/// Checks the join-key contract for one source table: every symbol present,
/// non-empty, and unique. The column itself is guaranteed by the store
/// schema; what can go wrong in landed data is emptiness and duplication.
fn validate_join_key<'a>(
    table: &str,
    symbols: impl Iterator<Item = &'a str>,
) -> Result<(), EsgError> {
    let mut seen = HashMap::new();
    for (idx, symbol) in symbols.enumerate() {
        if symbol.is_empty() {
            return Err(EsgError::DataIntegrity {
                table: table.into(),
                reason: format!("empty symbol at row {idx}"),
            });
        }
        if let Some(first) = seen.insert(symbol, idx) {
            return Err(EsgError::DataIntegrity {
                table: table.into(),
                reason: format!("duplicate symbol `{symbol}` (rows {first} and {idx})"),
            });
        }
    }
    Ok(())
}

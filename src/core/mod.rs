//! Core components of the `esg-risk-rs` analytics library.
//!
//! This module contains the foundational building blocks of the crate,
//! including:
//! - The primary [`EsgError`] type.
//! - Shared data models like [`CompanyRecord`], [`RiskLabel`], and
//!   [`FeatureVector`].
//! - The [`MergedTable`] produced by the ETL pipeline and consumed by the
//!   classifier adapter and the scenario simulator.

/// The primary error type (`EsgError`) for the crate.
pub mod error;
/// Shared data models used across the pipeline, classifier, and simulator.
pub mod models;
/// The merged analytical table.
pub mod table;

#[cfg(feature = "dataframe")]
/// Optional Polars export of the merged table.
pub mod dataframe;

// convenient re-exports so most code can just `use crate::core::EsgError`
pub use error::EsgError;
pub use models::{
    CompanyRecord, FEATURE_COLUMNS, FeatureVector, RawEsgRow, RawFinancialRow, RiskDelta,
    RiskLabel,
};
pub use table::MergedTable;

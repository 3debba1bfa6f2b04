use polars::prelude::*;

use crate::core::{CompanyRecord, MergedTable};

/// Trait for converting analytical data structures into Polars DataFrames.
///
/// This provides a consistent interface for exporting crate types for
/// ad-hoc analysis and manipulation outside the pipeline.
pub trait ToDataFrame {
    /// Converts the object into a Polars DataFrame.
    fn to_dataframe(&self) -> PolarsResult<DataFrame>;

    /// Creates an empty DataFrame with the correct schema for this type.
    fn empty_dataframe() -> PolarsResult<DataFrame>
    where
        Self: Sized;

    /// Returns the complete flattened schema for this type.
    fn schema() -> PolarsResult<Vec<(&'static str, DataType)>>
    where
        Self: Sized;
}

fn company_schema() -> Vec<(&'static str, DataType)> {
    vec![
        ("symbol", DataType::String),
        ("name", DataType::String),
        ("sector", DataType::String),
        ("esg_score", DataType::Float64),
        ("environment_score", DataType::Float64),
        ("social_score", DataType::Float64),
        ("governance_score", DataType::Float64),
        ("debt_to_equity", DataType::Float64),
        ("roe", DataType::Float64),
        ("esg_score_normalized", DataType::Float64),
        ("risk_flag", DataType::Int64),
    ]
}

fn rows_to_dataframe(rows: &[CompanyRecord]) -> PolarsResult<DataFrame> {
    let columns = vec![
        Column::new(
            "symbol".into(),
            rows.iter().map(|r| r.symbol.as_str()).collect::<Vec<_>>(),
        ),
        Column::new(
            "name".into(),
            rows.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(),
        ),
        Column::new(
            "sector".into(),
            rows.iter().map(|r| r.sector.clone()).collect::<Vec<_>>(),
        ),
        Column::new(
            "esg_score".into(),
            rows.iter().map(|r| r.esg_score).collect::<Vec<_>>(),
        ),
        Column::new(
            "environment_score".into(),
            rows.iter().map(|r| r.environment_score).collect::<Vec<_>>(),
        ),
        Column::new(
            "social_score".into(),
            rows.iter().map(|r| r.social_score).collect::<Vec<_>>(),
        ),
        Column::new(
            "governance_score".into(),
            rows.iter().map(|r| r.governance_score).collect::<Vec<_>>(),
        ),
        Column::new(
            "debt_to_equity".into(),
            rows.iter().map(|r| r.debt_to_equity).collect::<Vec<_>>(),
        ),
        Column::new(
            "roe".into(),
            rows.iter().map(|r| r.roe).collect::<Vec<_>>(),
        ),
        Column::new(
            "esg_score_normalized".into(),
            rows.iter().map(|r| r.esg_score_normalized).collect::<Vec<_>>(),
        ),
        Column::new(
            "risk_flag".into(),
            rows.iter().map(|r| r.risk_flag.as_i64()).collect::<Vec<_>>(),
        ),
    ];
    DataFrame::new(columns)
}

impl ToDataFrame for MergedTable {
    fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        rows_to_dataframe(self.rows())
    }

    fn empty_dataframe() -> PolarsResult<DataFrame> {
        rows_to_dataframe(&[])
    }

    fn schema() -> PolarsResult<Vec<(&'static str, DataType)>> {
        Ok(company_schema())
    }
}

//! The feature normalizer: pure min-max scaling over a full column.

use crate::core::EsgError;

/// Min-max scales `values` into [0, 1]: `(x - min) / (max - min)`, with the
/// minimum and maximum taken over the whole slice.
///
/// The scaling is population-wide by contract: the caller must pass the
/// complete column, never a filtered subset, or the output is meaningless
/// for rows outside the subset.
///
/// # Errors
///
/// Fails with [`EsgError::DegenerateInput`] when the column is empty,
/// contains a non-finite value, or has zero variance (`max == min`, which
/// includes the single-row case). The naive formula divides by zero there;
/// this crate's policy is to reject the input rather than emit a sentinel,
/// so a degenerate population aborts the pipeline run instead of silently
/// publishing constant scores.
pub fn min_max(values: &[f64]) -> Result<Vec<f64>, EsgError> {
    if values.is_empty() {
        return Err(EsgError::DegenerateInput("empty column".into()));
    }
    if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
        return Err(EsgError::DegenerateInput(format!(
            "non-finite value {bad} in column"
        )));
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;
    if span == 0.0 {
        return Err(EsgError::DegenerateInput(format!(
            "zero variance: all {} values equal {min}",
            values.len()
        )));
    }

    Ok(values.iter().map(|v| (v - min) / span).collect())
}

//! Candidate-score generation for the threshold search.

/// The descending candidate sequence from `start` toward the lower bound 0
/// in fixed steps, with 0 itself always the final candidate.
///
/// Each candidate is computed as `start - n * step` from the step count,
/// not by repeated subtraction, so no floating-point drift accumulates
/// across a long search. The sequence is finite by construction, which is
/// what makes the search's termination structural rather than behavioral.
pub(crate) fn candidate_scores(start: f64, step: f64) -> Vec<f64> {
    debug_assert!(step > 0.0 && step.is_finite());
    let mut out = Vec::new();
    let mut n: u64 = 0;
    loop {
        #[allow(clippy::cast_precision_loss)]
        let candidate = start - (n as f64) * step;
        if candidate <= 0.0 {
            out.push(0.0);
            break;
        }
        out.push(candidate);
        n += 1;
    }
    out
}

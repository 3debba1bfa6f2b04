//! The advisory-text boundary: an opaque, fallible external
//! text-generation service producing engagement prose from a scenario.
//!
//! The service itself (and its transport, auth, and timeout handling) is
//! external to this crate; what lives here is the seam. Advisory text is
//! strictly best-effort: a failing service never fails a pipeline run or a
//! simulation request.

use crate::core::{CompanyRecord, EsgError};
use crate::scenario::ThresholdOutcome;

/// An external text-generation service.
///
/// Implementations should bound the call with their own timeout; callers
/// treat any error as "no advisory available".
pub trait AdvisoryService: Send + Sync {
    /// Generates advisory prose for a prompt.
    ///
    /// # Errors
    ///
    /// Fails with [`EsgError::Advisory`] (or any other variant the
    /// implementation maps into it) when the service is unavailable or
    /// rejects the request.
    fn generate_advice(&self, prompt: &str) -> Result<String, EsgError>;
}

/// Builds the client-engagement prompt for a company and its threshold
/// search result.
#[must_use]
pub fn advice_prompt(record: &CompanyRecord, target: &ThresholdOutcome) -> String {
    format!(
        "Company: {name} ({symbol})\n\
         Sector: {sector}\n\
         Current ESG: {current:.1}\n\
         Risk: {risk}\n\
         Target ESG for Low Risk: {target:.1}\n\
         \n\
         Give a 2-sentence business recommendation on how to engage this \
         client on ESG improvement.",
        name = record.name,
        symbol = record.symbol,
        sector = record.sector.as_deref().unwrap_or("Unknown"),
        current = record.esg_score,
        risk = record.risk_flag.as_str(),
        target = target.target_score,
    )
}

/// Invokes the service, downgrading any failure to `None`.
pub fn best_effort_advice(service: &dyn AdvisoryService, prompt: &str) -> Option<String> {
    match service.generate_advice(prompt) {
        Ok(text) => Some(text),
        Err(_err) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %_err, "advisory service failed; continuing without advice");
            None
        }
    }
}

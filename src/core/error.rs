use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum EsgError {
    /// A source table violated the join-key contract (missing, empty, or
    /// duplicated symbol column). Fatal to the pipeline run; no snapshot is
    /// published.
    #[error("data integrity violation in `{table}`: {reason}")]
    DataIntegrity {
        /// The source table that failed validation.
        table: String,
        /// What the validation found.
        reason: String,
    },

    /// A column had zero variance (or was empty), so min-max normalization
    /// is undefined.
    #[error("degenerate input for normalization: {0}")]
    DegenerateInput(String),

    /// A feature vector failed the classifier contract (non-finite value,
    /// negative reduction, invalid step).
    #[error("feature validation failed: {0}")]
    FeatureValidation(String),

    /// The threshold search exhausted every candidate down to the lower
    /// bound without the classifier reporting low risk.
    #[error("no achievable low-risk target for `{symbol}` above the lower bound {floor}")]
    ThresholdUnreachable {
        /// The company whose search was exhausted.
        symbol: String,
        /// The lower bound the search stopped at.
        floor: f64,
    },

    /// The requested symbol is not present in the merged table.
    #[error("unknown symbol: {0}")]
    UnknownSymbol(String),

    /// An error surfaced from the underlying SQLite store.
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// A serialized predictor file could not be parsed.
    #[error("model format error: {0}")]
    ModelFormat(#[from] serde_json::Error),

    /// A predictor file could not be read from disk.
    #[error("model file error: {0}")]
    ModelFile(#[from] std::io::Error),

    /// The external advisory-text service failed. Best-effort callers
    /// downgrade this to a missing advisory rather than failing a request.
    #[error("advisory service error: {0}")]
    Advisory(String),
}

impl EsgError {
    /// A short, stable identifier for the error kind, for presentation
    /// layers that render errors as structured (kind, message) pairs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::DataIntegrity { .. } => "data_integrity",
            Self::DegenerateInput(_) => "degenerate_input",
            Self::FeatureValidation(_) => "feature_validation",
            Self::ThresholdUnreachable { .. } => "threshold_unreachable",
            Self::UnknownSymbol(_) => "unknown_symbol",
            Self::Storage(_) => "storage",
            Self::ModelFormat(_) => "model_format",
            Self::ModelFile(_) => "model_file",
            Self::Advisory(_) => "advisory",
        }
    }
}

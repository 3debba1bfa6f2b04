//! SQL schema of the schema store.
//!
//! The raw tables are a landing zone and deliberately carry no uniqueness
//! constraint on `symbol`: the ETL pipeline owns join-key validation and
//! reports violations as data-integrity errors instead of surfacing SQLite
//! constraint failures. The published merged table does enforce the key.

pub(super) const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS esg_data (
    symbol            TEXT NOT NULL,
    name              TEXT NOT NULL,
    sector            TEXT,
    esg_score         REAL NOT NULL,
    environment_score REAL NOT NULL,
    social_score      REAL NOT NULL,
    governance_score  REAL NOT NULL
);

CREATE TABLE IF NOT EXISTS financial_data (
    symbol         TEXT NOT NULL,
    debt_to_equity REAL,
    roe            REAL
);

CREATE TABLE IF NOT EXISTS company_esg_risk (
    symbol               TEXT PRIMARY KEY,
    name                 TEXT NOT NULL,
    sector               TEXT,
    esg_score            REAL NOT NULL,
    environment_score    REAL NOT NULL,
    social_score         REAL NOT NULL,
    governance_score     REAL NOT NULL,
    debt_to_equity       REAL,
    roe                  REAL,
    esg_score_normalized REAL NOT NULL,
    risk_flag            INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_esg_data_symbol ON esg_data(symbol);
CREATE INDEX IF NOT EXISTS idx_financial_data_symbol ON financial_data(symbol);
CREATE INDEX IF NOT EXISTS idx_merged_sector ON company_esg_risk(sector);

CREATE TABLE IF NOT EXISTS metadata (
    key   TEXT PRIMARY KEY,
    value TEXT
);
";

/// Metadata key recording when the merged snapshot was last published.
pub(super) const META_LAST_RUN: &str = "merged_published_at";

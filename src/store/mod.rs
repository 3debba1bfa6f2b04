//! The schema store: SQLite persistence for raw sources and the published
//! merged snapshot.
//!
//! One store per session, opened once and passed by reference into the ETL
//! pipeline. Raw rows land as-is; only the pipeline writes the merged
//! table, and it does so wholesale inside a transaction so readers never
//! observe a partial snapshot.

mod schema;

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, params};

use crate::core::{CompanyRecord, EsgError, MergedTable, RawEsgRow, RawFinancialRow, RiskLabel};
use schema::{META_LAST_RUN, SCHEMA};

/// Per-table row counts, for post-ingest sanity checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableCounts {
    pub esg_data: usize,
    pub financial_data: usize,
    pub merged: usize,
}

/// SQLite-backed storage for the raw source tables and the merged
/// analytical snapshot.
pub struct SchemaStore {
    conn: Connection,
}

impl SchemaStore {
    /// Opens (or creates) a store at the given path and applies the schema.
    ///
    /// # Errors
    ///
    /// Fails if the database cannot be opened or the schema cannot be
    /// applied.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, EsgError> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Opens an in-memory store, mainly for tests and demos.
    ///
    /// # Errors
    ///
    /// Fails if the schema cannot be applied.
    pub fn open_in_memory() -> Result<Self, EsgError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, EsgError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /* -------- raw source ingest -------- */

    /// Replaces the contents of the raw `esg_data` table.
    ///
    /// Rows are stored exactly as given, duplicates included; join-key
    /// validation belongs to the pipeline, not the landing zone.
    ///
    /// # Errors
    ///
    /// Fails on any storage error; the previous contents are kept.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, err, fields(rows = rows.len())))]
    pub fn ingest_esg(&mut self, rows: &[RawEsgRow]) -> Result<(), EsgError> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM esg_data", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO esg_data (symbol, name, sector, esg_score, environment_score, social_score, governance_score)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for row in rows {
                stmt.execute(params![
                    row.symbol,
                    row.name,
                    row.sector,
                    row.esg_score,
                    row.environment_score,
                    row.social_score,
                    row.governance_score,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    /// Replaces the contents of the raw `financial_data` table.
    ///
    /// # Errors
    ///
    /// Fails on any storage error; the previous contents are kept.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, err, fields(rows = rows.len())))]
    pub fn ingest_financials(&mut self, rows: &[RawFinancialRow]) -> Result<(), EsgError> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM financial_data", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO financial_data (symbol, debt_to_equity, roe) VALUES (?1, ?2, ?3)",
            )?;
            for row in rows {
                stmt.execute(params![row.symbol, row.debt_to_equity, row.roe])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    /* -------- raw source reads (pipeline input) -------- */

    /// Loads the raw ESG ratings table.
    ///
    /// # Errors
    ///
    /// Fails on any storage error.
    pub fn load_raw_esg(&self) -> Result<Vec<RawEsgRow>, EsgError> {
        let mut stmt = self.conn.prepare(
            "SELECT symbol, name, sector, esg_score, environment_score, social_score, governance_score
             FROM esg_data",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(RawEsgRow {
                    symbol: row.get(0)?,
                    name: row.get(1)?,
                    sector: row.get(2)?,
                    esg_score: row.get(3)?,
                    environment_score: row.get(4)?,
                    social_score: row.get(5)?,
                    governance_score: row.get(6)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Loads the raw financial fundamentals table.
    ///
    /// # Errors
    ///
    /// Fails on any storage error.
    pub fn load_raw_financials(&self) -> Result<Vec<RawFinancialRow>, EsgError> {
        let mut stmt = self
            .conn
            .prepare("SELECT symbol, debt_to_equity, roe FROM financial_data")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(RawFinancialRow {
                    symbol: row.get(0)?,
                    debt_to_equity: row.get(1)?,
                    roe: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /* -------- merged snapshot -------- */

    /// Publishes a merged snapshot, fully overwriting the previous one.
    ///
    /// Runs in a single transaction: on any failure the previous snapshot
    /// survives untouched. Records the publication time in store metadata.
    ///
    /// # Errors
    ///
    /// Fails on any storage error.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, err, fields(rows = rows.len())))]
    pub fn publish_merged(&mut self, rows: &[CompanyRecord]) -> Result<(), EsgError> {
        let published_at = Utc::now();
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM company_esg_risk", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO company_esg_risk
                   (symbol, name, sector, esg_score, environment_score, social_score,
                    governance_score, debt_to_equity, roe, esg_score_normalized, risk_flag)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            )?;
            for row in rows {
                stmt.execute(params![
                    row.symbol,
                    row.name,
                    row.sector,
                    row.esg_score,
                    row.environment_score,
                    row.social_score,
                    row.governance_score,
                    row.debt_to_equity,
                    row.roe,
                    row.esg_score_normalized,
                    row.risk_flag.as_i64(),
                ])?;
            }
        }
        tx.execute(
            "INSERT INTO metadata (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![META_LAST_RUN, published_at.to_rfc3339()],
        )?;
        tx.commit()?;
        Ok(())
    }

    /// Loads the published merged snapshot.
    ///
    /// # Errors
    ///
    /// Fails on any storage error, or with a data-integrity error if the
    /// stored snapshot violates the symbol-key or label invariants.
    pub fn load_merged(&self) -> Result<MergedTable, EsgError> {
        let mut stmt = self.conn.prepare(
            "SELECT symbol, name, sector, esg_score, environment_score, social_score,
                    governance_score, debt_to_equity, roe, esg_score_normalized, risk_flag
             FROM company_esg_risk",
        )?;
        let raw = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<String>>(2)?,
                    row.get::<_, f64>(3)?,
                    row.get::<_, f64>(4)?,
                    row.get::<_, f64>(5)?,
                    row.get::<_, f64>(6)?,
                    row.get::<_, Option<f64>>(7)?,
                    row.get::<_, Option<f64>>(8)?,
                    row.get::<_, f64>(9)?,
                    row.get::<_, i64>(10)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut rows = Vec::with_capacity(raw.len());
        for (
            symbol,
            name,
            sector,
            esg_score,
            environment_score,
            social_score,
            governance_score,
            debt_to_equity,
            roe,
            esg_score_normalized,
            flag,
        ) in raw
        {
            rows.push(CompanyRecord {
                symbol,
                name,
                sector,
                esg_score,
                environment_score,
                social_score,
                governance_score,
                debt_to_equity,
                roe,
                esg_score_normalized,
                risk_flag: RiskLabel::from_i64(flag)?,
            });
        }
        MergedTable::new(rows)
    }

    /// When the merged snapshot was last published, if ever.
    ///
    /// # Errors
    ///
    /// Fails on any storage error or an unparseable stored timestamp.
    pub fn published_at(&self) -> Result<Option<DateTime<Utc>>, EsgError> {
        let value: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM metadata WHERE key = ?1",
                params![META_LAST_RUN],
                |row| row.get(0),
            )
            .optional()?;
        match value {
            None => Ok(None),
            Some(s) => DateTime::parse_from_rfc3339(&s)
                .map(|dt| Some(dt.with_timezone(&Utc)))
                .map_err(|e| EsgError::DataIntegrity {
                    table: "metadata".into(),
                    reason: format!("bad {META_LAST_RUN} timestamp: {e}"),
                }),
        }
    }

    /// Row counts for every table, mirroring the usual post-ingest check.
    ///
    /// # Errors
    ///
    /// Fails on any storage error.
    pub fn counts(&self) -> Result<TableCounts, EsgError> {
        let count = |table: &str| -> Result<usize, rusqlite::Error> {
            self.conn
                .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                    row.get::<_, i64>(0)
                })
                .map(|n| usize::try_from(n).unwrap_or_default())
        };
        Ok(TableCounts {
            esg_data: count("esg_data")?,
            financial_data: count("financial_data")?,
            merged: count("company_esg_risk")?,
        })
    }
}

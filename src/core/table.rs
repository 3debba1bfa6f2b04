use std::collections::HashMap;

use crate::core::{CompanyRecord, EsgError};

/// The merged analytical table: one [`CompanyRecord`] per company, indexed
/// by symbol.
///
/// A table is produced whole by a pipeline run (or loaded whole from the
/// store) and is never patched incrementally; replacing rows would
/// invalidate the population-wide normalized scores.
#[derive(Debug, Clone)]
pub struct MergedTable {
    rows: Vec<CompanyRecord>,
    by_symbol: HashMap<String, usize>,
}

impl MergedTable {
    /// Builds a table from merged rows, enforcing the symbol-key invariant
    /// (unique, non-empty).
    pub fn new(rows: Vec<CompanyRecord>) -> Result<Self, EsgError> {
        let mut by_symbol = HashMap::with_capacity(rows.len());
        for (idx, row) in rows.iter().enumerate() {
            if row.symbol.is_empty() {
                return Err(EsgError::DataIntegrity {
                    table: "company_esg_risk".into(),
                    reason: format!("empty symbol at row {idx}"),
                });
            }
            if by_symbol.insert(row.symbol.clone(), idx).is_some() {
                return Err(EsgError::DataIntegrity {
                    table: "company_esg_risk".into(),
                    reason: format!("duplicate symbol `{}`", row.symbol),
                });
            }
        }
        Ok(Self { rows, by_symbol })
    }

    /// Looks up a company by its ticker symbol.
    #[must_use]
    pub fn get(&self, symbol: &str) -> Option<&CompanyRecord> {
        self.by_symbol.get(symbol).map(|&idx| &self.rows[idx])
    }

    /// Like [`get`](Self::get), but failing with `UnknownSymbol` for
    /// callers that treat a miss as an error.
    pub fn require(&self, symbol: &str) -> Result<&CompanyRecord, EsgError> {
        self.get(symbol)
            .ok_or_else(|| EsgError::UnknownSymbol(symbol.to_string()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in their pipeline output order.
    pub fn iter(&self) -> impl Iterator<Item = &CompanyRecord> {
        self.rows.iter()
    }

    /// All rows, consuming the table.
    #[must_use]
    pub fn into_rows(self) -> Vec<CompanyRecord> {
        self.rows
    }

    /// Rows as a slice, for bulk consumers like the dataframe export.
    #[must_use]
    pub fn rows(&self) -> &[CompanyRecord] {
        &self.rows
    }
}

impl<'a> IntoIterator for &'a MergedTable {
    type Item = &'a CompanyRecord;
    type IntoIter = std::slice::Iter<'a, CompanyRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

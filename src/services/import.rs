//! Statement import
//!
//! Reads a bank statement CSV into transactions. The statement must carry
//! `Details`, `Date`, `Amount` and `Debit/Credit` columns (header names are
//! trimmed, other columns are ignored). One bad row rejects the whole
//! statement: nothing is returned for partial classification.

use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info};

use crate::config::Settings;
use crate::error::{TallyError, TallyResult};
use crate::models::{Direction, Money, Transaction};

pub const DETAILS_COLUMN: &str = "Details";
pub const DATE_COLUMN: &str = "Date";
pub const AMOUNT_COLUMN: &str = "Amount";
pub const DIRECTION_COLUMN: &str = "Debit/Credit";

/// Positions of the required columns in a statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMapping {
    pub details: usize,
    pub date: usize,
    pub amount: usize,
    pub direction: usize,
}

impl ColumnMapping {
    /// Locate the required columns by (trimmed) header name
    pub fn from_headers(headers: &StringRecord) -> TallyResult<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| TallyError::Import(format!("Missing column '{}'", name)))
        };

        Ok(Self {
            details: find(DETAILS_COLUMN)?,
            date: find(DATE_COLUMN)?,
            amount: find(AMOUNT_COLUMN)?,
            direction: find(DIRECTION_COLUMN)?,
        })
    }
}

/// Parses statement CSVs
#[derive(Debug, Clone)]
pub struct StatementImport {
    date_format: String,
}

impl Default for StatementImport {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl StatementImport {
    /// Create an importer for statements whose dates use `date_format`
    pub fn new(date_format: impl Into<String>) -> Self {
        Self {
            date_format: date_format.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.statement_date_format.clone())
    }

    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    /// Parse a statement file
    pub fn parse_file(&self, path: &Path) -> TallyResult<Vec<Transaction>> {
        let file = std::fs::File::open(path).map_err(|e| {
            TallyError::Import(format!("Failed to open {}: {}", path.display(), e))
        })?;
        let transactions = self.parse_reader(file)?;
        info!(
            file = %path.display(),
            transactions = transactions.len(),
            "Imported statement"
        );
        Ok(transactions)
    }

    /// Parse statement CSV text
    pub fn parse_str(&self, content: &str) -> TallyResult<Vec<Transaction>> {
        self.parse_reader(content.as_bytes())
    }

    /// Parse a statement from any reader
    pub fn parse_reader<R: Read>(&self, reader: R) -> TallyResult<Vec<Transaction>> {
        let mut reader = ReaderBuilder::new().has_headers(true).from_reader(reader);

        let headers = reader.headers()?.clone();
        let mapping = ColumnMapping::from_headers(&headers)?;

        let mut transactions = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            // Line numbers as a spreadsheet shows them: header is line 1
            let line = idx + 2;
            let record =
                result.map_err(|e| TallyError::Import(format!("Line {}: {}", line, e)))?;
            let transaction = self
                .parse_record(&record, &mapping)
                .map_err(|msg| TallyError::Import(format!("Line {}: {}", line, msg)))?;
            transactions.push(transaction);
        }

        debug!(rows = transactions.len(), "Parsed statement rows");
        Ok(transactions)
    }

    fn parse_record(
        &self,
        record: &StringRecord,
        mapping: &ColumnMapping,
    ) -> Result<Transaction, String> {
        let field = |idx: usize, name: &str| {
            record
                .get(idx)
                .ok_or_else(|| format!("Missing value for '{}'", name))
        };

        let details = field(mapping.details, DETAILS_COLUMN)?;

        let date_str = field(mapping.date, DATE_COLUMN)?.trim();
        let date = NaiveDate::parse_from_str(date_str, &self.date_format).map_err(|_| {
            format!(
                "Could not parse date '{}' (expected format {})",
                date_str, self.date_format
            )
        })?;

        let amount = Money::parse(field(mapping.amount, AMOUNT_COLUMN)?)
            .map_err(|e| e.to_string())?;

        let direction = field(mapping.direction, DIRECTION_COLUMN)?.parse::<Direction>()?;

        Ok(Transaction::new(date, details, amount, direction))
    }
}

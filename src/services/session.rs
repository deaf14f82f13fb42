//! Categorization session
//!
//! One interactive pass over a statement: upload it, review the assigned
//! categories, correct some of them (which teaches the rule store) and read
//! the spending summary. Only the rule store survives the session.

use std::io::Read;

use tracing::info;

use crate::error::{TallyError, TallyResult};
use crate::models::{CategoryRules, ClassifiedBatch, Direction, RuleChange, Transaction};
use crate::reports::SpendingSummary;
use crate::storage::RuleStorage;

use super::classifier::Classifier;
use super::feedback::{EditReport, LearningFeedback};
use super::import::StatementImport;
use super::rules::RuleStore;

/// Everything the display layer shows for the current statement
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    /// Categories a row may be moved to, in rule order
    pub categories: Vec<String>,
    pub debits: Vec<Transaction>,
    pub credits: Vec<Transaction>,
    pub summary: SpendingSummary,
}

impl Dashboard {
    /// Build the view of `batch` under `rules`
    pub fn render(rules: &CategoryRules, batch: &ClassifiedBatch) -> Self {
        Self {
            categories: rules.category_names().map(str::to_string).collect(),
            debits: batch.debits.clone(),
            credits: batch.credits.clone(),
            summary: SpendingSummary::generate(batch),
        }
    }
}

/// A rule store plus the statement currently being reviewed
#[derive(Debug)]
pub struct Session<S: RuleStorage> {
    store: RuleStore<S>,
    batch: ClassifiedBatch,
}

impl<S: RuleStorage> Session<S> {
    pub fn new(store: RuleStore<S>) -> Self {
        Self {
            store,
            batch: ClassifiedBatch::default(),
        }
    }

    pub fn store(&self) -> &RuleStore<S> {
        &self.store
    }

    pub fn batch(&self) -> &ClassifiedBatch {
        &self.batch
    }

    /// Replace the current statement with `transactions`, classified
    ///
    /// Returns the number of rows loaded.
    pub fn upload(&mut self, transactions: Vec<Transaction>) -> usize {
        let mut batch = ClassifiedBatch::from_transactions(transactions);
        Classifier::new(self.store.rules()).classify_batch(&mut batch);
        self.batch = batch;

        info!(
            debits = self.batch.debits.len(),
            credits = self.batch.credits.len(),
            "Loaded statement"
        );
        self.batch.len()
    }

    /// Parse a statement and upload it
    ///
    /// A statement that fails to parse leaves the current one in place.
    pub fn upload_reader<R: Read>(
        &mut self,
        importer: &StatementImport,
        reader: R,
    ) -> TallyResult<usize> {
        let transactions = importer.parse_reader(reader)?;
        Ok(self.upload(transactions))
    }

    /// Move one row to another category and learn its details as a keyword
    ///
    /// Other rows keep their categories until [`reclassify`](Self::reclassify).
    pub fn recategorize(
        &mut self,
        direction: Direction,
        index: usize,
        category: &str,
    ) -> TallyResult<Option<RuleChange>> {
        let transaction = self
            .batch
            .get_mut(direction, index)
            .ok_or_else(|| TallyError::row_not_found(format!("{} #{}", direction, index + 1)))?;

        LearningFeedback::new(&mut self.store).recategorize(transaction, category)
    }

    /// Apply an edited category column to one side of the statement
    pub fn apply_edits(
        &mut self,
        direction: Direction,
        categories: &[String],
    ) -> TallyResult<EditReport> {
        let rows = self.batch.side_mut(direction);
        let report = LearningFeedback::new(&mut self.store).apply_edits(rows, categories)?;
        info!(
            side = %direction,
            changed = report.changed,
            keywords_added = report.keywords_added,
            "Applied category edits"
        );
        Ok(report)
    }

    pub fn add_category(&mut self, name: &str) -> TallyResult<RuleChange> {
        self.store.add_category(name)
    }

    /// Classify the current statement again with the current rules
    pub fn reclassify(&mut self) {
        Classifier::new(self.store.rules()).classify_batch(&mut self.batch);
    }

    pub fn render(&self) -> Dashboard {
        Dashboard::render(self.store.rules(), &self.batch)
    }
}

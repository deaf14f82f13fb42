//! Learning from manual corrections
//!
//! When the user moves a transaction to another category, its raw details
//! become a keyword of the new category so future statements with the same
//! description land there automatically. Nothing is ever unlearned.

use tracing::info;

use crate::error::{TallyError, TallyResult};
use crate::models::{RuleChange, Transaction};
use crate::storage::RuleStorage;

use super::rules::RuleStore;

/// Summary of an "apply changes" pass over edited rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditReport {
    /// Rows whose category changed
    pub changed: usize,
    /// Keywords that were new to their category
    pub keywords_added: usize,
}

/// Turns category corrections into new keyword rules
pub struct LearningFeedback<'a, S: RuleStorage> {
    store: &'a mut RuleStore<S>,
}

impl<'a, S: RuleStorage> LearningFeedback<'a, S> {
    pub fn new(store: &'a mut RuleStore<S>) -> Self {
        Self { store }
    }

    /// Learn from a transaction that moved from `old_category` to `new_category`
    ///
    /// Returns `None` when the category did not change; nothing is written
    /// in that case.
    pub fn learn(
        &mut self,
        details: &str,
        old_category: &str,
        new_category: &str,
    ) -> TallyResult<Option<RuleChange>> {
        let new_category = new_category.trim();
        if old_category == new_category {
            return Ok(None);
        }

        let change = self.store.add_keyword(new_category, details)?;
        if change.is_added() {
            info!(
                from = old_category,
                to = new_category,
                keyword = details.trim(),
                "Learned keyword from correction"
            );
        }
        Ok(Some(change))
    }

    /// Move a transaction to `new_category` and learn from it
    ///
    /// # Errors
    ///
    /// `NotFound` if the category does not exist (the transaction is left
    /// untouched). A `Storage` error means the transaction and the in-memory
    /// rules were updated but the rules were not saved.
    pub fn recategorize(
        &mut self,
        transaction: &mut Transaction,
        new_category: &str,
    ) -> TallyResult<Option<RuleChange>> {
        let new_category = new_category.trim();
        if !self.store.rules().contains(new_category) {
            return Err(TallyError::category_not_found(new_category));
        }
        if transaction.category == new_category {
            return Ok(None);
        }

        let old_category = std::mem::replace(&mut transaction.category, new_category.to_string());
        self.learn(&transaction.details, &old_category, new_category)
    }

    /// Apply a full column of edited categories to `transactions`
    ///
    /// `edited[i]` is the category the user chose for `transactions[i]`.
    /// Rows left unchanged are skipped. Every target category is checked
    /// before anything is applied.
    pub fn apply_edits(
        &mut self,
        transactions: &mut [Transaction],
        edited: &[String],
    ) -> TallyResult<EditReport> {
        if transactions.len() != edited.len() {
            return Err(TallyError::Validation(format!(
                "Expected {} edited categories, got {}",
                transactions.len(),
                edited.len()
            )));
        }

        if let Some(unknown) = edited.iter().find(|c| !self.store.rules().contains(c)) {
            return Err(TallyError::category_not_found(unknown.as_str()));
        }

        let mut report = EditReport::default();
        for (transaction, category) in transactions.iter_mut().zip(edited) {
            if let Some(change) = self.recategorize(transaction, category)? {
                report.changed += 1;
                if change.is_added() {
                    report.keywords_added += 1;
                }
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryRules, Direction, Money, UNCATEGORIZED};
    use crate::services::classifier::classify;
    use crate::storage::MemoryRuleStorage;
    use chrono::NaiveDate;

    fn txn(details: &str) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            details,
            Money::from_cents(-999),
            Direction::Debit,
        )
    }

    #[test]
    fn test_learning_round_trip() {
        let storage = MemoryRuleStorage::new();
        let mut store = RuleStore::open(storage.clone());
        store.add_category("Subscriptions").unwrap();

        let mut spotify = txn("Spotify");
        let change = LearningFeedback::new(&mut store)
            .recategorize(&mut spotify, "Subscriptions")
            .unwrap();

        assert_eq!(change, Some(RuleChange::Added));
        assert_eq!(spotify.category, "Subscriptions");
        assert_eq!(
            storage.snapshot().unwrap().keywords("Subscriptions").unwrap(),
            &["Spotify".to_string()]
        );

        let mut next_month = vec![txn("SPOTIFY"), txn("Netflix")];
        classify(&mut next_month, store.rules());
        assert_eq!(next_month[0].category, "Subscriptions");
        assert_eq!(next_month[1].category, UNCATEGORIZED);
    }

    #[test]
    fn test_same_category_writes_nothing() {
        let storage = MemoryRuleStorage::with_rules(CategoryRules::new());
        let mut store = RuleStore::open(storage.clone());

        let result = LearningFeedback::new(&mut store)
            .learn("Spotify", UNCATEGORIZED, UNCATEGORIZED)
            .unwrap();
        assert_eq!(result, None);
        assert_eq!(storage.save_count(), 0);
    }

    #[test]
    fn test_raw_details_are_stored_trimmed() {
        let mut store = RuleStore::open(MemoryRuleStorage::new());
        store.add_category("Transport").unwrap();

        let mut ride = txn("  Bolt.eu/O/2401 ");
        LearningFeedback::new(&mut store)
            .recategorize(&mut ride, "Transport")
            .unwrap();

        assert_eq!(
            store.rules().keywords("Transport").unwrap(),
            &["Bolt.eu/O/2401".to_string()]
        );
    }

    #[test]
    fn test_unknown_category_leaves_transaction_alone() {
        let mut store = RuleStore::open(MemoryRuleStorage::new());
        let mut spotify = txn("Spotify");

        let err = LearningFeedback::new(&mut store)
            .recategorize(&mut spotify, "Subscriptions")
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(spotify.category, UNCATEGORIZED);
    }

    #[test]
    fn test_apply_edits_only_changed_rows() {
        let storage = MemoryRuleStorage::new();
        let mut store = RuleStore::open(storage.clone());
        store.add_category("Food").unwrap();
        store.add_category("Fun").unwrap();

        let mut rows = vec![txn("Tesco"), txn("Cinema City"), txn("Tesco")];
        let edited = vec![
            "Food".to_string(),
            UNCATEGORIZED.to_string(),
            "Food".to_string(),
        ];

        let report = LearningFeedback::new(&mut store)
            .apply_edits(&mut rows, &edited)
            .unwrap();

        assert_eq!(report.changed, 2);
        // Second "Tesco" row hits the dedup rule
        assert_eq!(report.keywords_added, 1);
        assert_eq!(rows[1].category, UNCATEGORIZED);
        assert_eq!(store.rules().keywords("Fun").unwrap().len(), 0);
    }

    #[test]
    fn test_apply_edits_validates_first() {
        let mut store = RuleStore::open(MemoryRuleStorage::new());
        store.add_category("Food").unwrap();

        let mut rows = vec![txn("Tesco"), txn("Cinema City")];
        let edited = vec!["Food".to_string(), "Fun".to_string()];

        let err = LearningFeedback::new(&mut store)
            .apply_edits(&mut rows, &edited)
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(rows[0].category, UNCATEGORIZED);
        assert!(store.rules().keywords("Food").unwrap().is_empty());

        let short = LearningFeedback::new(&mut store).apply_edits(&mut rows, &edited[..1]);
        assert!(matches!(short, Err(TallyError::Validation(_))));
    }
}

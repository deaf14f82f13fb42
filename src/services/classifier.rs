//! Keyword classifier
//!
//! Assigns each transaction the category whose keyword list contains its
//! details, compared after trimming and lowercasing. Matching is whole-string
//! equality only.
//!
//! When several categories list the same keyword, the one that comes **last**
//! in rule order wins: categories are visited in order and every match
//! overwrites the previous assignment. Existing rule files depend on this, so
//! keep it even though first-match would be the more obvious rule.

use std::collections::HashSet;

use tracing::debug;

use crate::models::{normalize, CategoryRules, ClassifiedBatch, Transaction, UNCATEGORIZED};

/// Applies a set of category rules to transactions
pub struct Classifier<'a> {
    rules: &'a CategoryRules,
}

impl<'a> Classifier<'a> {
    pub fn new(rules: &'a CategoryRules) -> Self {
        Self { rules }
    }

    /// Overwrite the category of every transaction
    pub fn classify(&self, transactions: &mut [Transaction]) {
        let mut targets: Vec<&mut Transaction> = transactions.iter_mut().collect();
        self.assign(&mut targets);
    }

    /// Classify both sides of a batch
    pub fn classify_batch(&self, batch: &mut ClassifiedBatch) {
        let mut targets: Vec<&mut Transaction> = batch.iter_mut().collect();
        self.assign(&mut targets);
    }

    /// Category a description would be assigned
    pub fn category_for(&self, details: &str) -> &'a str {
        let details = normalize(details);
        let rules: &'a CategoryRules = self.rules;
        rules
            .iter()
            .filter(|(name, _)| *name != UNCATEGORIZED)
            .filter(|(_, keywords)| keywords.iter().any(|k| normalize(k) == details))
            .last()
            .map(|(name, _)| name)
            .unwrap_or(UNCATEGORIZED)
    }

    fn assign(&self, targets: &mut [&mut Transaction]) {
        let normalized: Vec<String> = targets.iter().map(|t| normalize(&t.details)).collect();

        for txn in targets.iter_mut() {
            txn.category = UNCATEGORIZED.to_string();
        }

        for (category, keywords) in self.rules.iter() {
            if category == UNCATEGORIZED || keywords.is_empty() {
                continue;
            }

            let keyword_set: HashSet<String> = keywords.iter().map(|k| normalize(k)).collect();

            for (txn, details) in targets.iter_mut().zip(&normalized) {
                if keyword_set.contains(details) {
                    txn.category = category.to_string();
                }
            }
        }

        debug!(
            transactions = targets.len(),
            uncategorized = targets.iter().filter(|t| t.is_uncategorized()).count(),
            "Classified transactions"
        );
    }
}

/// Classify transactions in place with `rules`
pub fn classify(transactions: &mut [Transaction], rules: &CategoryRules) {
    Classifier::new(rules).classify(transactions);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Direction, Money};
    use chrono::NaiveDate;

    fn txn(details: &str, cents: i64, direction: Direction) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            details,
            Money::from_cents(cents),
            direction,
        )
    }

    fn rules(entries: &[(&str, &[&str])]) -> CategoryRules {
        let mut rules = CategoryRules::new();
        for (name, keywords) in entries {
            rules.insert_category(name);
            for keyword in *keywords {
                rules.insert_keyword(name, keyword);
            }
        }
        rules
    }

    #[test]
    fn test_exact_match_after_normalizing() {
        let rules = rules(&[("Groceries", &["tesco"])]);
        let mut txns = vec![
            txn("Tesco", -4250, Direction::Debit),
            txn("  TESCO  ", -100, Direction::Debit),
            txn("Tesco Express", -300, Direction::Debit),
        ];

        classify(&mut txns, &rules);

        assert_eq!(txns[0].category, "Groceries");
        assert_eq!(txns[1].category, "Groceries");
        // No substring matching
        assert_eq!(txns[2].category, UNCATEGORIZED);
    }

    #[test]
    fn test_unmatched_stays_uncategorized() {
        let rules = rules(&[("Groceries", &["tesco"]), ("Empty", &[])]);
        let mut txns = vec![txn("Landlord", -90000, Direction::Debit)];
        txns[0].category = "Groceries".to_string();

        classify(&mut txns, &rules);
        assert_eq!(txns[0].category, UNCATEGORIZED);
    }

    #[test]
    fn test_last_matching_category_wins() {
        let rules = rules(&[
            ("Cafes", &["coffee shop"]),
            ("Groceries", &["tesco"]),
            ("Treats", &["Coffee Shop "]),
        ]);
        let mut txns = vec![txn("Coffee Shop", -350, Direction::Debit)];

        classify(&mut txns, &rules);
        assert_eq!(txns[0].category, "Treats");

        let classifier = Classifier::new(&rules);
        assert_eq!(classifier.category_for("coffee shop"), "Treats");
        assert_eq!(classifier.category_for("tesco"), "Groceries");
        assert_eq!(classifier.category_for("lidl"), UNCATEGORIZED);
    }

    #[test]
    fn test_uncategorized_keywords_are_ignored() {
        let mut rules = rules(&[("Bills", &["eon"])]);
        rules.insert_keyword(UNCATEGORIZED, "eon");

        let mut txns = vec![txn("EON", -5000, Direction::Debit)];
        classify(&mut txns, &rules);
        assert_eq!(txns[0].category, "Bills");
    }

    #[test]
    fn test_idempotent() {
        let rules = rules(&[("Groceries", &["tesco"]), ("Fun", &["cinema", "tesco"])]);
        let mut txns = vec![
            txn("Tesco", -4250, Direction::Debit),
            txn("Cinema", -1200, Direction::Debit),
            txn("Unknown", -100, Direction::Debit),
        ];

        classify(&mut txns, &rules);
        let first = txns.clone();
        classify(&mut txns, &rules);
        assert_eq!(txns, first);
    }

    #[test]
    fn test_every_category_is_known() {
        let rules = rules(&[("Groceries", &["tesco"]), ("Income", &["employer inc"])]);
        let mut batch = ClassifiedBatch::from_transactions(vec![
            txn("Tesco", -4250, Direction::Debit),
            txn("Employer Inc", 200000, Direction::Credit),
            txn("Mystery", -1, Direction::Debit),
        ]);

        Classifier::new(&rules).classify_batch(&mut batch);

        for t in batch.iter() {
            assert!(rules.contains(&t.category), "{} not in rules", t.category);
        }
        assert_eq!(batch.credits[0].category, "Income");
    }
}

//! Spending Report
//!
//! Per-category totals over the debits of a statement and the total of its
//! credits. Everything here is a pure reduction over the classified rows and
//! must be recomputed whenever the rows or their categories change.

use std::collections::BTreeMap;
use std::io::Write;

use crate::error::{TallyError, TallyResult};
use crate::models::{ClassifiedBatch, Money, Transaction};

/// Spending in one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    /// Category name
    pub category: String,
    /// Sum of the signed debit amounts
    pub total: Money,
    /// Number of transactions
    pub transaction_count: usize,
    /// Percentage of total spending (by magnitude)
    pub share: f64,
}

/// Sum debit amounts per category, largest total first
///
/// Categories are grouped in name order and then stably sorted by total,
/// so equal totals stay in name order.
pub fn category_totals(debits: &[Transaction]) -> Vec<CategoryTotal> {
    let mut grouped: BTreeMap<&str, (Money, usize)> = BTreeMap::new();
    for txn in debits {
        let entry = grouped.entry(txn.category.as_str()).or_default();
        entry.0 += txn.amount;
        entry.1 += 1;
    }

    let magnitude: i64 = grouped.values().map(|(total, _)| total.cents().abs()).sum();

    let mut totals: Vec<CategoryTotal> = grouped
        .into_iter()
        .map(|(category, (total, transaction_count))| CategoryTotal {
            category: category.to_string(),
            total,
            transaction_count,
            share: if magnitude == 0 {
                0.0
            } else {
                total.cents().abs() as f64 / magnitude as f64 * 100.0
            },
        })
        .collect();

    totals.sort_by(|a, b| b.total.cmp(&a.total));
    totals
}

/// Sum of all credit amounts
pub fn total_payments(credits: &[Transaction]) -> Money {
    credits.iter().map(|t| t.amount).sum()
}

/// Spending summary for one statement
#[derive(Debug, Clone, PartialEq)]
pub struct SpendingSummary {
    /// Debit totals per category, largest total first
    pub categories: Vec<CategoryTotal>,
    /// Sum of all debit amounts
    pub total_spending: Money,
    /// Sum of all credit amounts
    pub total_payments: Money,
    pub debit_count: usize,
    pub credit_count: usize,
}

impl SpendingSummary {
    /// Summarize a classified batch
    pub fn generate(batch: &ClassifiedBatch) -> Self {
        Self {
            categories: category_totals(&batch.debits),
            total_spending: batch.debits.iter().map(|t| t.amount).sum(),
            total_payments: total_payments(&batch.credits),
            debit_count: batch.debits.len(),
            credit_count: batch.credits.len(),
        }
    }

    /// The `n` categories with the largest totals
    pub fn top_categories(&self, n: usize) -> &[CategoryTotal] {
        &self.categories[..n.min(self.categories.len())]
    }

    /// Totals for a single category
    pub fn category(&self, name: &str) -> Option<&CategoryTotal> {
        self.categories.iter().find(|c| c.category == name)
    }

    /// Export per-category totals to CSV
    pub fn export_csv<W: Write>(&self, writer: W) -> TallyResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        let export_err = |e: csv::Error| TallyError::Export(e.to_string());

        csv.write_record(["Category", "Amount", "Transactions", "Share"])
            .map_err(export_err)?;

        for total in &self.categories {
            csv.write_record([
                total.category.clone(),
                total.total.to_string(),
                total.transaction_count.to_string(),
                format!("{:.2}", total.share),
            ])
            .map_err(export_err)?;
        }

        csv.flush().map_err(|e| TallyError::Export(e.to_string()))
    }
}

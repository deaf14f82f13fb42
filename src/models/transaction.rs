//! Transaction model
//!
//! A single statement row and the batch of rows from one uploaded statement,
//! split into debits and credits.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::category::UNCATEGORIZED;
use super::money::Money;

/// Whether money left or entered the account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Debit,
    Credit,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debit => write!(f, "Debit"),
            Self::Credit => write!(f, "Credit"),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Debit" => Ok(Self::Debit),
            "Credit" => Ok(Self::Credit),
            other => Err(format!(
                "Unknown direction '{}' (expected 'Debit' or 'Credit')",
                other
            )),
        }
    }
}

/// A statement transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,

    /// Free-text description as printed on the statement
    pub details: String,

    pub amount: Money,

    pub direction: Direction,

    /// Exactly one category, "Uncategorized" until classified
    pub category: String,
}

impl Transaction {
    /// Create an uncategorized transaction
    pub fn new(
        date: NaiveDate,
        details: impl Into<String>,
        amount: Money,
        direction: Direction,
    ) -> Self {
        Self {
            date,
            details: details.into(),
            amount,
            direction,
            category: UNCATEGORIZED.to_string(),
        }
    }

    pub fn is_debit(&self) -> bool {
        self.direction == Direction::Debit
    }

    pub fn is_uncategorized(&self) -> bool {
        self.category == UNCATEGORIZED
    }
}

/// All transactions of one statement, partitioned by direction
///
/// Row order within each side follows the statement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedBatch {
    pub debits: Vec<Transaction>,
    pub credits: Vec<Transaction>,
}

impl ClassifiedBatch {
    /// Partition transactions by direction, keeping their current categories
    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        let (debits, credits) = transactions.into_iter().partition(Transaction::is_debit);
        Self { debits, credits }
    }

    pub fn side(&self, direction: Direction) -> &[Transaction] {
        match direction {
            Direction::Debit => &self.debits,
            Direction::Credit => &self.credits,
        }
    }

    pub fn side_mut(&mut self, direction: Direction) -> &mut [Transaction] {
        match direction {
            Direction::Debit => &mut self.debits,
            Direction::Credit => &mut self.credits,
        }
    }

    pub fn get(&self, direction: Direction, index: usize) -> Option<&Transaction> {
        self.side(direction).get(index)
    }

    pub fn get_mut(&mut self, direction: Direction, index: usize) -> Option<&mut Transaction> {
        self.side_mut(direction).get_mut(index)
    }

    /// Iterate debits then credits
    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.debits.iter().chain(self.credits.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Transaction> {
        self.debits.iter_mut().chain(self.credits.iter_mut())
    }

    pub fn len(&self) -> usize {
        self.debits.len() + self.credits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.debits.is_empty() && self.credits.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    #[test]
    fn test_new_transaction_is_uncategorized() {
        let txn = Transaction::new(date(), "Tesco", Money::from_cents(-4250), Direction::Debit);
        assert!(txn.is_uncategorized());
        assert!(txn.is_debit());
    }

    #[test]
    fn test_direction_parse() {
        assert_eq!("Debit".parse::<Direction>().unwrap(), Direction::Debit);
        assert_eq!(" Credit ".parse::<Direction>().unwrap(), Direction::Credit);
        assert!("debit".parse::<Direction>().is_err());
        assert!("Refund".parse::<Direction>().is_err());
    }

    #[test]
    fn test_batch_partition_keeps_order() {
        let batch = ClassifiedBatch::from_transactions(vec![
            Transaction::new(date(), "A", Money::from_cents(-100), Direction::Debit),
            Transaction::new(date(), "Salary", Money::from_cents(5000), Direction::Credit),
            Transaction::new(date(), "B", Money::from_cents(-200), Direction::Debit),
        ]);

        assert_eq!(batch.len(), 3);
        assert_eq!(batch.debits.len(), 2);
        assert_eq!(batch.debits[0].details, "A");
        assert_eq!(batch.debits[1].details, "B");
        assert_eq!(batch.get(Direction::Credit, 0).unwrap().details, "Salary");
        assert!(batch.get(Direction::Credit, 1).is_none());
    }
}

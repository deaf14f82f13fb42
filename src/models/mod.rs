//! Core data models for Tally
//!
//! Statement transactions, the amounts they carry, and the category rules
//! used to classify them.

pub mod category;
pub mod money;
pub mod transaction;

pub use category::{normalize, CategoryRules, RuleChange, UNCATEGORIZED};
pub use money::{Money, MoneyParseError};
pub use transaction::{ClassifiedBatch, Direction, Transaction};

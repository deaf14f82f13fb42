//! Reports module for Tally
//!
//! Spending analysis over a classified statement.

pub mod spending;

pub use spending::{category_totals, total_payments, CategoryTotal, SpendingSummary};

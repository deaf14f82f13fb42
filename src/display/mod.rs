//! Display formatting for terminal output
//!
//! Tables and trees for statements, spending summaries and category rules.

pub mod category;
pub mod report;
pub mod transaction;

pub use category::format_category_tree;
pub use report::{format_spending_summary, format_total_payments};
pub use transaction::format_transaction_register;

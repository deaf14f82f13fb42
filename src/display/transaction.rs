//! Transaction display formatting
//!
//! Statement rows as a register table. Row numbers are 1-based so they can
//! be passed straight back to `statement assign --row`.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::config::settings::{format_date, Settings};
use crate::models::Transaction;

/// Used when the configured display format cannot render a date
const FALLBACK_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Tabled)]
struct RegisterRow {
    #[tabled(rename = "#")]
    row: usize,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Details")]
    details: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Category")]
    category: String,
}

/// Format statement rows as a register
pub fn format_transaction_register(transactions: &[Transaction], settings: &Settings) -> String {
    if transactions.is_empty() {
        return "No transactions.\n".to_string();
    }

    let rows = transactions.iter().enumerate().map(|(i, txn)| RegisterRow {
        row: i + 1,
        date: format_date(txn.date, &settings.display_date_format)
            .unwrap_or_else(|| txn.date.format(FALLBACK_DATE_FORMAT).to_string()),
        details: truncate(&txn.details, 40),
        amount: txn.amount.format_with_label(&settings.currency_label),
        category: txn.category.clone(),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .modify(Columns::single(0), Alignment::right())
        .modify(Columns::single(3), Alignment::right());

    format!("{}\n", table)
}

/// Truncate a string to a maximum number of characters
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

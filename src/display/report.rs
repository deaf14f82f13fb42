//! Report formatting for terminal output
//!
//! The expense summary table (with a bar per category standing in for a pie
//! chart) and the total payments line.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::config::Settings;
use crate::reports::SpendingSummary;

const BAR_WIDTH: usize = 20;

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "Share")]
    share: String,
    #[tabled(rename = "")]
    bar: String,
}

/// Format the per-category expense summary
pub fn format_spending_summary(summary: &SpendingSummary, settings: &Settings) -> String {
    let mut output = String::from("Expenses Summary\n");

    if summary.categories.is_empty() {
        output.push_str("No expenses.\n");
        return output;
    }

    let max_share = summary
        .categories
        .iter()
        .map(|c| c.share)
        .fold(0.0_f64, f64::max);

    let rows = summary.categories.iter().map(|c| SummaryRow {
        category: c.category.clone(),
        amount: c.total.format_with_label(&settings.currency_label),
        count: c.transaction_count,
        share: format_percentage(c.share),
        bar: format_bar(c.share, max_share, BAR_WIDTH),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .modify(Columns::new(1..4), Alignment::right());

    output.push_str(&format!("{}\n", table));
    output.push_str(&format!(
        "Total spending: {}\n",
        summary.total_spending.format_with_label(&settings.currency_label)
    ));
    output
}

/// Format the total of all credits
pub fn format_total_payments(summary: &SpendingSummary, settings: &Settings) -> String {
    format!(
        "Total Payments: {}\n",
        summary.total_payments.format_with_label(&settings.currency_label)
    )
}

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

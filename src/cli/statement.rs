//! Statement CLI commands
//!
//! Classify a statement CSV against the saved rules, correct a row's
//! category, and summarize spending.

use std::fs::File;
use std::path::{Path, PathBuf};

use clap::Subcommand;

use crate::config::paths::TallyPaths;
use crate::config::settings::Settings;
use crate::display::{
    format_spending_summary, format_total_payments, format_transaction_register,
};
use crate::error::{TallyError, TallyResult};
use crate::models::{Direction, RuleChange};
use crate::services::{Session, StatementImport};
use crate::storage::JsonRuleFile;

use super::open_rule_store;

/// Statement subcommands
#[derive(Subcommand)]
pub enum StatementCommands {
    /// Classify a statement and show expenses, payments and totals
    Show {
        /// Path to the statement CSV
        file: PathBuf,
    },

    /// Move a row to another category and remember its details as a keyword
    Assign {
        /// Path to the statement CSV
        file: PathBuf,
        /// Row number as shown by `statement show`
        #[arg(short, long)]
        row: usize,
        /// Target category
        #[arg(short, long)]
        category: String,
        /// Pick the row from payments instead of expenses
        #[arg(long)]
        credit: bool,
        /// Create the category if it does not exist
        #[arg(long)]
        create: bool,
    },

    /// Show per-category expense totals
    Summary {
        /// Path to the statement CSV
        file: PathBuf,
        /// Write the totals to a CSV file instead
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle a statement command
pub fn handle_statement_command(
    paths: &TallyPaths,
    settings: &Settings,
    cmd: StatementCommands,
) -> TallyResult<()> {
    let importer = StatementImport::from_settings(settings);

    match cmd {
        StatementCommands::Show { file } => {
            let session = load_session(paths, &importer, &file)?;
            let dashboard = session.render();

            println!("Expenses (Debits)");
            print!("{}", format_transaction_register(&dashboard.debits, settings));
            println!();
            print!("{}", format_spending_summary(&dashboard.summary, settings));
            println!();
            println!("Payments (Credits)");
            print!("{}", format_transaction_register(&dashboard.credits, settings));
            print!("{}", format_total_payments(&dashboard.summary, settings));
        }

        StatementCommands::Assign {
            file,
            row,
            category,
            credit,
            create,
        } => {
            let category = category.trim();
            let mut session = load_session(paths, &importer, &file)?;
            let direction = if credit {
                Direction::Credit
            } else {
                Direction::Debit
            };

            if row == 0 {
                return Err(TallyError::Validation("Row numbers start at 1".to_string()));
            }
            if create && session.add_category(category)?.is_added() {
                println!("Created category: {}", category);
            }

            let details = session
                .batch()
                .get(direction, row - 1)
                .map(|t| (t.details.clone(), t.category.clone()));

            match session.recategorize(direction, row - 1, category)? {
                None => println!("Row {} is already in {}", row, category),
                Some(change) => {
                    if let Some((details, previous)) = details {
                        println!(
                            "Moved '{}' from {} to {}",
                            details.trim(),
                            previous,
                            category
                        );
                        if change == RuleChange::Added {
                            println!("Learned keyword '{}' for {}", details.trim(), category);
                        }
                    }
                }
            }

            let dashboard = session.render();
            println!();
            print!("{}", format_spending_summary(&dashboard.summary, settings));
            print!("{}", format_total_payments(&dashboard.summary, settings));
        }

        StatementCommands::Summary { file, output } => {
            let session = load_session(paths, &importer, &file)?;
            let dashboard = session.render();

            match output {
                Some(path) => {
                    let out = File::create(&path).map_err(|e| {
                        TallyError::Export(format!("Failed to create {}: {}", path.display(), e))
                    })?;
                    dashboard.summary.export_csv(out)?;
                    println!(
                        "Exported {} categories to {}",
                        dashboard.summary.categories.len(),
                        path.display()
                    );
                }
                None => {
                    print!("{}", format_spending_summary(&dashboard.summary, settings));
                    print!("{}", format_total_payments(&dashboard.summary, settings));
                }
            }
        }
    }

    Ok(())
}

fn load_session(
    paths: &TallyPaths,
    importer: &StatementImport,
    file: &Path,
) -> TallyResult<Session<JsonRuleFile>> {
    let transactions = importer.parse_file(file)?;
    let mut session = Session::new(open_rule_store(paths));
    session.upload(transactions);
    Ok(session)
}

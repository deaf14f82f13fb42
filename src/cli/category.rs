//! Category CLI commands
//!
//! Implements CLI commands for listing categories and managing their keywords.

use clap::Subcommand;

use crate::config::paths::TallyPaths;
use crate::display::category::format_category_tree;
use crate::error::TallyResult;
use crate::models::RuleChange;

use super::open_rule_store;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List all categories with their keywords
    List,

    /// Create a new (empty) category
    Add {
        /// Category name
        name: String,
    },

    /// Add a keyword to a category
    Keyword {
        /// Category name
        category: String,
        /// Transaction details to match (case-insensitive, exact)
        keyword: String,
    },
}

/// Handle a category command
pub fn handle_category_command(paths: &TallyPaths, cmd: CategoryCommands) -> TallyResult<()> {
    let mut store = open_rule_store(paths);

    match cmd {
        CategoryCommands::List => {
            print!("{}", format_category_tree(store.rules()));
        }

        CategoryCommands::Add { name } => match store.add_category(&name)? {
            RuleChange::Added => println!("Created category: {}", name.trim()),
            RuleChange::AlreadyExists => println!("Category already exists: {}", name.trim()),
            RuleChange::Blank => println!("Category name is empty, nothing to do."),
        },

        CategoryCommands::Keyword { category, keyword } => {
            match store.add_keyword(&category, &keyword)? {
                RuleChange::Added => {
                    println!("Added keyword '{}' to {}", keyword.trim(), category)
                }
                RuleChange::AlreadyExists => {
                    println!("{} already has keyword '{}'", category, keyword.trim())
                }
                RuleChange::Blank => println!("Keyword is empty, nothing to do."),
            }
        }
    }

    Ok(())
}

//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod category;
pub mod statement;

pub use category::{handle_category_command, CategoryCommands};
pub use statement::{handle_statement_command, StatementCommands};

use crate::config::paths::TallyPaths;
use crate::services::RuleStore;
use crate::storage::{rule_file, JsonRuleFile};

/// Open the configured rule store, reporting an unreadable rules file
pub fn open_rule_store(paths: &TallyPaths) -> RuleStore<JsonRuleFile> {
    let store = RuleStore::open(rule_file(paths));
    if let Some(warning) = store.load_warning() {
        eprintln!(
            "Warning: ignoring unreadable rules file {} ({}). Using default categories; \
             the file is moved aside on the next change.",
            paths.rules_file().display(),
            warning
        );
    }
    store
}

//! Storage layer for Tally
//!
//! JSON file storage with atomic writes. The category rules are the only
//! state that outlives a run.

pub mod file_io;
pub mod init;
pub mod rules;

pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use rules::{JsonRuleFile, MemoryRuleStorage, RuleStorage};

use crate::config::paths::TallyPaths;

/// Rule storage backed by the configured rules file
pub fn rule_file(paths: &TallyPaths) -> JsonRuleFile {
    JsonRuleFile::new(paths.rules_file())
}

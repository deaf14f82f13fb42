//! Storage initialization
//!
//! First-run setup: the base directory and a default rule file.

use crate::config::paths::TallyPaths;
use crate::error::TallyError;
use crate::models::CategoryRules;

use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation
///
/// Writes `{"Uncategorized": []}` unless a rule file already exists.
/// Returns `true` when a new rule file was created.
pub fn initialize_storage(paths: &TallyPaths) -> Result<bool, TallyError> {
    paths.ensure_directories()?;

    if !needs_initialization(paths) {
        return Ok(false);
    }

    write_json_atomic(paths.rules_file(), &CategoryRules::default())?;
    Ok(true)
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &TallyPaths) -> bool {
    !paths.rules_file().exists()
}

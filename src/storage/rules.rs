//! Persistence for category rules
//!
//! `RuleStorage` is the seam between the rule store and wherever the mapping
//! lives. `JsonRuleFile` is the on-disk form (`categories.json`);
//! `MemoryRuleStorage` keeps the mapping in memory and can be told to fail
//! writes.

use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::Rc;

use crate::error::{TallyError, TallyResult};
use crate::models::CategoryRules;

use super::file_io::{read_json, set_aside, write_json_atomic};

/// Durable home of the category rules
pub trait RuleStorage {
    /// Read the persisted rules; `Ok(None)` when nothing has been saved yet
    fn load(&self) -> TallyResult<Option<CategoryRules>>;

    /// Replace the persisted rules with `rules`
    fn save(&self, rules: &CategoryRules) -> TallyResult<()>;

    /// Human-readable location, used in log lines
    fn location(&self) -> String;

    /// Keep unreadable persisted rules from being overwritten by the next
    /// save. Returns where they were moved, if anywhere.
    fn set_aside_unreadable(&self) -> TallyResult<Option<String>> {
        Ok(None)
    }
}

/// Rules stored as a JSON object in a single file
#[derive(Debug, Clone)]
pub struct JsonRuleFile {
    path: PathBuf,
}

impl JsonRuleFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl RuleStorage for JsonRuleFile {
    fn load(&self) -> TallyResult<Option<CategoryRules>> {
        read_json(&self.path)
    }

    fn save(&self, rules: &CategoryRules) -> TallyResult<()> {
        write_json_atomic(&self.path, rules)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn set_aside_unreadable(&self) -> TallyResult<Option<String>> {
        Ok(set_aside(&self.path)?.map(|p| p.display().to_string()))
    }
}

/// In-memory rule storage
///
/// Clones share the same contents, so a test can keep a handle after moving
/// one into a `RuleStore`.
#[derive(Debug, Clone, Default)]
pub struct MemoryRuleStorage {
    saved: Rc<RefCell<Option<CategoryRules>>>,
    fail_writes: Rc<Cell<bool>>,
    save_count: Rc<Cell<usize>>,
}

impl MemoryRuleStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that already holds `rules`
    pub fn with_rules(rules: CategoryRules) -> Self {
        let storage = Self::default();
        *storage.saved.borrow_mut() = Some(rules);
        storage
    }

    /// Make subsequent saves fail (or succeed again)
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Currently persisted rules
    pub fn snapshot(&self) -> Option<CategoryRules> {
        self.saved.borrow().clone()
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.save_count.get()
    }
}

impl RuleStorage for MemoryRuleStorage {
    fn load(&self) -> TallyResult<Option<CategoryRules>> {
        Ok(self.snapshot())
    }

    fn save(&self, rules: &CategoryRules) -> TallyResult<()> {
        if self.fail_writes.get() {
            return Err(TallyError::Storage("write rejected by memory storage".into()));
        }
        *self.saved.borrow_mut() = Some(rules.clone());
        self.save_count.set(self.save_count.get() + 1);
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

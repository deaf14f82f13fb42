//! Rule store service
//!
//! Owns the category rules for a session and writes them through to storage
//! after every successful mutation. Loading never fails: unreadable or corrupt
//! storage falls back to the default rules and the problem is kept as a
//! warning for the caller to surface. The unreadable rules are moved aside
//! before the first save so they can still be recovered by hand.
//!
//! There is no locking. Two processes writing the same rule file will race
//! and the last writer wins.

use tracing::{debug, info, warn};

use crate::error::{TallyError, TallyResult};
use crate::models::{CategoryRules, RuleChange};
use crate::storage::RuleStorage;

/// Category rules plus the storage they persist to
#[derive(Debug)]
pub struct RuleStore<S: RuleStorage> {
    storage: S,
    rules: CategoryRules,
    unsaved_changes: bool,
    load_warning: Option<String>,
    unreadable_on_disk: bool,
}

impl<S: RuleStorage> RuleStore<S> {
    /// Load rules from storage, falling back to defaults
    pub fn open(storage: S) -> Self {
        let (rules, load_warning) = match storage.load() {
            Ok(Some(rules)) => {
                info!(
                    location = %storage.location(),
                    categories = rules.len(),
                    keywords = rules.keyword_count(),
                    "Loaded category rules"
                );
                (rules, None)
            }
            Ok(None) => {
                debug!(location = %storage.location(), "No saved category rules, using defaults");
                (CategoryRules::default(), None)
            }
            Err(e) => {
                warn!(
                    location = %storage.location(),
                    error = %e,
                    "Could not read category rules, using defaults"
                );
                (CategoryRules::default(), Some(e.to_string()))
            }
        };

        Self {
            storage,
            rules,
            unsaved_changes: false,
            unreadable_on_disk: load_warning.is_some(),
            load_warning,
        }
    }

    pub fn rules(&self) -> &CategoryRules {
        &self.rules
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Why the persisted rules were ignored on open, if they were
    pub fn load_warning(&self) -> Option<&str> {
        self.load_warning.as_deref()
    }

    /// True when the last mutation could not be written to storage
    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved_changes
    }

    /// Add an empty category at the end of the store
    pub fn add_category(&mut self, name: &str) -> TallyResult<RuleChange> {
        let change = self.rules.insert_category(name);
        if change.is_added() {
            self.persist()?;
            info!(category = name.trim(), "Added category");
        }
        Ok(change)
    }

    /// Add a keyword to an existing category
    ///
    /// # Errors
    ///
    /// `NotFound` if the category does not exist, `Storage` if the updated
    /// rules could not be written. In the latter case the keyword is kept in
    /// memory and [`has_unsaved_changes`](Self::has_unsaved_changes) is set.
    pub fn add_keyword(&mut self, category: &str, keyword: &str) -> TallyResult<RuleChange> {
        let change = self
            .rules
            .insert_keyword(category, keyword)
            .ok_or_else(|| TallyError::category_not_found(category))?;

        if change.is_added() {
            self.persist()?;
            info!(category, keyword = keyword.trim(), "Added keyword");
        }
        Ok(change)
    }

    /// Write the current rules to storage
    pub fn save(&mut self) -> TallyResult<()> {
        self.persist()
    }

    fn persist(&mut self) -> TallyResult<()> {
        if self.unreadable_on_disk {
            match self.storage.set_aside_unreadable() {
                Ok(Some(backup)) => {
                    warn!(backup = %backup, "Moved unreadable category rules aside")
                }
                Ok(None) => {}
                Err(e) => {
                    self.unsaved_changes = true;
                    return Err(e);
                }
            }
            self.unreadable_on_disk = false;
        }

        match self.storage.save(&self.rules) {
            Ok(()) => {
                self.unsaved_changes = false;
                debug!(location = %self.storage.location(), "Saved category rules");
                Ok(())
            }
            Err(e) => {
                self.unsaved_changes = true;
                warn!(
                    location = %self.storage.location(),
                    error = %e,
                    "Category rules changed in memory but were not saved"
                );
                Err(e)
            }
        }
    }
}

//! Category rules model
//!
//! An ordered mapping from category name to the keyword strings that select
//! it. Order is significant: it is the order categories were loaded or added,
//! and classification resolves overlapping keywords by it.
//!
//! The persisted form is a plain JSON object, `{"Uncategorized": [], "Groceries": ["Tesco"]}`,
//! read and written in document order.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// The default bucket every transaction starts in
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Normalize a keyword or transaction description for comparison
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Outcome of a rule mutation that may be absorbed as a no-op
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleChange {
    /// The category or keyword was appended
    Added,
    /// The category or keyword was already present
    AlreadyExists,
    /// The input was empty after trimming
    Blank,
}

impl RuleChange {
    pub fn is_added(&self) -> bool {
        matches!(self, Self::Added)
    }
}

/// Ordered category → keywords mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRules {
    entries: Vec<(String, Vec<String>)>,
}

impl Default for CategoryRules {
    fn default() -> Self {
        Self {
            entries: vec![(UNCATEGORIZED.to_string(), Vec::new())],
        }
    }
}

impl CategoryRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Category names in store order
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Iterate categories with their keyword lists in store order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, keywords)| (name.as_str(), keywords.as_slice()))
    }

    pub fn contains(&self, category: &str) -> bool {
        self.position(category).is_some()
    }

    /// Keywords of a category, if it exists
    pub fn keywords(&self, category: &str) -> Option<&[String]> {
        self.position(category)
            .map(|idx| self.entries[idx].1.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of keywords across all categories
    pub fn keyword_count(&self) -> usize {
        self.entries.iter().map(|(_, keywords)| keywords.len()).sum()
    }

    /// Append a category (name trimmed) with no keywords
    pub fn insert_category(&mut self, name: &str) -> RuleChange {
        let name = name.trim();
        if name.is_empty() {
            return RuleChange::Blank;
        }
        if self.contains(name) {
            return RuleChange::AlreadyExists;
        }
        self.entries.push((name.to_string(), Vec::new()));
        RuleChange::Added
    }

    /// Append a trimmed keyword to an existing category
    ///
    /// Returns `None` when the category does not exist.
    pub fn insert_keyword(&mut self, category: &str, keyword: &str) -> Option<RuleChange> {
        let idx = self.position(category)?;
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Some(RuleChange::Blank);
        }

        let keywords = &mut self.entries[idx].1;
        if keywords.iter().any(|k| k == keyword) {
            return Some(RuleChange::AlreadyExists);
        }
        keywords.push(keyword.to_string());
        Some(RuleChange::Added)
    }

    fn position(&self, category: &str) -> Option<usize> {
        let category = category.trim();
        self.entries.iter().position(|(name, _)| name == category)
    }

    /// Merge an entry read from storage. Names are trimmed; a repeated name
    /// replaces the earlier list in place; repeated keywords keep their
    /// first occurrence.
    fn push_loaded(&mut self, name: String, keywords: Vec<String>) {
        let name = name.trim().to_string();
        let mut deduped: Vec<String> = Vec::with_capacity(keywords.len());
        for keyword in keywords {
            if !deduped.contains(&keyword) {
                deduped.push(keyword);
            }
        }

        match self.position(&name) {
            Some(idx) => self.entries[idx].1 = deduped,
            None => self.entries.push((name, deduped)),
        }
    }
}

impl Serialize for CategoryRules {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, keywords) in &self.entries {
            map.serialize_entry(name, keywords)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CategoryRules {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RulesVisitor;

        impl<'de> Visitor<'de> for RulesVisitor {
            type Value = CategoryRules;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping category names to keyword lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut rules = CategoryRules {
                    entries: Vec::with_capacity(access.size_hint().unwrap_or(1)),
                };
                while let Some((name, keywords)) = access.next_entry::<String, Vec<String>>()? {
                    rules.push_loaded(name, keywords);
                }
                // The default bucket is always present, even if the file lost it
                if !rules.contains(UNCATEGORIZED) {
                    rules.entries.insert(0, (UNCATEGORIZED.to_string(), Vec::new()));
                }
                Ok(rules)
            }
        }

        deserializer.deserialize_map(RulesVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_uncategorized() {
        let rules = CategoryRules::default();
        assert_eq!(rules.category_names().collect::<Vec<_>>(), vec![UNCATEGORIZED]);
        assert_eq!(rules.keywords(UNCATEGORIZED), Some(&[][..]));
    }

    #[test]
    fn test_insert_category_is_idempotent() {
        let mut rules = CategoryRules::new();
        assert_eq!(rules.insert_category("Groceries"), RuleChange::Added);
        assert_eq!(rules.insert_category("Groceries"), RuleChange::AlreadyExists);
        assert_eq!(rules.insert_category("   "), RuleChange::Blank);
        // Names are case-sensitive
        assert_eq!(rules.insert_category("groceries"), RuleChange::Added);
        assert_eq!(rules.len(), 3);
    }

    #[test]
    fn test_insert_keyword_trims_and_dedups() {
        let mut rules = CategoryRules::new();
        rules.insert_category("Transport");

        assert_eq!(rules.insert_keyword("Transport", "  Uber Trip "), Some(RuleChange::Added));
        assert_eq!(
            rules.insert_keyword("Transport", "Uber Trip"),
            Some(RuleChange::AlreadyExists)
        );
        assert_eq!(rules.insert_keyword("Transport", " \t"), Some(RuleChange::Blank));
        // Different casing is a different stored string
        assert_eq!(rules.insert_keyword("Transport", "UBER TRIP"), Some(RuleChange::Added));
        assert_eq!(
            rules.keywords("Transport").unwrap(),
            &["Uber Trip".to_string(), "UBER TRIP".to_string()]
        );
        assert_eq!(rules.insert_keyword("Missing", "x"), None);
    }

    #[test]
    fn test_lookup_ignores_surrounding_whitespace() {
        let mut rules = CategoryRules::new();
        assert_eq!(rules.insert_category(" Subscriptions "), RuleChange::Added);
        assert!(rules.contains("Subscriptions"));
        assert!(rules.contains(" Subscriptions"));
        assert_eq!(
            rules.insert_keyword(" Subscriptions ", "Spotify"),
            Some(RuleChange::Added)
        );
        assert_eq!(rules.keywords("Subscriptions").unwrap(), &["Spotify".to_string()]);

        let loaded: CategoryRules = serde_json::from_str(r#"{"Food ":["Tesco"]}"#).unwrap();
        assert_eq!(loaded.keywords("Food").unwrap(), &["Tesco".to_string()]);
    }

    #[test]
    fn test_json_preserves_order() {
        let json = r#"{"Uncategorized":[],"Zoo":["a"],"Bills":["EON","eon"],"Alpha":[]}"#;
        let rules: CategoryRules = serde_json::from_str(json).unwrap();
        assert_eq!(
            rules.category_names().collect::<Vec<_>>(),
            vec!["Uncategorized", "Zoo", "Bills", "Alpha"]
        );
        assert_eq!(serde_json::to_string(&rules).unwrap(), json);
    }

    #[test]
    fn test_missing_uncategorized_is_restored() {
        let rules: CategoryRules = serde_json::from_str(r#"{"Food":["Tesco"]}"#).unwrap();
        assert_eq!(
            rules.category_names().collect::<Vec<_>>(),
            vec!["Uncategorized", "Food"]
        );
    }

    #[test]
    fn test_loaded_duplicates_collapse() {
        let rules: CategoryRules =
            serde_json::from_str(r#"{"Uncategorized":[],"Food":["Tesco","Tesco","Lidl"]}"#)
                .unwrap();
        assert_eq!(rules.keywords("Food").unwrap().len(), 2);
        assert_eq!(rules.keyword_count(), 2);
    }

    #[test]
    fn test_rejects_non_object() {
        assert!(serde_json::from_str::<CategoryRules>("[1, 2]").is_err());
        assert!(serde_json::from_str::<CategoryRules>(r#"{"Food": "Tesco"}"#).is_err());
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Coffee Shop \n"), "coffee shop");
    }
}

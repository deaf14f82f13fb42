//! Category display formatting
//!
//! Formats the rule store as a tree of categories and their keywords.

use crate::models::CategoryRules;

/// Format categories and keywords as a tree in rule order
pub fn format_category_tree(rules: &CategoryRules) -> String {
    let mut output = String::new();

    for (i, (category, keywords)) in rules.iter().enumerate() {
        output.push_str(&format!("{} ({})\n", category, keywords.len()));

        for (j, keyword) in keywords.iter().enumerate() {
            let prefix = if j == keywords.len() - 1 {
                "└── "
            } else {
                "├── "
            };
            output.push_str(&format!("  {}{}\n", prefix, keyword));
        }

        if i < rules.len() - 1 {
            output.push('\n');
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_tree() {
        let mut rules = CategoryRules::new();
        rules.insert_category("Groceries");
        rules.insert_keyword("Groceries", "Tesco");
        rules.insert_keyword("Groceries", "Lidl");

        let output = format_category_tree(&rules);
        assert_eq!(
            output,
            "Uncategorized (0)\n\nGroceries (2)\n  ├── Tesco\n  └── Lidl\n"
        );
    }
}

use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use regex::Regex;

use super::category::Category;

/// Line-scoped NOLINT suppressions for one file.
///
/// `// NOLINT` and `// NOLINT(*)` silence every category on their line;
/// `// NOLINT(cat[,cat...])` silences only the named categories.
pub struct SuppressionRegistry {
    nolint_re: Regex,
    all_lines: HashSet<usize>,
    by_category: HashMap<Category, HashSet<usize>>,
}

impl Default for SuppressionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SuppressionRegistry {
    /// # Panics
    /// Panics if the built-in regex fails to compile.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nolint_re: Regex::new(r"\bNOLINT\b(\([^)]*\))?").expect("Invalid regex"),
            all_lines: HashSet::new(),
            by_category: HashMap::new(),
        }
    }

    /// Parses a raw line for a NOLINT annotation, recording any
    /// suppressions it carries. Returns the unknown category names found
    /// inside the parentheses, in source order, for the caller to report.
    pub fn parse(&mut self, raw_line: &str, linenum: usize) -> Vec<String> {
        let Some(caps) = self.nolint_re.captures(raw_line) else {
            return Vec::new();
        };
        let Some(parens) = caps.get(1) else {
            self.all_lines.insert(linenum);
            return Vec::new();
        };
        let inner = parens.as_str();
        let inner = &inner[1..inner.len() - 1];
        if inner == "*" {
            self.all_lines.insert(linenum);
            return Vec::new();
        }
        let mut unknown = Vec::new();
        for name in inner.split(',') {
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            match Category::from_str(name) {
                Ok(category) => {
                    self.by_category.entry(category).or_default().insert(linenum);
                }
                Err(name) => unknown.push(name),
            }
        }
        unknown
    }

    #[must_use]
    pub fn is_suppressed(&self, category: Category, linenum: usize) -> bool {
        self.all_lines.contains(&linenum)
            || self
                .by_category
                .get(&category)
                .is_some_and(|lines| lines.contains(&linenum))
    }
}

#[cfg(test)]
#[path = "suppress_tests.rs"]
mod tests;

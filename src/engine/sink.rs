use std::fmt;

use serde::Serialize;

use crate::error::{Result, StyleGuardError};

use super::category::Category;
use super::suppress::SuppressionRegistry;

/// One style problem located in a file. `line` 0 means the finding
/// applies to the file as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub line: usize,
    pub category: Category,
    pub confidence: u8,
    pub message: String,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}  [{}] [{}]",
            self.message, self.category, self.confidence
        )
    }
}

/// A single `+`/`-` category-prefix filter rule. Rules are applied in
/// order and the last matching rule wins; the default is to accept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterRule {
    Allow(String),
    Deny(String),
}

impl FilterRule {
    /// Parses a comma-separated filter spec such as
    /// `-whitespace,+whitespace/braces`. Every entry must carry a sign.
    pub fn parse_list(spec: &str) -> Result<Vec<Self>> {
        let mut rules = Vec::new();
        for entry in spec.split(',') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            if let Some(prefix) = entry.strip_prefix('+') {
                rules.push(Self::Allow(prefix.to_string()));
            } else if let Some(prefix) = entry.strip_prefix('-') {
                rules.push(Self::Deny(prefix.to_string()));
            } else {
                return Err(StyleGuardError::Config(format!(
                    "Every filter in --filter must start with + or -: '{entry}'"
                )));
            }
        }
        Ok(rules)
    }
}

/// Immutable per-run reporting options, shared across files.
#[derive(Debug, Clone)]
pub struct LintOptions {
    /// Findings below this confidence are dropped (0-5).
    pub verbose_level: u8,
    pub filters: Vec<FilterRule>,
}

impl Default for LintOptions {
    fn default() -> Self {
        Self {
            verbose_level: 1,
            filters: Vec::new(),
        }
    }
}

impl LintOptions {
    fn should_print(&self, category: Category, confidence: u8) -> bool {
        if confidence < self.verbose_level {
            return false;
        }
        let mut filtered = false;
        for rule in &self.filters {
            match rule {
                FilterRule::Deny(prefix) if category.as_str().starts_with(prefix.as_str()) => {
                    filtered = true;
                }
                FilterRule::Allow(prefix) if category.as_str().starts_with(prefix.as_str()) => {
                    filtered = false;
                }
                _ => {}
            }
        }
        !filtered
    }
}

/// Collects findings for one file, applying NOLINT suppressions, the
/// verbosity threshold, and the category filters at report time.
pub struct ErrorSink<'a> {
    options: &'a LintOptions,
    suppressions: SuppressionRegistry,
    findings: Vec<Finding>,
}

impl<'a> ErrorSink<'a> {
    #[must_use]
    pub fn new(options: &'a LintOptions) -> Self {
        Self {
            options,
            suppressions: SuppressionRegistry::new(),
            findings: Vec::new(),
        }
    }

    /// Records a finding unless a NOLINT on its line, the verbosity
    /// threshold, or a filter rule drops it.
    pub fn error(&mut self, linenum: usize, category: Category, confidence: u8, message: &str) {
        if self.suppressions.is_suppressed(category, linenum) {
            return;
        }
        if !self.options.should_print(category, confidence) {
            return;
        }
        self.findings.push(Finding {
            line: linenum,
            category,
            confidence,
            message: message.to_string(),
        });
    }

    /// Scans a raw source line for a NOLINT annotation. Unknown category
    /// names inside `NOLINT(...)` are reported, and are themselves
    /// suppressible by a `readability/nolint` entry on the same line.
    pub fn parse_nolint(&mut self, raw_line: &str, linenum: usize) {
        let unknown = self.suppressions.parse(raw_line, linenum);
        for name in unknown {
            self.error(
                linenum,
                Category::ReadabilityNolint,
                5,
                &format!("Unknown NOLINT error category: {name}"),
            );
        }
    }

    #[must_use]
    pub fn into_findings(self) -> Vec<Finding> {
        self.findings
    }
}

#[cfg(test)]
#[path = "sink_tests.rs"]
mod tests;

mod json;
mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

use std::str::FromStr;

use crate::engine::Finding;
use crate::error::{Result, StyleGuardError};

/// One checked file and its surviving findings.
pub struct FileReport {
    pub path: String,
    pub findings: Vec<Finding>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `file:line:  message  [category] [confidence]`
    #[default]
    Default,
    /// Same as default; named for symmetry with the original tool.
    Emacs,
    /// `file(line):  message  [category] [confidence]`, for the Visual
    /// Studio error list.
    Vs7,
    /// Machine-readable findings array.
    Json,
}

impl FromStr for OutputFormat {
    type Err = StyleGuardError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "default" => Ok(Self::Default),
            "emacs" => Ok(Self::Emacs),
            "vs7" => Ok(Self::Vs7),
            "json" => Ok(Self::Json),
            other => Err(StyleGuardError::Config(format!(
                "Unknown output format '{other}' (expected default, emacs, vs7, or json)"
            ))),
        }
    }
}

/// Renders the reports of a whole run into one string.
pub trait OutputFormatter {
    /// # Errors
    /// Returns an error if serialization fails.
    fn format(&self, reports: &[FileReport]) -> Result<String>;
}

/// Picks the formatter for a format name.
#[must_use]
pub fn create_formatter(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Default | OutputFormat::Emacs => Box::new(TextFormatter::emacs()),
        OutputFormat::Vs7 => Box::new(TextFormatter::vs7()),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

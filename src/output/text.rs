use std::fmt::Write;

use crate::error::Result;

use super::{FileReport, OutputFormatter};

/// How the file and line are joined in a text report line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LocationStyle {
    /// `file:line:` — understood by emacs and most editors.
    Emacs,
    /// `file(line):` — understood by the Visual Studio error list.
    Vs7,
}

pub struct TextFormatter {
    style: LocationStyle,
}

impl TextFormatter {
    #[must_use]
    pub const fn emacs() -> Self {
        Self {
            style: LocationStyle::Emacs,
        }
    }

    #[must_use]
    pub const fn vs7() -> Self {
        Self {
            style: LocationStyle::Vs7,
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, reports: &[FileReport]) -> Result<String> {
        let mut out = String::new();
        for report in reports {
            for finding in &report.findings {
                let location = match self.style {
                    LocationStyle::Emacs => format!("{}:{}:", report.path, finding.line),
                    LocationStyle::Vs7 => format!("{}({}):", report.path, finding.line),
                };
                writeln!(
                    out,
                    "{location}  {}  [{}] [{}]",
                    finding.message, finding.category, finding.confidence
                )
                .ok();
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;

use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, StyleGuardError};

pub const CONFIG_FILE_NAME: &str = "style-guard.toml";

/// Optional project configuration. Every field has a CLI counterpart
/// and the CLI wins.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleConfig {
    /// Confidence threshold 0-5; findings below it are dropped.
    pub verbose: Option<u8>,
    /// `+`/`-` category-prefix filter rules, applied in order.
    pub filters: Vec<String>,
    /// File extensions to check; the C/C++ set when empty.
    pub extensions: Vec<String>,
    /// Output format name: default, emacs, vs7, or json.
    pub format: Option<String>,
    /// Glob patterns excluded from directory scans.
    pub exclude: Vec<String>,
}

impl StyleConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| StyleGuardError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Walks up from `start_dir` looking for a config file, like the
    /// usual dotfile discovery.
    pub fn discover(start_dir: &Path) -> Result<Option<Self>> {
        for dir in start_dir.ancestors() {
            let candidate = dir.join(CONFIG_FILE_NAME);
            if candidate.is_file() {
                return Self::load(&candidate).map(Some);
            }
        }
        Ok(None)
    }

    fn validate(&self) -> Result<()> {
        if let Some(verbose) = self.verbose {
            if verbose > 5 {
                return Err(StyleGuardError::Config(format!(
                    "verbose must be between 0 and 5, got {verbose}"
                )));
            }
        }
        for filter in &self.filters {
            if !filter.starts_with('+') && !filter.starts_with('-') {
                return Err(StyleGuardError::Config(format!(
                    "Every filter must start with + or -: '{filter}'"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

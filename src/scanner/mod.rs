//! File discovery: walking directory roots and deciding which entries
//! are C/C++ sources worth checking.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use walkdir::WalkDir;

use crate::error::{Result, StyleGuardError};

/// Extensions checked when neither the config file nor `--ext` names
/// any.
pub const DEFAULT_EXTENSIONS: &[&str] = &["c", "cc", "cpp", "cxx", "h", "hh", "hpp", "hxx"];

/// Finds the files to check under a root path.
pub trait FileScanner {
    /// # Errors
    /// Returns an error if the root cannot be read.
    fn scan(&self, root: &Path) -> Result<Vec<PathBuf>>;
}

/// Decides which directory entries are sources to check: the extension
/// must be in the configured set and no exclude glob may match.
/// Extensions compare case-insensitively, may be written with or
/// without the leading dot, and fall back to the C/C++ defaults when
/// none are configured.
#[derive(Debug)]
pub struct SourceFilter {
    extensions: HashSet<String>,
    exclude: GlobSet,
}

impl SourceFilter {
    /// # Errors
    /// Returns an error if any exclude pattern is invalid.
    pub fn new(extensions: &[String], exclude_patterns: &[String]) -> Result<Self> {
        let extensions = if extensions.is_empty() {
            DEFAULT_EXTENSIONS.iter().map(|ext| (*ext).to_string()).collect()
        } else {
            extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_ascii_lowercase())
                .collect()
        };
        let mut builder = GlobSetBuilder::new();
        for pattern in exclude_patterns {
            let glob = Glob::new(pattern).map_err(|e| StyleGuardError::InvalidPattern {
                pattern: pattern.clone(),
                source: e,
            })?;
            builder.add(glob);
        }
        let exclude = builder.build().map_err(|e| StyleGuardError::InvalidPattern {
            pattern: exclude_patterns.join(","),
            source: e,
        })?;
        Ok(Self {
            extensions,
            exclude,
        })
    }

    fn is_checked_source(&self, path: &Path) -> bool {
        let Some(extension) = path.extension().and_then(|ext| ext.to_str()) else {
            return false;
        };
        self.extensions.contains(&extension.to_ascii_lowercase()) && !self.exclude.is_match(path)
    }
}

pub struct DirectoryScanner {
    filter: SourceFilter,
}

impl DirectoryScanner {
    #[must_use]
    pub const fn new(filter: SourceFilter) -> Self {
        Self { filter }
    }
}

impl FileScanner for DirectoryScanner {
    fn scan(&self, root: &Path) -> Result<Vec<PathBuf>> {
        // A file passed explicitly bypasses the filter; the user asked
        // for it by name.
        if root.is_file() {
            return Ok(vec![root.to_path_buf()]);
        }
        // Sorted traversal keeps output order stable across platforms.
        Ok(WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.path().to_path_buf())
            .filter(|path| self.filter.is_checked_source(path))
            .collect())
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

//! Physical reordering of `#include` batches into the canonical section
//! order: own header, C system, C++ system, everything else.

use std::path::Path;

use indexmap::IndexMap;
use regex::Regex;

use crate::engine::{FileInfo, IncludeCategory, classify_include};
use crate::error::{Result, StyleGuardError};

/// Decides whether an include spelling names a file of this project.
/// Only used for the system-vs-project delimiter warnings, and
/// substitutable so tests need no real tree.
pub trait ProjectRootPredicate {
    fn is_project_file(&self, path: &str) -> bool;
}

/// A path is in-project when it exists as a file, or when its first
/// component exists as a directory (the file may be generated later).
pub struct FsProjectRoot;

impl ProjectRootPredicate for FsProjectRoot {
    fn is_project_file(&self, path: &str) -> bool {
        if Path::new(path).is_file() {
            return true;
        }
        let first = path.split(['/', '\\']).next().unwrap_or(path);
        Path::new(first).is_dir()
    }
}

/// One parsed `#include` line: the included name, its delimiter style,
/// and whatever trailed the closing delimiter (usually a comment).
#[derive(Debug, Clone, PartialEq, Eq)]
struct IncludeLine {
    name: String,
    is_system: bool,
    post_str: String,
}

impl IncludeLine {
    fn render(&self) -> String {
        if self.is_system {
            format!("#include <{}>{}", self.name, self.post_str)
        } else {
            format!("#include \"{}\"{}", self.name, self.post_str)
        }
    }
}

pub struct IncludeSorter {
    include_re: Regex,
}

impl Default for IncludeSorter {
    fn default() -> Self {
        Self::new()
    }
}

impl IncludeSorter {
    /// # Panics
    /// Panics if the built-in regex fails to compile.
    #[must_use]
    pub fn new() -> Self {
        Self {
            include_re: Regex::new(r#"^\s*#\s*include\s*([<"])\s*([^>"\s]*)\s*[>"](.*)$"#)
                .expect("Invalid regex"),
        }
    }

    /// Rewrites `lines`, replacing each contiguous batch of includes
    /// (blank lines do not end a batch) with its sorted sections. An
    /// include repeated with a different rendering aborts the file;
    /// `warnings` keeps whatever was collected up to that point.
    pub fn sort_includes(
        &self,
        filename: &str,
        lines: &[String],
        predicate: &dyn ProjectRootPredicate,
        warnings: &mut Vec<String>,
    ) -> Result<Vec<String>> {
        let mut batches = 0usize;
        let mut in_batch = false;
        let mut includes: IndexMap<String, IncludeLine> = IndexMap::new();
        let mut new_lines = Vec::with_capacity(lines.len());

        for (lnum, line) in lines.iter().enumerate() {
            if let Some(include) = self.parse_include(line) {
                if !in_batch {
                    batches += 1;
                    in_batch = true;
                }
                let key = include.name.to_lowercase();
                if let Some(previous) = includes.get(&key) {
                    if include.render() == previous.render() {
                        warnings.push(format!(
                            "\"{}\" included more than once (consistently) in \"{filename}:{}\": {}",
                            include.name,
                            lnum + 1,
                            include.render()
                        ));
                    } else {
                        return Err(StyleGuardError::InconsistentInclude {
                            include: include.name,
                            path: filename.into(),
                            line: lnum + 1,
                        });
                    }
                } else {
                    if predicate.is_project_file(&include.name) {
                        if include.is_system {
                            warnings.push(format!(
                                "\"{}\" looks like a project-file, but is included with <> \
                                 in \"{filename}:{}\": {}",
                                include.name,
                                lnum + 1,
                                include.render()
                            ));
                        }
                    } else if !include.is_system {
                        warnings.push(format!(
                            "\"{}\" looks like a system-file, but is included with \"\" \
                             in \"{filename}:{}\": {}",
                            include.name,
                            lnum + 1,
                            include.render()
                        ));
                    }
                    includes.insert(key, include);
                }
            } else {
                if in_batch {
                    if line.trim().is_empty() {
                        // Blank lines inside a batch are regenerated by the
                        // section layout.
                        continue;
                    }
                    in_batch = false;
                    new_lines.extend(Self::sort_batch(filename, &includes));
                    includes.clear();
                }
                new_lines.push(line.clone());
            }
        }
        if in_batch {
            new_lines.extend(Self::sort_batch(filename, &includes));
        }
        if batches > 1 {
            warnings.push(format!(
                "More than 1 batch of #include's in \"{filename}\""
            ));
        }
        Ok(new_lines)
    }

    fn parse_include(&self, line: &str) -> Option<IncludeLine> {
        if !line.trim_start().starts_with("#include") {
            return None;
        }
        let caps = self.include_re.captures(line)?;
        Some(IncludeLine {
            name: caps[2].to_string(),
            is_system: &caps[1] == "<",
            post_str: caps[3].to_string(),
        })
    }

    /// Sorts one batch case-insensitively by name and lays it out in
    /// sections, each non-empty section followed by one blank line.
    fn sort_batch(filename: &str, includes: &IndexMap<String, IncludeLine>) -> Vec<String> {
        const SECTIONS: [&[IncludeCategory]; 4] = [
            &[
                IncludeCategory::LikelyMyHeader,
                IncludeCategory::PossibleMyHeader,
            ],
            &[IncludeCategory::CSystem],
            &[IncludeCategory::CppSystem],
            &[IncludeCategory::Other],
        ];

        let file_info = FileInfo::new(filename);
        let mut keys: Vec<&String> = includes.keys().collect();
        keys.sort();

        let mut by_category: Vec<(IncludeCategory, String)> = Vec::new();
        for key in keys {
            let include = &includes[key];
            let mut category = classify_include(&file_info, &include.name, include.is_system);
            if matches!(
                category,
                IncludeCategory::LikelyMyHeader | IncludeCategory::PossibleMyHeader
            ) && !is_own_header(filename, &include.name)
            {
                category = IncludeCategory::Other;
            }
            by_category.push((category, include.render()));
        }

        let mut sorted = Vec::new();
        for section in SECTIONS {
            for (category, rendered) in &by_category {
                if section.contains(category) {
                    sorted.push(rendered.clone());
                }
            }
            if sorted.last().is_some_and(|line| !line.is_empty()) {
                sorted.push(String::new());
            }
        }
        sorted
    }
}

/// Whether `include` is the header `src_file` implements: equal stems,
/// with a `_test` suffix on the source ignored.
fn is_own_header(src_file: &str, include: &str) -> bool {
    let inc_pref = strip_extension(include);
    let src_pref = strip_extension(src_file);
    let src_pref = src_pref.strip_suffix("_test").unwrap_or(src_pref);
    inc_pref == src_pref
}

fn strip_extension(path: &str) -> &str {
    let base_start = path.rfind(['/', '\\']).map_or(0, |pos| pos + 1);
    match path[base_start..].rfind('.') {
        Some(pos) if pos > 0 => &path[..base_start + pos],
        _ => path,
    }
}

/// A minimal line diff: shared prefix and suffix are elided, the
/// differing middle is printed as `-`/`+` blocks with a little context.
#[must_use]
pub fn render_diff(filename: &str, before: &[String], after: &[String]) -> String {
    let common_prefix = before
        .iter()
        .zip(after.iter())
        .take_while(|(a, b)| a == b)
        .count();
    let mut common_suffix = 0;
    while common_suffix < before.len() - common_prefix
        && common_suffix < after.len() - common_prefix
        && before[before.len() - 1 - common_suffix] == after[after.len() - 1 - common_suffix]
    {
        common_suffix += 1;
    }

    let mut out = String::new();
    out.push_str(&format!("--- {filename} (before)\n"));
    out.push_str(&format!("+++ {filename} (after)\n"));
    out.push_str(&format!(
        "@@ -{},{} +{},{} @@\n",
        common_prefix + 1,
        before.len() - common_prefix - common_suffix,
        common_prefix + 1,
        after.len() - common_prefix - common_suffix,
    ));
    for line in &before[common_prefix..before.len() - common_suffix] {
        out.push_str(&format!("-{line}\n"));
    }
    for line in &after[common_prefix..after.len() - common_suffix] {
        out.push_str(&format!("+{line}\n"));
    }
    out
}

#[cfg(test)]
#[path = "reorder_tests.rs"]
mod tests;

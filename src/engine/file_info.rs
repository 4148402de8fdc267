use std::path::{Component, Path, PathBuf};

/// Filename suffixes that conventionally shadow the name of the header
/// they accompany, tried longest-separator-first.
const COMMON_SUFFIXES: [&str; 6] = [
    "test.cc",
    "regtest.cc",
    "unittest.cc",
    "inl.h",
    "impl.h",
    "internal.h",
];

/// Knows how to translate a filename into project-relative terms.
pub struct FileInfo {
    filename: String,
}

impl FileInfo {
    #[must_use]
    pub fn new(filename: &str) -> Self {
        Self {
            filename: filename.to_string(),
        }
    }

    /// The filename exactly as given.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.filename
    }

    /// The absolute path with `/` separators.
    #[must_use]
    pub fn full_name(&self) -> String {
        let path = Path::new(&self.filename);
        let absolute = if path.is_absolute() {
            normalize_path(path)
        } else {
            let base = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/"));
            normalize_path(&base.join(path))
        };
        absolute.to_string_lossy().replace('\\', "/")
    }

    /// The path relative to the enclosing repository, detected by a
    /// `.git`, `.hg`, or `.svn` marker in an ancestor directory. A path
    /// given relative stays as given; with no marker the absolute path
    /// is returned unchanged, which may make header guard names wrong.
    #[must_use]
    pub fn repository_name(&self) -> String {
        if Path::new(&self.filename).is_relative() {
            return self.filename.replace('\\', "/");
        }
        let full = self.full_name();
        let full_path = PathBuf::from(&full);
        let mut root: Option<&Path> = None;
        for ancestor in full_path.ancestors().skip(1) {
            for marker in [".git", ".hg", ".svn"] {
                if ancestor.join(marker).exists() {
                    root = Some(ancestor);
                }
            }
        }
        if let Some(root) = root {
            let prefix = root.to_string_lossy().replace('\\', "/");
            if let Some(rest) = full.strip_prefix(&format!("{prefix}/")) {
                return rest.to_string();
            }
        }
        full
    }

    /// The final path component without its extension.
    #[must_use]
    pub fn base_name(&self) -> String {
        let (stem, _) = split_extension(final_component(&self.filename));
        stem.to_string()
    }

    /// The extension including its dot, or an empty string.
    #[must_use]
    pub fn extension(&self) -> String {
        let (_, ext) = split_extension(final_component(&self.filename));
        ext.to_string()
    }
}

fn final_component(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Splits `name.ext` into (`name`, `.ext`); a leading dot is part of the
/// stem, not an extension.
fn split_extension(component: &str) -> (&str, &str) {
    match component.rfind('.') {
        Some(pos) if pos > 0 => (&component[..pos], &component[pos..]),
        _ => (component, ""),
    }
}

/// Strips a conventional companion suffix (`_test.cc`, `-inl.h`, ...)
/// together with its separator, or failing that the extension, so two
/// paths can be compared as the "same file" for include classification.
#[must_use]
pub fn drop_common_suffixes(filename: &str) -> String {
    for suffix in COMMON_SUFFIXES {
        if filename.len() > suffix.len() && filename.ends_with(suffix) {
            let sep = filename.as_bytes()[filename.len() - suffix.len() - 1];
            if sep == b'-' || sep == b'_' {
                return filename[..filename.len() - suffix.len() - 1].to_string();
            }
        }
    }
    let (dir, base) = match filename.rfind('/') {
        Some(pos) => (&filename[..=pos], &filename[pos + 1..]),
        None => ("", filename),
    };
    let (stem, _) = split_extension(base);
    format!("{dir}{stem}")
}

/// Lexically resolves `.` and `..` components without touching the
/// filesystem.
pub(crate) fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if normalized.ends_with("..") || (!normalized.pop() && !normalized.has_root()) {
                    normalized.push("..");
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}

#[cfg(test)]
#[path = "file_info_tests.rs"]
mod tests;

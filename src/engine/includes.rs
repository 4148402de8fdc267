use std::path::Path;

use indexmap::IndexMap;
use regex::Regex;

use super::category::Category;
use super::file_info::{FileInfo, drop_common_suffixes, normalize_path};
use super::sink::ErrorSink;

/// Standard C++ library header names, including the pre-standard SGI/STL
/// spellings; an angle include outside this set is assumed to be a C
/// system header.
const CPP_HEADERS: &[&str] = &[
    "algobase.h",
    "algo.h",
    "alloc.h",
    "builtinbuf.h",
    "bvector.h",
    "complex.h",
    "defalloc.h",
    "deque.h",
    "editbuf.h",
    "fstream.h",
    "function.h",
    "hash_map",
    "hash_map.h",
    "hash_set",
    "hash_set.h",
    "hashtable.h",
    "heap.h",
    "indstream.h",
    "iomanip.h",
    "iostream.h",
    "istream.h",
    "iterator.h",
    "list.h",
    "map.h",
    "multimap.h",
    "multiset.h",
    "ostream.h",
    "pair.h",
    "parsestream.h",
    "pfstream.h",
    "PlotFile.h",
    "procbuf.h",
    "pthread_alloc",
    "pthread_alloc.h",
    "rope",
    "rope.h",
    "ropeimpl.h",
    "SFile.h",
    "slist",
    "slist.h",
    "stack.h",
    "stdiostream.h",
    "stl_alloc.h",
    "stl_relops.h",
    "streambuf.h",
    "stream.h",
    "strfile.h",
    "strstream.h",
    "tempbuf.h",
    "tree.h",
    "type_traits.h",
    "vector.h",
    "algorithm",
    "array",
    "atomic",
    "bitset",
    "chrono",
    "codecvt",
    "complex",
    "condition_variable",
    "deque",
    "exception",
    "forward_list",
    "fstream",
    "functional",
    "future",
    "initializer_list",
    "iomanip",
    "ios",
    "iosfwd",
    "iostream",
    "istream",
    "iterator",
    "limits",
    "list",
    "locale",
    "map",
    "memory",
    "mutex",
    "new",
    "numeric",
    "ostream",
    "queue",
    "random",
    "ratio",
    "regex",
    "set",
    "sstream",
    "stack",
    "stdexcept",
    "streambuf",
    "string",
    "strstream",
    "system_error",
    "thread",
    "tuple",
    "typeindex",
    "typeinfo",
    "type_traits",
    "unordered_map",
    "unordered_set",
    "utility",
    "valarray",
    "vector",
    "cassert",
    "ccomplex",
    "cctype",
    "cerrno",
    "cfenv",
    "cfloat",
    "cinttypes",
    "ciso646",
    "climits",
    "clocale",
    "cmath",
    "csetjmp",
    "csignal",
    "cstdalign",
    "cstdarg",
    "cstdbool",
    "cstddef",
    "cstdint",
    "cstdio",
    "cstdlib",
    "cstring",
    "ctgmath",
    "ctime",
    "cuchar",
    "cwchar",
    "cwctype",
];

/// What an `#include` line refers to, relative to the file under check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncludeCategory {
    CSystem,
    CppSystem,
    LikelyMyHeader,
    PossibleMyHeader,
    Other,
}

impl IncludeCategory {
    const fn type_name(self) -> &'static str {
        match self {
            Self::CSystem => "C system header",
            Self::CppSystem => "C++ system header",
            Self::LikelyMyHeader => "header this file implements",
            Self::PossibleMyHeader => "header this file may implement",
            Self::Other => "other header",
        }
    }
}

/// The include sections in their required order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Section {
    Initial,
    MyHeader,
    CSystem,
    CppSystem,
    OtherHeader,
}

impl Section {
    const fn name(self) -> &'static str {
        match self {
            Self::Initial => "... nothing. (This can't be an error.)",
            Self::MyHeader => "a header this file implements",
            Self::CSystem => "C system header",
            Self::CppSystem => "C++ system header",
            Self::OtherHeader => "other header",
        }
    }
}

/// Tracks the includes seen so far in one file: which names were
/// included where (insertion-ordered for deterministic later passes),
/// which section the scan is in, and the previous header of the current
/// section run for the alphabetical-order check.
pub struct IncludeState {
    includes: IndexMap<String, usize>,
    section: Section,
    last_header: String,
}

impl Default for IncludeState {
    fn default() -> Self {
        Self::new()
    }
}

impl IncludeState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            includes: IndexMap::new(),
            section: Section::Initial,
            last_header: String::new(),
        }
    }

    #[must_use]
    pub fn line_of(&self, include: &str) -> Option<usize> {
        self.includes.get(include).copied()
    }

    pub fn record(&mut self, include: &str, linenum: usize) {
        self.includes.entry(include.to_string()).or_insert(linenum);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &usize)> {
        self.includes.iter()
    }

    /// Advances the section state machine by one classified include.
    /// Returns a description of the misordering, if any; the own-header
    /// sections are a permitted relaxation and never flagged.
    pub fn check_next_include_order(&mut self, category: IncludeCategory) -> Option<String> {
        let message = format!(
            "Found {} after {}",
            category.type_name(),
            self.section.name()
        );
        let last_section = self.section;
        match category {
            IncludeCategory::CSystem => {
                if self.section <= Section::CSystem {
                    self.section = Section::CSystem;
                } else {
                    self.last_header.clear();
                    return Some(message);
                }
            }
            IncludeCategory::CppSystem => {
                if self.section <= Section::CppSystem {
                    self.section = Section::CppSystem;
                } else {
                    self.last_header.clear();
                    return Some(message);
                }
            }
            IncludeCategory::LikelyMyHeader | IncludeCategory::PossibleMyHeader => {
                if self.section <= Section::MyHeader {
                    self.section = Section::MyHeader;
                } else {
                    self.section = Section::OtherHeader;
                }
            }
            IncludeCategory::Other => self.section = Section::OtherHeader,
        }
        if last_section != self.section {
            self.last_header.clear();
        }
        None
    }

    /// Checks `header` against the previous header of the current run.
    /// `-inl.h` sorts with its header, and `-` with `_`, so both are
    /// canonicalized away before comparing.
    pub fn is_in_alphabetical_order(&mut self, header: &str) -> bool {
        let canonical = canonicalize_alphabetical_order(header);
        if !self.last_header.is_empty() && self.last_header > canonical {
            return false;
        }
        self.last_header = canonical;
        true
    }
}

fn canonicalize_alphabetical_order(header: &str) -> String {
    header
        .replace("-inl.h", ".h")
        .replace('-', "_")
        .to_lowercase()
}

/// Decides which section an include belongs to, relative to the file
/// being checked. Angle includes are system headers, split C/C++ by the
/// standard-name table; quoted includes are matched against the checked
/// file's own name to spot the header it (may) implement.
#[must_use]
pub fn classify_include(file_info: &FileInfo, include: &str, is_system: bool) -> IncludeCategory {
    if is_system {
        return if CPP_HEADERS.contains(&include) {
            IncludeCategory::CppSystem
        } else {
            IncludeCategory::CSystem
        };
    }

    let target = drop_common_suffixes(&file_info.repository_name());
    let stripped = drop_common_suffixes(include);
    let (include_dir, include_base) = split_dir(&stripped);
    let (target_dir, target_base) = split_dir(&target);

    if include_base == target_base {
        let public_dir = normalize_path(Path::new(&format!("{target_dir}/../public")))
            .to_string_lossy()
            .replace('\\', "/");
        if include_dir == target_dir || include_dir == public_dir {
            return IncludeCategory::LikelyMyHeader;
        }
    }

    // Matching leading stems ("foo.h" vs "foo-bar.cc") may still mean
    // the include belongs to this file.
    if first_stem_component(target_base) == first_stem_component(include_base)
        && !first_stem_component(target_base).is_empty()
    {
        return IncludeCategory::PossibleMyHeader;
    }

    IncludeCategory::Other
}

fn split_dir(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        Some(pos) => (&path[..pos], &path[pos + 1..]),
        None => ("", path),
    }
}

fn first_stem_component(base: &str) -> &str {
    let end = base
        .find(['-', '_', '.'])
        .unwrap_or(base.len());
    &base[..end]
}

/// Per-line `#include` checks: directory-less quoted headers, duplicate
/// includes, section ordering, and alphabetical ordering.
pub struct IncludeChecker {
    include_re: Regex,
    no_dir_re: Regex,
}

impl Default for IncludeChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl IncludeChecker {
    /// # Panics
    /// Panics if the built-in regexes fail to compile.
    #[must_use]
    pub fn new() -> Self {
        Self {
            include_re: Regex::new(r#"^\s*#\s*include\s*([<"])([^>"]*)[>"]"#)
                .expect("Invalid regex"),
            no_dir_re: Regex::new(r#"#include\s*"[^/]+\.h""#).expect("Invalid regex"),
        }
    }

    pub fn check_line(
        &self,
        file_info: &FileInfo,
        line: &str,
        linenum: usize,
        state: &mut IncludeState,
        sink: &mut ErrorSink,
    ) {
        if self.no_dir_re.is_match(line) {
            sink.error(
                linenum,
                Category::BuildInclude,
                4,
                "Include the directory when naming .h files",
            );
        }

        let Some(caps) = self.include_re.captures(line) else {
            return;
        };
        let include = caps[2].to_string();
        let is_system = &caps[1] == "<";

        if let Some(previous) = state.line_of(&include) {
            sink.error(
                linenum,
                Category::BuildInclude,
                4,
                &format!(
                    "\"{include}\" already included at {}:{previous}",
                    file_info.name()
                ),
            );
            return;
        }
        state.record(&include, linenum);

        let category = classify_include(file_info, &include, is_system);
        if let Some(reason) = state.check_next_include_order(category) {
            sink.error(
                linenum,
                Category::BuildIncludeOrder,
                4,
                &format!(
                    "{reason}. Should be: {}.h, c system, c++ system, other.",
                    file_info.base_name()
                ),
            );
        }
        if !state.is_in_alphabetical_order(&include) {
            sink.error(
                linenum,
                Category::BuildIncludeAlpha,
                4,
                &format!("Include \"{include}\" not in alphabetical order"),
            );
        }
    }
}

#[cfg(test)]
#[path = "includes_tests.rs"]
mod tests;

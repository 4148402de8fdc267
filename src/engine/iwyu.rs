use indexmap::IndexMap;
use regex::Regex;

use super::category::Category;
use super::cleanse::{CleansedLines, cleanse_comments};
use super::file_info::FileInfo;
use super::includes::IncludeState;
use super::sink::ErrorSink;

/// Reads companion files during include-what-you-use resolution. The
/// filesystem implementation is swapped out in tests.
pub trait FileReader {
    /// Returns the file's lines, or `None` if it cannot be read.
    fn open(&self, path: &str) -> Option<Vec<String>>;
}

/// Reads companion headers straight from disk, tolerating invalid
/// UTF-8 the same way the main driver does.
pub struct FsFileReader;

impl FileReader for FsFileReader {
    fn open(&self, path: &str) -> Option<Vec<String>> {
        let bytes = std::fs::read(path).ok()?;
        Some(
            String::from_utf8_lossy(&bytes)
                .lines()
                .map(str::to_string)
                .collect(),
        )
    }
}

/// `<algorithm>` functions commonly used unqualified.
const ALGORITHM_FUNCTIONS: &[&str] = &[
    "copy",
    "max",
    "min",
    "min_element",
    "sort",
    "swap",
    "transform",
];

/// Standard templates and the headers that define them.
const TEMPLATE_HEADERS: &[(&str, &[&str])] = &[
    ("<deque>", &["deque"]),
    (
        "<functional>",
        &[
            "unary_function",
            "binary_function",
            "plus",
            "minus",
            "multiplies",
            "divides",
            "modulus",
            "negate",
            "equal_to",
            "not_equal_to",
            "greater",
            "less",
            "greater_equal",
            "less_equal",
            "logical_and",
            "logical_or",
            "logical_not",
            "unary_negate",
            "not1",
            "binary_negate",
            "not2",
            "bind1st",
            "bind2nd",
            "pointer_to_unary_function",
            "pointer_to_binary_function",
            "ptr_fun",
            "mem_fun_t",
            "mem_fun",
            "mem_fun1_t",
            "mem_fun1_ref_t",
            "mem_fun_ref_t",
            "const_mem_fun_t",
            "const_mem_fun1_t",
            "const_mem_fun_ref_t",
            "const_mem_fun1_ref_t",
            "mem_fun_ref",
        ],
    ),
    ("<limits>", &["numeric_limits"]),
    ("<list>", &["list"]),
    ("<map>", &["map", "multimap"]),
    ("<memory>", &["allocator"]),
    ("<queue>", &["queue", "priority_queue"]),
    ("<set>", &["set", "multiset"]),
    ("<stack>", &["stack"]),
    ("<string>", &["char_traits", "basic_string"]),
    ("<utility>", &["pair"]),
    ("<vector>", &["vector"]),
    // gcc extensions, sorted by the include spelling.
    ("<hash_map>", &["hash_map", "hash_multimap"]),
    ("<hash_set>", &["hash_set", "hash_multiset"]),
    ("<slist>", &["slist"]),
];

struct SymbolPattern {
    pattern: Regex,
    header: &'static str,
    label: String,
}

/// Flags uses of standard symbols whose headers are not included,
/// directly or through the file's own header.
pub struct IncludeWhatYouUseResolver {
    string_re: Regex,
    include_re: Regex,
    algorithms: Vec<SymbolPattern>,
    templates: Vec<SymbolPattern>,
}

impl Default for IncludeWhatYouUseResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl IncludeWhatYouUseResolver {
    /// # Panics
    /// Panics if the built-in regexes fail to compile.
    #[must_use]
    pub fn new() -> Self {
        let algorithms = ALGORITHM_FUNCTIONS
            .iter()
            .map(|name| SymbolPattern {
                // The [^>.] guard skips ->calls and obj.calls, which are
                // not the std:: function.
                pattern: Regex::new(&format!(r"[^>.]\b{name}(<.*?>)?\([^\)]"))
                    .expect("Invalid regex"),
                header: "<algorithm>",
                label: (*name).to_string(),
            })
            .collect();
        let templates = TEMPLATE_HEADERS
            .iter()
            .flat_map(|(header, names)| {
                names.iter().map(|name| SymbolPattern {
                    pattern: Regex::new(&format!(r"(<|\b){name}\s*<")).expect("Invalid regex"),
                    header,
                    label: format!("{name}<>"),
                })
            })
            .collect();
        Self {
            string_re: Regex::new(r"\bstring\b").expect("Invalid regex"),
            include_re: Regex::new(r#"^\s*#\s*include\s*([<"])([^>"]*)[>"]"#)
                .expect("Invalid regex"),
            algorithms,
            templates,
        }
    }

    /// Scans the collapsed lines for standard-symbol uses and reports
    /// the headers they need but which neither this file nor its own
    /// header includes. A `.cc` file whose own header cannot be located
    /// is skipped entirely rather than flooded with false positives.
    pub fn check(
        &self,
        filename: &str,
        clean_lines: &CleansedLines,
        include_state: &IncludeState,
        sink: &mut ErrorSink,
        reader: &dyn FileReader,
    ) {
        // header name -> (reporting line, symbol label), first-seen order
        let mut required: IndexMap<&'static str, (usize, String)> = IndexMap::new();

        for (linenum, line) in clean_lines.elided.iter().enumerate() {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(m) = self.string_re.find(line) {
                let prefix = &line[..m.start()];
                if prefix.ends_with("std::") || !prefix.ends_with("::") {
                    required.insert("<string>", (linenum, "string".to_string()));
                }
            }

            for symbol in &self.algorithms {
                if symbol.pattern.is_match(line) {
                    required.insert(symbol.header, (linenum, symbol.label.clone()));
                }
            }

            // Templates need a '<' to appear at all; skip the regex walk
            // otherwise.
            if !line.contains('<') {
                continue;
            }
            for symbol in &self.templates {
                if symbol.pattern.is_match(line) {
                    required.insert(symbol.header, (linenum, symbol.label.clone()));
                }
            }
        }

        // The file's own header covers whatever it includes.
        let mut all_includes = IncludeState::new();
        for (include, linenum) in include_state.iter() {
            all_includes.record(include, *linenum);
        }
        let abs_filename = FileInfo::new(filename).full_name();
        let abs_filename = abs_filename
            .strip_suffix("_flymake.cc")
            .map_or(abs_filename.clone(), |stem| format!("{stem}.cc"));

        let mut header_found = false;
        let headers: Vec<String> = include_state.iter().map(|(name, _)| name.clone()).collect();
        for header in &headers {
            let (same_module, common_path) = files_belong_to_same_module(&abs_filename, header);
            if same_module
                && self.update_include_state(
                    &format!("{common_path}{header}"),
                    &mut all_includes,
                    reader,
                )
            {
                header_found = true;
            }
        }

        if abs_filename.ends_with(".cc") && !header_found {
            return;
        }

        for (header, (linenum, label)) in required {
            let key = header.trim_matches(['<', '>', '"']);
            if all_includes.line_of(key).is_none() {
                sink.error(
                    linenum,
                    Category::BuildIncludeWhatYouUse,
                    4,
                    &format!("Add #include {header} for {label}"),
                );
            }
        }
    }

    /// Records the includes of `path` into `state`. Returns whether the
    /// file could be read at all.
    fn update_include_state(
        &self,
        path: &str,
        state: &mut IncludeState,
        reader: &dyn FileReader,
    ) -> bool {
        let Some(lines) = reader.open(path) else {
            return false;
        };
        for (linenum, line) in lines.iter().enumerate() {
            let clean_line = cleanse_comments(line);
            if let Some(caps) = self.include_re.captures(&clean_line) {
                state.record(&caps[2], linenum);
            }
        }
        true
    }
}

/// Whether `filename_h` could be the header `filename_cc` implements:
/// test and `-inl` suffixes stripped, `/public/` and `/internal/`
/// collapsed, and the header a path suffix of the source. Returns the
/// directory prefix the two share so the header can be opened.
#[must_use]
pub fn files_belong_to_same_module(filename_cc: &str, filename_h: &str) -> (bool, String) {
    let Some(cc) = filename_cc.strip_suffix(".cc") else {
        return (false, String::new());
    };
    let cc = cc.strip_suffix("_unittest").unwrap_or_else(|| {
        cc.strip_suffix("_test").unwrap_or(cc)
    });
    let cc = cc.replace("/public/", "/").replace("/internal/", "/");

    let Some(h) = filename_h.strip_suffix(".h") else {
        return (false, String::new());
    };
    let h = h.strip_suffix("-inl").unwrap_or(h);
    let h = h.replace("/public/", "/").replace("/internal/", "/");

    if cc.ends_with(&h) {
        let common_path = cc[..cc.len() - h.len()].to_string();
        (true, common_path)
    } else {
        (false, String::new())
    }
}


#[cfg(test)]
#[path = "iwyu_tests.rs"]
mod tests;

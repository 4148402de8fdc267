use regex::Regex;

use super::category::Category;
use super::sink::ErrorSink;

/// Placeholder that stands in for every line swallowed by a multi-line
/// comment, so line counts stay aligned across views.
const COMMENT_PLACEHOLDER: &str = "// dummy";

/// Three aligned views of one file's lines.
///
/// 1) `raw_lines`: the lines as passed in (multi-line comments already
///    blanked to placeholders by [`remove_multiline_comments`]),
/// 2) `lines`: single-line comments stripped,
/// 3) `elided`: string and character literals collapsed to empty
///    literals, then comments stripped.
///
/// All three always hold the same number of lines.
pub struct CleansedLines {
    pub raw_lines: Vec<String>,
    pub lines: Vec<String>,
    pub elided: Vec<String>,
}

impl CleansedLines {
    #[must_use]
    pub fn new(lines: &[String]) -> Self {
        let collapser = StringCollapser::new();
        let mut cleansed = Self {
            raw_lines: lines.to_vec(),
            lines: Vec::with_capacity(lines.len()),
            elided: Vec::with_capacity(lines.len()),
        };
        for line in lines {
            cleansed.lines.push(cleanse_comments(line));
            let collapsed = collapser.collapse(line);
            cleansed.elided.push(cleanse_comments(&collapsed));
        }
        cleansed
    }

    #[must_use]
    pub fn num_lines(&self) -> usize {
        self.raw_lines.len()
    }
}

/// Collapses string and character literals so that quote and brace
/// counting heuristics are not confused by literal contents.
struct StringCollapser {
    include_re: Regex,
    escapes_re: Regex,
    single_quote_re: Regex,
    double_quote_re: Regex,
}

impl StringCollapser {
    fn new() -> Self {
        Self {
            // Include names may hold characters that look like unterminated
            // literals ('), so those lines are left alone.
            include_re: Regex::new(r#"^\s*#\s*include\s*([<"])([^>"]*)[>"]"#)
                .expect("Invalid regex"),
            escapes_re: Regex::new(r#"\\([abfnrtv?"'\\]|\d+|x[0-9a-fA-F]+)"#)
                .expect("Invalid regex"),
            single_quote_re: Regex::new(r"'(?:[^'\\]|\\.)*?'").expect("Invalid regex"),
            double_quote_re: Regex::new(r#""(?:[^"\\]|\\.)*?""#).expect("Invalid regex"),
        }
    }

    fn collapse(&self, line: &str) -> String {
        if self.include_re.is_match(line) {
            return line.to_string();
        }
        // Escape sequences go first so that \" and \' cannot terminate a
        // literal early.
        let line = self.escapes_re.replace_all(line, "");
        let line = self.single_quote_re.replace_all(&line, "''");
        let line = self.double_quote_re.replace_all(&line, "\"\"");
        line.into_owned()
    }
}

/// Whether `line` ends inside a double-quoted string, i.e. holds an odd
/// number of quote characters that are neither escaped nor themselves
/// character literals.
#[must_use]
pub fn is_cpp_string(line: &str) -> bool {
    let line = line.replace("\\\\", "XX");
    let quotes = line.matches('"').count() as isize;
    let escaped = line.matches("\\\"").count() as isize;
    let char_literal = line.matches("'\"'").count() as isize;
    (quotes - escaped - char_literal).rem_euclid(2) == 1
}

/// Strips `//` and single-line `/* */` comments from one line.
#[must_use]
pub fn cleanse_comments(line: &str) -> String {
    let mut line = line;
    if let Some(pos) = line.find("//") {
        if !is_cpp_string(&line[..pos]) {
            line = line[..pos].trim_end();
        }
    }
    remove_inline_c_comments(line)
}

/// Removes complete `/* */` spans, tidying the surrounding whitespace:
/// a comment that ends the line is dropped with its leading whitespace;
/// a comment wedged between tokens keeps one side's spacing so the
/// tokens stay separated.
fn remove_inline_c_comments(line: &str) -> String {
    let mut text = line.to_string();
    loop {
        let Some(start) = text.find("/*") else {
            break;
        };
        let Some(rel) = text[start + 2..].find("*/") else {
            break;
        };
        let end = start + 2 + rel + 2;
        let ws_start = text[..start].trim_end().len();
        let after = &text[end..];
        if after.trim().is_empty() {
            text.truncate(ws_start);
        } else if ws_start < start
            && after
                .chars()
                .next()
                .is_some_and(|c| !(c.is_alphanumeric() || c == '_'))
        {
            text.replace_range(ws_start..end, "");
        } else {
            let trailing_ws = after.len() - after.trim_start().len();
            text.replace_range(start..end + trailing_ws, "");
        }
    }
    text
}

fn find_next_multiline_comment_start(lines: &[String], start: usize) -> usize {
    for (ix, line) in lines.iter().enumerate().skip(start) {
        let stripped = line.trim();
        if stripped.starts_with("/*") && !stripped[2..].contains("*/") {
            return ix;
        }
    }
    lines.len()
}

fn find_next_multiline_comment_end(lines: &[String], start: usize) -> usize {
    for (ix, line) in lines.iter().enumerate().skip(start) {
        if line.trim().ends_with("*/") {
            return ix;
        }
    }
    lines.len()
}

fn replace_with_placeholder(lines: &mut [String], begin: usize, end: usize) {
    for line in &mut lines[begin..end] {
        COMMENT_PLACEHOLDER.clone_into(line);
    }
}

/// Blanks out multi-line `/* */` comments in place, preserving line
/// counts. An unterminated comment is reported once at its start line
/// and the rest of the file is treated as commented so the truncation
/// cannot cascade into bogus findings.
pub fn remove_multiline_comments(lines: &mut [String], sink: &mut ErrorSink) {
    let mut lineix = 0;
    while lineix < lines.len() {
        let begin = find_next_multiline_comment_start(lines, lineix);
        if begin >= lines.len() {
            return;
        }
        let end = find_next_multiline_comment_end(lines, begin);
        if end >= lines.len() {
            sink.error(
                begin,
                Category::ReadabilityMultilineComment,
                5,
                "Could not find end of multi-line comment",
            );
            replace_with_placeholder(lines, begin, lines.len());
            return;
        }
        replace_with_placeholder(lines, begin, end + 1);
        lineix = end + 1;
    }
}

/// Flags `/* */` comments and string literals that span lines; the
/// line-at-a-time checks cannot see through either, so both get a
/// high-confidence warning instead of silently bogus results.
pub fn check_for_multiline_comments_and_strings(
    clean_lines: &CleansedLines,
    linenum: usize,
    sink: &mut ErrorSink,
) {
    let line = clean_lines.elided[linenum].replace("\\\\", "");

    if line.matches("/*").count() > line.matches("*/").count() {
        sink.error(
            linenum,
            Category::ReadabilityMultilineComment,
            5,
            "Complex multi-line /*...*/-style comment found. \
             Lint may give bogus warnings.  Consider replacing these with \
             //-style comments, with #if 0...#endif blocks, or with more \
             clearly structured multi-line comments.",
        );
    }

    let quotes = line.matches('"').count() as isize;
    let escaped = line.matches("\\\"").count() as isize;
    if (quotes - escaped).rem_euclid(2) == 1 {
        sink.error(
            linenum,
            Category::ReadabilityMultilineString,
            5,
            "Multi-line string (\"...\") found.  This lint script doesn't \
             do well with such strings, and may give bogus warnings.  \
             They're ugly and unnecessary, and you should use concatenation \
             instead\".",
        );
    }
}

#[cfg(test)]
#[path = "cleanse_tests.rs"]
mod tests;

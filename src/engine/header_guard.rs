use super::category::Category;
use super::file_info::FileInfo;
use super::sink::ErrorSink;

/// The expected `#ifndef` macro for a header: its repository-relative
/// path, upper-cased, with path punctuation mapped to underscores.
/// Emacs flymake copies (`foo_flymake.h`) guard as the original file.
#[must_use]
pub fn header_guard_variable(filename: &str) -> String {
    let filename = filename
        .strip_suffix("_flymake.h")
        .map_or_else(|| filename.to_string(), |stem| format!("{stem}.h"));
    FileInfo::new(&filename)
        .repository_name()
        .chars()
        .map(|c| {
            if matches!(c, '-' | '.' | '/' | '\\') || c.is_whitespace() {
                '_'
            } else {
                c.to_ascii_uppercase()
            }
        })
        .collect()
}

/// Validates the `#ifndef`/`#define`/`#endif` guard of a header file.
/// Runs on the raw padded lines, before comment stripping, so the
/// `#endif` comment is still visible. File-level problems are reported
/// at line 0.
pub fn check_for_header_guard(filename: &str, raw_lines: &[String], sink: &mut ErrorSink) {
    let cppvar = header_guard_variable(filename);
    let legacy = format!("{cppvar}_");

    let mut ifndef = String::new();
    let mut ifndef_linenum = 0;
    let mut define = String::new();
    let mut endif = String::new();
    let mut endif_linenum = 0;

    for (linenum, line) in raw_lines.iter().enumerate() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() >= 2 {
            if ifndef.is_empty() && tokens[0] == "#ifndef" {
                tokens[1].clone_into(&mut ifndef);
                ifndef_linenum = linenum;
            }
            if define.is_empty() && tokens[0] == "#define" {
                tokens[1].clone_into(&mut define);
            }
        }
        // The last #endif wins, whatever it guards.
        if line.starts_with("#endif") {
            line.clone_into(&mut endif);
            endif_linenum = linenum;
        }
    }

    if ifndef.is_empty() {
        sink.error(
            0,
            Category::BuildHeaderGuard,
            5,
            &format!("No #ifndef header guard found, suggested CPP variable is: {cppvar}"),
        );
        return;
    }
    if define.is_empty() {
        sink.error(
            0,
            Category::BuildHeaderGuard,
            5,
            &format!("No #define header guard found, suggested CPP variable is: {cppvar}"),
        );
        return;
    }

    // The guard may surface before the per-line scan, so pick up a
    // NOLINT on its line here.
    if ifndef != cppvar {
        let confidence = if ifndef == legacy { 0 } else { 5 };
        sink.parse_nolint(&raw_lines[ifndef_linenum], ifndef_linenum);
        sink.error(
            ifndef_linenum,
            Category::BuildHeaderGuard,
            confidence,
            &format!("#ifndef header guard has wrong style, please use: {cppvar}"),
        );
    }

    if define != ifndef {
        sink.error(
            0,
            Category::BuildHeaderGuard,
            5,
            &format!("#ifndef and #define don't match, suggested CPP variable is: {cppvar}"),
        );
        return;
    }

    if endif != format!("#endif  // {cppvar}") {
        let confidence = if endif == format!("#endif  // {legacy}") {
            0
        } else {
            5
        };
        sink.parse_nolint(&raw_lines[endif_linenum], endif_linenum);
        sink.error(
            endif_linenum,
            Category::BuildHeaderGuard,
            confidence,
            &format!("#endif line should be \"#endif  // {cppvar}\""),
        );
    }
}

#[cfg(test)]
#[path = "header_guard_tests.rs"]
mod tests;

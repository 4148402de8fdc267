//! The checking engine: a pipeline of line-level heuristics over one
//! file at a time. No preprocessing or parsing happens anywhere; every
//! check works on cleansed views of the raw lines, and every problem
//! found is a [`Finding`], never an error.

mod category;
mod classes;
mod cleanse;
mod file_info;
mod fn_length;
mod header_guard;
mod includes;
mod iwyu;
mod sink;
mod suppress;

pub use category::Category;
pub use classes::ClassStructureTracker;
pub use cleanse::{CleansedLines, cleanse_comments, remove_multiline_comments};
pub use file_info::{FileInfo, drop_common_suffixes};
pub use fn_length::FunctionLengthTracker;
pub use header_guard::{check_for_header_guard, header_guard_variable};
pub use includes::{IncludeCategory, IncludeChecker, IncludeState, classify_include};
pub use iwyu::{FileReader, FsFileReader, IncludeWhatYouUseResolver};
pub use sink::{ErrorSink, FilterRule, Finding, LintOptions};
pub use suppress::SuppressionRegistry;

/// Padding the driver puts around the file's lines so that vector
/// indices and human 1-based line numbers coincide.
const LINE_NUMBER_MARKER: &str = "// marker so line numbers and indices both start at 1";

/// Checks one file's lines and returns its findings in discovery order.
///
/// All tracker state is created here and dropped here; nothing carries
/// over between files, so callers are free to run files in parallel.
#[must_use]
pub fn process_file_data(
    filename: &str,
    file_extension: &str,
    lines: &[String],
    options: &LintOptions,
    reader: &dyn FileReader,
) -> Vec<Finding> {
    let mut padded = Vec::with_capacity(lines.len() + 2);
    padded.push(LINE_NUMBER_MARKER.to_string());
    padded.extend(lines.iter().cloned());
    padded.push(LINE_NUMBER_MARKER.to_string());

    let mut sink = ErrorSink::new(options);

    if file_extension == "h" {
        check_for_header_guard(filename, &padded, &mut sink);
    }

    remove_multiline_comments(&mut padded, &mut sink);
    let clean_lines = CleansedLines::new(&padded);

    let file_info = FileInfo::new(filename);
    let include_checker = IncludeChecker::new();
    let mut include_state = IncludeState::new();
    let mut class_tracker = ClassStructureTracker::new();
    let mut fn_tracker = FunctionLengthTracker::new();

    for linenum in 0..clean_lines.num_lines() {
        sink.parse_nolint(&clean_lines.raw_lines[linenum], linenum);
        fn_tracker.check_line(&clean_lines, linenum, options.verbose_level, &mut sink);
        cleanse::check_for_multiline_comments_and_strings(&clean_lines, linenum, &mut sink);
        include_checker.check_line(
            &file_info,
            &clean_lines.lines[linenum],
            linenum,
            &mut include_state,
            &mut sink,
        );
        class_tracker.check_line(&clean_lines.lines[linenum], linenum, &mut sink);
    }
    class_tracker.check_finished(&mut sink);

    let resolver = IncludeWhatYouUseResolver::new();
    resolver.check(filename, &clean_lines, &include_state, &mut sink, reader);

    sink.into_findings()
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

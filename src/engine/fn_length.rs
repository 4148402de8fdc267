use regex::Regex;

use super::category::Category;
use super::cleanse::CleansedLines;
use super::sink::ErrorSink;

/// Non-comment line count above which a normal function body is flagged
/// (at verbosity 0; the trigger doubles per verbosity level).
const NORMAL_TRIGGER: usize = 250;
/// Test methods are exempt up to a higher trigger since they tend to be
/// long but straight-line.
const TEST_TRIGGER: usize = 400;

struct FunctionState {
    in_a_function: bool,
    lines_in_function: usize,
    current_function: String,
}

/// Detects function definitions with a line-level heuristic and counts
/// the non-blank lines of their bodies.
pub struct FunctionLengthTracker {
    signature_re: Regex,
    macro_re: Regex,
    fn_name_re: Regex,
    params_re: Regex,
    end_re: Regex,
    state: FunctionState,
    normal_trigger: usize,
    test_trigger: usize,
}

impl Default for FunctionLengthTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl FunctionLengthTracker {
    /// # Panics
    /// Panics if the built-in regexes fail to compile.
    #[must_use]
    pub fn new() -> Self {
        Self {
            signature_re: Regex::new(r"^(\w(?:\w|::|\*|&|\s)*)\(").expect("Invalid regex"),
            macro_re: Regex::new(r"^[A-Z_]+$").expect("Invalid regex"),
            fn_name_re: Regex::new(r"((?:\w|:)*)\(").expect("Invalid regex"),
            params_re: Regex::new(r"(\(.*\))").expect("Invalid regex"),
            end_re: Regex::new(r"^\}\s*$").expect("Invalid regex"),
            state: FunctionState {
                in_a_function: false,
                lines_in_function: 0,
                current_function: String::new(),
            },
            normal_trigger: NORMAL_TRIGGER,
            test_trigger: TEST_TRIGGER,
        }
    }

    /// Shrinks the length triggers; tests use this to exercise the
    /// reporting without thousand-line fixtures.
    #[cfg(test)]
    pub(crate) const fn with_triggers(mut self, normal: usize, test: usize) -> Self {
        self.normal_trigger = normal;
        self.test_trigger = test;
        self
    }

    /// Feeds one comment-stripped line to the tracker. When a signature
    /// is seen, the following lines are scanned for the opening brace so
    /// declarations and trivial bodies are skipped.
    pub fn check_line(
        &mut self,
        clean_lines: &CleansedLines,
        linenum: usize,
        verbose_level: u8,
        sink: &mut ErrorSink,
    ) {
        let lines = &clean_lines.lines;
        let line = &lines[linenum];

        let mut starting_func = false;
        if let Some(caps) = self.signature_re.captures(line) {
            let function_name = caps[1].split_whitespace().last().unwrap_or("").to_string();
            // An all-caps name is assumed to be a macro invocation, not a
            // definition, except for the test macros whose bodies are
            // function bodies.
            if function_name == "TEST"
                || function_name == "TEST_F"
                || !self.macro_re.is_match(&function_name)
            {
                starting_func = true;
            }
        }

        if starting_func {
            let mut body_found = false;
            let mut joined_line = String::new();
            for start_line in lines.iter().skip(linenum) {
                joined_line.push(' ');
                joined_line.push_str(start_line.trim_start());
                if start_line.contains(';') || start_line.contains('}') {
                    // Declaration or one-line definition.
                    body_found = true;
                    break;
                }
                if start_line.contains('{') {
                    body_found = true;
                    let mut function = self
                        .fn_name_re
                        .captures(line)
                        .map_or_else(String::new, |caps| caps[1].to_string());
                    if function.starts_with("TEST") {
                        // Test names keep their parameter list.
                        if let Some(params) = self.params_re.captures(&joined_line) {
                            function.push_str(&params[1]);
                        }
                    } else {
                        function.push_str("()");
                    }
                    self.begin(function);
                    break;
                }
            }
            if !body_found {
                sink.error(
                    linenum,
                    Category::ReadabilityFnSize,
                    5,
                    "Lint failed to find start of function body.",
                );
            }
        } else if self.end_re.is_match(line) {
            self.check(linenum, verbose_level, sink);
            self.state.in_a_function = false;
            self.state.lines_in_function = 0;
        } else if !line.trim().is_empty() && self.state.in_a_function {
            self.state.lines_in_function += 1;
        }
    }

    fn begin(&mut self, function_name: String) {
        self.state.in_a_function = true;
        self.state.lines_in_function = 0;
        self.state.current_function = function_name;
    }

    fn check(&mut self, linenum: usize, verbose_level: u8, sink: &mut ErrorSink) {
        if !self.state.in_a_function {
            return;
        }
        let base_trigger = if self.state.current_function.starts_with("TEST")
            || self.state.current_function.starts_with("Test")
        {
            self.test_trigger
        } else {
            self.normal_trigger
        };
        let trigger = base_trigger << verbose_level.min(32);
        if self.state.lines_in_function > trigger {
            let ratio = self.state.lines_in_function / base_trigger;
            let error_level = if ratio >= 1 { ratio.ilog2().min(5) } else { 0 };
            sink.error(
                linenum,
                Category::ReadabilityFnSize,
                u8::try_from(error_level).unwrap_or(5),
                &format!(
                    "Small and focused functions are preferred: {} has {} non-comment lines \
                     (error triggered by exceeding {trigger} lines).",
                    self.state.current_function, self.state.lines_in_function
                ),
            );
        }
    }
}

#[cfg(test)]
#[path = "fn_length_tests.rs"]
mod tests;

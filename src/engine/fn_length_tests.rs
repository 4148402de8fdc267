use super::*;

use crate::engine::{Category, ErrorSink, Finding, LintOptions};

const TEST_NORMAL_TRIGGER: usize = 10;
const TEST_TEST_TRIGGER: usize = 25;

fn track_lengths(source: &[String], verbose_level: u8) -> Vec<Finding> {
    let options = LintOptions {
        verbose_level: 0,
        filters: Vec::new(),
    };
    let mut sink = ErrorSink::new(&options);
    let clean_lines = CleansedLines::new(source);
    let mut tracker =
        FunctionLengthTracker::new().with_triggers(TEST_NORMAL_TRIGGER, TEST_TEST_TRIGGER);
    for linenum in 0..clean_lines.num_lines() {
        tracker.check_line(&clean_lines, linenum, verbose_level, &mut sink);
    }
    sink.into_findings()
}

fn owned(source: &[&str]) -> Vec<String> {
    source.iter().map(ToString::to_string).collect()
}

fn function_of(body_lines: usize) -> Vec<String> {
    let mut lines = vec!["void test(int x) {".to_string()];
    for _ in 0..body_lines {
        lines.push("  this_is_just_a_test();".to_string());
    }
    lines.push("}".to_string());
    lines
}

fn track_generated(body_lines: usize, verbose_level: u8) -> Vec<Finding> {
    track_lengths(&function_of(body_lines), verbose_level)
}

#[test]
fn body_at_the_trigger_is_clean() {
    assert!(track_generated(TEST_NORMAL_TRIGGER, 0).is_empty());
}

#[test]
fn body_just_over_the_trigger_is_flagged_at_level_zero() {
    let findings = track_generated(TEST_NORMAL_TRIGGER + 1, 0);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].category, Category::ReadabilityFnSize);
    assert_eq!(findings[0].confidence, 0);
    assert_eq!(
        findings[0].message,
        "Small and focused functions are preferred: test() has 11 non-comment lines \
         (error triggered by exceeding 10 lines)."
    );
}

#[test]
fn confidence_climbs_with_each_doubling() {
    // count/base = 2 -> level 1
    let findings = track_generated(2 * TEST_NORMAL_TRIGGER, 0);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].confidence, 1);

    // count/base = 4 -> level 2
    let findings = track_generated(4 * TEST_NORMAL_TRIGGER, 0);
    assert_eq!(findings[0].confidence, 2);
}

#[test]
fn verbosity_doubles_the_trigger() {
    // Over the base trigger but under the doubled one.
    assert!(track_generated(2 * TEST_NORMAL_TRIGGER - 2, 1).is_empty());
    let findings = track_generated(2 * TEST_NORMAL_TRIGGER + 1, 1);
    assert_eq!(findings.len(), 1);
    assert!(
        findings[0]
            .message
            .contains("(error triggered by exceeding 20 lines)")
    );
}

#[test]
fn declarations_and_one_liners_are_ignored() {
    assert!(track_lengths(&owned(&["void decl(int x);"]), 0).is_empty());
    assert!(track_lengths(&owned(&["void tiny() { return; }"]), 0).is_empty());
}

#[test]
fn all_caps_names_are_treated_as_macros() {
    let mut lines = vec!["MY_MACRO(arg)".to_string(), "{".to_string()];
    for _ in 0..20 {
        lines.push("  this_is_just_a_test();".to_string());
    }
    lines.push("}".to_string());
    assert!(track_lengths(&lines, 0).is_empty());
}

#[test]
fn test_macros_keep_their_parameter_list() {
    let mut lines = vec!["TEST_F(FixtureTest, Grows) {".to_string()];
    for _ in 0..=TEST_TEST_TRIGGER {
        lines.push("  EXPECT_TRUE(ok);".to_string());
    }
    lines.push("}".to_string());
    let findings = track_lengths(&lines, 0);
    assert_eq!(findings.len(), 1);
    assert_eq!(
        findings[0].message,
        format!(
            "Small and focused functions are preferred: TEST_F(FixtureTest, Grows) has {} \
             non-comment lines (error triggered by exceeding {TEST_TEST_TRIGGER} lines).",
            TEST_TEST_TRIGGER + 1
        )
    );
}

#[test]
fn test_functions_use_the_higher_trigger() {
    // Over the normal trigger but under the test trigger.
    let mut lines = vec!["TEST_F(FixtureTest, Fits) {".to_string()];
    for _ in 0..TEST_NORMAL_TRIGGER + 2 {
        lines.push("  EXPECT_TRUE(ok);".to_string());
    }
    lines.push("}".to_string());
    assert!(track_lengths(&lines, 0).is_empty());
}

#[test]
fn blank_and_comment_lines_do_not_count() {
    let mut lines = vec!["void test(int x) {".to_string()];
    for _ in 0..TEST_NORMAL_TRIGGER {
        lines.push("  this_is_just_a_test();".to_string());
        lines.push(String::new());
        lines.push("  // commentary".to_string());
    }
    lines.push("}".to_string());
    assert!(track_lengths(&lines, 0).is_empty());
}

#[test]
fn missing_function_body_is_reported() {
    let findings = track_lengths(&owned(&["void unfinished()"]), 0);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].category, Category::ReadabilityFnSize);
    assert_eq!(findings[0].confidence, 5);
    assert_eq!(
        findings[0].message,
        "Lint failed to find start of function body."
    );
    assert_eq!(findings[0].line, 0);
}

#[test]
fn qualified_names_are_reported_in_full() {
    let mut lines = vec![
        "my_namespace::MyType*".to_string(),
        "my_namespace::MyFunction(int arg1, char* arg2)".to_string(),
        "{".to_string(),
    ];
    for _ in 0..=TEST_NORMAL_TRIGGER {
        lines.push("  this_is_just_a_test();".to_string());
    }
    lines.push("}".to_string());
    let findings = track_lengths(&lines, 0);
    assert_eq!(findings.len(), 1);
    assert!(
        findings[0]
            .message
            .contains("my_namespace::MyFunction() has")
    );
}

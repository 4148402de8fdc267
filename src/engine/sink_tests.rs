use super::*;

use crate::engine::Category;

fn options(verbose: u8, filters: Vec<FilterRule>) -> LintOptions {
    LintOptions {
        verbose_level: verbose,
        filters,
    }
}

#[test]
fn records_findings_above_threshold() {
    let opts = options(1, Vec::new());
    let mut sink = ErrorSink::new(&opts);
    sink.error(3, Category::BuildInclude, 4, "some problem");
    let findings = sink.into_findings();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].line, 3);
    assert_eq!(findings[0].category, Category::BuildInclude);
    assert_eq!(findings[0].confidence, 4);
}

#[test]
fn drops_findings_below_verbosity() {
    let opts = options(5, Vec::new());
    let mut sink = ErrorSink::new(&opts);
    sink.error(1, Category::BuildInclude, 4, "too quiet");
    assert!(sink.into_findings().is_empty());
}

#[test]
fn confidence_zero_survives_verbosity_zero() {
    let opts = options(0, Vec::new());
    let mut sink = ErrorSink::new(&opts);
    sink.error(1, Category::BuildHeaderGuard, 0, "legacy style");
    assert_eq!(sink.into_findings().len(), 1);
}

#[test]
fn deny_filter_drops_matching_prefix() {
    let opts = options(0, vec![FilterRule::Deny("build".to_string())]);
    let mut sink = ErrorSink::new(&opts);
    sink.error(1, Category::BuildInclude, 4, "filtered");
    sink.error(2, Category::RuntimeVirtual, 4, "kept");
    let findings = sink.into_findings();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].category, Category::RuntimeVirtual);
}

#[test]
fn later_allow_overrides_earlier_deny() {
    let opts = options(
        0,
        vec![
            FilterRule::Deny("build".to_string()),
            FilterRule::Allow("build/include".to_string()),
        ],
    );
    let mut sink = ErrorSink::new(&opts);
    sink.error(1, Category::BuildInclude, 4, "kept again");
    sink.error(2, Category::BuildClass, 5, "still filtered");
    let findings = sink.into_findings();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].category, Category::BuildInclude);
}

#[test]
fn later_deny_overrides_earlier_allow() {
    let opts = options(
        0,
        vec![
            FilterRule::Allow("build/include".to_string()),
            FilterRule::Deny("build".to_string()),
        ],
    );
    let mut sink = ErrorSink::new(&opts);
    sink.error(1, Category::BuildInclude, 4, "filtered after all");
    assert!(sink.into_findings().is_empty());
}

#[test]
fn nolint_suppresses_only_its_line() {
    let opts = options(0, Vec::new());
    let mut sink = ErrorSink::new(&opts);
    sink.parse_nolint("int a;  // NOLINT", 7);
    sink.error(7, Category::BuildInclude, 4, "suppressed");
    sink.error(8, Category::BuildInclude, 4, "reported");
    let findings = sink.into_findings();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].line, 8);
}

#[test]
fn unknown_nolint_category_is_reported() {
    let opts = options(0, Vec::new());
    let mut sink = ErrorSink::new(&opts);
    sink.parse_nolint("int a;  // NOLINT(bogus/category)", 2);
    let findings = sink.into_findings();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].category, Category::ReadabilityNolint);
    assert_eq!(findings[0].confidence, 5);
    assert_eq!(
        findings[0].message,
        "Unknown NOLINT error category: bogus/category"
    );
}

#[test]
fn unknown_nolint_report_is_itself_suppressible() {
    let opts = options(0, Vec::new());
    let mut sink = ErrorSink::new(&opts);
    sink.parse_nolint("int a;  // NOLINT(readability/nolint,bogus)", 2);
    assert!(sink.into_findings().is_empty());
}

#[test]
fn parse_list_accepts_signed_entries() {
    let rules = FilterRule::parse_list("-build,+build/include").unwrap();
    assert_eq!(
        rules,
        vec![
            FilterRule::Deny("build".to_string()),
            FilterRule::Allow("build/include".to_string()),
        ]
    );
}

#[test]
fn parse_list_rejects_unsigned_entries() {
    assert!(FilterRule::parse_list("build").is_err());
}

#[test]
fn finding_display_matches_report_format() {
    let finding = Finding {
        line: 5,
        category: Category::ReadabilityFnSize,
        confidence: 3,
        message: "too long".to_string(),
    };
    assert_eq!(finding.to_string(), "too long  [readability/fn_size] [3]");
}

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::cargo_bin("style-guard").expect("binary should exist")
}

// ============================================================================
// Check Command Integration Tests
// ============================================================================

#[test]
fn check_clean_file_exits_success() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("clean.cc");
    fs::write(&file, "int main() {\n  return 0;\n}\n").unwrap();

    cmd()
        .arg("check")
        .arg(&file)
        .arg("--no-config")
        .assert()
        .success()
        .stderr(predicate::str::contains("Total errors found: 0"));
}

#[test]
fn check_duplicate_include_fails_with_a_report_line() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("dup.cc");
    fs::write(&file, "#include <string>\n#include <string>\n").unwrap();

    cmd()
        .arg("check")
        .arg(&file)
        .arg("--no-config")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("already included at"))
        .stdout(predicate::str::contains("[build/include] [4]"))
        .stderr(predicate::str::contains("Total errors found: 1"));
}

#[test]
fn check_header_without_guard_fails() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("bare.h");
    fs::write(&file, "int a;\n").unwrap();

    cmd()
        .arg("check")
        .arg(&file)
        .arg("--no-config")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("No #ifndef header guard found"));
}

#[test]
fn check_vs7_format_parenthesizes_the_line() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("dup.cc");
    fs::write(&file, "#include <string>\n#include <string>\n").unwrap();

    cmd()
        .arg("check")
        .arg(&file)
        .arg("--no-config")
        .args(["--format", "vs7"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("(2):"));
}

#[test]
fn check_json_format_emits_machine_readable_output() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("dup.cc");
    fs::write(&file, "#include <string>\n#include <string>\n").unwrap();

    let output = cmd()
        .arg("check")
        .arg(&file)
        .arg("--no-config")
        .args(["--format", "json"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Total errors found").not())
        .get_output()
        .clone();

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["total"], 1);
    assert_eq!(parsed["findings"][0]["category"], "build/include");
    assert_eq!(parsed["findings"][0]["line"], 2);
}

#[test]
fn check_verbosity_hides_low_confidence_findings() {
    let temp_dir = TempDir::new().unwrap();
    // The repository marker makes the expected guard macro LEGACY_H.
    fs::create_dir(temp_dir.path().join(".git")).unwrap();
    let file = temp_dir.path().join("legacy.h");
    // Legacy trailing-underscore guard reports at confidence 0.
    fs::write(
        &file,
        "#ifndef LEGACY_H_\n#define LEGACY_H_\n#endif  // LEGACY_H_\n",
    )
    .unwrap();

    cmd()
        .arg("check")
        .arg(&file)
        .arg("--no-config")
        .assert()
        .success();

    cmd()
        .arg("check")
        .arg(&file)
        .arg("--no-config")
        .args(["--verbose", "0"])
        .assert()
        .code(1);
}

#[test]
fn check_filters_drop_categories() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("dup.cc");
    fs::write(&file, "#include <string>\n#include <string>\n").unwrap();

    cmd()
        .arg("check")
        .arg(&file)
        .arg("--no-config")
        .arg("--filter=-build")
        .assert()
        .success();
}

#[test]
fn check_scans_directories_by_extension() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("dup.cc"),
        "#include <string>\n#include <string>\n",
    )
    .unwrap();
    fs::write(temp_dir.path().join("notes.txt"), "#include <string>\n").unwrap();

    cmd()
        .arg("check")
        .arg(temp_dir.path())
        .arg("--no-config")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("dup.cc"))
        .stdout(predicate::str::contains("notes.txt").not());
}

#[test]
fn check_exclude_globs_skip_files() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("dup.cc"),
        "#include <string>\n#include <string>\n",
    )
    .unwrap();

    cmd()
        .arg("check")
        .arg(temp_dir.path())
        .arg("--no-config")
        .args(["--exclude", "**/dup.cc"])
        .assert()
        .success();
}

#[test]
fn check_nonexistent_path_is_a_usage_error() {
    cmd()
        .arg("check")
        .arg("/no/such/path.cc")
        .arg("--no-config")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Path does not exist"));
}

#[test]
fn check_reads_an_explicit_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("style-guard.toml");
    fs::write(&config, "filters = [\"-build\"]\n").unwrap();
    let file = temp_dir.path().join("dup.cc");
    fs::write(&file, "#include <string>\n#include <string>\n").unwrap();

    cmd()
        .arg("check")
        .arg(&file)
        .args(["--config", config.to_str().unwrap()])
        .assert()
        .success();
}

#[test]
fn check_cli_filter_overrides_config_filter() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("style-guard.toml");
    fs::write(&config, "filters = [\"-build\"]\n").unwrap();
    let file = temp_dir.path().join("dup.cc");
    fs::write(&file, "#include <string>\n#include <string>\n").unwrap();

    // CLI rules run after config rules, so the restore wins.
    cmd()
        .arg("check")
        .arg(&file)
        .args(["--config", config.to_str().unwrap()])
        .arg("--filter=+build/include")
        .assert()
        .code(1);
}

#[test]
fn check_invalid_config_is_a_usage_error() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("style-guard.toml");
    fs::write(&config, "verbose = 9\n").unwrap();
    let file = temp_dir.path().join("a.cc");
    fs::write(&file, "int a;\n").unwrap();

    cmd()
        .arg("check")
        .arg(&file)
        .args(["--config", config.to_str().unwrap()])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Error:"));
}

// ============================================================================
// Sort-Includes Command Integration Tests
// ============================================================================

#[test]
fn sort_includes_rewrites_the_file_in_place() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("mixed.cc");
    fs::write(&file, "#include <string>\n#include <algorithm>\nint x;\n").unwrap();

    cmd().arg("sort-includes").arg(&file).assert().success();

    let content = fs::read_to_string(&file).unwrap();
    assert_eq!(
        content,
        "#include <algorithm>\n#include <string>\n\nint x;\n"
    );
}

#[test]
fn sort_includes_no_edit_leaves_the_file_alone() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("mixed.cc");
    let original = "#include <string>\n#include <algorithm>\nint x;\n";
    fs::write(&file, original).unwrap();

    cmd()
        .arg("sort-includes")
        .arg(&file)
        .args(["--no-edit", "--show-diff"])
        .assert()
        .success()
        .stderr(predicate::str::contains("+#include <algorithm>"));

    assert_eq!(fs::read_to_string(&file).unwrap(), original);
}

#[test]
fn sort_includes_sorted_file_is_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("sorted.cc");
    let original = "#include <algorithm>\n#include <string>\n\nint x;\n";
    fs::write(&file, original).unwrap();

    cmd().arg("sort-includes").arg(&file).assert().success();
    assert_eq!(fs::read_to_string(&file).unwrap(), original);
}

#[test]
fn sort_includes_inconsistent_duplicate_fails_and_skips() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("dup.cc");
    let original = "#include <string>\n#include <string>  // twice\nint x;\n";
    fs::write(&file, original).unwrap();

    cmd()
        .arg("sort-includes")
        .arg(&file)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("ERROR:"))
        .stderr(predicate::str::contains("inconsistently"));

    assert_eq!(fs::read_to_string(&file).unwrap(), original);
}

#[test]
fn sort_includes_consistent_duplicate_warns_and_dedups() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("dup.cc");
    fs::write(&file, "#include <string>\n#include <string>\nint x;\n").unwrap();

    cmd()
        .arg("sort-includes")
        .arg(&file)
        .assert()
        .success()
        .stderr(predicate::str::contains("WARNING:"))
        .stderr(predicate::str::contains("consistently"));

    assert_eq!(
        fs::read_to_string(&file).unwrap(),
        "#include <string>\n\nint x;\n"
    );
}

use super::*;

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(args)
}

#[test]
fn check_requires_a_path() {
    assert!(parse(&["style-guard", "check"]).is_err());
    assert!(parse(&["style-guard", "check", "src"]).is_ok());
}

#[test]
fn check_collects_all_options() {
    let cli = parse(&[
        "style-guard",
        "check",
        "--verbose",
        "3",
        "--filter",
        "-build",
        "--filter",
        "+build/include",
        "--format",
        "emacs",
        "--ext",
        "cc",
        "--ext",
        "h",
        "--exclude",
        "third_party/**",
        "a.cc",
        "b.cc",
    ])
    .unwrap();
    let Commands::Check(args) = cli.command else {
        panic!("expected check subcommand");
    };
    assert_eq!(args.paths, vec![PathBuf::from("a.cc"), PathBuf::from("b.cc")]);
    assert_eq!(args.verbose, Some(3));
    assert_eq!(args.filter, vec!["-build", "+build/include"]);
    assert_eq!(args.format.as_deref(), Some("emacs"));
    assert_eq!(args.extensions, vec!["cc", "h"]);
    assert_eq!(args.exclude, vec!["third_party/**"]);
    assert!(!args.no_config);
}

#[test]
fn filter_values_may_lead_with_a_dash() {
    // Deny rules arrive as separate `--filter -cat` tokens, not only in
    // the `--filter=-cat` spelling.
    let cli = parse(&["style-guard", "check", "--filter", "-build", "a.cc"]).unwrap();
    let Commands::Check(args) = cli.command else {
        panic!("expected check subcommand");
    };
    assert_eq!(args.filter, vec!["-build"]);
}

#[test]
fn verbose_is_range_checked() {
    assert!(parse(&["style-guard", "check", "--verbose", "5", "a.cc"]).is_ok());
    assert!(parse(&["style-guard", "check", "--verbose", "6", "a.cc"]).is_err());
}

#[test]
fn format_rejects_unknown_names() {
    assert!(parse(&["style-guard", "check", "--format", "xml", "a.cc"]).is_err());
}

#[test]
fn config_flags_parse() {
    let cli = parse(&["style-guard", "check", "--config", "my.toml", "a.cc"]).unwrap();
    let Commands::Check(args) = cli.command else {
        panic!("expected check subcommand");
    };
    assert_eq!(args.config, Some(PathBuf::from("my.toml")));

    let cli = parse(&["style-guard", "check", "--no-config", "a.cc"]).unwrap();
    let Commands::Check(args) = cli.command else {
        panic!("expected check subcommand");
    };
    assert!(args.no_config);
}

#[test]
fn sort_includes_parses_its_flags() {
    let cli = parse(&[
        "style-guard",
        "sort-includes",
        "--show-diff",
        "--no-edit",
        "a.cc",
    ])
    .unwrap();
    let Commands::SortIncludes(args) = cli.command else {
        panic!("expected sort-includes subcommand");
    };
    assert_eq!(args.paths, vec![PathBuf::from("a.cc")]);
    assert!(args.show_diff);
    assert!(args.no_edit);
}

#[test]
fn sort_includes_requires_a_path() {
    assert!(parse(&["style-guard", "sort-includes"]).is_err());
}

use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::Parser;
use rayon::prelude::*;

use style_guard::cli::{CheckArgs, Cli, Commands, SortIncludesArgs};
use style_guard::config::StyleConfig;
use style_guard::engine::{self, FilterRule, FsFileReader, LintOptions};
use style_guard::error::{Result, StyleGuardError};
use style_guard::output::{FileReport, OutputFormat, create_formatter};
use style_guard::reorder::{FsProjectRoot, IncludeSorter, render_diff};
use style_guard::scanner::{DirectoryScanner, FileScanner, SourceFilter};
use style_guard::{EXIT_CONFIG_ERROR, EXIT_FINDINGS, EXIT_SUCCESS};

fn main() {
    let cli = Cli::parse();
    let exit_code = match cli.command {
        Commands::Check(args) => run_check(&args).unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }),
        Commands::SortIncludes(args) => run_sort_includes(&args).unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }),
    };
    std::process::exit(exit_code);
}

fn run_check(args: &CheckArgs) -> Result<i32> {
    let config = load_config(args)?;

    let verbose = args.verbose.or(config.verbose).unwrap_or(1);
    let mut filters = Vec::new();
    for spec in config.filters.iter().chain(args.filter.iter()) {
        filters.extend(FilterRule::parse_list(spec)?);
    }
    let options = LintOptions {
        verbose_level: verbose,
        filters,
    };

    let format_name = args
        .format
        .clone()
        .or_else(|| config.format.clone())
        .unwrap_or_else(|| "default".to_string());
    let format = OutputFormat::from_str(&format_name)?;

    // An empty list falls back to the C/C++ defaults inside the filter.
    let extensions = if args.extensions.is_empty() {
        config.extensions.clone()
    } else {
        args.extensions.clone()
    };
    let mut exclude = config.exclude.clone();
    exclude.extend(args.exclude.iter().cloned());

    let files = discover_files(&args.paths, &extensions, &exclude)?;

    let reader = FsFileReader;
    let mut reports: Vec<FileReport> = files
        .par_iter()
        .map(|path| check_one_file(path, &options, &reader))
        .collect::<Result<Vec<_>>>()?;
    reports.sort_by(|a, b| a.path.cmp(&b.path));

    let total: usize = reports.iter().map(|report| report.findings.len()).sum();
    let formatter = create_formatter(format);
    print!("{}", formatter.format(&reports)?);
    if format != OutputFormat::Json {
        eprintln!("Total errors found: {total}");
    }

    Ok(if total == 0 { EXIT_SUCCESS } else { EXIT_FINDINGS })
}

fn load_config(args: &CheckArgs) -> Result<StyleConfig> {
    if args.no_config {
        return Ok(StyleConfig::default());
    }
    if let Some(path) = &args.config {
        return StyleConfig::load(path);
    }
    let cwd = std::env::current_dir()?;
    Ok(StyleConfig::discover(&cwd)?.unwrap_or_default())
}

fn discover_files(
    paths: &[PathBuf],
    extensions: &[String],
    exclude: &[String],
) -> Result<Vec<PathBuf>> {
    let filter = SourceFilter::new(extensions, exclude)?;
    let scanner = DirectoryScanner::new(filter);
    let mut files = Vec::new();
    for path in paths {
        if !path.exists() {
            return Err(StyleGuardError::Config(format!(
                "Path does not exist: {}",
                path.display()
            )));
        }
        files.extend(scanner.scan(path)?);
    }
    files.sort();
    files.dedup();
    Ok(files)
}

fn check_one_file(path: &Path, options: &LintOptions, reader: &FsFileReader) -> Result<FileReport> {
    let lines = read_lines(path)?;
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_string();
    let display_path = path.to_string_lossy().replace('\\', "/");
    let findings = engine::process_file_data(&display_path, &extension, &lines, options, reader);
    Ok(FileReport {
        path: display_path,
        findings,
    })
}

/// Reads a file as lines, mapping invalid UTF-8 to replacement
/// characters instead of failing the whole run.
fn read_lines(path: &Path) -> Result<Vec<String>> {
    let bytes = std::fs::read(path).map_err(|source| StyleGuardError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes)
        .lines()
        .map(str::to_string)
        .collect())
}

fn run_sort_includes(args: &SortIncludesArgs) -> Result<i32> {
    let sorter = IncludeSorter::new();
    let predicate = FsProjectRoot;
    let mut had_errors = false;

    for path in &args.paths {
        let lines = read_lines(path)?;
        let display_path = path.to_string_lossy().replace('\\', "/");
        let mut warnings = Vec::new();
        let result = sorter.sort_includes(&display_path, &lines, &predicate, &mut warnings);
        // Warnings collected before an abort still get reported.
        for warning in &warnings {
            eprintln!("WARNING: {warning}");
        }
        match result {
            Ok(new_lines) => {
                if new_lines == lines {
                    continue;
                }
                if args.show_diff {
                    eprint!("{}", render_diff(&display_path, &lines, &new_lines));
                }
                if !args.no_edit {
                    std::fs::write(path, format!("{}\n", new_lines.join("\n")))?;
                }
            }
            Err(e @ StyleGuardError::InconsistentInclude { .. }) => {
                // Leave the file untouched and move on.
                eprintln!("ERROR: {e}");
                had_errors = true;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(if had_errors {
        EXIT_CONFIG_ERROR
    } else {
        EXIT_SUCCESS
    })
}

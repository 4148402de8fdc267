pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod output;
pub mod reorder;
pub mod scanner;

pub use error::{Result, StyleGuardError};

/// Exit code when every checked file is clean.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code when at least one finding survived filtering.
pub const EXIT_FINDINGS: i32 = 1;
/// Exit code for configuration or I/O errors.
pub const EXIT_CONFIG_ERROR: i32 = 2;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

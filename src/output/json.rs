use serde::Serialize;

use crate::engine::{Category, Finding};
use crate::error::Result;

use super::{FileReport, OutputFormatter};

#[derive(Serialize)]
struct JsonFinding<'a> {
    file: &'a str,
    line: usize,
    category: Category,
    confidence: u8,
    message: &'a str,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    findings: Vec<JsonFinding<'a>>,
    total: usize,
}

pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format(&self, reports: &[FileReport]) -> Result<String> {
        let findings: Vec<JsonFinding<'_>> = reports
            .iter()
            .flat_map(|report| {
                report.findings.iter().map(|finding: &Finding| JsonFinding {
                    file: &report.path,
                    line: finding.line,
                    category: finding.category,
                    confidence: finding.confidence,
                    message: &finding.message,
                })
            })
            .collect();
        let total = findings.len();
        let report = JsonReport { findings, total };
        Ok(serde_json::to_string_pretty(&report)?)
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;

use crate::analysis::Analysis;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::Path;

/// JSON reporter for programmatic output
pub struct JsonReporter<'a> {
    path: &'a Path,
}

impl<'a> JsonReporter<'a> {
    pub fn new(path: &'a Path) -> Self {
        Self { path }
    }

    pub fn write(&self, analysis: &Analysis) -> Result<()> {
        let report = JsonReport::from_analysis(analysis);
        let json = serde_json::to_string_pretty(&report).into_diagnostic()?;
        std::fs::write(self.path, json).into_diagnostic()
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    version: &'static str,
    unused: Vec<&'a str>,
    declared_count: usize,
    used_symbol_count: usize,
    files_scanned: usize,
    files_skipped: usize,
}

impl<'a> JsonReport<'a> {
    fn from_analysis(analysis: &'a Analysis) -> Self {
        Self {
            version: "1.0",
            unused: analysis.unused.iter().map(String::as_str).collect(),
            declared_count: analysis.declared.len(),
            used_symbol_count: analysis.used.len(),
            files_scanned: analysis.files_scanned,
            files_skipped: analysis.files_skipped,
        }
    }
}

mod json;
mod text;

pub use json::JsonReporter;
pub use text::{render_text, TextReporter};

use crate::analysis::Analysis;
use miette::IntoDiagnostic;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, error};

pub const TEXT_REPORT_NAME: &str = "unused-dependencies-report.txt";
pub const JSON_REPORT_NAME: &str = "unused-dependencies-report.json";

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Writes the analysis result into the output directory
pub struct Reporter {
    format: ReportFormat,
    output_dir: PathBuf,
}

impl Reporter {
    pub fn new(format: ReportFormat, output_dir: PathBuf) -> Self {
        Self { format, output_dir }
    }

    /// Path the report will be written to
    pub fn report_path(&self) -> PathBuf {
        let name = match self.format {
            ReportFormat::Text => TEXT_REPORT_NAME,
            ReportFormat::Json => JSON_REPORT_NAME,
        };
        self.output_dir.join(name)
    }

    /// Write the report and announce its location on stdout.
    ///
    /// A failed write is logged and yields `None`; nothing is announced.
    pub fn report(&self, analysis: &Analysis) -> Option<PathBuf> {
        let path = self.report_path();

        let written = std::fs::create_dir_all(&self.output_dir)
            .into_diagnostic()
            .and_then(|_| match self.format {
                ReportFormat::Text => TextReporter::new(&path).write(&analysis.unused),
                ReportFormat::Json => JsonReporter::new(&path).write(analysis),
            });

        match written {
            Ok(()) => {
                let path = absolute(&path);
                println!("Report generated: {}", path.display());
                Some(path)
            }
            Err(err) => {
                error!("Error writing report file: {}", absolute(&path).display());
                debug!("{:?}", err);
                None
            }
        }
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

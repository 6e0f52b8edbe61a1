use crate::analysis::UnusedDependencySet;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const EMPTY_LINE: &str = "No unused dependencies found.";
pub const HEADER_LINE: &str = "Unused dependencies detected:";

/// Render the report body, one dependency per line after the header
pub fn render_text(unused: &UnusedDependencySet) -> String {
    if unused.is_empty() {
        return format!("{}\n", EMPTY_LINE);
    }

    let mut out = format!("{}\n", HEADER_LINE);
    for name in unused {
        out.push_str(name);
        out.push('\n');
    }
    out
}

/// Plain-text reporter
pub struct TextReporter<'a> {
    path: &'a Path,
}

impl<'a> TextReporter<'a> {
    pub fn new(path: &'a Path) -> Self {
        Self { path }
    }

    pub fn write(&self, unused: &UnusedDependencySet) -> Result<()> {
        let mut writer = BufWriter::new(File::create(self.path).into_diagnostic()?);
        writer.write_all(render_text(unused).as_bytes()).into_diagnostic()?;
        writer.flush().into_diagnostic()
    }
}

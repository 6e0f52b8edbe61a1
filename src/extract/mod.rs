//! Symbol extraction
//!
//! Collects every imported path referenced by the project's source files.
//! The extraction strategy sits behind [`SymbolExtractor`] so the matcher
//! never depends on how imports were found.

mod java;
mod import_regex;

pub use java::TreeSitterImportExtractor;
pub use import_regex::RegexImportExtractor;

use crate::discovery::SourceFile;
use miette::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, error};

/// Every distinct imported path found across a run
pub type UsedSymbolSet = HashSet<String>;

/// Strategy for pulling referenced symbols out of source text
pub trait SymbolExtractor {
    /// Extract the fully qualified paths imported by `source`
    fn extract(&self, source: &str) -> Result<HashSet<String>>;
}

/// Available extraction strategies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtractorKind {
    /// Single-line `import a.b.C;` regular expression
    #[default]
    Regex,
    /// Java grammar via tree-sitter
    TreeSitter,
}

impl ExtractorKind {
    pub fn build(self) -> Box<dyn SymbolExtractor> {
        match self {
            ExtractorKind::Regex => Box::new(RegexImportExtractor::new()),
            ExtractorKind::TreeSitter => Box::new(TreeSitterImportExtractor::new()),
        }
    }
}

/// Outcome of running an extractor over a set of files
#[derive(Debug, Default)]
pub struct Extraction {
    pub symbols: UsedSymbolSet,
    /// Files read and processed
    pub files_scanned: usize,
    /// Files skipped because they could not be read or parsed
    pub files_skipped: usize,
}

/// Run `extractor` over every file and union the results.
///
/// A file that cannot be read is logged and skipped; symbols already
/// collected from other files are kept.
pub fn extract_used_symbols(files: &[SourceFile], extractor: &dyn SymbolExtractor) -> Extraction {
    let mut extraction = Extraction::default();

    for file in files {
        let symbols = file
            .read_contents()
            .and_then(|contents| extractor.extract(&contents));

        match symbols {
            Ok(symbols) => {
                debug!("{}: {} imports", file.path.display(), symbols.len());
                extraction.symbols.extend(symbols);
                extraction.files_scanned += 1;
            }
            Err(err) => {
                error!("Error reading file: {}", file.path.display());
                debug!("{:?}", err);
                extraction.files_skipped += 1;
            }
        }
    }

    extraction
}

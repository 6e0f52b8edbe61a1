mod matcher;

pub use matcher::{find_unused, trailing_segment, UnusedDependencySet};

use crate::discovery::FileFinder;
use crate::extract::{extract_used_symbols, SymbolExtractor, UsedSymbolSet};
use crate::project::Configuration;
use crate::registry::{read_declared_dependencies, DeclaredDependencySet};
use globset::GlobSet;
use std::path::PathBuf;
use tracing::{debug, info};

/// Result of one analysis run
#[derive(Debug)]
pub struct Analysis {
    pub used: UsedSymbolSet,
    pub declared: DeclaredDependencySet,
    pub unused: UnusedDependencySet,
    pub files_scanned: usize,
    pub files_skipped: usize,
}

impl Analysis {
    /// Drop unused names matching any of the retain patterns
    pub fn retain(mut self, patterns: &GlobSet) -> Self {
        if !patterns.is_empty() {
            self.unused.retain(|name| {
                let keep = !patterns.is_match(name);
                if !keep {
                    debug!("Retaining {} by pattern", name);
                }
                keep
            });
        }
        self
    }
}

/// Run the whole analysis over explicit inputs.
///
/// Symbol extraction and the registry read work independently; the matcher
/// combines them. Unreadable files are skipped, so this never fails.
pub fn analyze(
    finder: &FileFinder,
    extractor: &dyn SymbolExtractor,
    source_dirs: &[PathBuf],
    configurations: &[Configuration],
) -> Analysis {
    let files = finder.find_files(source_dirs);
    let extraction = extract_used_symbols(&files, extractor);
    info!(
        "Extracted {} imported symbols from {} files ({} skipped)",
        extraction.symbols.len(),
        extraction.files_scanned,
        extraction.files_skipped
    );

    let declared = read_declared_dependencies(configurations);
    info!(
        "Found {} declared dependencies in {} configurations",
        declared.len(),
        configurations.len()
    );

    let unused = find_unused(&extraction.symbols, &declared);

    Analysis {
        used: extraction.symbols,
        declared,
        unused,
        files_scanned: extraction.files_scanned,
        files_skipped: extraction.files_skipped,
    }
}

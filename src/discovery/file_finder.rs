use crate::config::Config;
use globset::GlobSet;
use ignore::WalkBuilder;
use miette::{IntoDiagnostic, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

/// Version control metadata directories, never part of a source tree
const VCS_DIRS: &[&str] = &[".git", ".svn", ".hg", ".bzr", "CVS", "SCCS", "_darcs"];

/// Represents a discovered source file
///
/// Contents are not retained; they are read once by the extractor and dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Absolute path to the file
    pub path: PathBuf,
}

impl SourceFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Read the file contents
    pub fn read_contents(&self) -> Result<String> {
        std::fs::read_to_string(&self.path).into_diagnostic()
    }
}

/// File finder for discovering source files under a set of source directories
pub struct FileFinder<'a> {
    config: &'a Config,
    excludes: GlobSet,
}

impl<'a> FileFinder<'a> {
    pub fn new(config: &'a Config) -> Result<Self> {
        Ok(Self {
            config,
            excludes: config.exclude_set()?,
        })
    }

    /// Find all recognized source files in the given directories
    pub fn find_files(&self, source_dirs: &[PathBuf]) -> Vec<SourceFile> {
        let files: Vec<SourceFile> = source_dirs
            .iter()
            .flat_map(|dir| self.scan_directory(dir))
            .collect();

        debug!("Found {} source files in {} directories", files.len(), source_dirs.len());
        files
    }

    /// Scan a single directory for source files
    fn scan_directory(&self, dir: &Path) -> Vec<SourceFile> {
        if !dir.exists() {
            trace!("Source directory does not exist: {}", dir.display());
            return Vec::new();
        }

        let gitignore = self.config.respect_gitignore;
        let walker = WalkBuilder::new(dir)
            .standard_filters(false)
            .hidden(false)          // Dot-files are still sources
            .git_ignore(gitignore)
            .git_global(gitignore)
            .git_exclude(gitignore)
            .parents(gitignore)
            .follow_links(false)
            .filter_entry(|entry| {
                !(entry.file_type().is_some_and(|t| t.is_dir())
                    && VCS_DIRS.iter().any(|vcs| entry.file_name() == *vcs))
            })
            .build();

        walker
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    warn!("Skipping unreadable entry under {}: {}", dir.display(), err);
                    None
                }
            })
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .filter_map(|entry| {
                let path = entry.path();
                let relative = path.strip_prefix(dir).unwrap_or(path);

                if self.excludes.is_match(path) || self.excludes.is_match(relative) {
                    trace!("Excluding: {}", path.display());
                    return None;
                }

                if !self.config.is_source_file(path) {
                    return None;
                }

                trace!("Found source file: {}", path.display());
                Some(SourceFile::new(path.to_path_buf()))
            })
            .collect()
    }
}

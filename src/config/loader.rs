use crate::extract::ExtractorKind;
use crate::report::ReportFormat;
use globset::{Glob, GlobSet, GlobSetBuilder};
use miette::{IntoDiagnostic, Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for a depsweep run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Source directories to scan, replacing the build file's source sets
    pub source_dirs: Vec<PathBuf>,

    /// Recognized source file extensions (without the leading dot)
    pub extensions: Vec<String>,

    /// Glob patterns for source paths to skip, matched against both the
    /// absolute path and the path relative to its source directory
    pub exclude: Vec<String>,

    /// Honor .gitignore files while walking source directories
    pub respect_gitignore: bool,

    /// Import extraction strategy
    pub extractor: ExtractorKind,

    /// Dependency names that are never reported, even when unmatched
    pub retain: Vec<String>,

    /// Report configuration
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Directory the report is written to; defaults to the build directory
    pub output_dir: Option<PathBuf>,

    /// Output format: text, json
    pub format: ReportFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_dirs: vec![],
            extensions: vec!["java".to_string()],
            exclude: vec![],
            respect_gitignore: false,
            extractor: ExtractorKind::default(),
            retain: vec![],
            report: ReportConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a file (YAML or TOML)
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        match extension {
            "yml" | "yaml" => serde_yaml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse YAML config"),
            "toml" => toml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse TOML config"),
            _ => {
                if let Ok(config) = serde_yaml::from_str(&contents) {
                    Ok(config)
                } else {
                    toml::from_str(&contents)
                        .into_diagnostic()
                        .wrap_err("Failed to parse config file")
                }
            }
        }
    }

    /// Try to load configuration from default locations in the project root
    pub fn from_default_locations(project_root: &Path) -> Result<Self> {
        let default_names = [
            ".depsweep.yml",
            ".depsweep.yaml",
            ".depsweep.toml",
            "depsweep.yml",
            "depsweep.yaml",
            "depsweep.toml",
        ];

        for name in &default_names {
            let path = project_root.join(name);
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Check whether a file name carries one of the recognized extensions
    pub fn is_source_file(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        self.extensions
            .iter()
            .any(|ext| name.ends_with(&format!(".{}", ext.trim_start_matches('.'))))
    }

    /// Compile the exclusion patterns
    pub fn exclude_set(&self) -> Result<GlobSet> {
        build_glob_set(&self.exclude).wrap_err("Invalid exclude pattern")
    }

    /// Compile the retain patterns
    pub fn retain_set(&self) -> Result<GlobSet> {
        build_glob_set(&self.retain).wrap_err("Invalid retain pattern")
    }

    /// Resolve the configured source directories against the project root
    pub fn resolved_source_dirs(&self, project_root: &Path) -> Vec<PathBuf> {
        self.source_dirs
            .iter()
            .map(|dir| project_root.join(dir))
            .collect()
    }
}

fn build_glob_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern)
            .into_diagnostic()
            .wrap_err_with(|| format!("Bad glob: {}", pattern))?;
        builder.add(glob);
    }
    builder.build().into_diagnostic()
}

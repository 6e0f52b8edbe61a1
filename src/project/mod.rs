//! Host project model
//!
//! A [`ProjectModel`] is the in-memory view of a build: where the sources
//! live, which configurations declare which dependencies, and where build
//! output goes. It is read once from `build.gradle(.kts)` or `pom.xml`.

mod gradle;
mod maven;

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors raised while loading a project model
#[derive(Error, Debug)]
pub enum ProjectError {
    #[error("No build.gradle.kts, build.gradle or pom.xml found in {0}")]
    NoBuildFile(PathBuf),
    #[error("Failed to read build file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse {path}: {message}")]
    Xml { path: PathBuf, message: String },
}

/// Which build tool a project model was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildTool {
    Gradle,
    Maven,
}

/// One build-declared dependency
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dependency {
    /// External module coordinate (`group:name:version`)
    Module {
        group: Option<String>,
        name: String,
        version: Option<String>,
    },
    /// Reference to another project of the same build (`:core:util`)
    Project { path: String },
    /// File collection, e.g. `files('libs/a.jar')`
    Files { notation: String },
}

impl Dependency {
    /// Build a module dependency from `group:name[:version[:classifier]][@ext]`
    pub fn from_notation(notation: &str) -> Self {
        let notation = notation.split('@').next().unwrap_or(notation);
        let parts: Vec<&str> = notation.split(':').collect();
        if let [group, name, rest @ ..] = parts.as_slice() {
            Dependency::Module {
                group: Some(group.to_string()).filter(|g| !g.is_empty()),
                name: name.to_string(),
                version: rest.first().map(|v| v.to_string()).filter(|v| !v.is_empty()),
            }
        } else {
            Dependency::Module {
                group: None,
                name: notation.to_string(),
                version: None,
            }
        }
    }

    /// Short name used for matching, if the dependency has a module identity
    pub fn module_name(&self) -> Option<&str> {
        match self {
            Dependency::Module { name, .. } => Some(name),
            Dependency::Project { path } => path.rsplit(':').next().filter(|n| !n.is_empty()),
            Dependency::Files { .. } => None,
        }
    }
}

/// A named grouping of dependencies (`implementation`, `test`, ...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub name: String,
    pub dependencies: Vec<Dependency>,
}

impl Configuration {
    pub fn new(name: impl Into<String>, dependencies: Vec<Dependency>) -> Self {
        Self {
            name: name.into(),
            dependencies,
        }
    }
}

/// A named group of source directories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSet {
    pub name: String,
    pub src_dirs: Vec<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct ProjectModel {
    pub root: PathBuf,
    pub build_tool: BuildTool,
    pub build_dir: PathBuf,
    pub source_sets: Vec<SourceSet>,
    pub configurations: Vec<Configuration>,
}

impl ProjectModel {
    /// Load the model from the build file found in `root`
    pub fn load(root: &Path) -> Result<Self, ProjectError> {
        for name in ["build.gradle.kts", "build.gradle"] {
            let path = root.join(name);
            if path.is_file() {
                debug!("Reading Gradle build script: {}", path.display());
                let script = read_build_file(&path)?;
                return Ok(gradle::load(root, &script));
            }
        }

        let pom = root.join("pom.xml");
        if pom.is_file() {
            debug!("Reading Maven POM: {}", pom.display());
            let contents = read_build_file(&pom)?;
            return maven::load(root, &contents).map_err(|message| ProjectError::Xml {
                path: pom,
                message,
            });
        }

        Err(ProjectError::NoBuildFile(root.to_path_buf()))
    }

    /// Every source directory across all source sets
    pub fn source_dirs(&self) -> Vec<PathBuf> {
        self.source_sets
            .iter()
            .flat_map(|set| set.src_dirs.iter().cloned())
            .collect()
    }
}

fn read_build_file(path: &Path) -> Result<String, ProjectError> {
    std::fs::read_to_string(path).map_err(|source| ProjectError::Io {
        path: path.to_path_buf(),
        source,
    })
}

//! depsweep - Find declared build dependencies that the sources never import
//!
//! # Architecture
//!
//! The analysis pipeline consists of:
//! 1. **Project Model** - Read source sets and dependency configurations from
//!    `build.gradle(.kts)` or `pom.xml`
//! 2. **Symbol Extraction** - Collect every imported path from the source sets
//! 3. **Registry** - Collect the short names of declared module dependencies
//! 4. **Matching** - Remove every declared name equal to the trailing segment
//!    of some imported path
//! 5. **Reporting** - Write `unused-dependencies-report.txt` to the build directory

pub mod config;
pub mod discovery;
pub mod extract;
pub mod project;
pub mod registry;
pub mod analysis;
pub mod report;

pub use config::Config;
pub use discovery::{FileFinder, SourceFile};
pub use extract::{ExtractorKind, RegexImportExtractor, SymbolExtractor, TreeSitterImportExtractor};
pub use project::{Configuration, Dependency, ProjectError, ProjectModel, SourceSet};
pub use registry::read_declared_dependencies;
pub use analysis::{analyze, find_unused, Analysis};
pub use report::{ReportFormat, Reporter};

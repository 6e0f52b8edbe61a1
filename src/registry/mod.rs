//! Declared dependency registry
//!
//! Flattens every configuration into the set of short names carried by
//! dependencies with a module identity. File dependencies are skipped.

use crate::project::Configuration;
use std::collections::BTreeSet;
use tracing::trace;

/// Short names of every declared module dependency
pub type DeclaredDependencySet = BTreeSet<String>;

/// Collect the short names declared across all configurations
pub fn read_declared_dependencies(configurations: &[Configuration]) -> DeclaredDependencySet {
    configurations
        .iter()
        .flat_map(|configuration| {
            configuration.dependencies.iter().filter_map(move |dependency| {
                let name = dependency.module_name();
                if name.is_none() {
                    trace!("{}: skipping {:?}", configuration.name, dependency);
                }
                name
            })
        })
        .map(str::to_string)
        .collect()
}

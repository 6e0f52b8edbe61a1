// Maven POM reader
//
// Only `/project/dependencies/dependency` entries are declarations of the
// project; `dependencyManagement` and plugin dependencies are skipped.
// Each `<scope>` becomes a configuration, `compile` when absent.

use super::{BuildTool, Configuration, Dependency, ProjectModel, SourceSet};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::path::{Path, PathBuf};

const DEPENDENCY: [&str; 3] = ["project", "dependencies", "dependency"];

#[derive(Default)]
struct PendingDependency {
    group: Option<String>,
    artifact: Option<String>,
    version: Option<String>,
    scope: Option<String>,
}

#[derive(Default)]
struct BuildSection {
    source_directory: Option<String>,
    test_source_directory: Option<String>,
    directory: Option<String>,
}

pub(super) fn load(root: &Path, contents: &str) -> Result<ProjectModel, String> {
    let mut reader = Reader::from_str(contents);
    reader.trim_text(true);

    let mut path: Vec<String> = Vec::new();
    let mut pending: Option<PendingDependency> = None;
    let mut build = BuildSection::default();
    let mut configurations: Vec<Configuration> = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                path.push(String::from_utf8_lossy(e.local_name().as_ref()).to_string());
                if path == DEPENDENCY {
                    pending = Some(PendingDependency::default());
                }
            }
            Ok(Event::End(_)) => {
                if path == DEPENDENCY {
                    if let Some(dependency) = pending.take() {
                        push_dependency(&mut configurations, dependency);
                    }
                }
                path.pop();
            }
            Ok(Event::Text(ref e)) => {
                let text = e.unescape().map_err(|err| err.to_string())?.to_string();
                let segments: Vec<&str> = path.iter().map(String::as_str).collect();
                match segments.as_slice() {
                    ["project", "dependencies", "dependency", field] => {
                        if let Some(dependency) = pending.as_mut() {
                            match *field {
                                "groupId" => dependency.group = Some(text),
                                "artifactId" => dependency.artifact = Some(text),
                                "version" => dependency.version = Some(text),
                                "scope" => dependency.scope = Some(text),
                                _ => {}
                            }
                        }
                    }
                    ["project", "build", "sourceDirectory"] => build.source_directory = Some(text),
                    ["project", "build", "testSourceDirectory"] => {
                        build.test_source_directory = Some(text)
                    }
                    ["project", "build", "directory"] => build.directory = Some(text),
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => {
                return Err(format!("{} at position {}", err, reader.buffer_position()));
            }
            _ => {}
        }
        buf.clear();
    }

    let source_dir = |configured: Option<String>, default: &str| {
        configured
            .map(|dir| resolve(root, &dir))
            .unwrap_or_else(|| root.join(default))
    };

    Ok(ProjectModel {
        root: root.to_path_buf(),
        build_tool: BuildTool::Maven,
        build_dir: build
            .directory
            .map(|dir| resolve(root, &dir))
            .unwrap_or_else(|| root.join("target")),
        source_sets: vec![
            SourceSet {
                name: "main".to_string(),
                src_dirs: vec![source_dir(build.source_directory, "src/main/java")],
            },
            SourceSet {
                name: "test".to_string(),
                src_dirs: vec![source_dir(build.test_source_directory, "src/test/java")],
            },
        ],
        configurations,
    })
}

fn push_dependency(configurations: &mut Vec<Configuration>, pending: PendingDependency) {
    let Some(name) = pending.artifact else {
        return;
    };
    let scope = pending.scope.unwrap_or_else(|| "compile".to_string());
    let dependency = Dependency::Module {
        group: pending.group,
        name,
        version: pending.version,
    };

    match configurations.iter_mut().find(|c| c.name == scope) {
        Some(configuration) => configuration.dependencies.push(dependency),
        None => configurations.push(Configuration::new(scope, vec![dependency])),
    }
}

/// Resolve a POM path, expanding the basedir properties
fn resolve(root: &Path, raw: &str) -> PathBuf {
    let root_str = root.to_string_lossy();
    let expanded = raw
        .replace("${project.basedir}", &root_str)
        .replace("${basedir}", &root_str);
    root.join(expanded)
}

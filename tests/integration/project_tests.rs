//! Project model tests against the fixture builds

use depsweep::analysis::analyze;
use depsweep::config::Config;
use depsweep::discovery::FileFinder;
use depsweep::extract::{ExtractorKind, RegexImportExtractor};
use depsweep::project::{BuildTool, ProjectModel};
use depsweep::registry::read_declared_dependencies;
use std::path::PathBuf;

/// Get the path to the test fixtures directory
fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn names<I: IntoIterator<Item = String>>(set: I) -> Vec<String> {
    set.into_iter().collect()
}

#[test]
fn test_gradle_fixture_model() {
    let root = fixtures_path().join("gradle-app");
    let model = ProjectModel::load(&root).expect("Failed to load Gradle fixture");

    assert_eq!(model.build_tool, BuildTool::Gradle);
    assert_eq!(model.build_dir, root.join("build"));
    assert!(model.source_dirs().contains(&root.join("src/main/java")));
    assert!(model.source_dirs().contains(&root.join("src/test/java")));

    let configuration_names: Vec<_> = model.configurations.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(configuration_names, vec!["implementation", "testImplementation"]);

    // files('libs/vendor.jar') has no module identity; Widgets is declared twice
    let declared = read_declared_dependencies(&model.configurations);
    assert_eq!(names(declared), vec!["Assertions", "Shared", "Widgets", "guava"]);
}

#[test]
fn test_gradle_fixture_analysis() {
    let root = fixtures_path().join("gradle-app");
    let model = ProjectModel::load(&root).expect("Failed to load Gradle fixture");
    let config = Config::default();
    let finder = FileFinder::new(&config).unwrap();

    let analysis = analyze(&finder, &RegexImportExtractor::new(), &model.source_dirs(), &model.configurations);

    assert_eq!(analysis.files_scanned, 2);
    // The static Assertions import never matches the regex
    assert_eq!(names(analysis.unused), vec!["Assertions", "guava"]);
}

#[test]
fn test_gradle_fixture_with_tree_sitter() {
    let root = fixtures_path().join("gradle-app");
    let model = ProjectModel::load(&root).expect("Failed to load Gradle fixture");
    let config = Config::default();
    let finder = FileFinder::new(&config).unwrap();
    let extractor = ExtractorKind::TreeSitter.build();

    let analysis = analyze(&finder, extractor.as_ref(), &model.source_dirs(), &model.configurations);

    // The static import's trailing segment is the member, not the class
    assert!(analysis.used.contains("org.junit.jupiter.api.Assertions.assertTrue"));
    assert_eq!(names(analysis.unused), vec!["Assertions", "guava"]);
}

#[test]
fn test_maven_fixture_analysis() {
    let root = fixtures_path().join("maven-app");
    let model = ProjectModel::load(&root).expect("Failed to load Maven fixture");

    assert_eq!(model.build_tool, BuildTool::Maven);
    assert_eq!(model.build_dir, root.join("target"));

    let config = Config::default();
    let finder = FileFinder::new(&config).unwrap();
    let analysis = analyze(&finder, &RegexImportExtractor::new(), &model.source_dirs(), &model.configurations);

    assert_eq!(names(analysis.declared), vec!["Logger", "commons-io", "junit"]);
    assert_eq!(names(analysis.unused), vec!["commons-io", "junit"]);
}

#[test]
fn test_gradle_kotlin_script_in_temp_project() {
    let temp = tempfile::tempdir().expect("Failed to create temp dir");
    let root = temp.path();
    std::fs::write(
        root.join("build.gradle.kts"),
        r#"
plugins {
    java
}

dependencies {
    implementation("org.apache.commons:commons-lang3:3.13.0")
    implementation(project(":StringUtils"))
    runtimeOnly(files("libs/driver.jar"))
}
"#,
    )
    .unwrap();
    let main = root.join("src/main/java/com/acme");
    std::fs::create_dir_all(&main).unwrap();
    std::fs::write(main.join("App.java"), "import com.acme.text.StringUtils;\n").unwrap();

    let model = ProjectModel::load(root).unwrap();
    let config = Config::default();
    let finder = FileFinder::new(&config).unwrap();
    let analysis = analyze(&finder, &RegexImportExtractor::new(), &model.source_dirs(), &model.configurations);

    assert_eq!(names(analysis.unused), vec!["commons-lang3"]);
}

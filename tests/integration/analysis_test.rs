//! Integration tests for the depsweep analysis pipeline
//!
//! These drive `analyze` over scratch source trees and in-memory
//! configurations, then check the rendered report.

use depsweep::analysis::{analyze, find_unused, Analysis};
use depsweep::config::Config;
use depsweep::discovery::FileFinder;
use depsweep::extract::{RegexImportExtractor, TreeSitterImportExtractor, SymbolExtractor};
use depsweep::project::{Configuration, Dependency};
use depsweep::report::render_text;
use std::fs;
use std::path::{Path, PathBuf};

fn module(name: &str) -> Dependency {
    Dependency::Module {
        group: Some("com.acme".to_string()),
        name: name.to_string(),
        version: Some("1.0".to_string()),
    }
}

fn write_source(dir: &Path, relative: &str, contents: &str) {
    let path = dir.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn run(source_dirs: &[PathBuf], configurations: &[Configuration]) -> Analysis {
    run_with(&RegexImportExtractor::new(), source_dirs, configurations)
}

fn run_with(
    extractor: &dyn SymbolExtractor,
    source_dirs: &[PathBuf],
    configurations: &[Configuration],
) -> Analysis {
    let config = Config::default();
    let finder = FileFinder::new(&config).expect("default config is valid");
    analyze(&finder, extractor, source_dirs, configurations)
}

#[test]
fn test_scenario_a_used_import_removes_dependency() {
    let temp = tempfile::tempdir().expect("Failed to create temp dir");
    write_source(temp.path(), "com/acme/App.java", "import com.acme.Foo;\n\nclass App {}\n");

    let configurations = vec![Configuration::new("implementation", vec![module("Foo"), module("Bar")])];
    let analysis = run(&[temp.path().to_path_buf()], &configurations);

    assert_eq!(render_text(&analysis.unused), "Unused dependencies detected:\nBar\n");
}

#[test]
fn test_scenario_b_no_sources_reports_everything() {
    let temp = tempfile::tempdir().expect("Failed to create temp dir");

    let configurations = vec![Configuration::new("implementation", vec![module("Foo")])];
    let analysis = run(&[temp.path().join("src/main/java")], &configurations);

    assert_eq!(analysis.files_scanned, 0);
    assert_eq!(analysis.unused, analysis.declared);
    assert_eq!(render_text(&analysis.unused), "Unused dependencies detected:\nFoo\n");
}

#[test]
fn test_scenario_c_no_declarations() {
    let temp = tempfile::tempdir().expect("Failed to create temp dir");
    write_source(
        temp.path(),
        "App.java",
        "import com.acme.Foo;\nimport org.slf4j.Logger;\nimport java.util.*;\n",
    );

    let analysis = run(&[temp.path().to_path_buf()], &[]);

    assert!(analysis.unused.is_empty());
    assert_eq!(render_text(&analysis.unused), "No unused dependencies found.\n");
}

#[test]
fn test_scenario_d_dependency_in_two_configurations() {
    let temp = tempfile::tempdir().expect("Failed to create temp dir");
    write_source(temp.path(), "App.java", "import com.acme.Foo;\n");

    let configurations = vec![
        Configuration::new("implementation", vec![module("Foo")]),
        Configuration::new("testImplementation", vec![module("Foo")]),
    ];
    let analysis = run(&[temp.path().to_path_buf()], &configurations);

    assert_eq!(analysis.declared.len(), 1);
    assert!(analysis.unused.is_empty());
}

#[test]
fn test_symbols_union_across_source_dirs() {
    let temp = tempfile::tempdir().expect("Failed to create temp dir");
    let main = temp.path().join("src/main/java");
    let test = temp.path().join("src/test/java");
    write_source(&main, "App.java", "import com.acme.Foo;\n");
    write_source(&test, "AppTest.java", "import org.junit.Test;\n");

    let configurations = vec![
        Configuration::new("implementation", vec![module("Foo")]),
        Configuration::new("testImplementation", vec![module("Test"), module("Mockito")]),
    ];
    let analysis = run(&[main, test], &configurations);

    assert_eq!(analysis.files_scanned, 2);
    assert_eq!(analysis.unused.into_iter().collect::<Vec<_>>(), vec!["Mockito".to_string()]);
}

#[test]
fn test_unreadable_file_does_not_lose_other_symbols() {
    let temp = tempfile::tempdir().expect("Failed to create temp dir");
    write_source(temp.path(), "Good.java", "import com.acme.Foo;\n");
    fs::write(temp.path().join("Broken.java"), [0xc3, 0x28, 0xff]).unwrap();

    let configurations = vec![Configuration::new("implementation", vec![module("Foo"), module("Bar")])];
    let analysis = run(&[temp.path().to_path_buf()], &configurations);

    assert_eq!(analysis.files_scanned, 1);
    assert_eq!(analysis.files_skipped, 1);
    assert!(analysis.used.contains("com.acme.Foo"));
    assert_eq!(analysis.unused.into_iter().collect::<Vec<_>>(), vec!["Bar".to_string()]);
}

#[test]
fn test_analysis_is_idempotent() {
    let temp = tempfile::tempdir().expect("Failed to create temp dir");
    write_source(temp.path(), "a/A.java", "import com.acme.Foo;\n");
    write_source(temp.path(), "b/B.java", "import com.acme.Baz;\n");

    let configurations = vec![Configuration::new(
        "implementation",
        vec![module("Foo"), module("Bar"), module("Qux")],
    )];
    let first = run(&[temp.path().to_path_buf()], &configurations);
    let second = run(&[temp.path().to_path_buf()], &configurations);

    assert_eq!(render_text(&first.unused), render_text(&second.unused));
}

#[test]
fn test_unused_is_always_subset_of_declared() {
    let temp = tempfile::tempdir().expect("Failed to create temp dir");
    write_source(
        temp.path(),
        "App.java",
        "import a.Foo;\nimport b.Unrelated;\nimport Bar;\n",
    );

    let configurations = vec![Configuration::new(
        "implementation",
        vec![
            module("Foo"),
            module("Baz"),
            Dependency::Files {
                notation: "files('libs/Unrelated.jar')".to_string(),
            },
        ],
    )];
    let analysis = run(&[temp.path().to_path_buf()], &configurations);

    assert!(analysis.unused.is_subset(&analysis.declared));
    assert_eq!(analysis.unused.into_iter().collect::<Vec<_>>(), vec!["Baz".to_string()]);
}

#[test]
fn test_trailing_segment_matching_is_exact() {
    let used = ["com.acme.WidgetFactory".to_string()].into_iter().collect();
    let declared = ["WidgetFactory", "widget-factory", "Widget"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let unused = find_unused(&used, &declared);
    assert_eq!(
        unused.into_iter().collect::<Vec<_>>(),
        vec!["Widget".to_string(), "widget-factory".to_string()]
    );
}

#[test]
fn test_tree_sitter_strategy_sees_static_imports() {
    let temp = tempfile::tempdir().expect("Failed to create temp dir");
    write_source(
        temp.path(),
        "AppTest.java",
        "import static org.mockito.Mockito;\n\nclass AppTest {}\n",
    );
    let configurations = vec![Configuration::new("testImplementation", vec![module("Mockito")])];

    let regex = run(&[temp.path().to_path_buf()], &configurations);
    assert!(regex.unused.contains("Mockito"));

    let parsed = run_with(&TreeSitterImportExtractor::new(), &[temp.path().to_path_buf()], &configurations);
    assert!(parsed.unused.is_empty());
}

// Gradle build script reader
//
// Line-oriented and heuristic: only declarations sitting directly inside the
// top-level `dependencies { }` block are read. Both the Groovy and Kotlin DSL
// spellings are recognised:
//
//     implementation 'com.google.guava:guava:32.1.2-jre'
//     implementation("com.google.guava:guava:32.1.2-jre")
//     implementation group: 'org.slf4j', name: 'slf4j-api', version: '2.0.9'
//     implementation platform('org.junit:junit-bom:5.10.0')
//     implementation project(':core:util')
//     implementation files('libs/local.jar')
//
//     implementation 'org.example:a:1.0', 'org.example:b:1.0'
//     add('implementation', 'org.example:c:1.0')
//     dependencies { implementation 'org.example:d:1.0' }
//
// Statements are split at braces and `;`, so one-line blocks work. A
// declaration continued onto the next line is only read up to the line end.
// Version catalog accessors (`libs.guava`) cannot be resolved and are skipped.

use super::{BuildTool, Configuration, Dependency, ProjectModel, SourceSet};
use regex::Regex;
use std::fs;
use std::path::Path;
use tracing::trace;

const WRAPPER: &str = r"(?:(?:platform|enforcedPlatform|testFixtures)\s*\(\s*)?";

pub(super) fn load(root: &Path, script: &str) -> ProjectModel {
    ProjectModel {
        root: root.to_path_buf(),
        build_tool: BuildTool::Gradle,
        build_dir: root.join("build"),
        source_sets: discover_source_sets(root),
        configurations: parse_dependencies(script),
    }
}

/// Source sets follow the `src/<name>/java` convention
fn discover_source_sets(root: &Path) -> Vec<SourceSet> {
    let src = root.join("src");
    let mut names: Vec<String> = vec!["main".to_string(), "test".to_string()];

    if let Ok(entries) = fs::read_dir(&src) {
        for entry in entries.flatten() {
            let name = entry.file_name().to_string_lossy().to_string();
            if entry.path().join("java").is_dir() && !names.contains(&name) {
                names.push(name);
            }
        }
    }
    names[2..].sort();

    names
        .into_iter()
        .map(|name| SourceSet {
            src_dirs: vec![src.join(&name).join("java")],
            name,
        })
        .collect()
}

struct DeclarationPatterns {
    add: Regex,
    project: Regex,
    files: Regex,
    map: Regex,
    string: Regex,
    next_notation: Regex,
}

impl DeclarationPatterns {
    fn new() -> Self {
        let compile = |pattern: String| Regex::new(&pattern).expect("Invalid declaration pattern");
        Self {
            add: compile(r#"^add\s*\(\s*['"](\w+)['"]\s*,\s*(.*)$"#.to_string()),
            project: compile(format!(
                r#"^(\w+)\s*\(?\s*{WRAPPER}project\s*\(\s*(?:path\s*[:=]\s*)?['"]([^'"]+)['"]"#
            )),
            files: compile(r"^(\w+)\s*\(?\s*(?:files|fileTree)\s*\(".to_string()),
            map: compile(
                r#"^(\w+)\s*\(?\s*group\s*[:=]\s*['"]([^'"]*)['"]\s*,\s*name\s*[:=]\s*['"]([^'"]+)['"](?:\s*,\s*version\s*[:=]\s*['"]([^'"]*)['"])?"#
                    .to_string(),
            ),
            string: compile(format!(r#"^(\w+)\s*\(?\s*{WRAPPER}['"]([^'"]+)['"]"#)),
            next_notation: compile(format!(r#"^\s*\)?\s*,\s*{WRAPPER}['"]([^'"]+)['"]"#)),
        }
    }

    /// Parse one statement into its (configuration, dependency) pairs
    fn parse(&self, statement: &str) -> Vec<(String, Dependency)> {
        // add('implementation', ...) reads like `implementation ...`
        let statement = match self.add.captures(statement) {
            Some(cap) => format!("{} {}", &cap[1], &cap[2]),
            None => statement.to_string(),
        };
        let line = statement.as_str();

        if let Some(cap) = self.project.captures(line) {
            return vec![(cap[1].to_string(), Dependency::Project { path: cap[2].to_string() })];
        }
        if let Some(cap) = self.files.captures(line) {
            return vec![(cap[1].to_string(), Dependency::Files { notation: line.to_string() })];
        }
        if let Some(cap) = self.map.captures(line) {
            let dependency = Dependency::Module {
                group: Some(cap[2].to_string()).filter(|g| !g.is_empty()),
                name: cap[3].to_string(),
                version: cap.get(4).map(|v| v.as_str().to_string()).filter(|v| !v.is_empty()),
            };
            return vec![(cap[1].to_string(), dependency)];
        }
        if let Some(cap) = self.string.captures(line) {
            let configuration = cap[1].to_string();
            let mut declared = vec![(configuration.clone(), Dependency::from_notation(&cap[2]))];

            // implementation 'a:one:1', 'b:two:1'
            let mut rest = &line[cap.get(0).map_or(line.len(), |m| m.end())..];
            while let Some(next) = self.next_notation.captures(rest) {
                declared.push((configuration.clone(), Dependency::from_notation(&next[1])));
                rest = &rest[next.get(0).map_or(rest.len(), |m| m.end())..];
            }
            return declared;
        }
        Vec::new()
    }
}

/// Collect the configurations declared in the script's top-level
/// `dependencies` block, in first-seen order.
pub(super) fn parse_dependencies(script: &str) -> Vec<Configuration> {
    let patterns = DeclarationPatterns::new();
    let mut scanner = BlockScanner::default();
    let mut configurations: Vec<Configuration> = Vec::new();
    let mut in_block_comment = false;

    for raw in script.lines() {
        let line = strip_comments(raw, &mut in_block_comment);

        for statement in scanner.statements(&line) {
            let declared = patterns.parse(&statement);
            if declared.is_empty() {
                trace!("Unrecognized dependency declaration: {}", statement);
            }
            for (name, dependency) in declared {
                match configurations.iter_mut().find(|c| c.name == name) {
                    Some(configuration) => configuration.dependencies.push(dependency),
                    None => configurations.push(Configuration::new(name, vec![dependency])),
                }
            }
        }
    }

    configurations
}

/// Splits lines into statements at `{`, `}` and `;` and tracks block nesting.
///
/// Each block is named after the identifier preceding its opening brace,
/// which may sit alone on the previous line, and is empty for closures
/// like `) {`.
#[derive(Default)]
struct BlockScanner {
    blocks: Vec<String>,
    pending_name: Option<String>,
}

impl BlockScanner {
    fn in_dependencies(&self) -> bool {
        self.blocks.len() == 1 && self.blocks[0] == "dependencies"
    }

    /// Statements of `line` that sit directly inside the top-level
    /// `dependencies` block
    fn statements(&mut self, line: &str) -> Vec<String> {
        let mut statements = Vec::new();
        let mut segment = String::new();
        let mut quote: Option<char> = None;

        for c in line.chars() {
            if let Some(q) = quote {
                segment.push(c);
                if c == q {
                    quote = None;
                }
                continue;
            }
            match c {
                '\'' | '"' => {
                    quote = Some(c);
                    segment.push(c);
                }
                '{' => {
                    let name = if segment.trim().is_empty() {
                        self.pending_name.take().unwrap_or_default()
                    } else {
                        block_name(&segment)
                    };
                    self.flush(&mut segment, &mut statements);
                    self.blocks.push(name);
                }
                '}' => {
                    self.flush(&mut segment, &mut statements);
                    self.pending_name = None;
                    self.blocks.pop();
                }
                ';' => self.flush(&mut segment, &mut statements),
                _ => segment.push(c),
            }
        }

        let tail = segment.trim().to_string();
        self.flush(&mut segment, &mut statements);
        if !tail.is_empty() && tail.chars().all(is_word_char) {
            self.pending_name = Some(tail);
        }

        statements
    }

    fn flush(&mut self, segment: &mut String, statements: &mut Vec<String>) {
        let trimmed = segment.trim();
        if !trimmed.is_empty() {
            if self.in_dependencies() {
                statements.push(trimmed.to_string());
            }
            self.pending_name = None;
        }
        segment.clear();
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Trailing identifier of a segment, empty when it ends in punctuation
fn block_name(segment: &str) -> String {
    let reversed: Vec<char> = segment
        .trim_end()
        .chars()
        .rev()
        .take_while(|c| is_word_char(*c))
        .collect();
    reversed.into_iter().rev().collect()
}

/// Remove `//` and `/* */` comments outside string literals
fn strip_comments(line: &str, in_block_comment: &mut bool) -> String {
    let mut out = String::with_capacity(line.len());
    let mut chars = line.chars().peekable();
    let mut quote: Option<char> = None;

    while let Some(c) = chars.next() {
        if *in_block_comment {
            if c == '*' && chars.peek() == Some(&'/') {
                chars.next();
                *in_block_comment = false;
            }
            continue;
        }
        if let Some(q) = quote {
            out.push(c);
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' => {
                quote = Some(c);
                out.push(c);
            }
            '/' if chars.peek() == Some(&'/') => break,
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                *in_block_comment = true;
            }
            _ => out.push(c),
        }
    }

    out
}

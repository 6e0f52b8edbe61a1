use super::SymbolExtractor;
use miette::Result;
use regex::Regex;
use std::collections::HashSet;

const IMPORT_PATTERN: &str = r"import\s+([\w.]+);";

/// Line-oriented import scanner.
///
/// Every line is searched independently for `import <dotted.path>;`. Static
/// imports, wildcard imports and imports split across lines do not match;
/// imports inside comments or string literals do.
pub struct RegexImportExtractor {
    pattern: Regex,
}

impl RegexImportExtractor {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(IMPORT_PATTERN).expect("Invalid import pattern"),
        }
    }
}

impl Default for RegexImportExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolExtractor for RegexImportExtractor {
    fn extract(&self, source: &str) -> Result<HashSet<String>> {
        Ok(source
            .lines()
            .flat_map(|line| self.pattern.captures_iter(line))
            .map(|cap| cap[1].to_string())
            .collect())
    }
}

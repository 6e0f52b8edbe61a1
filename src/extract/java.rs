use super::SymbolExtractor;
use miette::{miette, IntoDiagnostic, Result};
use std::collections::HashSet;
use tree_sitter::{Node, Parser as TsParser};

/// Java import extractor using tree-sitter
///
/// Unlike the regex scanner this sees real `import_declaration` nodes:
/// static imports are included, wildcard imports come out as `a.b.*`, and
/// imports inside comments or strings are ignored.
pub struct TreeSitterImportExtractor;

impl TreeSitterImportExtractor {
    pub fn new() -> Self {
        Self
    }

    fn parser() -> Result<TsParser> {
        let mut parser = TsParser::new();
        parser
            .set_language(&tree_sitter_java::language())
            .into_diagnostic()?;
        Ok(parser)
    }

    fn import_path(node: Node, source: &str) -> Option<String> {
        let mut cursor = node.walk();
        let mut path = None;
        let mut wildcard = false;

        for child in node.children(&mut cursor) {
            match child.kind() {
                "scoped_identifier" | "identifier" => {
                    path = Some(&source[child.start_byte()..child.end_byte()]);
                }
                "asterisk" => wildcard = true,
                _ => {}
            }
        }

        // A declaration split across lines keeps its whitespace in the node text
        let path: String = path?.chars().filter(|c| !c.is_whitespace()).collect();
        Some(if wildcard { format!("{}.*", path) } else { path })
    }
}

impl Default for TreeSitterImportExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolExtractor for TreeSitterImportExtractor {
    fn extract(&self, source: &str) -> Result<HashSet<String>> {
        let mut parser = Self::parser()?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| miette!("tree-sitter failed to parse Java source"))?;

        let root = tree.root_node();
        let mut cursor = root.walk();
        let imports = root
            .children(&mut cursor)
            .filter(|child| child.kind() == "import_declaration")
            .filter_map(|child| Self::import_path(child, source))
            .collect();

        Ok(imports)
    }
}

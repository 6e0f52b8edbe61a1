use crate::extract::UsedSymbolSet;
use crate::registry::DeclaredDependencySet;
use std::collections::BTreeSet;

/// Declared dependencies with no matching import
pub type UnusedDependencySet = BTreeSet<String>;

/// The part of a symbol after its last `.`, or the whole symbol
pub fn trailing_segment(symbol: &str) -> &str {
    match symbol.rfind('.') {
        Some(index) => &symbol[index + 1..],
        None => symbol,
    }
}

/// Remove every declared name that equals the trailing segment of a used
/// symbol. Comparison is exact and case-sensitive.
pub fn find_unused(used: &UsedSymbolSet, declared: &DeclaredDependencySet) -> UnusedDependencySet {
    let mut unused = declared.clone();
    for symbol in used {
        unused.remove(trailing_segment(symbol));
    }
    unused
}

//! Top-level class rule extraction

use crate::stylesheet::{NodeKind, Stylesheet};

/// A root-level rule whose selector looks like a class selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateRule<'a> {
    pub selector: &'a str,
    pub line: u32,
}

/// Picks the candidate rules out of a parsed style-sheet.
///
/// Only direct children of the root are inspected, so rules nested in other
/// rules or in at-rule blocks never become candidates.
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleExtractor;

impl RuleExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Candidate rules in source order
    pub fn extract<'a>(&self, sheet: &'a Stylesheet) -> Vec<CandidateRule<'a>> {
        sheet
            .children()
            .iter()
            .filter(|node| node.kind() == NodeKind::Rule)
            .filter_map(|node| {
                let selector = node.selector()?;
                is_class_like(selector).then(|| CandidateRule {
                    selector,
                    line: node.line(),
                })
            })
            .collect()
    }
}

/// A literal dot followed by at least one character
fn is_class_like(selector: &str) -> bool {
    selector
        .char_indices()
        .any(|(index, c)| c == '.' && index + 1 < selector.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selectors(css: &str) -> Vec<String> {
        let sheet = Stylesheet::parse(css).unwrap();
        RuleExtractor::new()
            .extract(&sheet)
            .iter()
            .map(|rule| rule.selector.to_string())
            .collect()
    }

    #[test]
    fn test_single_class_rule() {
        assert_eq!(selectors(".button { color: red; }"), vec![".button"]);
    }

    #[test]
    fn test_keeps_source_order() {
        assert_eq!(selectors(".foo {}\n.bar {}"), vec![".foo", ".bar"]);
    }

    #[test]
    fn test_ignores_non_class_selectors() {
        assert!(selectors("div { margin: 0 }\n[hidden] {}\n:root { --x: 1 }\n").is_empty());
        assert!(selectors("a. {}").is_empty());
    }

    #[test]
    fn test_ignores_nested_rules() {
        let css = ".block {\n  .block__elem {}\n  &_mod {}\n}\n@media print { .print {} }\n";
        assert_eq!(selectors(css), vec![".block"]);
    }

    #[test]
    fn test_variables_only_file() {
        assert!(selectors("$gap: 4px;\n/* spacing */\n@import 'x';\n").is_empty());
    }

    #[test]
    fn test_compound_selector_counts_once() {
        assert_eq!(selectors("div.block {}"), vec!["div.block"]);
        assert_eq!(selectors("div .card {}"), vec!["div .card"]);
    }

    #[test]
    fn test_candidate_line() {
        let sheet = Stylesheet::parse("\n\n.button {}").unwrap();
        let rules = RuleExtractor::new().extract(&sheet);
        assert_eq!(rules[0].line, 3);
    }
}

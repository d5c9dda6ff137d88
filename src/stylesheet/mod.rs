//! Parsed style-sheet tree
//!
//! Architecture: Anti-Corruption Layer - raw style-sheet text becomes a small typed tree
//! - Only what naming validation reads is modelled: kinds, selectors, nesting
//! - Property values and at-rule parameters are kept as opaque text

mod parser;

pub use parser::ParseError;

/// Tag distinguishing node kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Rule,
    AtRule,
    Declaration,
    Comment,
}

/// A node of the parsed style-sheet tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleNode {
    /// `selector { ... }`
    Rule {
        selector: String,
        children: Vec<StyleNode>,
        line: u32,
    },
    /// `@name params;` or `@name params { ... }`
    AtRule {
        name: String,
        params: String,
        children: Option<Vec<StyleNode>>,
        line: u32,
    },
    /// `property: value`
    Declaration {
        property: String,
        value: String,
        line: u32,
    },
    /// `/* text */`
    Comment { text: String, line: u32 },
}

impl StyleNode {
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Rule { .. } => NodeKind::Rule,
            Self::AtRule { .. } => NodeKind::AtRule,
            Self::Declaration { .. } => NodeKind::Declaration,
            Self::Comment { .. } => NodeKind::Comment,
        }
    }

    /// Selector text, present only for rules
    pub fn selector(&self) -> Option<&str> {
        match self {
            Self::Rule { selector, .. } => Some(selector),
            _ => None,
        }
    }

    /// Direct children; empty for leaf nodes and block-less at-rules
    pub fn children(&self) -> &[StyleNode] {
        match self {
            Self::Rule { children, .. } => children,
            Self::AtRule {
                children: Some(children),
                ..
            } => children,
            _ => &[],
        }
    }

    /// 1-based line the node starts on
    pub fn line(&self) -> u32 {
        match self {
            Self::Rule { line, .. }
            | Self::AtRule { line, .. }
            | Self::Declaration { line, .. }
            | Self::Comment { line, .. } => *line,
        }
    }
}

/// Root of a parsed style-sheet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stylesheet {
    nodes: Vec<StyleNode>,
}

impl Stylesheet {
    /// Parse style-sheet text into a tree.
    ///
    /// A leading byte-order mark is dropped; positions count from after it.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let input = input.strip_prefix('\u{feff}').unwrap_or(input);
        let nodes = parser::Parser::new(input).parse()?;
        Ok(Self { nodes })
    }

    /// Direct children of the root, in source order
    pub fn children(&self) -> &[StyleNode] {
        &self.nodes
    }
}

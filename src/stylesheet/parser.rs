use super::StyleNode;

/// Syntax error with a 1-based source position
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at line {line}, column {column}")]
pub struct ParseError {
    pub message: String,
    pub line: u32,
    pub column: u32,
}

/// Recursive descent parser over raw style-sheet text.
///
/// Structural characters are all ASCII, so every offset the parser stops at
/// is a char boundary and slicing `input` there is safe.
pub(super) struct Parser<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    pub(super) fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
        }
    }

    pub(super) fn parse(mut self) -> Result<Vec<StyleNode>, ParseError> {
        self.parse_nodes(None)
    }

    /// Parse nodes until end of input (root) or the `}` closing the block
    /// opened at `open`.
    fn parse_nodes(&mut self, open: Option<usize>) -> Result<Vec<StyleNode>, ParseError> {
        let mut nodes = Vec::new();

        loop {
            self.skip_whitespace();

            let Some(b) = self.peek() else {
                return match open {
                    Some(open) => Err(self.error_at(open, "Unclosed block")),
                    None => Ok(nodes),
                };
            };

            match b {
                b'}' => {
                    if open.is_none() {
                        return Err(self.error_at(self.pos, "Unexpected }"));
                    }
                    self.pos += 1;
                    return Ok(nodes);
                }
                b';' => self.pos += 1,
                b'/' if self.peek_at(1) == Some(b'*') => nodes.push(self.parse_comment()?),
                b'@' => nodes.push(self.parse_at_rule()?),
                _ => nodes.push(self.parse_statement()?),
            }
        }
    }

    fn parse_comment(&mut self) -> Result<StyleNode, ParseError> {
        let start = self.pos;
        self.skip_comment()?;
        let text = self.input[start + 2..self.pos - 2].trim().to_string();

        Ok(StyleNode::Comment {
            text,
            line: self.line_of(start),
        })
    }

    fn parse_at_rule(&mut self) -> Result<StyleNode, ParseError> {
        let start = self.pos;
        self.pos += 1;

        let name_start = self.pos;
        while self
            .peek()
            .is_some_and(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        {
            self.pos += 1;
        }
        if self.pos == name_start {
            return Err(self.error_at(start, "At-rule without name"));
        }
        let name = self.input[name_start..self.pos].to_string();

        let params_start = self.pos;
        let terminator = self.scan_prelude()?;
        let params = self.input[params_start..self.pos].trim().to_string();

        let children = match terminator {
            Some(b'{') => {
                let open = self.pos;
                self.pos += 1;
                Some(self.parse_nodes(Some(open))?)
            }
            Some(b';') => {
                self.pos += 1;
                None
            }
            _ => None,
        };

        Ok(StyleNode::AtRule {
            name,
            params,
            children,
            line: self.line_of(start),
        })
    }

    /// A rule when the prelude ends in `{`, a declaration otherwise
    fn parse_statement(&mut self) -> Result<StyleNode, ParseError> {
        let start = self.pos;
        let terminator = self.scan_prelude()?;
        let text = self.input[start..self.pos].trim();

        if terminator == Some(b'{') {
            if text.is_empty() {
                return Err(self.error_at(start, "Missing selector"));
            }
            let selector = strip_comments(text);
            let open = self.pos;
            self.pos += 1;
            let children = self.parse_nodes(Some(open))?;

            return Ok(StyleNode::Rule {
                selector,
                children,
                line: self.line_of(start),
            });
        }

        let Some((property, value)) = text.split_once(':') else {
            return Err(self.error_at(start, "Unknown word"));
        };
        let property = property.trim();
        if property.is_empty() {
            return Err(self.error_at(start, "Unknown word"));
        }
        let declaration = StyleNode::Declaration {
            property: property.to_string(),
            value: value.trim().to_string(),
            line: self.line_of(start),
        };

        if terminator == Some(b';') {
            self.pos += 1;
        }

        Ok(declaration)
    }

    /// Advance to the next top-level `{`, `;` or `}` without consuming it.
    /// Returns `None` at end of input.
    fn scan_prelude(&mut self) -> Result<Option<u8>, ParseError> {
        let mut depth = 0usize;

        while let Some(b) = self.peek() {
            match b {
                b'"' | b'\'' => self.skip_string(b)?,
                b'/' if self.peek_at(1) == Some(b'*') => self.skip_comment()?,
                b'\\' => self.pos = (self.pos + 2).min(self.bytes.len()),
                b'(' | b'[' => {
                    depth += 1;
                    self.pos += 1;
                }
                b')' | b']' => {
                    depth = depth.saturating_sub(1);
                    self.pos += 1;
                }
                b'{' | b';' | b'}' if depth == 0 => return Ok(Some(b)),
                _ => self.pos += 1,
            }
        }

        Ok(None)
    }

    fn skip_string(&mut self, quote: u8) -> Result<(), ParseError> {
        let start = self.pos;
        self.pos += 1;

        loop {
            match self.peek() {
                None => return Err(self.error_at(start, "Unclosed string")),
                Some(b'\\') => self.pos = (self.pos + 2).min(self.bytes.len()),
                Some(b) if b == quote => {
                    self.pos += 1;
                    return Ok(());
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    fn skip_comment(&mut self) -> Result<(), ParseError> {
        let start = self.pos;
        match self.input[start + 2..].find("*/") {
            Some(offset) => {
                self.pos = start + 2 + offset + 2;
                Ok(())
            }
            None => Err(self.error_at(start, "Unclosed comment")),
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn line_of(&self, offset: usize) -> u32 {
        self.position_of(offset).0
    }

    fn position_of(&self, offset: usize) -> (u32, u32) {
        let before = &self.bytes[..offset.min(self.bytes.len())];
        let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
        let column = match before.iter().rposition(|&b| b == b'\n') {
            Some(newline) => offset - newline,
            None => offset + 1,
        };
        (line as u32, column as u32)
    }

    fn error_at(&self, offset: usize, message: &str) -> ParseError {
        let (line, column) = self.position_of(offset);
        ParseError {
            message: message.to_string(),
            line,
            column,
        }
    }
}

/// Drop `/* ... */` spans outside strings and trim the rest.
///
/// Expects text already scanned by `scan_prelude`, so comments and strings are closed.
fn strip_comments(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut pos = 0;

    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' => pos += 2,
            quote @ (b'"' | b'\'') => {
                pos += 1;
                while pos < bytes.len() && bytes[pos] != quote {
                    pos += if bytes[pos] == b'\\' { 2 } else { 1 };
                }
                pos += 1;
            }
            b'/' if bytes.get(pos + 1) == Some(&b'*') => {
                out.push_str(&text[copied..pos]);
                pos = match text[pos + 2..].find("*/") {
                    Some(offset) => pos + 2 + offset + 2,
                    None => bytes.len(),
                };
                copied = pos;
            }
            _ => pos += 1,
        }
    }
    if copied < bytes.len() {
        out.push_str(&text[copied..]);
    }

    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use crate::stylesheet::{NodeKind, StyleNode, Stylesheet};

    #[test]
    fn test_single_rule() {
        let sheet = Stylesheet::parse(".button { color: red; }").unwrap();
        let nodes = sheet.children();

        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].kind(), NodeKind::Rule);
        assert_eq!(nodes[0].selector(), Some(".button"));
        assert_eq!(
            nodes[0].children(),
            &[StyleNode::Declaration {
                property: "color".to_string(),
                value: "red".to_string(),
                line: 1,
            }]
        );
    }

    #[test]
    fn test_nested_rules_stay_nested() {
        let css = ".block {\n  &:hover { color: red }\n  .block__elem { margin: 0 }\n}\n";
        let sheet = Stylesheet::parse(css).unwrap();

        assert_eq!(sheet.children().len(), 1);
        let nested = sheet.children()[0].children();
        assert_eq!(nested.len(), 2);
        assert_eq!(nested[0].selector(), Some("&:hover"));
        assert_eq!(nested[1].selector(), Some(".block__elem"));
        assert_eq!(nested[1].line(), 3);
    }

    #[test]
    fn test_variables_comments_and_at_rules() {
        let css = "/* tokens */\n$gap: 4px;\n--main: #fff;\n@import 'base.css';\n@media (min-width: 10px) { .a { b: c } }\n";
        let sheet = Stylesheet::parse(css).unwrap();
        let kinds: Vec<_> = sheet.children().iter().map(StyleNode::kind).collect();

        assert_eq!(
            kinds,
            vec![
                NodeKind::Comment,
                NodeKind::Declaration,
                NodeKind::Declaration,
                NodeKind::AtRule,
                NodeKind::AtRule,
            ]
        );
        match &sheet.children()[4] {
            StyleNode::AtRule {
                name,
                params,
                children,
                line,
            } => {
                assert_eq!(name, "media");
                assert_eq!(params, "(min-width: 10px)");
                assert_eq!(children.as_ref().map(Vec::len), Some(1));
                assert_eq!(*line, 5);
            }
            other => panic!("expected at-rule, got {other:?}"),
        }
    }

    #[test]
    fn test_strings_and_brackets_do_not_terminate() {
        let css = ".a[data-x=\"{;}\"] { content: \"}\"; background: url(a;b.png) }";
        let sheet = Stylesheet::parse(css).unwrap();

        assert_eq!(sheet.children().len(), 1);
        assert_eq!(sheet.children()[0].selector(), Some(".a[data-x=\"{;}\"]"));
        assert_eq!(sheet.children()[0].children().len(), 2);
    }

    #[test]
    fn test_last_declaration_without_semicolon() {
        let sheet = Stylesheet::parse(".a { color: red }").unwrap();
        assert_eq!(sheet.children()[0].children().len(), 1);
    }

    #[test]
    fn test_empty_input() {
        assert!(Stylesheet::parse("  \n").unwrap().children().is_empty());
    }

    #[test]
    fn test_unclosed_block() {
        let err = Stylesheet::parse(".a {\n color: red;\n").unwrap_err();
        assert_eq!(err.message, "Unclosed block");
        assert_eq!((err.line, err.column), (1, 4));
    }

    #[test]
    fn test_unexpected_closing_brace() {
        let err = Stylesheet::parse(".a {}\n}").unwrap_err();
        assert_eq!(err.message, "Unexpected }");
        assert_eq!(err.line, 2);
    }

    #[test]
    fn test_unknown_word() {
        let err = Stylesheet::parse("garbage;").unwrap_err();
        assert_eq!(err.message, "Unknown word");
    }

    #[test]
    fn test_unclosed_comment_and_string() {
        assert_eq!(
            Stylesheet::parse("/* never ends").unwrap_err().message,
            "Unclosed comment"
        );
        assert_eq!(
            Stylesheet::parse(".a { content: \"x }").unwrap_err().message,
            "Unclosed string"
        );
    }

    #[test]
    fn test_missing_selector() {
        let err = Stylesheet::parse("{ color: red }").unwrap_err();
        assert_eq!(err.message, "Missing selector");
        assert_eq!(err.to_string(), "Missing selector at line 1, column 1");
    }

    #[test]
    fn test_leading_byte_order_mark_is_dropped() {
        let sheet = Stylesheet::parse("\u{feff}.button { color: red; }").unwrap();
        assert_eq!(sheet.children()[0].selector(), Some(".button"));

        let err = Stylesheet::parse("\u{feff}}").unwrap_err();
        assert_eq!((err.line, err.column), (1, 1));
    }

    #[test]
    fn test_comments_are_dropped_from_selectors() {
        let sheet = Stylesheet::parse(".button /* main */ { color: red; }").unwrap();
        assert_eq!(sheet.children()[0].selector(), Some(".button"));

        let sheet = Stylesheet::parse(".button/* x */.is-active, /* y */.link {}").unwrap();
        assert_eq!(sheet.children()[0].selector(), Some(".button.is-active, .link"));

        let sheet = Stylesheet::parse(".a[title=\"/* kept */\"] {}").unwrap();
        assert_eq!(sheet.children()[0].selector(), Some(".a[title=\"/* kept */\"]"));
    }
}

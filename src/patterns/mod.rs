//! Naming scheme and file discovery patterns
//!
//! Architectural Principle: Service Layer - pattern matching is compiled once and reused
//! - NamingScheme decomposes raw class names into naming identities
//! - PathFilter decides which style-sheet files take part in a run

pub mod path_filter;

use crate::config::NamingSchemeConfig;
use crate::domain::identity::{Modifier, NamingIdentity};
use crate::domain::violations::{GuardError, GuardResult};
use regex::Regex;

pub use path_filter::PathFilter;

/// Default word pattern: alphanumeric words joined by single dashes
pub const DEFAULT_WORD_PATTERN: &str = "[a-zA-Z0-9]+(?:-[a-zA-Z0-9]+)*";

/// A compiled block/element/modifier naming scheme
#[derive(Debug, Clone)]
pub struct NamingScheme {
    element_delimiter: String,
    modifier_delimiter: String,
    modifier_value_delimiter: String,
    matcher: Regex,
}

impl NamingScheme {
    /// Compile a scheme from its delimiters and word pattern
    pub fn new(
        element_delimiter: impl Into<String>,
        modifier_delimiter: impl Into<String>,
        modifier_value_delimiter: impl Into<String>,
        word_pattern: &str,
    ) -> GuardResult<Self> {
        let element_delimiter = element_delimiter.into();
        let modifier_delimiter = modifier_delimiter.into();
        let modifier_value_delimiter = modifier_value_delimiter.into();

        let source = format!(
            "^(?P<entity>{w})(?:{e}(?P<sub>{w}))?(?:{m}(?P<mod>{w})(?:{v}(?P<val>{w}))?)?$",
            w = word_pattern,
            e = regex::escape(&element_delimiter),
            m = regex::escape(&modifier_delimiter),
            v = regex::escape(&modifier_value_delimiter),
        );
        tracing::debug!("Compiling naming scheme matcher '{}'", source);

        let matcher = Regex::new(&source).map_err(|e| {
            GuardError::pattern(format!("Invalid naming word pattern '{word_pattern}': {e}"))
        })?;

        Ok(Self {
            element_delimiter,
            modifier_delimiter,
            modifier_value_delimiter,
            matcher,
        })
    }

    /// Build the scheme described by a configuration section
    pub fn from_config(config: &NamingSchemeConfig) -> GuardResult<Self> {
        Self::new(
            config.element_delimiter(),
            config.modifier_delimiter(),
            config.modifier_value_delimiter(),
            config.word_pattern(),
        )
    }

    /// `block__elem_mod_val`
    pub fn origin() -> GuardResult<Self> {
        Self::from_config(&NamingSchemeConfig::default())
    }

    /// Decompose a raw name; `None` when the name is not valid under this scheme
    pub fn parse(&self, raw_name: &str) -> Option<NamingIdentity> {
        let captures = self.matcher.captures(raw_name)?;
        let text = |name: &str| captures.name(name).map(|m| m.as_str().to_string());

        Some(NamingIdentity {
            entity: text("entity")?,
            sub_entity: text("sub"),
            modifier: text("mod").map(|name| Modifier {
                name,
                value: text("val"),
            }),
        })
    }

    /// Render an identity back to its raw name
    pub fn stringify(&self, identity: &NamingIdentity) -> String {
        let mut raw = identity.entity.clone();

        if let Some(sub_entity) = &identity.sub_entity {
            raw.push_str(&self.element_delimiter);
            raw.push_str(sub_entity);
        }
        if let Some(modifier) = &identity.modifier {
            raw.push_str(&self.modifier_delimiter);
            raw.push_str(&modifier.name);
            if let Some(value) = &modifier.value {
                raw.push_str(&self.modifier_value_delimiter);
                raw.push_str(value);
            }
        }

        raw
    }

    /// Prefix of a sub-entity directory
    pub fn element_delimiter(&self) -> &str {
        &self.element_delimiter
    }

    /// Prefix of a modifier directory
    pub fn modifier_delimiter(&self) -> &str {
        &self.modifier_delimiter
    }
}

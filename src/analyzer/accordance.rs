//! Selector-to-path accordance checks
//!
//! Code Quality Principle: Single Responsibility - one selector, one file path, one verdict
//! - Filename accordance is checked before anything is decomposed
//! - The decomposed identity's shape dictates which trailing directories must exist

use crate::domain::identity::NamingIdentity;
use crate::domain::violations::ViolationKind;
use crate::patterns::NamingScheme;
use std::path::Path;

/// Validates a selector against the path of the file declaring it
#[derive(Debug, Clone, Copy)]
pub struct AccordanceChecker<'a> {
    scheme: &'a NamingScheme,
    /// File suffix without the leading dot
    extension: &'a str,
}

impl<'a> AccordanceChecker<'a> {
    pub fn new(scheme: &'a NamingScheme, extension: &'a str) -> Self {
        Self { scheme, extension }
    }

    /// Check `selector` (with its leading dot) against `file_path`
    pub fn check(&self, selector: &str, file_path: &Path) -> Result<(), ViolationKind> {
        let raw_name = selector.strip_prefix('.').unwrap_or(selector);

        let file_name = self.file_name_without_extension(file_path);
        if raw_name != file_name {
            return Err(ViolationKind::FilenameMismatch {
                selector: selector.to_string(),
                file_name,
            });
        }

        let identity = self
            .scheme
            .parse(raw_name)
            .ok_or_else(|| ViolationKind::InvalidName {
                selector: selector.to_string(),
                raw_name: raw_name.to_string(),
            })?;

        let required = self.required_directories(&identity);
        let segments: Vec<String> = file_path
            .components()
            .map(|component| component.as_os_str().to_string_lossy().into_owned())
            .collect();
        // Last segment is the file itself
        let directories = &segments[..segments.len().saturating_sub(1)];

        if !directories.ends_with(&required) {
            tracing::debug!(
                "{} expects directories {:?}, found {:?}",
                selector,
                required,
                directories
            );
            return Err(ViolationKind::StructuralMismatch {
                selector: selector.to_string(),
                expected: self.expected_location(&identity),
            });
        }

        Ok(())
    }

    /// Path the identity must live at, relative to the entity's parent directory
    pub fn expected_location(&self, identity: &NamingIdentity) -> String {
        let mut parts = self.required_directories(identity);
        parts.push(format!("{}.{}", self.scheme.stringify(identity), self.extension));
        parts.join("/")
    }

    /// Trailing directories, outermost first, that the identity's shape requires.
    ///
    /// Arms follow the dispatch order: no sub-entity and no modifier, then no
    /// sub-entity, then sub-entity with modifier, then sub-entity alone.
    fn required_directories(&self, identity: &NamingIdentity) -> Vec<String> {
        let entity = identity.entity.clone();
        let element_dir = |sub_entity: &str| {
            format!("{}{}", self.scheme.element_delimiter(), sub_entity)
        };
        let modifier_dir =
            |modifier: &str| format!("{}{}", self.scheme.modifier_delimiter(), modifier);

        match (&identity.sub_entity, &identity.modifier) {
            (None, None) => vec![entity],
            (None, Some(modifier)) => vec![entity, modifier_dir(&modifier.name)],
            (Some(sub_entity), Some(modifier)) => vec![
                entity,
                element_dir(sub_entity),
                modifier_dir(&modifier.name),
            ],
            (Some(sub_entity), None) => vec![entity, element_dir(sub_entity)],
        }
    }

    /// Base name with `.<extension>` stripped; unchanged when it has another suffix
    fn file_name_without_extension(&self, file_path: &Path) -> String {
        let file_name = file_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let suffix = format!(".{}", self.extension);

        match file_name.strip_suffix(&suffix) {
            Some(stem) => stem.to_string(),
            None => file_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::path::PathBuf;

    fn check(selector: &str, path: &str) -> Result<(), ViolationKind> {
        let scheme = NamingScheme::origin().unwrap();
        AccordanceChecker::new(&scheme, "post.css").check(selector, &PathBuf::from(path))
    }

    #[rstest]
    #[case::entity(".button", "blocks/button/button.post.css")]
    #[case::entity_relative(".button", "button/button.post.css")]
    #[case::entity_modifier(".button_disabled", "button/_disabled/button_disabled.post.css")]
    #[case::entity_modifier_value(".button_size_l", "button/_size/button_size_l.post.css")]
    #[case::sub_entity(".button__icon", "button/__icon/button__icon.post.css")]
    #[case::sub_entity_modifier(
        ".button__icon_size_l",
        "src/button/__icon/_size/button__icon_size_l.post.css"
    )]
    fn test_accordant_paths(#[case] selector: &str, #[case] path: &str) {
        assert_eq!(check(selector, path), Ok(()));
    }

    #[rstest]
    #[case::wrong_entity_dir(".button", "wrong/button.post.css", "button/button.post.css")]
    #[case::no_directory(".button", "button.post.css", "button/button.post.css")]
    #[case::modifier_flat(
        ".button_disabled",
        "button/button_disabled.post.css",
        "button/_disabled/button_disabled.post.css"
    )]
    #[case::modifier_without_prefix(
        ".button_disabled",
        "button/disabled/button_disabled.post.css",
        "button/_disabled/button_disabled.post.css"
    )]
    #[case::sub_entity_flat(
        ".button__icon",
        "button/button__icon.post.css",
        "button/__icon/button__icon.post.css"
    )]
    #[case::sub_entity_wrong_entity(
        ".button__icon",
        "menu/__icon/button__icon.post.css",
        "button/__icon/button__icon.post.css"
    )]
    #[case::full_missing_modifier_dir(
        ".button__icon_size_l",
        "button/__icon/button__icon_size_l.post.css",
        "button/__icon/_size/button__icon_size_l.post.css"
    )]
    #[case::full_swapped_dirs(
        ".button__icon_size_l",
        "button/_size/__icon/button__icon_size_l.post.css",
        "button/__icon/_size/button__icon_size_l.post.css"
    )]
    fn test_structural_mismatch(
        #[case] selector: &str,
        #[case] path: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(
            check(selector, path),
            Err(ViolationKind::StructuralMismatch {
                selector: selector.to_string(),
                expected: expected.to_string(),
            })
        );
    }

    #[test]
    fn test_filename_mismatch_wins_over_structure() {
        assert_eq!(
            check(".button", "button/button-x.post.css"),
            Err(ViolationKind::FilenameMismatch {
                selector: ".button".to_string(),
                file_name: "button-x".to_string(),
            })
        );
    }

    #[test]
    fn test_other_suffix_keeps_full_file_name() {
        assert_eq!(
            check(".button", "button/button.css"),
            Err(ViolationKind::FilenameMismatch {
                selector: ".button".to_string(),
                file_name: "button.css".to_string(),
            })
        );
    }

    #[test]
    fn test_invalid_name() {
        assert_eq!(
            check(".button__icon__x", "button/button__icon__x.post.css"),
            Err(ViolationKind::InvalidName {
                selector: ".button__icon__x".to_string(),
                raw_name: "button__icon__x".to_string(),
            })
        );
    }

    #[test]
    fn test_compound_selector_is_a_filename_mismatch() {
        let result = check(".button, .link", "button/button.post.css");
        assert!(matches!(result, Err(ViolationKind::FilenameMismatch { .. })));
    }

    #[test]
    fn test_custom_delimiters_drive_directory_prefixes() {
        let scheme = NamingScheme::new("__", "--", "_", crate::patterns::DEFAULT_WORD_PATTERN)
            .unwrap();
        let checker = AccordanceChecker::new(&scheme, "css");

        assert_eq!(
            checker.check(".card--active", Path::new("card/--active/card--active.css")),
            Ok(())
        );
        assert!(checker
            .check(".card--active", Path::new("card/_active/card--active.css"))
            .is_err());
    }

    #[test]
    fn test_expected_location() {
        let scheme = NamingScheme::origin().unwrap();
        let checker = AccordanceChecker::new(&scheme, "post.css");
        let identity = NamingIdentity::entity("menu")
            .with_sub_entity("item")
            .with_modifier("open", None);

        assert_eq!(
            checker.expected_location(&identity),
            "menu/__item/_open/menu__item_open.post.css"
        );
    }
}

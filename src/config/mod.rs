//! Configuration loading and management for Naming Guard
//!
//! Architecture: Anti-Corruption Layer - Configuration translates external YAML formats
//! - Raw YAML structures are converted to one immutable settings value
//! - The naming scheme and file suffix are injected, never process-wide state
//! - Defaults are embedded in the domain, not infrastructure

use crate::domain::violations::{GuardError, GuardResult};
use crate::patterns::{NamingScheme, DEFAULT_WORD_PATTERN};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file names looked up when none is given explicitly
pub const DEFAULT_CONFIG_FILES: [&str; 3] = [
    "naming_guard.yaml",
    "naming_guard.yml",
    ".naming_guard.yaml",
];

const SUPPORTED_VERSIONS: [&str; 1] = ["1.0"];

/// Main configuration structure for Naming Guard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamingConfig {
    /// Configuration format version
    pub version: String,
    /// Which files take part in a run
    #[serde(default)]
    pub files: FileConfig,
    /// Naming scheme selectors must follow
    #[serde(default)]
    pub naming: NamingSchemeConfig,
}

/// Style-sheet file discovery configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Suffix after the base name, without the leading dot
    pub extension: String,
    /// Exclusion patterns (gitignore-style)
    pub exclude: Vec<String>,
    /// Optional ignore file name; empty disables it
    pub ignore_file: Option<String>,
    /// Enumerate files in lexicographic order
    pub sorted: bool,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            extension: "post.css".to_string(),
            exclude: vec!["**/node_modules/**".to_string(), "**/.git/**".to_string()],
            ignore_file: Some(".namingignore".to_string()),
            sorted: true,
        }
    }
}

impl FileConfig {
    /// Ignore file name, with an empty name meaning none
    pub fn effective_ignore_file(&self) -> Option<&str> {
        self.ignore_file.as_deref().filter(|name| !name.is_empty())
    }
}

/// Built-in delimiter sets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NamingPreset {
    /// `block__elem_mod_val`
    #[default]
    Origin,
    /// `block__elem--mod_val`
    TwoDashes,
}

impl NamingPreset {
    /// Element, modifier and modifier value delimiters
    pub fn delimiters(self) -> (&'static str, &'static str, &'static str) {
        match self {
            Self::Origin => ("__", "_", "_"),
            Self::TwoDashes => ("__", "--", "_"),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Origin => "origin",
            Self::TwoDashes => "two-dashes",
        }
    }
}

/// Naming scheme configuration: a preset plus optional overrides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingSchemeConfig {
    pub preset: NamingPreset,
    pub element_delimiter: Option<String>,
    pub modifier_delimiter: Option<String>,
    pub modifier_value_delimiter: Option<String>,
    pub word_pattern: Option<String>,
}

impl NamingSchemeConfig {
    pub fn element_delimiter(&self) -> &str {
        self.element_delimiter
            .as_deref()
            .unwrap_or(self.preset.delimiters().0)
    }

    pub fn modifier_delimiter(&self) -> &str {
        self.modifier_delimiter
            .as_deref()
            .unwrap_or(self.preset.delimiters().1)
    }

    pub fn modifier_value_delimiter(&self) -> &str {
        self.modifier_value_delimiter
            .as_deref()
            .unwrap_or(self.preset.delimiters().2)
    }

    pub fn word_pattern(&self) -> &str {
        self.word_pattern.as_deref().unwrap_or(DEFAULT_WORD_PATTERN)
    }
}

impl NamingConfig {
    /// Load configuration from a YAML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> GuardResult<Self> {
        let contents = fs::read_to_string(&path).map_err(|e| {
            GuardError::config(format!(
                "Failed to read config file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;

        let config: Self = serde_yaml::from_str(&contents).map_err(|e| {
            GuardError::config(format!(
                "Failed to parse config file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from string content
    pub fn load_from_str(content: &str) -> GuardResult<Self> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| GuardError::config(format!("Failed to parse config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Find the first default config file in `dir`
    pub fn discover<P: AsRef<Path>>(dir: P) -> Option<PathBuf> {
        DEFAULT_CONFIG_FILES
            .iter()
            .map(|name| dir.as_ref().join(name))
            .find(|candidate| candidate.is_file())
    }

    /// Load the config found in `dir`, falling back to defaults
    pub fn discover_or_default<P: AsRef<Path>>(dir: P) -> GuardResult<Self> {
        match Self::discover(dir) {
            Some(path) => {
                tracing::debug!("Using configuration {}", path.display());
                Self::load_from_file(path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Get default configuration
    pub fn with_defaults() -> Self {
        Self {
            version: "1.0".to_string(),
            files: FileConfig::default(),
            naming: NamingSchemeConfig::default(),
        }
    }

    /// Validate the configuration for consistency and correctness
    pub fn validate(&self) -> GuardResult<()> {
        if !SUPPORTED_VERSIONS.contains(&self.version.as_str()) {
            return Err(GuardError::config(format!(
                "Unsupported configuration version: {}. Supported versions: {}",
                self.version,
                SUPPORTED_VERSIONS.join(", ")
            )));
        }

        let extension = &self.files.extension;
        if extension.is_empty() || extension.starts_with('.') || extension.contains('/') {
            return Err(GuardError::config(format!(
                "Invalid file extension '{extension}': expected a suffix such as 'post.css'"
            )));
        }

        for pattern in &self.files.exclude {
            let glob_source = pattern.trim_start_matches('!').trim_end_matches('/');
            glob::Pattern::new(glob_source).map_err(|e| {
                GuardError::config(format!("Invalid exclude pattern '{pattern}': {e}"))
            })?;
        }

        let naming = &self.naming;
        for (label, delimiter) in [
            ("element_delimiter", naming.element_delimiter()),
            ("modifier_delimiter", naming.modifier_delimiter()),
            ("modifier_value_delimiter", naming.modifier_value_delimiter()),
        ] {
            if delimiter.is_empty() {
                return Err(GuardError::config(format!("{label} must not be empty")));
            }
            if delimiter.contains('/') || delimiter.contains('.') {
                return Err(GuardError::config(format!(
                    "{label} '{delimiter}' must not contain '/' or '.'"
                )));
            }
        }
        if naming.element_delimiter() == naming.modifier_delimiter() {
            return Err(GuardError::config(format!(
                "element_delimiter and modifier_delimiter are both '{}'",
                naming.element_delimiter()
            )));
        }

        NamingScheme::from_config(naming)
            .map_err(|e| GuardError::config(format!("Invalid naming scheme: {e}")))?;

        Ok(())
    }

    /// Serialize back to YAML
    pub fn to_yaml(&self) -> GuardResult<String> {
        serde_yaml::to_string(self)
            .map_err(|e| GuardError::config(format!("Failed to serialize config: {e}")))
    }
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Configuration builder for programmatic construction
pub struct ConfigBuilder {
    config: NamingConfig,
}

impl ConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: NamingConfig::default(),
        }
    }

    /// Start from an existing configuration
    pub fn from_config(config: NamingConfig) -> Self {
        Self { config }
    }

    /// Set the style-sheet suffix, e.g. `css`
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.config.files.extension = extension.into();
        self
    }

    /// Add an exclusion pattern
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.config.files.exclude.push(pattern.into());
        self
    }

    /// Set the ignore file name, `None` to disable
    pub fn ignore_file(mut self, filename: Option<&str>) -> Self {
        self.config.files.ignore_file = filename.map(str::to_string);
        self
    }

    pub fn sorted(mut self, sorted: bool) -> Self {
        self.config.files.sorted = sorted;
        self
    }

    pub fn preset(mut self, preset: NamingPreset) -> Self {
        self.config.naming.preset = preset;
        self
    }

    pub fn word_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.config.naming.word_pattern = Some(pattern.into());
        self
    }

    /// Build the final configuration
    pub fn build(self) -> GuardResult<NamingConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//! Style-sheet discovery using suffix and .gitignore-style patterns
//!
//! Architectural Principle: Service Layer - PathFilter owns every "which files?" decision
//! - Keeps only files named `<name>.<extension>`
//! - Applies exclusion patterns and ignore files relative to the validated root
//! - Yields files in a deterministic order unless told otherwise

use crate::config::FileConfig;
use crate::domain::violations::{GuardError, GuardResult};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Selects the style-sheet files a run validates
#[derive(Debug, Clone)]
pub struct PathFilter {
    /// Suffix after the base name, without the leading dot
    extension: String,
    /// `*.<extension>` matched against file names
    suffix_pattern: glob::Pattern,
    /// Exclude/include patterns, later ones win
    patterns: Vec<FilterPattern>,
    /// Name of ignore files to process
    ignore_filename: Option<String>,
    /// Enumerate in lexicographic order
    sorted: bool,
}

/// A single path filter pattern
#[derive(Debug, Clone)]
struct FilterPattern {
    /// The glob pattern, stripped of `!`, leading and trailing `/`
    pattern: glob::Pattern,
    /// Whether this re-includes matches (starts with !)
    is_include: bool,
    /// Original pattern string without the `!`
    original: String,
    /// Directory glob when the pattern ends in `/**` and so covers a whole subtree
    subtree: Option<glob::Pattern>,
}

impl FilterPattern {
    fn parse(source: &str) -> Result<Self, glob::PatternError> {
        let (is_include, original) = match source.strip_prefix('!') {
            Some(stripped) => (true, stripped),
            None => (false, source),
        };
        let glob_source = original.trim_start_matches('/').trim_end_matches('/');

        let subtree = match glob_source.strip_suffix("/**") {
            Some(dir) if !dir.is_empty() => Some(glob::Pattern::new(dir)?),
            _ => None,
        };

        Ok(Self {
            pattern: glob::Pattern::new(glob_source)?,
            is_include,
            original: original.to_string(),
            subtree,
        })
    }

    /// Whether every file below `relative_dir` is excluded by this pattern
    fn excludes_dir(&self, relative_dir: &Path) -> bool {
        if self.is_include {
            return false;
        }

        if self.original.ends_with('/') {
            return if self.original.trim_end_matches('/').contains('/') {
                self.pattern.matches_path(relative_dir)
            } else {
                relative_dir
                    .file_name()
                    .is_some_and(|name| self.pattern.matches(&name.to_string_lossy()))
            };
        }

        self.subtree
            .as_ref()
            .is_some_and(|dir| dir.matches_path(relative_dir))
    }

    /// Match a path relative to the directory the pattern is anchored in
    fn matches(&self, relative: &Path) -> bool {
        let component_matches = |path: &Path| {
            path.file_name()
                .is_some_and(|name| self.pattern.matches(&name.to_string_lossy()))
        };
        let anchored = self.original.trim_end_matches('/').contains('/');

        if self.original.ends_with('/') {
            // Directory pattern: any ancestor directory of the file
            return relative
                .ancestors()
                .skip(1)
                .filter(|dir| !dir.as_os_str().is_empty())
                .any(|dir| {
                    if anchored {
                        self.pattern.matches_path(dir)
                    } else {
                        component_matches(dir)
                    }
                });
        }

        if anchored {
            self.pattern.matches_path(relative)
        } else {
            component_matches(relative)
        }
    }
}

impl PathFilter {
    /// Create a new path filter
    pub fn new(
        extension: impl Into<String>,
        patterns: Vec<String>,
        ignore_filename: Option<String>,
        sorted: bool,
    ) -> GuardResult<Self> {
        let extension = extension.into();
        let suffix_source = format!("*.{}", glob::Pattern::escape(&extension));
        let suffix_pattern = glob::Pattern::new(&suffix_source).map_err(|e| {
            GuardError::pattern(format!("Invalid extension '{extension}': {e}"))
        })?;

        let mut filter = Self {
            extension,
            suffix_pattern,
            patterns: Vec::new(),
            ignore_filename,
            sorted,
        };
        for pattern in patterns {
            filter.add_pattern(pattern)?;
        }

        Ok(filter)
    }

    /// Create a filter from the `files` configuration section
    pub fn from_config(config: &FileConfig) -> GuardResult<Self> {
        Self::new(
            config.extension.clone(),
            config.exclude.clone(),
            config.effective_ignore_file().map(str::to_string),
            config.sorted,
        )
    }

    /// Suffix after the base name, without the leading dot
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Whether the file name ends in `.<extension>`
    pub fn matches_extension<P: AsRef<Path>>(&self, path: P) -> bool {
        path.as_ref()
            .file_name()
            .is_some_and(|name| self.suffix_pattern.matches(&name.to_string_lossy()))
    }

    /// Add a pattern to the filter
    pub fn add_pattern(&mut self, pattern: String) -> GuardResult<()> {
        let parsed = FilterPattern::parse(&pattern)
            .map_err(|e| GuardError::pattern(format!("Invalid pattern '{pattern}': {e}")))?;
        self.patterns.push(parsed);
        Ok(())
    }

    /// Check if a file under `root` takes part in validation
    pub fn should_analyze<P: AsRef<Path>, R: AsRef<Path>>(
        &self,
        path: P,
        root: R,
    ) -> GuardResult<bool> {
        let path = path.as_ref();
        let root = root.as_ref();

        if !self.matches_extension(path) {
            return Ok(false);
        }

        let relative = path.strip_prefix(root).unwrap_or(path);
        let mut should_include = true;

        // Apply patterns in order (like .gitignore)
        for pattern in &self.patterns {
            if pattern.matches(relative) {
                should_include = pattern.is_include;
            }
        }

        if !should_include {
            return Ok(false);
        }

        if self.ignore_filename.is_some() && self.is_ignored_by_files(path, root)? {
            return Ok(false);
        }

        Ok(true)
    }

    /// Whether the walk can skip `dir` entirely.
    ///
    /// Only exclude patterns prune, and only while no `!` pattern could re-include.
    fn prunes_dir(&self, dir: &Path, root: &Path) -> bool {
        let Ok(relative) = dir.strip_prefix(root) else {
            return false;
        };
        if relative.as_os_str().is_empty() || self.patterns.iter().any(|p| p.is_include) {
            return false;
        }

        self.patterns.iter().any(|p| p.excludes_dir(relative))
    }

    /// Check ignore files between `root` and the file, nearest last
    fn is_ignored_by_files(&self, path: &Path, root: &Path) -> GuardResult<bool> {
        let Some(ignore_filename) = &self.ignore_filename else {
            return Ok(false);
        };

        let mut directories: Vec<&Path> = path
            .ancestors()
            .skip(1)
            .take_while(|dir| dir.starts_with(root))
            .collect();
        directories.reverse();

        let mut is_ignored = false;
        for dir in directories {
            let ignore_file = dir.join(ignore_filename);
            if !ignore_file.is_file() {
                continue;
            }

            let Ok(relative) = path.strip_prefix(dir) else {
                continue;
            };
            for pattern in self.load_ignore_file(&ignore_file)? {
                if pattern.matches(relative) {
                    is_ignored = !pattern.is_include;
                }
            }
        }

        Ok(is_ignored)
    }

    /// Load patterns from an ignore file
    fn load_ignore_file(&self, path: &Path) -> GuardResult<Vec<FilterPattern>> {
        let content = fs::read_to_string(path).map_err(|e| GuardError::io(path, e))?;

        let mut patterns = Vec::new();
        for line in content.lines() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            match FilterPattern::parse(line) {
                Ok(pattern) => patterns.push(pattern),
                Err(e) => {
                    // Skip invalid patterns rather than failing the run
                    tracing::warn!("Invalid pattern '{}' in {}: {}", line, path.display(), e);
                }
            }
        }

        Ok(patterns)
    }

    /// Enumerate the style-sheets under `root`.
    ///
    /// A file given as `root` is returned alone when its suffix matches.
    pub fn find_files<P: AsRef<Path>>(&self, root: P) -> GuardResult<Vec<PathBuf>> {
        let root = root.as_ref();

        if root.is_file() {
            return Ok(if self.matches_extension(root) {
                vec![root.to_path_buf()]
            } else {
                Vec::new()
            });
        }
        if !root.is_dir() {
            return Err(GuardError::walk(format!(
                "'{}' is not a directory",
                root.display()
            )));
        }

        let mut walker = WalkDir::new(root).follow_links(false);
        if self.sorted {
            walker = walker.sort_by_file_name();
        }

        let entries = walker.into_iter().filter_entry(|entry| {
            !(entry.file_type().is_dir() && self.prunes_dir(entry.path(), root))
        });

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                GuardError::walk(format!("Failed to walk '{}': {}", root.display(), e))
            })?;

            if entry.file_type().is_file() && self.should_analyze(entry.path(), root)? {
                files.push(entry.into_path());
            }
        }

        tracing::debug!("Discovered {} style-sheets under {}", files.len(), root.display());
        Ok(files)
    }
}

//! Naming Guard CLI - Command-line interface for naming accordance checks
//!
//! CDD Principle: Application Layer - CLI coordinates user interactions with domain services
//! - Translates user commands to domain operations
//! - Handles external concerns like config discovery, process exit codes, and terminal output

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use naming_guard::{
    ConfigBuilder, DirectoryValidator, NamingConfig, NamingPreset, OutputFormat,
    ReportFormatter, ReportOptions,
};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

/// Exit code when a naming violation was found
const EXIT_VIOLATION: i32 = 1;
/// Exit code when the run could not complete
const EXIT_FAILURE: i32 = 2;

/// Naming Guard - block/element/modifier naming accordance for style-sheets
#[derive(Parser)]
#[command(name = "naming-guard")]
#[command(version)]
#[command(about = "Checks that style-sheet selectors match their file names and directories")]
#[command(
    long_about = "Naming Guard verifies that every style-sheet declares at most one top-level class rule, named after the file and placed in the block/element/modifier directory that its name dictates. Designed for build-time and CI/CD checks: silent on success, the first violation is fatal."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check style-sheet trees for naming violations
    Check(CheckArgs),

    /// Show how a selector decomposes and where its file must live
    Explain {
        /// Class selector or raw name, e.g. `.button__icon_size_l`
        selector: String,
    },

    /// Validate configuration file
    ValidateConfig {
        /// Configuration file to validate
        config_file: Option<PathBuf>,
    },
}

#[derive(Args, Clone, Default)]
struct CheckArgs {
    /// Directories (or single files) to check, defaults to the current directory
    paths: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "human")]
    format: OutputFormatArg,

    /// Style-sheet suffix without the leading dot, e.g. `post.css`
    #[arg(short, long)]
    extension: Option<String>,

    /// Naming scheme preset
    #[arg(long, value_enum)]
    preset: Option<PresetArg>,

    /// Additional exclude patterns
    #[arg(long, action = clap::ArgAction::Append)]
    exclude: Vec<String>,

    /// Ignore .namingignore files
    #[arg(long)]
    no_ignore: bool,

    /// Keep the directory walker's native order
    #[arg(long)]
    unsorted: bool,

    /// Print a summary line even on success
    #[arg(long)]
    summary: bool,
}

#[derive(Copy, Clone, Default, ValueEnum, PartialEq)]
enum OutputFormatArg {
    #[default]
    Human,
    Json,
    Github,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Github => OutputFormat::GitHub,
        }
    }
}

#[derive(Copy, Clone, ValueEnum)]
enum PresetArg {
    Origin,
    TwoDashes,
}

impl From<PresetArg> for NamingPreset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Origin => NamingPreset::Origin,
            PresetArg::TwoDashes => NamingPreset::TwoDashes,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);
    if cli.no_color {
        colored::control::set_override(false);
    }

    match run_command(cli) {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(EXIT_FAILURE);
        }
    }
}

fn run_command(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Check(args) => run_check(cli.config, args, !cli.no_color),
        Commands::Explain { selector } => run_explain(cli.config, &selector),
        Commands::ValidateConfig { config_file } => run_validate_config(config_file.or(cli.config)),
    }
}

/// Explicit config file, else one discovered in the current directory, else defaults
fn load_config(config_path: Option<PathBuf>) -> Result<NamingConfig> {
    match config_path {
        Some(path) => NamingConfig::load_from_file(&path)
            .with_context(|| format!("loading configuration {}", path.display())),
        None => NamingConfig::discover_or_default(".").context("loading default configuration"),
    }
}

fn run_check(config_path: Option<PathBuf>, args: CheckArgs, use_colors: bool) -> Result<i32> {
    let mut builder = ConfigBuilder::from_config(load_config(config_path)?);
    if let Some(extension) = args.extension {
        builder = builder.extension(extension);
    }
    if let Some(preset) = args.preset {
        builder = builder.preset(preset.into());
    }
    if args.no_ignore {
        builder = builder.ignore_file(None);
    }
    if args.unsorted {
        builder = builder.sorted(false);
    }
    let config = builder.build().context("applying command-line options")?;

    let mut validator = DirectoryValidator::new(config)?;
    for pattern in args.exclude {
        validator.add_exclude(pattern)?;
    }

    // Use current directory if no paths specified
    let paths = if args.paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        args.paths
    };

    let report = validator.validate_paths(&paths)?;

    let formatter = ReportFormatter::new(ReportOptions {
        use_colors,
        show_summary: args.summary,
    });
    print!("{}", formatter.format_report(&report, args.format.into())?);

    if report.is_accordant() {
        Ok(0)
    } else {
        Ok(EXIT_VIOLATION)
    }
}

fn run_explain(config_path: Option<PathBuf>, selector: &str) -> Result<i32> {
    let validator = DirectoryValidator::new(load_config(config_path)?)?;
    let raw_name = selector.strip_prefix('.').unwrap_or(selector);

    let Some(identity) = validator.scheme().parse(raw_name) else {
        eprintln!(
            "'{}' is not a valid name under the {} naming scheme",
            raw_name,
            validator.config().naming.preset.as_str()
        );
        return Ok(EXIT_VIOLATION);
    };

    let checker = validator.accordance_checker();
    println!("Name:      {raw_name}");
    println!("Shape:     {:?}", identity.shape());
    println!("Entity:    {}", identity.entity);
    if let Some(sub_entity) = &identity.sub_entity {
        println!("Element:   {sub_entity}");
    }
    if let Some(modifier) = &identity.modifier {
        match &modifier.value {
            Some(value) => println!("Modifier:  {} = {}", modifier.name, value),
            None => println!("Modifier:  {}", modifier.name),
        }
    }
    println!("Location:  .../{}", checker.expected_location(&identity));

    Ok(0)
}

fn run_validate_config(config_path: Option<PathBuf>) -> Result<i32> {
    let config_path = config_path.unwrap_or_else(|| PathBuf::from("naming_guard.yaml"));

    println!("Validating configuration: {}", config_path.display());

    match NamingConfig::load_from_file(&config_path) {
        Ok(config) => {
            println!("Configuration is valid");
            println!("  Extension: .{}", config.files.extension);
            println!("  Exclusions: {}", config.files.exclude.len());
            println!(
                "  Naming: {} (element '{}', modifier '{}', value '{}')",
                config.naming.preset.as_str(),
                config.naming.element_delimiter(),
                config.naming.modifier_delimiter(),
                config.naming.modifier_value_delimiter()
            );
            Ok(0)
        }
        Err(e) => {
            eprintln!("Configuration validation failed: {e}");
            Ok(EXIT_VIOLATION)
        }
    }
}

/// `--verbose` forces debug output, otherwise `RUST_LOG` applies with a `warn` fallback
fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    }
}

fn init_logging(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &std::path::Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn css_args(root: &std::path::Path) -> CheckArgs {
        CheckArgs {
            paths: vec![root.to_path_buf()],
            format: OutputFormatArg::Json,
            extension: Some("css".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_check_command_accordant() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "button/button.css", ".button { color: red; }");

        let result = run_check(None, css_args(temp_dir.path()), false);
        assert_eq!(result.unwrap(), 0);
    }

    #[test]
    fn test_check_command_violation() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "wrong/button.css", ".button {}");

        let result = run_check(None, css_args(temp_dir.path()), false);
        assert_eq!(result.unwrap(), EXIT_VIOLATION);
    }

    #[test]
    fn test_check_command_exclude() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "wrong/button.css", ".button {}");

        let args = CheckArgs {
            exclude: vec!["wrong/".to_string()],
            ..css_args(temp_dir.path())
        };
        assert_eq!(run_check(None, args, false).unwrap(), 0);
    }

    #[test]
    fn test_check_command_missing_path() {
        let temp_dir = TempDir::new().unwrap();
        let result = run_check(None, css_args(&temp_dir.path().join("missing")), false);
        assert!(result.is_err());
    }

    #[test]
    fn test_check_command_with_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("naming.yaml");
        fs::write(
            &config_file,
            "version: \"1.0\"\nfiles:\n  extension: pcss\nnaming:\n  preset: two-dashes\n",
        )
        .unwrap();
        write(temp_dir.path(), "styles/card/--active/card--active.pcss", ".card--active {}");

        let args = CheckArgs {
            paths: vec![temp_dir.path().join("styles")],
            ..Default::default()
        };
        assert_eq!(run_check(Some(config_file), args, false).unwrap(), 0);
    }

    #[test]
    fn test_validate_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("test_config.yaml");

        let yaml = NamingConfig::default().to_yaml().unwrap();
        fs::write(&config_file, yaml).unwrap();
        assert_eq!(run_validate_config(Some(config_file)).unwrap(), 0);

        let broken = temp_dir.path().join("broken.yaml");
        fs::write(&broken, "version: \"9\"\n").unwrap();
        assert_eq!(run_validate_config(Some(broken)).unwrap(), EXIT_VIOLATION);
    }

    #[test]
    fn test_explain() {
        assert_eq!(run_explain(None, ".button__icon_size_l").unwrap(), 0);
        assert_eq!(run_explain(None, ".button__").unwrap(), EXIT_VIOLATION);
    }

    #[test]
    fn test_verbose_overrides_log_filter() {
        assert_eq!(log_filter(true).to_string(), "debug");
    }
}

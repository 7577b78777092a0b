//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::models::SortOrder;
use clap::Parser;
use std::path::PathBuf;

/// menu-index - build autocomplete indexes from VistA menu descriptors
///
/// Reads every `menus/<CATEGORY>/VistAMenu-*.json` file under the base
/// directory and writes a JSON array of `{label, id}` entries.
///
/// Examples:
///   menu-index --category 19
///   menu-index --category 19 --base-dir ./files --output-name option_autocomplete.json
///   menu-index --category 19 --sort id --pretty
///   menu-index --category 19 --dry-run
///   menu-index --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Category identifier selecting the descriptor directory
    ///
    /// Descriptors are read from <BASE_DIR>/menus/<CATEGORY>/.
    #[arg(
        short = 'C',
        long,
        value_name = "ID",
        env = "MENU_INDEX_CATEGORY",
        required_unless_present = "init_config"
    )]
    pub category: Option<String>,

    /// File name of the index, written under the base directory
    ///
    /// Default: from config or menu_autocomplete.json.
    #[arg(short, long, value_name = "FILE", env = "MENU_INDEX_OUTPUT")]
    pub output_name: Option<String>,

    /// Root directory containing the menus tree
    #[arg(
        short,
        long,
        default_value = ".",
        value_name = "DIR",
        env = "MENU_INDEX_BASE_DIR"
    )]
    pub base_dir: PathBuf,

    /// Path to configuration file
    ///
    /// If not specified, looks for .menuindex.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Order of entries in the index (none, id, label)
    ///
    /// `none` keeps directory listing order. Overrides config file setting.
    #[arg(long, value_name = "ORDER")]
    pub sort: Option<SortOrder>,

    /// Pretty-print the index
    #[arg(long)]
    pub pretty: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Dry run: list matching descriptor files without writing the index
    #[arg(long)]
    pub dry_run: bool,

    /// Generate a default .menuindex.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the category, empty if not set (should be validated first).
    pub fn category(&self) -> &str {
        self.category.as_deref().unwrap_or("")
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if self.category.is_none() {
            return Err("A category is required".to_string());
        }

        // Output must be a bare file name inside the base directory
        if let Some(ref name) = self.output_name {
            crate::index::check_output_name(name).map_err(|e| e.to_string())?;
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if !self.base_dir.exists() {
            return Err(format!(
                "Base directory does not exist: {}",
                self.base_dir.display()
            ));
        }
        if !self.base_dir.is_dir() {
            return Err(format!(
                "Base path is not a directory: {}",
                self.base_dir.display()
            ));
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

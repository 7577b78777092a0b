//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.menuindex.toml` files.

use crate::models::SortOrder;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = ".menuindex.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Index layout and output settings.
    #[serde(default)]
    pub index: IndexConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default output file name, written under the base directory.
    #[serde(default = "default_output_name")]
    pub output_name: String,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output_name: default_output_name(),
            verbose: false,
        }
    }
}

fn default_output_name() -> String {
    "menu_autocomplete.json".to_string()
}

/// Descriptor layout and index output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Directory under the base directory holding one subdirectory per category.
    #[serde(default = "default_menus_dir")]
    pub menus_dir: String,

    /// File name prefix of descriptor files.
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,

    /// File extension of descriptor files (without dot).
    #[serde(default = "default_file_extension")]
    pub file_extension: String,

    /// Order of entries in the written index.
    #[serde(default)]
    pub sort: SortOrder,

    /// Pretty-print the written index.
    #[serde(default)]
    pub pretty: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            menus_dir: default_menus_dir(),
            file_prefix: default_file_prefix(),
            file_extension: default_file_extension(),
            sort: SortOrder::None,
            pretty: false,
        }
    }
}

fn default_menus_dir() -> String {
    "menus".to_string()
}

fn default_file_prefix() -> String {
    "VistAMenu-".to_string()
}

fn default_file_extension() -> String {
    "json".to_string()
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load `.menuindex.toml` from a directory.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// Only explicitly provided values override the file.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref output_name) = args.output_name {
            self.general.output_name = output_name.clone();
        }

        if let Some(sort) = args.sort {
            self.index.sort = sort;
        }

        // Flags always override
        if args.pretty {
            self.index.pretty = true;
        }
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

//! Descriptor scanner for discovering menu descriptor files.
//!
//! Matches `<base>/<menus_dir>/<category>/<prefix>*.<extension>` one level
//! deep, in the order the directory listing yields.

use crate::error::{IndexError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Configuration for descriptor scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Directory under the base directory holding the category directories
    pub menus_dir: String,
    /// Required file name prefix (e.g., "VistAMenu-")
    pub file_prefix: String,
    /// Required file extension, without dot (e.g., "json")
    pub file_extension: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::from(&crate::config::IndexConfig::default())
    }
}

impl From<&crate::config::IndexConfig> for ScanConfig {
    fn from(config: &crate::config::IndexConfig) -> Self {
        Self {
            menus_dir: config.menus_dir.clone(),
            file_prefix: config.file_prefix.clone(),
            file_extension: config.file_extension.clone(),
        }
    }
}

/// A descriptor file found by the scanner.
#[derive(Debug, Clone)]
pub struct ScannedFile {
    /// Full path to the descriptor
    pub path: PathBuf,
    /// File size in bytes, if metadata could be read
    pub size: Option<u64>,
}

/// Scanner for the descriptor files of one base directory.
pub struct DescriptorScanner {
    config: ScanConfig,
    base_dir: PathBuf,
}

impl DescriptorScanner {
    /// Create a new descriptor scanner.
    pub fn new(base_dir: PathBuf, config: ScanConfig) -> Self {
        Self { config, base_dir }
    }

    /// Directory holding the descriptors of a category.
    pub fn category_dir(&self, category: &str) -> PathBuf {
        self.base_dir.join(&self.config.menus_dir).join(category)
    }

    /// Human-readable glob pattern for a category, used in log output.
    pub fn pattern(&self, category: &str) -> String {
        format!(
            "{}/{}*.{}",
            self.category_dir(category).display(),
            self.config.file_prefix,
            self.config.file_extension
        )
    }

    /// Find all descriptor files of a category.
    ///
    /// A missing category directory yields no files; a missing base
    /// directory is an error.
    pub fn scan(&self, category: &str) -> Result<Vec<ScannedFile>> {
        check_dir(&self.base_dir)?;

        let dir = self.category_dir(category);
        if !dir.exists() {
            warn!("Menu directory not found: {}", dir.display());
            return Ok(Vec::new());
        }
        if !dir.is_dir() {
            return Err(IndexError::NotADirectory { path: dir });
        }

        let mut files = Vec::new();

        for entry in WalkDir::new(&dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|source| IndexError::ListDir {
                path: dir.clone(),
                source,
            })?;

            let name = entry.file_name().to_string_lossy();
            if !self.matches(&name) {
                continue;
            }

            // Symlinks are followed so linked descriptors are picked up too
            let path = entry.path();
            if !path.is_file() {
                debug!("Skipping non-file match: {}", path.display());
                continue;
            }

            let size = match path.metadata() {
                Ok(metadata) => Some(metadata.len()),
                Err(e) => {
                    debug!("Cannot read metadata of {}: {}", path.display(), e);
                    None
                }
            };
            files.push(ScannedFile {
                path: path.to_path_buf(),
                size,
            });
        }

        debug!("{} descriptors match {}", files.len(), self.pattern(category));
        Ok(files)
    }

    /// Check if a file name matches `<prefix>*.<extension>`.
    pub fn matches(&self, name: &str) -> bool {
        // Wildcards never match a leading dot
        if name.starts_with('.') && !self.config.file_prefix.starts_with('.') {
            return false;
        }

        let suffix = format!(".{}", self.config.file_extension);
        name.len() >= self.config.file_prefix.len() + suffix.len()
            && name.starts_with(&self.config.file_prefix)
            && name.ends_with(&suffix)
    }
}

/// Ensure a path exists and is a directory.
pub fn check_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(IndexError::BaseDirMissing {
            path: path.to_path_buf(),
        });
    }
    if !path.is_dir() {
        return Err(IndexError::NotADirectory {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

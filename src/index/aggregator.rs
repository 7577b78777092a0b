//! Descriptor aggregation.
//!
//! Reads every matched descriptor, builds one entry per file and writes
//! the resulting index. All descriptors are decoded before anything is
//! written, so a bad descriptor leaves the output path untouched.

use crate::error::{IndexError, Result};
use crate::models::{IndexEntry, MenuDescriptor, SortOrder};
use crate::report;
use crate::scanner::{DescriptorScanner, ScanConfig, ScannedFile};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

/// Options controlling how an index is built and written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexOptions {
    /// Descriptor layout
    pub scan: ScanConfig,
    /// Entry order in the output
    pub sort: SortOrder,
    /// Pretty-print the output
    pub pretty: bool,
}

impl From<&crate::config::IndexConfig> for IndexOptions {
    fn from(config: &crate::config::IndexConfig) -> Self {
        Self {
            scan: ScanConfig::from(config),
            sort: config.sort,
            pretty: config.pretty,
        }
    }
}

/// Build the index for `category` and write it to `<base_dir>/<output_name>`
/// using the default descriptor layout.
///
/// Returns the path of the written index.
pub fn run(category: &str, output_name: &str, base_dir: &Path) -> Result<PathBuf> {
    run_with(category, output_name, base_dir, &IndexOptions::default())
}

/// Same as [`run`], with explicit options.
pub fn run_with(
    category: &str,
    output_name: &str,
    base_dir: &Path,
    options: &IndexOptions,
) -> Result<PathBuf> {
    check_output_name(output_name)?;
    let entries = build_index(category, base_dir, options)?;

    let output = base_dir.join(output_name);
    report::write_index(&entries, &output, options.pretty)?;

    info!("Wrote {} entries to {}", entries.len(), output.display());
    Ok(output)
}

/// Ensure the output name is a single file name, so the index lands in the base directory.
pub fn check_output_name(name: &str) -> Result<()> {
    let mut components = Path::new(name).components();
    let bare = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !name.contains(['/', '\\']);

    if bare {
        Ok(())
    } else {
        Err(IndexError::InvalidOutputName {
            name: name.to_string(),
        })
    }
}

/// Collect and order the entries of a category without writing anything.
pub fn build_index(
    category: &str,
    base_dir: &Path,
    options: &IndexOptions,
) -> Result<Vec<IndexEntry>> {
    let scanner = DescriptorScanner::new(base_dir.to_path_buf(), options.scan.clone());
    let files = scanner.scan(category)?;

    let mut entries = collect_entries(&files)?;
    sort_entries(&mut entries, options.sort);

    Ok(entries)
}

/// Decode each descriptor in order, stopping at the first failure.
pub fn collect_entries(files: &[ScannedFile]) -> Result<Vec<IndexEntry>> {
    files
        .iter()
        .map(|file| read_descriptor(&file.path).map(IndexEntry::from))
        .collect()
}

/// Read and decode a single descriptor file.
pub fn read_descriptor(path: &Path) -> Result<MenuDescriptor> {
    let content = fs::read_to_string(path).map_err(|source| IndexError::ReadDescriptor {
        path: path.to_path_buf(),
        source,
    })?;

    // Decode through a map first: derived structs would also accept a JSON array
    let object: Map<String, Value> = serde_json::from_str(&content)
        .map_err(|e| IndexError::from_decode(path.to_path_buf(), e))?;
    let descriptor: MenuDescriptor = serde_json::from_value(Value::Object(object))
        .map_err(|e| IndexError::from_decode(path.to_path_buf(), e))?;

    debug!("{} -> {}", path.display(), descriptor.ien);
    Ok(descriptor)
}

/// Sort entries in place. Sorting is stable.
pub fn sort_entries(entries: &mut [IndexEntry], order: SortOrder) {
    match order {
        SortOrder::None => {}
        SortOrder::Id => entries.sort_by(|a, b| a.id.cmp(&b.id)),
        SortOrder::Label => entries.sort_by(|a, b| a.label.cmp(&b.label)),
    }
}

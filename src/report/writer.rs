//! JSON index serialization and writing.
//!
//! The index is written to a temporary file next to the target and then
//! renamed over it, so readers never observe a half-written index.

use crate::error::{IndexError, Result};
use crate::models::IndexEntry;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Serialize index entries as a JSON array.
pub fn generate_json_index(entries: &[IndexEntry], pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(entries)?
    } else {
        serde_json::to_string(entries)?
    };
    Ok(json)
}

/// Write index entries to `path`, replacing any existing file.
pub fn write_index(entries: &[IndexEntry], path: &Path, pretty: bool) -> Result<()> {
    let content = generate_json_index(entries, pretty)?;

    let write_err = |source: std::io::Error| IndexError::WriteOutput {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(write_err)?;
    file.write_all(content.as_bytes()).map_err(write_err)?;
    file.as_file().sync_all().map_err(write_err)?;

    // Temp files are created owner-only; the index is meant to be served
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))
            .map_err(write_err)?;
    }

    file.persist(path).map_err(|e| write_err(e.error))?;

    debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntryNumber;
    use tempfile::TempDir;

    fn sample_entries() -> Vec<IndexEntry> {
        vec![
            IndexEntry {
                label: "OR: ORDERS".to_string(),
                id: EntryNumber::Text("17".to_string()),
            },
            IndexEntry {
                label: "XUCORE: Core Applications".to_string(),
                id: EntryNumber::Integer(9),
            },
        ]
    }

    #[test]
    fn test_generate_compact() {
        let json = generate_json_index(&sample_entries(), false).unwrap();
        assert_eq!(
            json,
            r#"[{"label":"OR: ORDERS","id":"17"},{"label":"XUCORE: Core Applications","id":9}]"#
        );
    }

    #[test]
    fn test_generate_pretty() {
        let json = generate_json_index(&sample_entries(), true).unwrap();
        assert!(json.starts_with("[\n"));
        assert!(json.contains("\"label\": \"OR: ORDERS\""));
    }

    #[test]
    fn test_generate_empty() {
        assert_eq!(generate_json_index(&[], false).unwrap(), "[]");
    }

    #[test]
    fn test_write_index_replaces_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.json");
        std::fs::write(&path, "stale stale stale").unwrap();

        write_index(&sample_entries(), &path, false).unwrap();

        let written: Vec<IndexEntry> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, sample_entries());

        // No temp files left behind
        let leftovers = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn test_write_index_missing_dir() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("index.json");

        let err = write_index(&sample_entries(), &path, false).unwrap_err();
        assert!(matches!(err, IndexError::WriteOutput { .. }));
    }
}

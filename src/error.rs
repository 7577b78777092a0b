//! Error types for index building.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while collecting descriptors or writing the index.
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Base directory does not exist: {path}")]
    BaseDirMissing { path: PathBuf },

    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Cannot list menu directory {path}: {source}")]
    ListDir {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Failed to read descriptor {path}: {source}")]
    ReadDescriptor {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in {path}: {source}")]
    MalformedDescriptor {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid descriptor {path}: {source}")]
    InvalidDescriptor {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Output name must be a file name, not a path: {name}")]
    InvalidOutputName { name: String },

    #[error("Failed to serialize index: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write index to {path}: {source}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IndexError {
    /// Classify a descriptor decode failure as a syntax or a schema problem.
    pub fn from_decode(path: PathBuf, source: serde_json::Error) -> Self {
        use serde_json::error::Category;

        match source.classify() {
            Category::Data => IndexError::InvalidDescriptor { path, source },
            Category::Io | Category::Syntax | Category::Eof => {
                IndexError::MalformedDescriptor { path, source }
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, IndexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_decode_syntax() {
        let err = serde_json::from_str::<serde_json::Value>("{ not json").unwrap_err();
        let classified = IndexError::from_decode(PathBuf::from("a.json"), err);
        assert!(matches!(classified, IndexError::MalformedDescriptor { .. }));
    }

    #[test]
    fn test_from_decode_schema() {
        #[derive(serde::Deserialize, Debug)]
        #[allow(dead_code)]
        struct Needs {
            name: String,
        }

        let err = serde_json::from_str::<Needs>(r#"{"option": "OR"}"#).unwrap_err();
        let classified = IndexError::from_decode(PathBuf::from("b.json"), err);
        assert!(matches!(classified, IndexError::InvalidDescriptor { .. }));
        assert!(classified.to_string().contains("b.json"));
        assert!(classified.to_string().contains("name"));
    }
}

//! Record Loader: Decodes resource records from JSON files.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid record in {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

fn read_value(path: &Path) -> Result<Value, LoadError> {
    let raw = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn decode<T: DeserializeOwned>(path: &Path, value: Value) -> Result<T, LoadError> {
    serde_json::from_value(value).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a single record.
///
/// # Errors
/// Returns error if the file cannot be read or does not decode as `T`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let value = read_value(path)?;
    decode(path, value)
}

/// Reads a list of records.
///
/// Accepts a JSON array, a `{"kind": "...List", "items": [...]}` document, or
/// a single object (read as a one-element list).
///
/// # Errors
/// Returns error if the file cannot be read or any item does not decode as `T`.
pub fn read_list<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, LoadError> {
    let items = match read_value(path)? {
        Value::Array(items) => items,
        Value::Object(mut object) if is_list_kind(object.get("kind")) => {
            match object.remove("items") {
                Some(Value::Array(items)) => items,
                _ => Vec::new(),
            }
        }
        single => vec![single],
    };

    tracing::debug!(path = %path.display(), count = items.len(), "decoded record list");
    items.into_iter().map(|item| decode(path, item)).collect()
}

fn is_list_kind(kind: Option<&Value>) -> bool {
    kind.and_then(Value::as_str)
        .is_some_and(|k| k.ends_with("List"))
}

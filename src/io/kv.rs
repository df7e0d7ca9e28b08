use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tempfile::NamedTempFile;

/// Error type for key-value store operations
#[derive(Debug, thiserror::Error)]
pub enum KvError {
    #[error("could not read store file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("store file {path} is not valid JSON: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not write store file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not encode store file {path}: {source}")]
    Encode {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// The key-value store file: an ordered string-to-string map held in memory
/// and rewritten in full on every change. Values are serialized text; what
/// they contain is the caller's business.
#[derive(Debug)]
pub struct KvStore {
    path: PathBuf,
    entries: IndexMap<String, String>,
}

impl KvStore {
    /// Load the store at `path`. A missing file yields an empty store; a
    /// file that exists but does not parse is an error.
    pub fn load(path: &Path) -> Result<KvStore, KvError> {
        let entries = match fs::read_to_string(path) {
            Ok(text) => serde_json::from_str(&text).map_err(|e| KvError::Malformed {
                path: path.to_path_buf(),
                source: e,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => IndexMap::new(),
            Err(e) => {
                return Err(KvError::Read {
                    path: path.to_path_buf(),
                    source: e,
                });
            }
        };
        Ok(KvStore {
            path: path.to_path_buf(),
            entries,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored value for `key`, if any
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|s| s.as_str())
    }

    /// Set `key` to `value` and rewrite the file
    pub fn set(&mut self, key: &str, value: String) -> Result<(), KvError> {
        self.entries.insert(key.to_string(), value);
        self.persist()
    }

    /// Remove `key` and rewrite the file. Removing an absent key is a no-op.
    pub fn remove(&mut self, key: &str) -> Result<(), KvError> {
        if self.entries.shift_remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }

    /// Write the whole map to disk: serialize into a temp file in the same
    /// directory, then rename over the target so readers never see a
    /// half-written store.
    fn persist(&self) -> Result<(), KvError> {
        let json =
            serde_json::to_string_pretty(&self.entries).map_err(|e| KvError::Encode {
                path: self.path.clone(),
                source: e,
            })?;
        let dir = self.path.parent().unwrap_or(Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| KvError::Write {
            path: self.path.clone(),
            source: e,
        })?;
        tmp.write_all(json.as_bytes())
            .and_then(|_| tmp.write_all(b"\n"))
            .map_err(|e| KvError::Write {
                path: self.path.clone(),
                source: e,
            })?;
        tmp.persist(&self.path).map_err(|e| KvError::Write {
            path: self.path.clone(),
            source: e.error,
        })?;
        tracing::debug!(path = %self.path.display(), keys = self.entries.len(), "store file written");
        Ok(())
    }
}

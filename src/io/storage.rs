use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use uuid::Uuid;

use crate::io::kv::{KvError, KvStore};
use crate::model::{Task, User};

/// File name of the key-value store inside the data directory
pub const STORE_FILE: &str = "storage.json";

const TASKS_KEY: &str = "tasks";
const USER_KEY: &str = "currentUser";
const DARK_MODE_KEY: &str = "darkMode";

/// Error type for persistence operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error(transparent)]
    Kv(#[from] KvError),
    #[error("stored value for `{key}` is corrupt: {source}")]
    Corrupt {
        key: &'static str,
        source: serde_json::Error,
    },
    #[error("could not encode value for `{key}`: {source}")]
    Encode {
        key: &'static str,
        source: serde_json::Error,
    },
    #[error("could not create data directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("no data directory available for this platform; pass --data-dir")]
    NoDataDir,
}

/// Typed persistence adapter over the key-value store. Each save overwrites
/// the whole value under its key; there is no partial write and no
/// batching, so N mutations mean N store writes.
#[derive(Debug)]
pub struct Storage {
    kv: KvStore,
}

impl Storage {
    /// Open the store inside `data_dir`, creating the directory if needed
    pub fn open(data_dir: &Path) -> Result<Storage, StorageError> {
        fs::create_dir_all(data_dir).map_err(|e| StorageError::CreateDir {
            path: data_dir.to_path_buf(),
            source: e,
        })?;
        let kv = KvStore::load(&data_dir.join(STORE_FILE))?;
        Ok(Storage { kv })
    }

    pub fn path(&self) -> &Path {
        self.kv.path()
    }

    /// The full task list, newest-first. Absent key reads as an empty list.
    pub fn load_tasks(&self) -> Result<Vec<Task>, StorageError> {
        let tasks = match self.kv.get(TASKS_KEY) {
            Some(json) => serde_json::from_str(json).map_err(|e| StorageError::Corrupt {
                key: TASKS_KEY,
                source: e,
            })?,
            None => Vec::new(),
        };
        tracing::debug!(count = tasks.len(), "tasks loaded");
        Ok(tasks)
    }

    /// Overwrite the stored task list with `tasks`
    pub fn save_tasks(&mut self, tasks: &[Task]) -> Result<(), StorageError> {
        let json = serde_json::to_string(tasks).map_err(|e| StorageError::Encode {
            key: TASKS_KEY,
            source: e,
        })?;
        self.kv.set(TASKS_KEY, json)?;
        tracing::debug!(count = tasks.len(), "tasks saved");
        Ok(())
    }

    /// The stored session record, if someone is logged in
    pub fn load_user(&self) -> Result<Option<User>, StorageError> {
        match self.kv.get(USER_KEY) {
            Some(json) => {
                let user = serde_json::from_str(json).map_err(|e| StorageError::Corrupt {
                    key: USER_KEY,
                    source: e,
                })?;
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }

    pub fn save_user(&mut self, user: &User) -> Result<(), StorageError> {
        let json = serde_json::to_string(user).map_err(|e| StorageError::Encode {
            key: USER_KEY,
            source: e,
        })?;
        self.kv.set(USER_KEY, json)?;
        Ok(())
    }

    pub fn clear_user(&mut self) -> Result<(), StorageError> {
        self.kv.remove(USER_KEY)?;
        Ok(())
    }

    /// The dark-mode flag; stored as the literal text `"true"`/`"false"`.
    /// Absent or unrecognized values read as false (light mode).
    pub fn load_dark_mode(&self) -> bool {
        self.kv.get(DARK_MODE_KEY) == Some("true")
    }

    pub fn save_dark_mode(&mut self, on: bool) -> Result<(), StorageError> {
        self.kv.set(DARK_MODE_KEY, on.to_string())?;
        Ok(())
    }
}

/// Resolve the data directory: an explicit flag wins, otherwise the
/// platform data dir (e.g. ~/.local/share/taskflow).
pub fn resolve_data_dir(flag: Option<&str>) -> Result<PathBuf, StorageError> {
    if let Some(dir) = flag {
        return Ok(PathBuf::from(dir));
    }
    dirs::data_dir()
        .map(|d| d.join("taskflow"))
        .ok_or(StorageError::NoDataDir)
}

/// Generate a short opaque task identifier: current millis in base 36 plus
/// random bits from a v4 UUID. Uniqueness is probabilistic; collisions are
/// treated as negligible. No ordering semantics are implied.
pub fn generate_id() -> String {
    let millis = Utc::now().timestamp_millis().max(0) as u128;
    let hex = Uuid::new_v4().simple().to_string();
    format!("{}{}", to_base36(millis), &hex[..12])
}

fn to_base36(mut n: u128) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.iter().rev().map(|&b| b as char).collect()
}

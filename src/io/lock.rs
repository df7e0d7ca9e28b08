use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Advisory lock on the data directory. One running instance owns the task
/// store; a second instance must fail rather than interleave writes.
///
/// Uses platform-native flock on Unix.
pub struct DirLock {
    _file: File,
    path: PathBuf,
}

/// Error type for lock operations
#[derive(Debug, thiserror::Error)]
pub enum LockError {
    #[error("could not create lock file at {path}: {source}")]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("data directory {path} is in use: is another taskflow instance running?")]
    Busy { path: PathBuf },
}

impl DirLock {
    /// Acquire the lock for `data_dir`, retrying for up to `timeout` before
    /// giving up with `LockError::Busy`.
    pub fn acquire(data_dir: &Path, timeout: Duration) -> Result<Self, LockError> {
        let lock_path = data_dir.join(".taskflow.lock");
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| LockError::Create {
                path: lock_path.clone(),
                source: e,
            })?;

        let start = Instant::now();
        loop {
            if try_flock(&file).is_ok() {
                tracing::debug!(path = %lock_path.display(), "data directory locked");
                return Ok(DirLock {
                    _file: file,
                    path: lock_path,
                });
            }
            if start.elapsed() >= timeout {
                return Err(LockError::Busy {
                    path: data_dir.to_path_buf(),
                });
            }
            std::thread::sleep(Duration::from_millis(25));
        }
    }

    /// Acquire with the default retry window (1 second)
    pub fn acquire_default(data_dir: &Path) -> Result<Self, LockError> {
        Self::acquire(data_dir, Duration::from_secs(1))
    }
}

impl Drop for DirLock {
    fn drop(&mut self) {
        // flock releases with the descriptor; the file itself is just litter
        let _ = fs::remove_file(&self.path);
    }
}

#[cfg(unix)]
fn try_flock(file: &File) -> Result<(), std::io::Error> {
    use std::os::unix::io::AsRawFd;
    let rc = unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_EX | libc::LOCK_NB) };
    if rc == 0 {
        Ok(())
    } else {
        Err(std::io::Error::last_os_error())
    }
}

#[cfg(not(unix))]
fn try_flock(_file: &File) -> Result<(), std::io::Error> {
    // No advisory locking off Unix; accept the single-instance assumption
    Ok(())
}

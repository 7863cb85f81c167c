use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{debug, error, info};

use super::BlobStore;
use crate::errors::{QryftError, Result};

const LOCK_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// 文件存储：每个 key 对应 `<data_dir>/<key>.json`
///
/// 写入先落到同目录的临时文件再 rename，读者不会看到写了一半的内容。
/// `compare_and_swap` 在 `<file>.lock` 锁文件保护下执行，跨进程也是原子的。
pub struct FileBlobStore {
    dir: PathBuf,
    lock_timeout: Duration,
}

/// 持有期间独占某个 blob 文件，drop 时删除锁文件
struct LockGuard {
    path: PathBuf,
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            error!("Failed to remove lock file {}: {}", self.path.display(), e);
        }
    }
}

impl FileBlobStore {
    pub fn new(dir: impl AsRef<Path>, lock_timeout: Duration) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(|e| {
                QryftError::persistence(format!(
                    "Failed to create data directory {}: {}",
                    dir.display(),
                    e
                ))
            })?;
            info!("Created data directory: {}", dir.display());
        }

        Ok(Self { dir, lock_timeout })
    }

    /// key 中的非常规字符替换为 `_`
    fn path_for(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}.json", file_name))
    }

    fn lock_path(path: &Path) -> PathBuf {
        let mut name = path.as_os_str().to_os_string();
        name.push(".lock");
        PathBuf::from(name)
    }

    fn acquire_lock(&self, path: &Path) -> Result<LockGuard> {
        let lock_path = Self::lock_path(path);
        let started = Instant::now();

        loop {
            match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&lock_path)
            {
                Ok(mut file) => {
                    let _ = writeln!(file, "{}", std::process::id());
                    return Ok(LockGuard { path: lock_path });
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    if started.elapsed() >= self.lock_timeout {
                        return Err(QryftError::persistence(format!(
                            "Timed out waiting for lock {} (remove it if no other qryft process is running)",
                            lock_path.display()
                        )));
                    }
                    std::thread::sleep(LOCK_POLL_INTERVAL);
                }
                Err(e) => {
                    return Err(QryftError::persistence(format!(
                        "Failed to create lock file {}: {}",
                        lock_path.display(),
                        e
                    )));
                }
            }
        }
    }

    fn read_file(path: &Path) -> Result<Option<String>> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(QryftError::persistence(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn write_atomic(path: &Path, value: &str) -> Result<()> {
        let mut tmp = path.as_os_str().to_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, value)
            .and_then(|_| fs::rename(&tmp, path))
            .map_err(|e| {
                error!("Failed to write {}: {}", path.display(), e);
                let _ = fs::remove_file(&tmp);
                QryftError::persistence(format!("Failed to write {}: {}", path.display(), e))
            })
    }
}

impl BlobStore for FileBlobStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Self::read_file(&self.path_for(key))
    }

    fn store(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        let _guard = self.acquire_lock(&path)?;
        Self::write_atomic(&path, value)
    }

    fn compare_and_swap(&self, key: &str, expected: Option<&str>, value: &str) -> Result<bool> {
        let path = self.path_for(key);
        let _guard = self.acquire_lock(&path)?;

        let current = Self::read_file(&path)?;
        if current.as_deref() != expected {
            debug!("Blob {} changed since it was read", path.display());
            return Ok(false);
        }

        Self::write_atomic(&path, value)?;
        Ok(true)
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}

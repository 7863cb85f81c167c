//! 存储介质端口
//!
//! 链接集合以单个序列化 blob 的形式保存在一个命名空间 key 下，
//! 读写的最小单位就是整个 blob。`compare_and_swap` 让并发写入者
//! 可以检测到彼此的覆盖。

use std::sync::Arc;

use tracing::info;

use crate::config::StorageConfig;
use crate::errors::{QryftError, Result};

pub mod file;
pub mod memory;

pub use file::FileBlobStore;
pub use memory::MemoryBlobStore;

pub trait BlobStore: Send + Sync {
    /// 读取 key 对应的 blob，不存在时返回 `None`
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// 无条件写入
    fn store(&self, key: &str, value: &str) -> Result<()>;

    /// 仅当当前内容等于 `expected` 时写入；`expected = None` 表示 key 尚不存在。
    /// 返回是否写入成功。
    fn compare_and_swap(&self, key: &str, expected: Option<&str>, value: &str) -> Result<bool>;

    fn backend_name(&self) -> &'static str;
}

pub struct BlobStoreFactory;

impl BlobStoreFactory {
    pub fn create(config: &StorageConfig) -> Result<Arc<dyn BlobStore>> {
        let store: Arc<dyn BlobStore> = match config.backend.as_str() {
            "memory" => Arc::new(MemoryBlobStore::new()),
            "file" => Arc::new(FileBlobStore::new(
                &config.data_dir,
                std::time::Duration::from_millis(config.lock_timeout_ms),
            )?),
            other => {
                return Err(QryftError::config(format!(
                    "Unknown storage backend: '{}'. Valid: file, memory",
                    other
                )));
            }
        };

        info!("Using storage backend: {}", store.backend_name());
        Ok(store)
    }
}

use std::sync::Arc;

use crate::config::StorageConfig;
use crate::errors::Result;

pub mod backend;
pub mod link_store;
pub mod models;

pub use backend::{BlobStore, BlobStoreFactory, FileBlobStore, MemoryBlobStore};
pub use link_store::{DEFAULT_STORAGE_KEY, LinkStore};
pub use models::{LinkPatch, LinkRecord};

pub struct StorageFactory;

impl StorageFactory {
    /// 按配置创建存储介质并包装为 `LinkStore`
    pub fn create(config: &StorageConfig) -> Result<Arc<LinkStore>> {
        let blob = BlobStoreFactory::create(config)?;
        Ok(Arc::new(LinkStore::new(blob, config.key.clone())))
    }
}

//! Link store
//!
//! All records live as one JSON array under a single key of the injected
//! [`BlobStore`]. Every mutation reads the whole collection, applies one
//! change and writes the whole collection back through
//! `compare_and_swap`, so a writer that raced with another one gets a
//! `Conflict` instead of silently discarding the other write.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use super::backend::BlobStore;
use super::models::{LinkPatch, LinkRecord};
use crate::errors::{QryftError, Result};

pub const DEFAULT_STORAGE_KEY: &str = "qryft.qr_links.v1";

/// 一次读取得到的原始 blob 与解码后的集合
struct Snapshot {
    raw: Option<String>,
    links: Vec<LinkRecord>,
}

#[derive(Clone)]
pub struct LinkStore {
    blob: Arc<dyn BlobStore>,
    key: String,
}

impl LinkStore {
    pub fn new(blob: Arc<dyn BlobStore>, key: impl Into<String>) -> Self {
        Self {
            blob,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend_name(&self) -> &'static str {
        self.blob.backend_name()
    }

    /// 损坏的数据按空集合处理
    fn decode(&self, raw: Option<&str>) -> Vec<LinkRecord> {
        match raw {
            None => Vec::new(),
            Some(content) if content.trim().is_empty() => Vec::new(),
            Some(content) => match serde_json::from_str::<Vec<LinkRecord>>(content) {
                Ok(links) => links,
                Err(e) => {
                    warn!(
                        "Stored links under '{}' are corrupt, treating as empty: {}",
                        self.key, e
                    );
                    Vec::new()
                }
            },
        }
    }

    /// 读路径：介质不可读时同样退化为空集合
    fn load_all(&self) -> Vec<LinkRecord> {
        match self.blob.load(&self.key) {
            Ok(raw) => self.decode(raw.as_deref()),
            Err(e) => {
                warn!("Failed to read links under '{}': {}", self.key, e);
                Vec::new()
            }
        }
    }

    /// 写路径的读取：介质错误直接返回，写入必然也会失败
    fn snapshot(&self) -> Result<Snapshot> {
        let raw = self.blob.load(&self.key)?;
        let links = self.decode(raw.as_deref());
        Ok(Snapshot { raw, links })
    }

    fn commit(&self, snapshot: &Snapshot, links: &[LinkRecord]) -> Result<()> {
        let json = serde_json::to_string_pretty(links)?;

        match self
            .blob
            .compare_and_swap(&self.key, snapshot.raw.as_deref(), &json)
        {
            Ok(true) => Ok(()),
            Ok(false) => {
                warn!("Concurrent write detected on '{}'", self.key);
                Err(QryftError::conflict(
                    "Links were modified by another writer; reload and retry",
                ))
            }
            Err(e) => {
                error!("Failed to persist links under '{}': {}", self.key, e);
                Err(e)
            }
        }
    }

    /// All records in stored order.
    pub fn list(&self) -> Vec<LinkRecord> {
        let links = self.load_all();
        debug!("Listed {} links", links.len());
        links
    }

    /// 创建记录：启用状态，`created_at == updated_at`
    ///
    /// id 或 slug 已存在时拒绝写入。
    pub fn create(
        &self,
        id: impl Into<String>,
        slug: impl Into<String>,
        name: impl Into<String>,
        destination_url: impl Into<String>,
    ) -> Result<LinkRecord> {
        let record = LinkRecord::new(id.into(), slug.into(), name.into(), destination_url.into());

        let snapshot = self.snapshot()?;
        if snapshot.links.iter().any(|l| l.id == record.id) {
            return Err(QryftError::validation(format!(
                "Link id '{}' already exists",
                record.id
            )));
        }
        if snapshot.links.iter().any(|l| l.slug == record.slug) {
            return Err(QryftError::duplicate_slug(format!(
                "Slug '{}' is already in use",
                record.slug
            )));
        }

        let mut links = snapshot.links.clone();
        links.push(record.clone());
        self.commit(&snapshot, &links)?;

        info!("Created link {} (slug: {})", record.id, record.slug);
        Ok(record)
    }

    pub fn get_by_id(&self, id: &str) -> Option<LinkRecord> {
        let found = self.load_all().into_iter().find(|l| l.id == id);
        debug!("Lookup by id {}: {}", id, found.is_some());
        found
    }

    /// 扫码时的读路径；若存在重复 slug，返回存储顺序中的第一条
    pub fn get_by_slug(&self, slug: &str) -> Option<LinkRecord> {
        let found = self.load_all().into_iter().find(|l| l.slug == slug);
        debug!("Lookup by slug {}: {}", slug, found.is_some());
        found
    }

    /// 部分更新
    ///
    /// id 不存在时返回 `Ok(None)` 且不写入。`expected_version` 与存储不一致时
    /// 返回 `Conflict`。
    pub fn update(&self, id: &str, patch: LinkPatch) -> Result<Option<LinkRecord>> {
        let snapshot = self.snapshot()?;
        let Some(index) = snapshot.links.iter().position(|l| l.id == id) else {
            debug!("Update skipped, link {} not found", id);
            return Ok(None);
        };

        let mut links = snapshot.links.clone();
        let record = &mut links[index];
        if let Some(expected) = patch.expected_version
            && expected != record.version
        {
            return Err(QryftError::conflict(format!(
                "Link {} is at version {}, expected {}",
                id, record.version, expected
            )));
        }

        patch.apply_to(record);
        record.touch();
        let updated = record.clone();

        self.commit(&snapshot, &links)?;
        info!("Updated link {} (version {})", id, updated.version);
        Ok(Some(updated))
    }

    /// 永久删除；返回是否真的删除了记录
    pub fn delete(&self, id: &str) -> Result<bool> {
        self.remove(id, None)
    }

    /// 仅当存储中的版本号等于 `version` 时删除
    pub fn delete_if_version(&self, id: &str, version: u64) -> Result<bool> {
        self.remove(id, Some(version))
    }

    fn remove(&self, id: &str, expected_version: Option<u64>) -> Result<bool> {
        let snapshot = self.snapshot()?;
        let Some(existing) = snapshot.links.iter().find(|l| l.id == id) else {
            debug!("Delete skipped, link {} not found", id);
            return Ok(false);
        };

        if let Some(expected) = expected_version
            && expected != existing.version
        {
            return Err(QryftError::conflict(format!(
                "Link {} is at version {}, expected {}",
                id, existing.version, expected
            )));
        }

        let links: Vec<LinkRecord> = snapshot
            .links
            .iter()
            .filter(|l| l.id != id)
            .cloned()
            .collect();
        self.commit(&snapshot, &links)?;

        info!("Deleted link {}", id);
        Ok(true)
    }
}

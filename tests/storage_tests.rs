//! Link store tests
//!
//! Exercises `LinkStore` over the memory and file backends.

use std::sync::Arc;
use std::time::Duration;

use qryft::errors::{QryftError, Result};
use qryft::storage::{BlobStore, FileBlobStore, LinkPatch, LinkStore, MemoryBlobStore};
use tempfile::TempDir;

const KEY: &str = "qryft.qr_links.v1";

fn memory_store() -> LinkStore {
    LinkStore::new(Arc::new(MemoryBlobStore::new()), KEY)
}

/// 创建基于临时目录的文件存储
fn file_store(dir: &TempDir) -> LinkStore {
    let blob = FileBlobStore::new(dir.path(), Duration::from_millis(500))
        .expect("Failed to create file blob store");
    LinkStore::new(Arc::new(blob), KEY)
}

/// 所有操作都失败的存储介质
struct BrokenBlobStore;

impl BlobStore for BrokenBlobStore {
    fn load(&self, _key: &str) -> Result<Option<String>> {
        Err(QryftError::persistence("medium unavailable"))
    }

    fn store(&self, _key: &str, _value: &str) -> Result<()> {
        Err(QryftError::persistence("medium unavailable"))
    }

    fn compare_and_swap(&self, _key: &str, _expected: Option<&str>, _value: &str) -> Result<bool> {
        Err(QryftError::persistence("medium unavailable"))
    }

    fn backend_name(&self) -> &'static str {
        "broken"
    }
}

/// 读取正常、写入失败的存储介质
struct ReadOnlyBlobStore(MemoryBlobStore);

impl BlobStore for ReadOnlyBlobStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        self.0.load(key)
    }

    fn store(&self, _key: &str, _value: &str) -> Result<()> {
        Err(QryftError::persistence("quota exceeded"))
    }

    fn compare_and_swap(&self, _key: &str, _expected: Option<&str>, _value: &str) -> Result<bool> {
        Err(QryftError::persistence("quota exceeded"))
    }

    fn backend_name(&self) -> &'static str {
        "read-only"
    }
}

// =============================================================================
// Basic operations
// =============================================================================

#[test]
fn test_create_then_get_round_trip() {
    let store = memory_store();
    let created = store
        .create("id-1", "Ab3dE9", "Menu", "https://example.com/menu")
        .unwrap();

    assert!(created.is_active);
    assert_eq!(created.created_at, created.updated_at);

    let by_id = store.get_by_id("id-1").unwrap();
    let by_slug = store.get_by_slug("Ab3dE9").unwrap();
    assert_eq!(by_id, created);
    assert_eq!(by_slug, created);
}

#[test]
fn test_reads_are_idempotent() {
    let store = memory_store();
    store.create("id-1", "aaaaaa", "A", "https://a.example").unwrap();
    store.create("id-2", "bbbbbb", "B", "https://b.example").unwrap();

    assert_eq!(store.list(), store.list());
    assert_eq!(store.get_by_slug("bbbbbb"), store.get_by_slug("bbbbbb"));
}

#[test]
fn test_list_preserves_insertion_order() {
    let store = memory_store();
    for (i, slug) in ["aaaaaa", "bbbbbb", "cccccc"].iter().enumerate() {
        store
            .create(format!("id-{}", i), *slug, "x", "https://x.example")
            .unwrap();
    }
    store.delete("id-1").unwrap();

    let slugs: Vec<String> = store.list().into_iter().map(|l| l.slug).collect();
    assert_eq!(slugs, vec!["aaaaaa", "cccccc"]);
}

#[test]
fn test_empty_store_lists_nothing() {
    let store = memory_store();
    assert!(store.list().is_empty());
    assert!(store.get_by_id("missing").is_none());
    assert!(store.get_by_slug("zzzzzz").is_none());
}

#[test]
fn test_disable_keeps_record() {
    let store = memory_store();
    store.create("id-1", "aaaaaa", "A", "https://a.example").unwrap();

    let updated = store.update("id-1", LinkPatch::active(false)).unwrap().unwrap();
    assert!(!updated.is_active);

    let stored = store.get_by_slug("aaaaaa").unwrap();
    assert!(!stored.is_active);
    assert_eq!(stored.destination_url, "https://a.example");
}

#[test]
fn test_partial_update_leaves_other_fields() {
    let store = memory_store();
    let created = store.create("id-1", "aaaaaa", "A", "https://a.example").unwrap();

    let updated = store
        .update("id-1", LinkPatch::destination("https://b.example"))
        .unwrap()
        .unwrap();

    assert_eq!(updated.destination_url, "https://b.example");
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.slug, created.slug);
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);
    assert_eq!(updated.version, created.version + 1);
}

#[test]
fn test_update_missing_id_writes_nothing() {
    let blob = Arc::new(MemoryBlobStore::new());
    let store = LinkStore::new(blob.clone(), KEY);

    assert!(store.update("ghost", LinkPatch::name("x")).unwrap().is_none());
    assert!(blob.load(KEY).unwrap().is_none());
}

#[test]
fn test_delete_twice() {
    let store = memory_store();
    store.create("id-1", "aaaaaa", "A", "https://a.example").unwrap();

    assert!(store.delete("id-1").unwrap());
    assert!(!store.delete("id-1").unwrap());
    assert!(store.get_by_slug("aaaaaa").is_none());
}

#[test]
fn test_three_creates_one_delete() {
    let store = memory_store();
    store.create("id-1", "aaaaaa", "A", "https://a.example").unwrap();
    store.create("id-2", "bbbbbb", "B", "https://b.example").unwrap();
    store.create("id-3", "cccccc", "C", "https://c.example").unwrap();
    store.delete("id-2").unwrap();

    let ids: Vec<String> = store.list().into_iter().map(|l| l.id).collect();
    assert_eq!(ids, vec!["id-1", "id-3"]);
}

#[test]
fn test_duplicate_slug_rejected() {
    let store = memory_store();
    store.create("id-1", "aaaaaa", "A", "https://a.example").unwrap();

    let err = store
        .create("id-2", "aaaaaa", "B", "https://b.example")
        .unwrap_err();
    assert!(matches!(err, QryftError::DuplicateSlug(_)));
    assert_eq!(store.list().len(), 1);
}

// =============================================================================
// Versioning and concurrency
// =============================================================================

#[test]
fn test_expected_version_mismatch_is_conflict() {
    let store = memory_store();
    let created = store.create("id-1", "aaaaaa", "A", "https://a.example").unwrap();
    store.update("id-1", LinkPatch::name("B")).unwrap();

    let stale = LinkPatch::name("C").expect_version(created.version);
    let err = store.update("id-1", stale).unwrap_err();
    assert!(matches!(err, QryftError::Conflict(_)));
    assert_eq!(store.get_by_id("id-1").unwrap().name, "B");

    let err = store.delete_if_version("id-1", created.version).unwrap_err();
    assert!(matches!(err, QryftError::Conflict(_)));
    assert!(store.delete_if_version("id-1", created.version + 1).unwrap());
}

#[test]
fn test_stale_writer_gets_conflict() {
    let blob = Arc::new(MemoryBlobStore::new());
    let store = LinkStore::new(blob.clone(), KEY);
    store.create("id-1", "aaaaaa", "A", "https://a.example").unwrap();

    // 模拟另一个写入者在读取与写回之间修改了集合
    let before = blob.load(KEY).unwrap();
    store.create("id-2", "bbbbbb", "B", "https://b.example").unwrap();
    assert!(!blob.compare_and_swap(KEY, before.as_deref(), "[]").unwrap());
    assert_eq!(store.list().len(), 2);
}

#[test]
fn test_concurrent_creates_never_lose_writes() {
    let store = Arc::new(memory_store());
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = store.clone();
            std::thread::spawn(move || {
                let slug = format!("slug0{}", i);
                loop {
                    match store.create(format!("id-{}", i), &slug, "x", "https://x.example") {
                        Ok(_) => break,
                        Err(QryftError::Conflict(_)) => continue,
                        Err(e) => panic!("unexpected error: {}", e),
                    }
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.list().len(), 8);
}

// =============================================================================
// Failure handling
// =============================================================================

#[test]
fn test_unreadable_medium_reads_as_empty() {
    let store = LinkStore::new(Arc::new(BrokenBlobStore), KEY);
    assert!(store.list().is_empty());
    assert!(store.get_by_slug("aaaaaa").is_none());
}

#[test]
fn test_write_failure_is_reported() {
    let store = LinkStore::new(Arc::new(BrokenBlobStore), KEY);
    let err = store
        .create("id-1", "aaaaaa", "A", "https://a.example")
        .unwrap_err();
    assert!(matches!(err, QryftError::Persistence(_)));

    let store = LinkStore::new(Arc::new(ReadOnlyBlobStore(MemoryBlobStore::new())), KEY);
    let err = store
        .create("id-1", "aaaaaa", "A", "https://a.example")
        .unwrap_err();
    assert!(matches!(err, QryftError::Persistence(_)));
    assert!(store.list().is_empty());
}

#[test]
fn test_corrupt_blob_reads_as_empty() {
    let blob = Arc::new(MemoryBlobStore::new());
    blob.store(KEY, "{not json").unwrap();
    let store = LinkStore::new(blob.clone(), KEY);

    assert!(store.list().is_empty());
    // 写入会覆盖损坏的数据
    store.create("id-1", "aaaaaa", "A", "https://a.example").unwrap();
    assert_eq!(store.list().len(), 1);
}

// =============================================================================
// File backend
// =============================================================================

#[test]
fn test_file_store_survives_reopen() {
    let dir = TempDir::new().unwrap();
    {
        let store = file_store(&dir);
        store.create("id-1", "aaaaaa", "A", "https://a.example").unwrap();
        store.update("id-1", LinkPatch::active(false)).unwrap();
    }

    let reopened = file_store(&dir);
    let record = reopened.get_by_slug("aaaaaa").unwrap();
    assert!(!record.is_active);
    assert_eq!(record.version, 2);
}

#[test]
fn test_file_store_keys_are_isolated() {
    let dir = TempDir::new().unwrap();
    let blob: Arc<dyn BlobStore> =
        Arc::new(FileBlobStore::new(dir.path(), Duration::from_millis(500)).unwrap());
    let first = LinkStore::new(blob.clone(), "tenant.a");
    let second = LinkStore::new(blob, "tenant.b");

    first.create("id-1", "aaaaaa", "A", "https://a.example").unwrap();
    assert_eq!(first.list().len(), 1);
    assert!(second.list().is_empty());
}

#[test]
fn test_two_file_stores_share_one_directory() {
    let dir = TempDir::new().unwrap();
    let a = file_store(&dir);
    let b = file_store(&dir);

    a.create("id-1", "aaaaaa", "A", "https://a.example").unwrap();
    b.create("id-2", "bbbbbb", "B", "https://b.example").unwrap();

    assert_eq!(a.list().len(), 2);
    assert_eq!(b.get_by_slug("aaaaaa").unwrap().id, "id-1");
}

#[test]
fn test_file_store_corrupt_file_reads_as_empty() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(format!("{}.json", KEY)), "garbage").unwrap();

    let store = file_store(&dir);
    assert!(store.list().is_empty());
}

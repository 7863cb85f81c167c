use std::collections::HashMap;

use parking_lot::Mutex;

use super::BlobStore;
use crate::errors::Result;

/// 进程内存储，用于测试和临时运行
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: Mutex<HashMap<String, String>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryBlobStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.blobs.lock().get(key).cloned())
    }

    fn store(&self, key: &str, value: &str) -> Result<()> {
        self.blobs.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn compare_and_swap(&self, key: &str, expected: Option<&str>, value: &str) -> Result<bool> {
        let mut blobs = self.blobs.lock();
        if blobs.get(key).map(String::as_str) != expected {
            return Ok(false);
        }
        blobs.insert(key.to_string(), value.to_string());
        Ok(true)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

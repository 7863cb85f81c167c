use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn initial_version() -> u64 {
    1
}

/// 一个二维码对应的持久化记录
///
/// 二维码图像只由 `slug` 决定，创建后不会变化；
/// 可变的只有名称、目标地址和启用状态。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkRecord {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub destination_url: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// 乐观并发版本号，旧数据缺省为 1
    #[serde(default = "initial_version")]
    pub version: u64,
}

impl LinkRecord {
    pub fn new(id: String, slug: String, name: String, destination_url: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            slug,
            name,
            destination_url,
            is_active: true,
            created_at: now,
            updated_at: now,
            version: initial_version(),
        }
    }

    /// Refresh `updated_at` and bump `version`.
    ///
    /// `updated_at` is kept strictly increasing even if the clock has not
    /// advanced since the last mutation.
    pub fn touch(&mut self) {
        let now = Utc::now();
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + chrono::Duration::microseconds(1)
        };
        self.version += 1;
    }
}

/// 部分更新，`None` 字段保持不变
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkPatch {
    pub name: Option<String>,
    pub destination_url: Option<String>,
    pub is_active: Option<bool>,

    /// 若提供，存储中的版本号必须与之相同，否则返回冲突
    pub expected_version: Option<u64>,
}

impl LinkPatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn destination(url: impl Into<String>) -> Self {
        Self {
            destination_url: Some(url.into()),
            ..Self::default()
        }
    }

    pub fn active(is_active: bool) -> Self {
        Self {
            is_active: Some(is_active),
            ..Self::default()
        }
    }

    pub fn expect_version(mut self, version: u64) -> Self {
        self.expected_version = Some(version);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.destination_url.is_none() && self.is_active.is_none()
    }

    /// Merge the provided fields into `record`.
    pub fn apply_to(self, record: &mut LinkRecord) {
        if let Some(name) = self.name {
            record.name = name;
        }
        if let Some(url) = self.destination_url {
            record.destination_url = url;
        }
        if let Some(is_active) = self.is_active {
            record.is_active = is_active;
        }
    }
}

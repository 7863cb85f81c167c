//! URL 验证模块
//!
//! 目标地址在创建边界处规范化：缺少协议时补上 `https://`，
//! 只拒绝空输入、危险协议和无法解析的地址。

use url::Url;

pub const DEFAULT_SCHEME: &str = "https://";

/// URL 验证错误
#[derive(Debug, PartialEq, Eq)]
pub enum UrlValidationError {
    EmptyUrl,
    InvalidProtocol(String),
    DangerousProtocol(String),
    InvalidFormat(String),
}

impl std::fmt::Display for UrlValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyUrl => write!(f, "URL cannot be empty"),
            Self::InvalidProtocol(proto) => write!(
                f,
                "Invalid protocol: {}. Only http:// and https:// are allowed",
                proto
            ),
            Self::DangerousProtocol(proto) => {
                write!(f, "Dangerous protocol blocked: {}", proto)
            }
            Self::InvalidFormat(msg) => write!(f, "Invalid URL format: {}", msg),
        }
    }
}

impl std::error::Error for UrlValidationError {}

/// 危险协议列表
const DANGEROUS_PROTOCOLS: &[&str] = &[
    "javascript:",
    "data:",
    "file:",
    "vbscript:",
    "about:",
    "blob:",
];

fn has_http_scheme(url_lower: &str) -> bool {
    url_lower.starts_with("http://") || url_lower.starts_with("https://")
}

/// 规范化目标地址
///
/// 1. 去掉首尾空白，空串报错
/// 2. 拒绝危险协议（javascript:, data:, file: 等）
/// 3. 已带 http(s):// 的原样保留；带其他 `scheme://` 的报错
/// 4. 其余补上 `https://`
/// 5. 结果必须能被解析为 URL
///
/// 返回的是规范化后的原始字符串，而不是 `Url` 的序列化结果，
/// 因此 `example.com` 得到 `https://example.com`（不追加 `/`）。
pub fn normalize_destination(input: &str) -> Result<String, UrlValidationError> {
    let url = input.trim();

    if url.is_empty() {
        return Err(UrlValidationError::EmptyUrl);
    }

    let url_lower = url.to_lowercase();

    for proto in DANGEROUS_PROTOCOLS {
        if url_lower.starts_with(proto) {
            return Err(UrlValidationError::DangerousProtocol(proto.to_string()));
        }
    }

    let normalized = if has_http_scheme(&url_lower) {
        url.to_string()
    } else if let Some((proto, _)) = url_lower.split_once("://") {
        return Err(UrlValidationError::InvalidProtocol(format!("{}:", proto)));
    } else {
        format!("{}{}", DEFAULT_SCHEME, url)
    };

    let parsed =
        Url::parse(&normalized).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;
    if parsed.host_str().is_none_or(|h| h.is_empty()) {
        return Err(UrlValidationError::InvalidFormat("missing host".into()));
    }

    Ok(normalized)
}

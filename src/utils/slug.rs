//! 公共 slug 生成
//!
//! slug 固定 6 位，字符取自 62 个 URL 安全字符（数字 + 小写 + 大写）。
//! 优先使用操作系统的密码学随机源；随机源不可用时退化为时钟播种的
//! 非密码学 PRNG，输出形状不变，不向调用方报错。

use rand::rngs::{OsRng, SmallRng};
use rand::{Rng, SeedableRng, TryRngCore};
use tracing::warn;

pub const SLUG_ALPHABET: &[u8; 62] =
    b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub const SLUG_LENGTH: usize = 6;

/// 字节 >= 248 时丢弃，248 = 62 * 4，避免取模偏差
const REJECTION_LIMIT: u8 = (256 - 256 % SLUG_ALPHABET.len()) as u8;

/// 随机字节来源
pub trait EntropySource {
    fn try_fill(&mut self, buf: &mut [u8]) -> Result<(), String>;
}

/// 操作系统随机源
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn try_fill(&mut self, buf: &mut [u8]) -> Result<(), String> {
        OsRng.try_fill_bytes(buf).map_err(|e| e.to_string())
    }
}

/// Generate a slug from the OS random source.
pub fn generate_slug() -> String {
    generate_slug_with(&mut OsEntropy)
}

/// Generate a slug from the given source, falling back to a seeded PRNG
/// when the source fails.
pub fn generate_slug_with<S: EntropySource>(source: &mut S) -> String {
    match sample_secure(source) {
        Ok(slug) => slug,
        Err(e) => {
            warn!("Secure random source unavailable ({}), using fallback PRNG", e);
            sample_fallback()
        }
    }
}

fn sample_secure<S: EntropySource>(source: &mut S) -> Result<String, String> {
    let mut slug = String::with_capacity(SLUG_LENGTH);
    let mut buf = [0u8; SLUG_LENGTH * 2];

    while slug.len() < SLUG_LENGTH {
        source.try_fill(&mut buf)?;
        for byte in buf {
            if byte >= REJECTION_LIMIT {
                continue;
            }
            slug.push(SLUG_ALPHABET[byte as usize % SLUG_ALPHABET.len()] as char);
            if slug.len() == SLUG_LENGTH {
                break;
            }
        }
    }

    Ok(slug)
}

fn sample_fallback() -> String {
    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
        ^ u64::from(std::process::id());
    let mut rng = SmallRng::seed_from_u64(seed);

    (0..SLUG_LENGTH)
        .map(|_| SLUG_ALPHABET[rng.random_range(0..SLUG_ALPHABET.len())] as char)
        .collect()
}

/// 检查字符串是否符合 slug 形状
pub fn is_valid_slug(candidate: &str) -> bool {
    candidate.len() == SLUG_LENGTH && candidate.bytes().all(|b| SLUG_ALPHABET.contains(&b))
}

//! QR code content and rendering
//!
//! A dynamic QR code encodes `origin + base_path + "/q/" + slug`. The value
//! depends only on the slug and deployment configuration, so the image never
//! has to be regenerated when the destination changes.

pub mod payload;

use qrcode::render::svg;
use qrcode::{EcLevel, QrCode};

use crate::config::QrConfig;
use crate::errors::Result;

pub use payload::{QrPayload, VCard, WifiEncryption};

/// Path prefix of the resolution route.
pub const RESOLVE_PREFIX: &str = "/q/";

/// 拼接二维码中编码的完整地址
///
/// `origin` 的末尾斜杠和 `base_path` 的末尾斜杠都会被去掉，
/// 避免出现 `//q/`。
pub fn target_url(origin: &str, base_path: &str, slug: &str) -> String {
    let origin = origin.trim_end_matches('/');
    let base = base_path.trim_end_matches('/');
    let base = if base.is_empty() || base.starts_with('/') {
        base.to_string()
    } else {
        format!("/{}", base)
    };

    format!("{}{}{}{}", origin, base, RESOLVE_PREFIX, slug)
}

pub fn target_url_for(config: &QrConfig, slug: &str) -> String {
    target_url(&config.public_origin, &config.base_path, slug)
}

/// 渲染为 SVG，纠错等级 M
pub fn render_svg(value: &str, min_size: u32) -> Result<String> {
    let code = QrCode::with_error_correction_level(value.as_bytes(), EcLevel::M)?;

    Ok(code
        .render::<svg::Color>()
        .min_dimensions(min_size, min_size)
        .quiet_zone(true)
        .build())
}

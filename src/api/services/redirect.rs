//! Resolution route: `/q/{slug}`
//!
//! Active links answer with a 307 to the current destination. Unknown and
//! disabled slugs each get their own explanatory page.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use tracing::{instrument, trace};

use crate::services::{LinkService, Resolution};
use crate::utils::is_valid_slug;

const NOT_FOUND_PAGE: &str = r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>QR Code Not Found</title></head>
<body>
<h1>QR Code Not Found</h1>
<p>The QR code you scanned does not exist or has been deleted.</p>
</body>
</html>
"#;

const DISABLED_PAGE: &str = r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>Link Disabled</title></head>
<body>
<h1>Link Disabled</h1>
<p>This QR code has been temporarily disabled by its owner.</p>
</body>
</html>
"#;

pub struct RedirectService;

impl RedirectService {
    #[instrument(skip(path, service), fields(slug = %path))]
    pub async fn handle_redirect(
        path: web::Path<String>,
        service: web::Data<LinkService>,
    ) -> impl Responder {
        let slug = path.into_inner();

        // 形状不对的 slug 不可能存在，无需读取存储
        if !is_valid_slug(&slug) {
            trace!("Malformed slug rejected: {}", slug);
            return Self::not_found_response();
        }

        match service.resolve(&slug) {
            Resolution::Redirect(target) => Self::finish_redirect(&target),
            Resolution::NotFound => Self::not_found_response(),
            Resolution::Disabled => Self::disabled_response(),
        }
    }

    fn page(status: StatusCode, body: &'static str) -> HttpResponse {
        HttpResponse::build(status)
            .insert_header(("Content-Type", "text/html; charset=utf-8"))
            .insert_header(("Cache-Control", "no-store"))
            .body(body)
    }

    #[inline]
    fn not_found_response() -> HttpResponse {
        Self::page(StatusCode::NOT_FOUND, NOT_FOUND_PAGE)
    }

    #[inline]
    fn disabled_response() -> HttpResponse {
        Self::page(StatusCode::GONE, DISABLED_PAGE)
    }

    /// 目标随时可能修改，重定向不允许被缓存
    fn finish_redirect(target: &str) -> HttpResponse {
        HttpResponse::build(StatusCode::TEMPORARY_REDIRECT)
            .insert_header(("Location", target))
            .insert_header(("Cache-Control", "no-store"))
            .finish()
    }
}

pub fn redirect_routes() -> actix_web::Scope {
    web::scope("/q")
        .route("/{slug}", web::get().to(RedirectService::handle_redirect))
        .route("/{slug}", web::head().to(RedirectService::handle_redirect))
}

//! QR image and static payload routes

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use serde::Serialize;
use tracing::{debug, error};

use super::helpers::{error_response, json_response};
use crate::errors::QryftError;
use crate::qr::{QrPayload, render_svg};
use crate::services::LinkService;
use crate::utils::is_valid_slug;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedPayload {
    pub kind: &'static str,
    pub payload: String,
}

pub struct QrService;

impl QrService {
    fn svg_response(svg: String) -> HttpResponse {
        HttpResponse::build(StatusCode::OK)
            .insert_header(("Content-Type", "image/svg+xml"))
            .insert_header(("Cache-Control", "public, max-age=31536000, immutable"))
            .body(svg)
    }

    /// `GET /qr/{slug}.svg`
    ///
    /// 图像只依赖 slug，不查询存储。
    pub async fn slug_svg(path: web::Path<String>, service: web::Data<LinkService>) -> impl Responder {
        let file = path.into_inner();
        let Some(slug) = file.strip_suffix(".svg").filter(|s| is_valid_slug(s)) else {
            return error_response(&QryftError::not_found(format!("No QR image at '{}'", file)));
        };

        match service.qr_svg(slug) {
            Ok(svg) => {
                debug!("Rendered QR for slug {}", slug);
                Self::svg_response(svg)
            }
            Err(e) => {
                error!("Failed to render QR for {}: {}", slug, e);
                error_response(&e)
            }
        }
    }

    /// `POST /api/payloads`
    pub async fn encode_payload(body: web::Json<QrPayload>) -> impl Responder {
        let payload = body.into_inner();
        match payload.encode() {
            Ok(encoded) => json_response(
                StatusCode::OK,
                &EncodedPayload {
                    kind: payload.kind(),
                    payload: encoded,
                },
            ),
            Err(e) => error_response(&e),
        }
    }

    /// `POST /api/payloads/svg`
    pub async fn payload_svg(
        body: web::Json<QrPayload>,
        service: web::Data<LinkService>,
    ) -> impl Responder {
        let rendered = body
            .into_inner()
            .encode()
            .and_then(|encoded| render_svg(&encoded, service.qr_config().svg_min_size));

        match rendered {
            Ok(svg) => Self::svg_response(svg),
            Err(e) => error_response(&e),
        }
    }
}

pub fn qr_routes() -> actix_web::Scope {
    web::scope("/qr").route("/{file}", web::get().to(QrService::slug_svg))
}

//! 链接管理 API
//!
//! `/api/links` CRUD over the [`LinkService`]. Store failures surface as
//! JSON errors with a non-2xx status, never as silent success.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use tracing::{error, info, trace};

use super::helpers::{error_response, json_response};
use super::qr::QrService;
use crate::errors::QryftError;
use crate::services::{CreateLinkRequest, LinkService};
use crate::storage::{LinkPatch, LinkRecord};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostNewLink {
    pub name: Option<String>,
    pub destination_url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteQuery {
    pub version: Option<u64>,
}

/// 链接记录加上二维码中编码的地址
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    #[serde(flatten)]
    pub link: LinkRecord,
    pub qr_value: String,
}

pub struct LinkApi;

impl LinkApi {
    fn to_response(service: &LinkService, link: LinkRecord) -> LinkResponse {
        let qr_value = service.qr_target(&link.slug);
        LinkResponse { link, qr_value }
    }

    fn failure(action: &str, err: QryftError) -> HttpResponse {
        match err {
            QryftError::NotFound(_) | QryftError::Validation(_) | QryftError::Conflict(_) => {
                info!("Link API: {} rejected: {}", action, err)
            }
            _ => error!("Link API: {} failed: {}", action, err),
        }
        error_response(&err)
    }

    pub async fn list(service: web::Data<LinkService>) -> impl Responder {
        let links: Vec<LinkResponse> = service
            .list_links()
            .into_iter()
            .map(|link| Self::to_response(&service, link))
            .collect();
        trace!("Link API: returning {} links", links.len());
        json_response(StatusCode::OK, &links)
    }

    pub async fn create(
        body: web::Json<PostNewLink>,
        service: web::Data<LinkService>,
    ) -> impl Responder {
        let body = body.into_inner();
        let request = CreateLinkRequest {
            name: body.name,
            destination_url: body.destination_url,
        };

        match service.create_link(request) {
            Ok(link) => json_response(StatusCode::CREATED, &Self::to_response(&service, link)),
            Err(e) => Self::failure("create", e),
        }
    }

    pub async fn get(path: web::Path<String>, service: web::Data<LinkService>) -> impl Responder {
        match service.get_link(&path) {
            Ok(link) => json_response(StatusCode::OK, &Self::to_response(&service, link)),
            Err(e) => Self::failure("get", e),
        }
    }

    pub async fn update(
        path: web::Path<String>,
        body: web::Json<LinkPatch>,
        service: web::Data<LinkService>,
    ) -> impl Responder {
        let patch = body.into_inner();
        if patch.is_empty() {
            return error_response(&QryftError::validation(
                "Nothing to update: provide name, destinationUrl or isActive",
            ));
        }

        match service.update_link(&path, patch) {
            Ok(link) => json_response(StatusCode::OK, &Self::to_response(&service, link)),
            Err(e) => Self::failure("update", e),
        }
    }

    pub async fn delete(
        path: web::Path<String>,
        query: web::Query<DeleteQuery>,
        service: web::Data<LinkService>,
    ) -> impl Responder {
        match service.delete_link(&path, query.version) {
            Ok(()) => HttpResponse::NoContent().finish(),
            Err(e) => Self::failure("delete", e),
        }
    }
}

pub fn api_routes() -> actix_web::Scope {
    web::scope("/api")
        .route("/links", web::get().to(LinkApi::list))
        .route("/links", web::post().to(LinkApi::create))
        .route("/links/{id}", web::get().to(LinkApi::get))
        .route("/links/{id}", web::patch().to(LinkApi::update))
        .route("/links/{id}", web::delete().to(LinkApi::delete))
        .route("/payloads", web::post().to(QrService::encode_payload))
        .route("/payloads/svg", web::post().to(QrService::payload_svg))
}

//! HTTP interface
//!
//! - `/q/{slug}`: resolution
//! - `/qr/{slug}.svg`: QR image
//! - `/api/...`: link management and static payloads
//! - `/health`: liveness

pub mod services;

use actix_web::web;

/// Register every route. The caller provides `web::Data<LinkService>` and
/// `web::Data<AppStartTime>`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(services::redirect_routes())
        .service(services::qr_routes())
        .service(services::api_routes())
        .service(services::health_routes());
}

use actix_web::http::StatusCode;
use actix_web::{Responder, web};
use serde::Serialize;
use tracing::trace;

use super::helpers::json_response;
use crate::services::LinkService;

// 应用启动时间结构体
#[derive(Clone, Debug)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub backend: &'static str,
    pub links_count: usize,
    pub uptime_secs: i64,
}

pub struct HealthService;

impl HealthService {
    pub async fn health_check(
        service: web::Data<LinkService>,
        app_start_time: web::Data<AppStartTime>,
    ) -> impl Responder {
        trace!("Received health check request");

        let uptime = chrono::Utc::now() - app_start_time.start_datetime;
        json_response(
            StatusCode::OK,
            &HealthResponse {
                status: "ok",
                backend: service.store().backend_name(),
                links_count: service.list_links().len(),
                uptime_secs: uptime.num_seconds(),
            },
        )
    }
}

pub fn health_routes() -> actix_web::Scope {
    web::scope("/health")
        .route("", web::get().to(HealthService::health_check))
        .route("", web::head().to(HealthService::health_check))
}

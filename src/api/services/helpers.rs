//! API 帮助函数

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::Serialize;

use crate::errors::QryftError;

/// 错误响应体
#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    pub code: &'static str,
    pub error: &'static str,
    pub message: &'a str,
}

/// 构建 JSON 响应
pub fn json_response<T: Serialize>(status: StatusCode, data: &T) -> HttpResponse {
    HttpResponse::build(status)
        .insert_header(("Content-Type", "application/json; charset=utf-8"))
        .insert_header(("Cache-Control", "no-store"))
        .json(data)
}

/// 从 QryftError 构建错误响应（自动映射 HTTP 状态码）
pub fn error_response(err: &QryftError) -> HttpResponse {
    json_response(
        err.http_status(),
        &ErrorBody {
            code: err.code(),
            error: err.error_type(),
            message: err.message(),
        },
    )
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::models::system::responses::{HealthResponse, SystemStatusResponse};
use crate::models::{ApiResponse, AppStartTime, ErrorCode};

pub async fn health() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        HealthResponse {
            status: "ok".to_string(),
        },
        "Service is healthy",
    )))
}

pub async fn system_status(request: &HttpRequest) -> ActixResult<HttpResponse> {
    let Some(start_time) = request.app_data::<web::Data<AppStartTime>>() else {
        return Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "Start time not found in app data",
            )),
        );
    };

    let started_at = start_time.start_datetime;
    let uptime = chrono::Utc::now()
        .signed_duration_since(started_at)
        .num_seconds();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        SystemStatusResponse {
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: uptime,
            started_at,
        },
        "查询成功",
    )))
}

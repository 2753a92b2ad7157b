use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::SchoolService;
use crate::models::schools::requests::CreateSchoolRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn create_school(
    service: &SchoolService,
    request: &HttpRequest,
    school_data: CreateSchoolRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if school_data.name.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "School name must not be blank",
        )));
    }

    match storage.create_school(school_data).await {
        Ok(school) => {
            info!("School {} created successfully", school.name);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(school, "School created successfully")))
        }
        Err(e) => {
            let msg = format!("School creation failed: {e}");
            error!("{}", msg);
            if msg.contains("UNIQUE constraint failed") || msg.contains("duplicate key") {
                Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::SchoolAlreadyExists,
                    "School name already exists",
                )))
            } else {
                Ok(HttpResponse::InternalServerError()
                    .json(ApiResponse::error_empty(ErrorCode::InternalServerError, msg)))
            }
        }
    }
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SchoolService;
use crate::models::schools::requests::UpdateSchoolRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn update_school(
    service: &SchoolService,
    request: &HttpRequest,
    school_id: i64,
    update_data: UpdateSchoolRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Some(ref name) = update_data.name
        && name.trim().is_empty()
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "School name must not be blank",
        )));
    }

    match storage.update_school(school_id, update_data).await {
        Ok(Some(school)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(school, "School updated successfully")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SchoolNotFound,
            "School not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to update school: {e}"),
            )),
        ),
    }
}

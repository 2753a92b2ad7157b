use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::middlewares::RequireJWT;
use crate::models::teachers::requests::TeacherQueryParams;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::scope::resolve_school_scope;

pub async fn list_teachers(
    service: &TeacherService,
    request: &HttpRequest,
    query: TeacherQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing user",
            )));
        }
    };

    let school_id = match resolve_school_scope(&user, query.school_id) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };

    match storage.list_teachers_by_school(school_id).await {
        Ok(teachers) => Ok(HttpResponse::Ok().json(ApiResponse::success(teachers, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to list teachers: {e}"),
            )),
        ),
    }
}

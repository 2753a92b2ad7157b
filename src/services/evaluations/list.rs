use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EvaluationService;
use crate::middlewares::RequireJWT;
use crate::models::evaluations::requests::{EvaluationListQuery, EvaluationQueryParams};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_evaluations(
    service: &EvaluationService,
    request: &HttpRequest,
    query: EvaluationQueryParams,
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

    // 校长固定看自己的学校，管理员可选学校筛选
    let school_filter = match user.role {
        UserRole::Admin => query.school_id,
        UserRole::Director => match user.school_id {
            Some(id) => Some(id),
            None => {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::SchoolPermissionDenied,
                    "Director account is not bound to a school",
                )));
            }
        },
    };

    let list_query = EvaluationListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        school_id: school_filter,
        search: query.search,
    };

    match storage.list_evaluations_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to list evaluations: {e}"),
            )),
        ),
    }
}

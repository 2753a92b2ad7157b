use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::EvaluationService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::scope::check_school_access;

pub async fn delete_evaluation(
    service: &EvaluationService,
    request: &HttpRequest,
    evaluation_id: i64,
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

    let evaluation = match storage.get_evaluation_by_id(evaluation_id).await {
        Ok(Some(evaluation)) => evaluation,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::EvaluationNotFound,
                "Evaluation not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to fetch evaluation: {e}"),
                )),
            );
        }
    };

    if let Err(resp) = check_school_access(&user, evaluation.school_id) {
        return Ok(resp);
    }

    // 已有回复的评价活动不可删除
    match storage.count_responses(evaluation_id).await {
        Ok(0) => {}
        Ok(count) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::EvaluationHasResponses,
                format!("Cannot delete an evaluation with {count} stored responses"),
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to count responses: {e}"),
                )),
            );
        }
    }

    match storage.delete_evaluation(evaluation_id).await {
        Ok(true) => {
            info!("Evaluation {} deleted by user {}", evaluation_id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("Evaluation deleted")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::EvaluationNotFound,
            "Evaluation not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to delete evaluation: {e}"),
            )),
        ),
    }
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::EvaluationService;
use crate::middlewares::RequireJWT;
use crate::models::evaluations::requests::CreateEvaluationRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::scope::resolve_school_scope;

pub async fn create_evaluation(
    service: &EvaluationService,
    request: &HttpRequest,
    evaluation_data: CreateEvaluationRequest,
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

    if evaluation_data.name.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Evaluation name must not be blank",
        )));
    }

    // 时间窗口必须有效：开始早于结束
    if evaluation_data.start_date >= evaluation_data.end_date {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::EvaluationDatesInvalid,
            "start_date must be before end_date",
        )));
    }

    let school_id = match resolve_school_scope(&user, evaluation_data.school_id) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };

    match storage.create_evaluation(school_id, evaluation_data).await {
        Ok(evaluation) => {
            info!(
                "Evaluation {} created in school {} by user {}",
                evaluation.name, school_id, user.id
            );
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(evaluation, "Evaluation created successfully")))
        }
        Err(e) => {
            error!("Evaluation creation failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Evaluation creation failed: {e}"),
                )),
            )
        }
    }
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::AccessCodeService;
use crate::errors::EvalSystemError;
use crate::middlewares::RequireJWT;
use crate::models::access_codes::requests::GenerateCodesRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::scope::check_school_access;
use crate::utils::validate::validate_class_names;

pub async fn generate_codes(
    service: &AccessCodeService,
    request: &HttpRequest,
    evaluation_id: i64,
    generate_data: GenerateCodesRequest,
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

    if let Err(msg) = validate_class_names(&generate_data.classes) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
    }

    // 评价活动必须存在且属于调用者可操作的学校
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

    // 每个班级名生成一个访问码，存储层负责冲突重试
    let mut codes = Vec::with_capacity(generate_data.classes.len());
    for class_name in generate_data.classes {
        match storage
            .create_access_code(evaluation_id, class_name.trim().to_string())
            .await
        {
            Ok(code) => codes.push(code),
            Err(e @ EvalSystemError::AccessCodeExhausted(_)) => {
                error!("Access code generation exhausted: {}", e);
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::AccessCodeGenerationFailed,
                        "Failed to generate a unique access code",
                    )),
                );
            }
            Err(e) => {
                error!("Access code creation failed: {}", e);
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::AccessCodeGenerationFailed,
                        format!("Failed to create access code: {e}"),
                    )),
                );
            }
        }
    }

    info!(
        "Generated {} access codes for evaluation {} by user {}",
        codes.len(),
        evaluation_id,
        user.id
    );

    Ok(HttpResponse::Created().json(ApiResponse::success(codes, "Access codes generated")))
}

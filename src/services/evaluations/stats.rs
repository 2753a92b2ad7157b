//! 评价统计服务
//!
//! 每次请求直接从存储层重算，不做缓存：单个学校的评价数据量很小，
//! 这里也不是性能敏感路径。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EvaluationService;
use crate::middlewares::RequireJWT;
use crate::models::evaluations::entities::EvaluationResponse;
use crate::models::evaluations::responses::{AverageScores, EvaluationStatsResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::scope::check_school_access;

pub async fn get_evaluation_stats(
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

    let responses = match storage.list_responses(evaluation_id).await {
        Ok(responses) => responses,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to list responses: {e}"),
                )),
            );
        }
    };

    let (total_codes, used_codes) = match storage.count_access_codes(evaluation_id).await {
        Ok(counts) => counts,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to count access codes: {e}"),
                )),
            );
        }
    };

    let stats = EvaluationStatsResponse {
        total_responses: responses.len() as i64,
        average_scores: average_scores(&responses),
        completion_rate: completion_rate(used_codes, total_codes),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(stats, "查询成功")))
}

/// 保留两位小数
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 各项评分的算术平均，无回复时全部为 0
fn average_scores(responses: &[EvaluationResponse]) -> AverageScores {
    if responses.is_empty() {
        return AverageScores::default();
    }

    let count = responses.len() as f64;
    let mut sums = [0f64; 5];

    for response in responses {
        for (i, (_, score)) in response.criteria.as_pairs().iter().enumerate() {
            sums[i] += f64::from(*score);
        }
    }

    AverageScores {
        preparation: round2(sums[0] / count),
        explanation: round2(sums[1] / count),
        engagement: round2(sums[2] / count),
        atmosphere: round2(sums[3] / count),
        individual: round2(sums[4] / count),
    }
}

/// 完成率 = 已使用访问码 / 全部访问码，无访问码时为 0
fn completion_rate(used: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    round2(used as f64 / total as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::evaluations::entities::CriteriaScores;

    fn sample_response(criteria: CriteriaScores) -> EvaluationResponse {
        EvaluationResponse {
            id: 1,
            evaluation_id: 1,
            teacher_id: 1,
            subject_id: 1,
            class_id: 1,
            access_code_id: 1,
            criteria,
            comment: None,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_average_scores_empty_is_zero_not_nan() {
        let averages = average_scores(&[]);
        assert_eq!(averages.preparation, 0.0);
        assert_eq!(averages.individual, 0.0);
        assert!(!averages.explanation.is_nan());
    }

    #[test]
    fn test_average_scores_mean() {
        let responses = vec![
            sample_response(CriteriaScores {
                preparation: 5,
                explanation: 4,
                engagement: 4,
                atmosphere: 5,
                individual: 3,
            }),
            sample_response(CriteriaScores {
                preparation: 3,
                explanation: 2,
                engagement: 4,
                atmosphere: 1,
                individual: 5,
            }),
        ];

        let averages = average_scores(&responses);
        assert_eq!(averages.preparation, 4.0);
        assert_eq!(averages.explanation, 3.0);
        assert_eq!(averages.engagement, 4.0);
        assert_eq!(averages.atmosphere, 3.0);
        assert_eq!(averages.individual, 4.0);
    }

    #[test]
    fn test_average_scores_rounding() {
        let responses = vec![
            sample_response(CriteriaScores {
                preparation: 5,
                explanation: 5,
                engagement: 5,
                atmosphere: 5,
                individual: 5,
            }),
            sample_response(CriteriaScores {
                preparation: 4,
                explanation: 4,
                engagement: 4,
                atmosphere: 4,
                individual: 4,
            }),
            sample_response(CriteriaScores {
                preparation: 4,
                explanation: 4,
                engagement: 4,
                atmosphere: 4,
                individual: 4,
            }),
        ];

        // 13 / 3 = 4.333... -> 4.33
        let averages = average_scores(&responses);
        assert_eq!(averages.preparation, 4.33);
    }

    #[test]
    fn test_completion_rate_zero_codes() {
        // 无访问码时必须是 0，不能出现除零
        assert_eq!(completion_rate(0, 0), 0.0);
    }

    #[test]
    fn test_completion_rate() {
        assert_eq!(completion_rate(1, 4), 0.25);
        assert_eq!(completion_rate(4, 4), 1.0);
        assert_eq!(completion_rate(1, 3), 0.33);
    }
}

//! 评价报表导出服务
//!
//! CSV 在进程内拼装；PDF 把渲染好的 HTML 交给外部渲染服务。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::EvaluationService;
use crate::middlewares::RequireJWT;
use crate::models::evaluations::entities::Evaluation;
use crate::models::evaluations::responses::ResponseDetail;
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::scope::check_school_access;
use crate::utils::pdf::PdfRenderer;

/// 导出 CSV
pub async fn export_csv(
    service: &EvaluationService,
    request: &HttpRequest,
    evaluation_id: i64,
) -> ActixResult<HttpResponse> {
    let (_evaluation, responses) = match load_export_data(service, request, evaluation_id).await {
        Ok(data) => data,
        Err(resp) => return Ok(resp),
    };

    let csv = build_csv(&responses);
    let filename = format!("evaluation-{evaluation_id}.csv");

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{filename}\""),
        ))
        .body(csv))
}

/// 导出 PDF
pub async fn export_pdf(
    service: &EvaluationService,
    request: &HttpRequest,
    evaluation_id: i64,
) -> ActixResult<HttpResponse> {
    let (evaluation, responses) = match load_export_data(service, request, evaluation_id).await {
        Ok(data) => data,
        Err(resp) => return Ok(resp),
    };

    let Some(renderer) = PdfRenderer::from_config() else {
        return Ok(
            HttpResponse::ServiceUnavailable().json(ApiResponse::error_empty(
                ErrorCode::ExportFailed,
                "PDF renderer is not configured",
            )),
        );
    };

    let html = build_report_html(&evaluation, &responses);

    match renderer.render(&html).await {
        Ok(pdf_bytes) => {
            let filename = format!("evaluation-{evaluation_id}-report.pdf");
            Ok(HttpResponse::Ok()
                .content_type("application/pdf")
                .insert_header((
                    "Content-Disposition",
                    format!("attachment; filename=\"{filename}\""),
                ))
                .body(pdf_bytes))
        }
        Err(e) => {
            error!("PDF rendering failed: {}", e);
            Ok(HttpResponse::BadGateway().json(ApiResponse::error_empty(
                ErrorCode::ExportFailed,
                "PDF rendering failed",
            )))
        }
    }
}

/// 导出共用的数据装载与权限校验
async fn load_export_data(
    service: &EvaluationService,
    request: &HttpRequest,
    evaluation_id: i64,
) -> Result<(Evaluation, Vec<ResponseDetail>), HttpResponse> {
    let storage = service.get_storage(request);

    let user: User = RequireJWT::extract_user_claims(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized: missing user",
        ))
    })?;

    let evaluation = match storage.get_evaluation_by_id(evaluation_id).await {
        Ok(Some(evaluation)) => evaluation,
        Ok(None) => {
            return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::EvaluationNotFound,
                "Evaluation not found",
            )));
        }
        Err(e) => {
            return Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to fetch evaluation: {e}"),
                )),
            );
        }
    };

    check_school_access(&user, evaluation.school_id)?;

    let responses = storage
        .list_responses_with_names(evaluation_id)
        .await
        .map_err(|e| {
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to list responses: {e}"),
            ))
        })?;

    Ok((evaluation, responses))
}

/// 拼装 CSV 文本
fn build_csv(responses: &[ResponseDetail]) -> String {
    let mut csv = String::from(
        "Teacher,Subject,Class,Preparation,Explanation,Engagement,Atmosphere,Individual,Comment,Date\n",
    );

    for detail in responses {
        let criteria = &detail.response.criteria;
        csv.push_str(&format!(
            "{},{},{},{},{},{},{},{},{},{}\n",
            escape_csv_field(&detail.teacher_name),
            escape_csv_field(&detail.subject_name),
            escape_csv_field(&detail.class_name),
            criteria.preparation,
            criteria.explanation,
            criteria.engagement,
            criteria.atmosphere,
            criteria.individual,
            escape_csv_field(detail.response.comment.as_deref().unwrap_or("")),
            detail.response.created_at.format("%Y-%m-%d %H:%M:%S"),
        ));
    }

    csv
}

/// CSV 字段转义：双引号包裹，内部引号成对
fn escape_csv_field(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// HTML 文本转义
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// 拼装 PDF 报表 HTML
fn build_report_html(evaluation: &Evaluation, responses: &[ResponseDetail]) -> String {
    // 平均分表格
    let mut sums = [0f64; 5];
    for detail in responses {
        for (i, (_, score)) in detail.response.criteria.as_pairs().iter().enumerate() {
            sums[i] += f64::from(*score);
        }
    }
    let count = responses.len().max(1) as f64;
    let labels = [
        "Preparation",
        "Explanation",
        "Engagement",
        "Atmosphere",
        "Individual attention",
    ];
    let stats_rows: String = labels
        .iter()
        .zip(sums.iter())
        .map(|(label, sum)| {
            format!(
                "<tr><td>{}</td><td>{:.2}</td></tr>",
                label,
                if responses.is_empty() { 0.0 } else { sum / count }
            )
        })
        .collect();

    // 逐条回复
    let response_blocks: String = responses
        .iter()
        .map(|detail| {
            let criteria = &detail.response.criteria;
            let comment = detail
                .response
                .comment
                .as_deref()
                .filter(|c| !c.is_empty())
                .map(|c| format!("<p><strong>Comment:</strong> {}</p>", escape_html(c)))
                .unwrap_or_default();
            format!(
                r#"<div class="response">
  <p><strong>Teacher:</strong> {teacher}</p>
  <p><strong>Subject:</strong> {subject}</p>
  <p><strong>Class:</strong> {class}</p>
  <ul>
    <li>Preparation: {p}</li>
    <li>Explanation: {e}</li>
    <li>Engagement: {g}</li>
    <li>Atmosphere: {a}</li>
    <li>Individual attention: {i}</li>
  </ul>
  {comment}
  <p><small>Submitted: {date}</small></p>
</div>"#,
                teacher = escape_html(&detail.teacher_name),
                subject = escape_html(&detail.subject_name),
                class = escape_html(&detail.class_name),
                p = criteria.preparation,
                e = criteria.explanation,
                g = criteria.engagement,
                a = criteria.atmosphere,
                i = criteria.individual,
                comment = comment,
                date = detail.response.created_at.format("%Y-%m-%d %H:%M:%S"),
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <style>
    body {{ font-family: Arial, sans-serif; margin: 40px; }}
    h1 {{ color: #2563eb; }}
    table {{ width: 100%; border-collapse: collapse; }}
    th, td {{ padding: 8px; text-align: left; border-bottom: 1px solid #ddd; }}
    th {{ background-color: #f3f4f6; }}
    .response {{ margin-bottom: 20px; padding: 10px; border: 1px solid #ddd; }}
  </style>
</head>
<body>
  <h1>Evaluation report: {name}</h1>
  <p>{description}</p>
  <h2>Average scores</h2>
  <table>
    <tr><th>Criterion</th><th>Average</th></tr>
    {stats_rows}
  </table>
  <h2>Responses ({total})</h2>
  {response_blocks}
</body>
</html>"#,
        name = escape_html(&evaluation.name),
        description = escape_html(evaluation.description.as_deref().unwrap_or("")),
        stats_rows = stats_rows,
        total = responses.len(),
        response_blocks = response_blocks,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::evaluations::entities::{CriteriaScores, EvaluationResponse};

    fn sample_detail(comment: Option<&str>) -> ResponseDetail {
        ResponseDetail {
            response: EvaluationResponse {
                id: 1,
                evaluation_id: 1,
                teacher_id: 1,
                subject_id: 1,
                class_id: 1,
                access_code_id: 1,
                criteria: CriteriaScores {
                    preparation: 5,
                    explanation: 4,
                    engagement: 4,
                    atmosphere: 5,
                    individual: 3,
                },
                comment: comment.map(str::to_string),
                created_at: chrono::Utc::now(),
            },
            teacher_name: "Jan Novák".to_string(),
            subject_name: "Mathematics".to_string(),
            class_name: "4.A".to_string(),
        }
    }

    #[test]
    fn test_escape_csv_field() {
        assert_eq!(escape_csv_field("plain"), "\"plain\"");
        assert_eq!(escape_csv_field("with \"quote\""), "\"with \"\"quote\"\"\"");
        assert_eq!(escape_csv_field("a,b"), "\"a,b\"");
    }

    #[test]
    fn test_build_csv_header_and_row() {
        let csv = build_csv(&[sample_detail(Some("great, teacher"))]);
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Teacher,Subject,Class,Preparation,Explanation,Engagement,Atmosphere,Individual,Comment,Date"
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("\"Jan Novák\",\"Mathematics\",\"4.A\",5,4,4,5,3"));
        assert!(row.contains("\"great, teacher\""));
    }

    #[test]
    fn test_build_csv_empty() {
        let csv = build_csv(&[]);
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn test_report_html_escapes_user_content() {
        let detail = sample_detail(Some("<script>alert(1)</script>"));
        let evaluation = Evaluation {
            id: 1,
            school_id: 1,
            name: "Winter <2024>".to_string(),
            description: None,
            status: crate::models::evaluations::entities::EvaluationStatus::Active,
            start_date: chrono::Utc::now(),
            end_date: chrono::Utc::now(),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };

        let html = build_report_html(&evaluation, &[detail]);
        assert!(html.contains("Winter &lt;2024&gt;"));
        assert!(!html.contains("<script>"));
    }
}

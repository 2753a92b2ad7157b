//! 任课分配服务
//!
//! 学生端表单需要知道某个班级有哪些 (教师, 科目) 组合可评价，
//! 因此列表端点是公开的；写操作仍受角色与学校范围约束。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::ClassService;
use crate::middlewares::RequireJWT;
use crate::models::classes::requests::UpdateAssignmentsRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::scope::check_school_access;

pub async fn list_assignments(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_class_by_id(class_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ClassNotFound,
                "Class not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to fetch class: {e}"),
                )),
            );
        }
    }

    match storage.list_assignments_by_class(class_id).await {
        Ok(assignments) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(assignments, "查询成功")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to list assignments: {e}"),
            )),
        ),
    }
}

pub async fn update_assignments(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
    update_data: UpdateAssignmentsRequest,
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

    let class = match storage.get_class_by_id(class_id).await {
        Ok(Some(class)) => class,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ClassNotFound,
                "Class not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to fetch class: {e}"),
                )),
            );
        }
    };

    if let Err(resp) = check_school_access(&user, class.school_id) {
        return Ok(resp);
    }

    // 校验引用的教师与科目都属于班级所在学校
    for entry in &update_data.assignments {
        match storage.get_teacher_by_id(entry.teacher_id).await {
            Ok(Some(teacher)) if teacher.school_id == class.school_id => {}
            Ok(_) => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::ReferenceInvalid,
                    format!("Teacher {} does not belong to this school", entry.teacher_id),
                )));
            }
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Failed to check teacher: {e}"),
                    )),
                );
            }
        }

        match storage.get_subject_by_id(entry.subject_id).await {
            Ok(Some(subject)) if subject.school_id == class.school_id => {}
            Ok(_) => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::ReferenceInvalid,
                    format!("Subject {} does not belong to this school", entry.subject_id),
                )));
            }
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Failed to check subject: {e}"),
                    )),
                );
            }
        }
    }

    match storage
        .replace_assignments(class_id, update_data.assignments)
        .await
    {
        Ok(count) => {
            info!(
                "Assignments for class {} replaced ({} entries) by user {}",
                class_id, count, user.id
            );
            Ok(HttpResponse::Ok()
                .json(ApiResponse::<()>::success_empty("Assignments updated successfully")))
        }
        Err(e) => {
            error!("Failed to replace assignments: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to update assignments: {e}"),
                )),
            )
        }
    }
}

pub async fn delete_assignment(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
    assignment_id: i64,
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

    let class = match storage.get_class_by_id(class_id).await {
        Ok(Some(class)) => class,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ClassNotFound,
                "Class not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to fetch class: {e}"),
                )),
            );
        }
    };

    if let Err(resp) = check_school_access(&user, class.school_id) {
        return Ok(resp);
    }

    match storage.delete_assignment(class_id, assignment_id).await {
        Ok(true) => {
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("Assignment deleted")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssignmentNotFound,
            "Assignment not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to delete assignment: {e}"),
            )),
        ),
    }
}

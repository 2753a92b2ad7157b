//! 学校范围解析
//!
//! 多租户边界的统一入口：校长只能操作自己绑定的学校，管理员操作任意
//! 学校。按学校隔离的服务都走这两个函数，处理程序内不再散落判定。
//! 越权一律 403，与"资源不存在"的 404 区分开。

use actix_web::HttpResponse;

use crate::models::users::entities::{User, UserRole};
use crate::models::{ApiResponse, ErrorCode};

/// 解析调用者要操作的目标学校
///
/// - 校长：固定为自己绑定的学校；显式指定其他学校视为越权
/// - 管理员：必须显式指定目标学校
pub(crate) fn resolve_school_scope(
    user: &User,
    explicit: Option<i64>,
) -> Result<i64, HttpResponse> {
    match user.role {
        UserRole::Admin => explicit.ok_or_else(|| {
            HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                "Admin requests must specify school_id",
            ))
        }),
        UserRole::Director => {
            let Some(own) = user.school_id else {
                return Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::SchoolPermissionDenied,
                    "Director account is not bound to a school",
                )));
            };
            match explicit {
                Some(other) if other != own => {
                    Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                        ErrorCode::SchoolPermissionDenied,
                        "You do not have access to this school",
                    )))
                }
                _ => Ok(own),
            }
        }
    }
}

/// 校验调用者能否操作属于 school_id 的既有资源
pub(crate) fn check_school_access(user: &User, school_id: i64) -> Result<(), HttpResponse> {
    if user.can_access_school(school_id) {
        Ok(())
    } else {
        Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::SchoolPermissionDenied,
            "You do not have access to this school",
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserStatus;
    use actix_web::http::StatusCode;

    fn sample_user(role: UserRole, school_id: Option<i64>) -> User {
        User {
            id: 1,
            username: "tester01".to_string(),
            email: "tester01@example.com".to_string(),
            password_hash: String::new(),
            role,
            status: UserStatus::Active,
            school_id,
            profile_name: None,
            last_login: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_admin_requires_explicit_school() {
        let admin = sample_user(UserRole::Admin, None);
        assert_eq!(resolve_school_scope(&admin, Some(3)).unwrap(), 3);

        let err = resolve_school_scope(&admin, None).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_director_uses_own_school() {
        let director = sample_user(UserRole::Director, Some(5));
        assert_eq!(resolve_school_scope(&director, None).unwrap(), 5);
        assert_eq!(resolve_school_scope(&director, Some(5)).unwrap(), 5);
    }

    #[test]
    fn test_director_cannot_cross_school() {
        let director = sample_user(UserRole::Director, Some(5));
        let err = resolve_school_scope(&director, Some(6)).unwrap_err();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_check_school_access() {
        let director = sample_user(UserRole::Director, Some(5));
        assert!(check_school_access(&director, 5).is_ok());
        let err = check_school_access(&director, 6).unwrap_err();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);

        let admin = sample_user(UserRole::Admin, None);
        assert!(check_school_access(&admin, 6).is_ok());
    }
}

//! 业务错误码定义
//!
//! 通用错误 1xxx，认证 2xxx，用户 3xxx，学校域 4xxx，评价 5xxx，访问码 6xxx。

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用
    BadRequest = 1000,
    NotFound = 1001,
    InternalServerError = 1002,
    RateLimitExceeded = 1003,

    // 认证与授权
    Unauthorized = 2000,
    AuthFailed = 2001,
    Forbidden = 2002,
    SchoolPermissionDenied = 2003,

    // 用户
    UserNotFound = 3000,
    UserAlreadyExists = 3001,
    UserNameInvalid = 3002,
    UserEmailInvalid = 3003,
    UserPasswordInvalid = 3004,
    UserCreationFailed = 3005,
    UserUpdateFailed = 3006,
    UserDeleteFailed = 3007,
    CanNotDeleteCurrentUser = 3008,

    // 学校 / 教师 / 科目 / 班级
    SchoolNotFound = 4000,
    SchoolAlreadyExists = 4001,
    TeacherNotFound = 4002,
    SubjectNotFound = 4003,
    ClassNotFound = 4004,
    ClassHasActiveEvaluations = 4005,
    AssignmentNotFound = 4006,

    // 评价活动
    EvaluationNotFound = 5000,
    EvaluationDatesInvalid = 5001,
    EvaluationHasResponses = 5002,
    EvaluationNotActive = 5003,
    ResponseValidationFailed = 5004,
    ReferenceInvalid = 5005,
    ExportFailed = 5006,

    // 访问码
    AccessCodeNotFound = 6000,
    AccessCodeUsed = 6001,
    AccessCodeGenerationFailed = 6002,
}

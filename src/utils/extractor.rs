//! 路径参数安全提取器
//!
//! 统一把路径中的 ID 解析为正整数，解析失败直接返回 400 JSON 响应，
//! 避免在每个处理程序里重复校验。

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

// 为指定路径参数生成提取器类型
macro_rules! define_safe_id_extractor {
    ($name:ident, $param:literal) => {
        pub struct $name(pub i64);

        impl FromRequest for $name {
            type Error = actix_web::Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
                let parsed = req
                    .match_info()
                    .get($param)
                    .and_then(|v| v.parse::<i64>().ok())
                    .filter(|v| *v > 0);

                ready(match parsed {
                    Some(value) => Ok($name(value)),
                    None => {
                        let response = HttpResponse::BadRequest().json(
                            ApiResponse::error_empty(
                                ErrorCode::BadRequest,
                                concat!("Invalid path parameter: ", $param),
                            ),
                        );
                        Err(InternalError::from_response(
                            concat!("Invalid path parameter: ", $param),
                            response,
                        )
                        .into())
                    }
                })
            }
        }
    };
}

define_safe_id_extractor!(SafeIdI64, "id");
define_safe_id_extractor!(SafeEvaluationIdI64, "evaluation_id");
define_safe_id_extractor!(SafeClassIdI64, "class_id");
define_safe_id_extractor!(SafeCodeIdI64, "code_id");
define_safe_id_extractor!(SafeAssignmentIdI64, "assignment_id");

pub mod extractor;
pub mod jwt;
pub mod parameter_error_handler;
pub mod password;
pub mod pdf;
pub mod random_code;
pub mod sql;
pub mod validate;

pub use extractor::{
    SafeAssignmentIdI64, SafeClassIdI64, SafeCodeIdI64, SafeEvaluationIdI64, SafeIdI64,
};
pub use parameter_error_handler::json_error_handler;
pub use parameter_error_handler::query_error_handler;
pub use sql::escape_like_pattern;

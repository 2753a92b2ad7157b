pub mod access_codes;
pub mod auth;
pub mod classes;
pub mod evaluations;
pub mod schools;
pub(crate) mod scope;
pub mod subjects;
pub mod system;
pub mod teachers;
pub mod users;

pub use access_codes::AccessCodeService;
pub use auth::AuthService;
pub use classes::ClassService;
pub use evaluations::EvaluationService;
pub use schools::SchoolService;
pub use subjects::SubjectService;
pub use system::SystemService;
pub use teachers::TeacherService;
pub use users::UserService;

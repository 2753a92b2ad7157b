pub mod access_codes;

pub mod auth;

pub mod classes;

pub mod evaluations;

pub mod schools;

pub mod subjects;

pub mod system;

pub mod teachers;

pub mod users;

pub use access_codes::configure_access_code_routes;
pub use auth::configure_auth_routes;
pub use classes::configure_classes_routes;
pub use evaluations::configure_evaluation_routes;
pub use schools::configure_school_routes;
pub use subjects::configure_subject_routes;
pub use system::configure_system_routes;
pub use teachers::configure_teacher_routes;
pub use users::configure_user_routes;

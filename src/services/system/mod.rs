pub mod status;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

pub struct SystemService;

impl SystemService {
    pub fn new_lazy() -> Self {
        Self
    }

    // 健康检查（公开）
    pub async fn health(&self) -> ActixResult<HttpResponse> {
        status::health().await
    }

    // 运行状态（需认证）
    pub async fn status(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        status::system_status(request).await
    }
}

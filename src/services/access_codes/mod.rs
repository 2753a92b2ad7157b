pub mod delete;
pub mod generate;
pub mod list;
pub mod verify;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::access_codes::requests::{GenerateCodesRequest, VerifyCodeRequest};
use crate::storage::Storage;

pub struct AccessCodeService {
    storage: Option<Arc<dyn Storage>>,
}

impl AccessCodeService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 为评价活动批量生成访问码（每个班级一个）
    pub async fn generate_codes(
        &self,
        request: &HttpRequest,
        evaluation_id: i64,
        generate_data: GenerateCodesRequest,
    ) -> ActixResult<HttpResponse> {
        generate::generate_codes(self, request, evaluation_id, generate_data).await
    }

    // 验证访问码（公开端点，不消耗）
    pub async fn verify_code(
        &self,
        request: &HttpRequest,
        verify_data: VerifyCodeRequest,
    ) -> ActixResult<HttpResponse> {
        verify::verify_code(self, request, verify_data).await
    }

    // 列出评价活动的访问码
    pub async fn list_codes(
        &self,
        request: &HttpRequest,
        evaluation_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_codes(self, request, evaluation_id).await
    }

    // 删除单个访问码
    pub async fn delete_code(
        &self,
        request: &HttpRequest,
        code_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_code(self, request, code_id).await
    }

    // 删除评价活动的全部访问码
    pub async fn delete_all_codes(
        &self,
        request: &HttpRequest,
        evaluation_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_all_codes(self, request, evaluation_id).await
    }
}

//! PDF 渲染客户端
//!
//! PDF 导出不在进程内渲染：拼装好的 HTML 以 POST 发送到外部 HTML→PDF
//! 渲染服务（配置 `pdf.renderer_url`），返回 PDF 字节流。
//! 未配置渲染服务时 PDF 导出不可用。

use std::time::Duration;

use crate::config::AppConfig;
use crate::errors::{EvalSystemError, Result};

pub struct PdfRenderer {
    client: reqwest::Client,
    endpoint: String,
}

impl PdfRenderer {
    /// 从配置构建渲染客户端；未配置 renderer_url 时返回 None
    pub fn from_config() -> Option<Self> {
        let config = AppConfig::get();
        let endpoint = config.pdf_renderer_url()?.to_string();

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.pdf.timeout))
            .build()
            .ok()?;

        Some(Self { client, endpoint })
    }

    /// 渲染 HTML 为 PDF 字节流
    pub async fn render(&self, html: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::CONTENT_TYPE, "text/html; charset=utf-8")
            .body(html.to_string())
            .send()
            .await
            .map_err(|e| EvalSystemError::pdf_render(format!("渲染服务请求失败: {e}")))?;

        if !response.status().is_success() {
            return Err(EvalSystemError::pdf_render(format!(
                "渲染服务返回错误状态: {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| EvalSystemError::pdf_render(format!("读取渲染结果失败: {e}")))?;

        Ok(bytes.to_vec())
    }
}

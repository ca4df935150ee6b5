//! HTTP 客户端 - 基础设施层
//!
//! 持有唯一的 reqwest::Client，所有接口客户端共享连接池

use crate::config::Config;
use crate::error::{AppError, AppResult};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tracing::debug;

/// 共享的 HTTP 客户端
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    /// 创建新的 HTTP 客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("resume_checker/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::api_request_failed(config.api_base_url.clone(), e))?;
        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn inner(&self) -> &reqwest::Client {
        &self.client
    }

    /// 拼接完整的接口地址
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// 读取成功响应的 JSON
pub async fn read_json<T: DeserializeOwned>(endpoint: &str, response: Response) -> AppResult<T> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| AppError::api_request_failed(endpoint, e))?;
    serde_json::from_slice(&bytes).map_err(|e| AppError::json_parse_failed(endpoint, e))
}

/// 把非 2xx 响应转换为错误
///
/// 从 JSON 响应体里按顺序取 `fields` 中第一个字符串字段，取不到时使用 `fallback`
pub async fn error_from_response(
    endpoint: &str,
    response: Response,
    fields: &[&str],
    fallback: &str,
) -> AppError {
    let status: StatusCode = response.status();
    let body: Option<JsonValue> = match response.bytes().await {
        Ok(bytes) => serde_json::from_slice(&bytes).ok(),
        Err(_) => None,
    };
    debug!("接口 {} 返回错误 {}: {:?}", endpoint, status, body);

    let message = body
        .as_ref()
        .and_then(|body| {
            fields
                .iter()
                .find_map(|field| body.get(*field).and_then(|v| v.as_str()))
        })
        .filter(|message| !message.is_empty())
        .unwrap_or(fallback);

    AppError::bad_response(endpoint, status.as_u16(), message)
}

/// 评分接口客户端
///
/// 封装 `/api/grade` 的两种调用方式：上传文件（POST multipart）和按 URL 评分（GET）
use crate::config::Config;
use crate::error::{AppError, AppResult, GENERIC_GRADE_ERROR};
use crate::infrastructure::http::{error_from_response, read_json};
use crate::infrastructure::HttpClient;
use crate::models::{GradeInput, GradingResult};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// 评分接口路径
pub const GRADE_PATH: &str = "/api/grade";

/// 评分能力
#[async_trait]
pub trait GradeApi: Send + Sync {
    /// 发出一次评分请求
    async fn grade(&self, input: &GradeInput) -> AppResult<GradingResult>;
}

/// 评分接口客户端
pub struct GradeClient {
    http: HttpClient,
    timeout: Duration,
}

impl GradeClient {
    /// 创建新的评分客户端
    pub fn new(http: HttpClient, config: &Config) -> Self {
        Self {
            http,
            timeout: config.grade_timeout(),
        }
    }
}

#[async_trait]
impl GradeApi for GradeClient {
    async fn grade(&self, input: &GradeInput) -> AppResult<GradingResult> {
        let endpoint = self.http.url(GRADE_PATH);

        let request = match input {
            GradeInput::FormData(payload) => {
                debug!("POST {} 上传 {}", endpoint, payload.resume().file_name);
                let form = payload
                    .to_multipart()
                    .map_err(|e| AppError::api_request_failed(endpoint.clone(), e))?;
                self.http.inner().post(&endpoint).multipart(form)
            }
            GradeInput::Url(url) => {
                debug!("GET {}?url={}", endpoint, url);
                self.http.inner().get(&endpoint).query(&[("url", url)])
            }
        };

        let response = request
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(endpoint.clone(), e))?;

        if !response.status().is_success() {
            return Err(error_from_response(&endpoint, response, &["error"], GENERIC_GRADE_ERROR).await);
        }

        read_json(&endpoint, response).await
    }
}

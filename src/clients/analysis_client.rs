/// 项目分析接口客户端
use crate::error::{AppError, AppResult, GENERIC_ANALYSIS_ERROR};
use crate::infrastructure::http::{error_from_response, read_json};
use crate::infrastructure::HttpClient;
use crate::models::{AnalyzeProjectRequest, ProjectAnalysisResult, RepoOwner};
use async_trait::async_trait;
use tracing::debug;

/// 项目分析接口路径
pub const ANALYZE_PROJECT_PATH: &str = "/api/analyze/project";

/// 项目分析能力
#[async_trait]
pub trait AnalysisApi: Send + Sync {
    async fn analyze_project(
        &self,
        repo: &str,
        owner: &RepoOwner,
        token: &str,
    ) -> AppResult<ProjectAnalysisResult>;
}

/// 项目分析接口客户端
pub struct AnalysisClient {
    http: HttpClient,
}

impl AnalysisClient {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl AnalysisApi for AnalysisClient {
    async fn analyze_project(
        &self,
        repo: &str,
        owner: &RepoOwner,
        token: &str,
    ) -> AppResult<ProjectAnalysisResult> {
        let endpoint = self.http.url(ANALYZE_PROJECT_PATH);
        debug!("POST {} 分析 {}/{}", endpoint, owner.login, repo);

        let body = AnalyzeProjectRequest { repo, owner, token };
        let response = self
            .http
            .inner()
            .post(&endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(endpoint.clone(), e))?;

        if !response.status().is_success() {
            return Err(
                error_from_response(&endpoint, response, &["message"], GENERIC_ANALYSIS_ERROR).await,
            );
        }

        read_json(&endpoint, response).await
    }
}

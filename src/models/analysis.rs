//! 项目分析数据模型

use crate::models::grade::Grade;
use serde::{Deserialize, Serialize};

/// 仓库所有者
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoOwner {
    pub login: String,
    pub avatar_url: String,
    pub html_url: String,
}

/// 用户选中的仓库
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SelectedRepo {
    pub name: String,
    pub owner: RepoOwner,
}

/// `/api/analyze/project` 的请求体
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeProjectRequest<'a> {
    pub repo: &'a str,
    pub owner: &'a RepoOwner,
    pub token: &'a str,
}

/// 分析详情
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectAnalysis {
    pub grade: Grade,
    pub summary: String,
    pub red_flags: Vec<String>,
    pub yellow_flags: Vec<String>,
    pub green_flags: Vec<String>,
}

/// 项目分析结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectAnalysisResult {
    pub content: String,
    pub analysis: ProjectAnalysis,
}

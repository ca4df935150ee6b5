//! # Resume Checker
//!
//! 简历评分客户端：提交简历（上传文件、粘贴 URL 或示例），调用评分接口并生成评分页展示模型
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有共享资源，只暴露能力
//! - `HttpClient` - 唯一的 reqwest::Client
//! - `Navigator` / `AnalyticsSink` - 页面跳转和统计事件
//!
//! ### ② 状态层（State）
//! - `FormStateStore` - 提交页和评分页之间共享的表单状态
//! - `MutationRegistry` - 按 key 共享的请求状态，可订阅
//!
//! ### ③ 业务能力层（Clients / Services）
//! - `clients/` - `/api/grade` 和 `/api/analyze/project` 接口
//! - `IntakeService` - 提交页的输入校验
//! - `ProjectAnalysisQuery` - 手动触发、带缓存和重试的项目分析
//!
//! ### ④ 编排与流程层（Orchestration / Workflow）
//! - `GradingOrchestrator` - 一次评分请求及其副作用
//! - `ReviewController` - 评分页：解析来源 → 发起请求 → 展示模型
//!
//! ## 模块结构

pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod state;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{GradeInput, GradingResult, SubmissionState};
pub use orchestrator::GradingOrchestrator;
pub use services::{IntakeService, ProjectAnalysisQuery};
pub use state::{FormStateStore, MutationRegistry};
pub use workflow::{resolve_source, ReviewController, ReviewView};

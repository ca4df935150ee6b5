//! 评分页流程
//!
//! 挂载时解析评分来源并驱动一次评分请求，之后根据注册表中的请求状态生成展示模型

use crate::error::{AppError, AppResult};
use crate::infrastructure::{Navigator, INTAKE_ROUTE};
use crate::models::{GradeInput, GradingResult, MutationId, MutationRecord, MutationStatus};
use crate::orchestrator::GradingOrchestrator;
use crate::state::{FormStateStore, MutationHandle, RESUME_CHECK_KEY};
use crate::workflow::resolve::resolve_source;
use crate::workflow::review_view::ReviewView;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// 挂载结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountOutcome {
    /// 没有可用来源，已跳回提交页
    Redirected,
    /// 发出了新的请求
    Started(MutationId),
    /// 同一来源的请求已经在进行或已完成，没有重复发出
    AlreadyActive(MutationId),
}

struct ActiveRequest {
    source: GradeInput,
    handle: MutationHandle,
    task: Option<JoinHandle<AppResult<GradingResult>>>,
}

/// 评分页控制器
pub struct ReviewController {
    orchestrator: GradingOrchestrator,
    store: FormStateStore,
    navigator: Arc<dyn Navigator>,
    active: Option<ActiveRequest>,
    feedback_open: bool,
}

impl ReviewController {
    pub fn new(orchestrator: GradingOrchestrator, store: FormStateStore, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            orchestrator,
            store,
            navigator,
            active: None,
            feedback_open: false,
        }
    }

    /// 挂载评分页
    ///
    /// # 参数
    /// - `query_url`: 路由中的 `url` 查询参数
    ///
    /// 同一来源只会发出一次请求；来源变化时取消旧请求再发出新请求
    pub fn mount(&mut self, query_url: Option<&str>) -> MountOutcome {
        let stored = self.store.read();
        let Some(source) = resolve_source(query_url, &stored) else {
            if stored.is_empty() {
                info!("没有可评分的简历，返回提交页");
            } else {
                info!("已保存的简历地址为空，返回提交页");
            }
            self.navigator.push(INTAKE_ROUTE);
            return MountOutcome::Redirected;
        };

        if let Some(active) = &self.active {
            if active.source == source {
                debug!("来源未变化，不重复请求 {}", active.handle.id);
                return MountOutcome::AlreadyActive(active.handle.id);
            }
        }
        self.cancel_active();

        let handle = self.orchestrator.begin();
        let id = handle.id;
        let orchestrator = self.orchestrator.clone();
        let task_handle = handle.clone();
        let input = source.clone();
        let task = tokio::spawn(async move { orchestrator.run(&task_handle, input).await });

        self.active = Some(ActiveRequest {
            source,
            handle,
            task: Some(task),
        });
        MountOutcome::Started(id)
    }

    /// 等待当前请求结束
    ///
    /// 没有请求或已经等待过时返回 None
    pub async fn wait(&mut self) -> Option<AppResult<GradingResult>> {
        let task = self.active.as_mut()?.task.take()?;
        Some(match task.await {
            Ok(result) => result,
            Err(e) => {
                debug!("评分任务异常结束: {}", e);
                Err(AppError::Cancelled {
                    key: RESUME_CHECK_KEY.to_string(),
                })
            }
        })
    }

    /// 当前请求的记录
    pub fn record(&self) -> Option<MutationRecord> {
        let active = self.active.as_ref()?;
        self.orchestrator
            .registry()
            .get(RESUME_CHECK_KEY, active.handle.id)
    }

    /// 当前解析到的来源
    pub fn source(&self) -> Option<&GradeInput> {
        self.active.as_ref().map(|a| &a.source)
    }

    /// 生成展示模型
    pub fn view(&self) -> ReviewView {
        ReviewView::build(self.source(), self.record().as_ref(), self.feedback_open)
    }

    /// 打开反馈弹窗，只有评分成功后才能打开
    pub fn open_feedback(&mut self) -> bool {
        let success = self
            .record()
            .map(|r| r.status == MutationStatus::Success)
            .unwrap_or(false);
        self.feedback_open = success;
        success
    }

    pub fn close_feedback(&mut self) {
        self.feedback_open = false;
    }

    /// 反馈表单使用的评分结果
    pub fn feedback_data(&self) -> Option<GradingResult> {
        self.record().and_then(|r| r.data)
    }

    /// 卸载评分页，进行中的请求结果将被忽略
    pub fn unmount(&mut self) {
        self.cancel_active();
        self.feedback_open = false;
    }

    fn cancel_active(&mut self) {
        if let Some(active) = self.active.take() {
            self.orchestrator.registry().cancel(&active.handle);
        }
    }
}

impl Drop for ReviewController {
    fn drop(&mut self) {
        self.cancel_active();
    }
}

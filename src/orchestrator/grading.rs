//! 评分请求编排
//!
//! 一次 submit 只发出一个网络请求，并按固定顺序触发副作用：
//! 开始事件 → 请求 → 写入注册表 → 成功/失败事件 →（失败时）跳回提交页

use crate::clients::GradeApi;
use crate::error::{AppError, AppResult};
use crate::infrastructure::analytics::{ERROR_EVENT, SUBMISSION_EVENT, SUCCESS_EVENT};
use crate::infrastructure::{AnalyticsSink, Navigator, INTAKE_ROUTE};
use crate::models::{GradeInput, GradingResult, MutationError, MutationOutcome};
use crate::state::{MutationHandle, MutationRegistry, RESUME_CHECK_KEY};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 评分请求编排器
///
/// 不持有请求状态，状态都写在共享的注册表里
#[derive(Clone)]
pub struct GradingOrchestrator {
    api: Arc<dyn GradeApi>,
    registry: Arc<MutationRegistry>,
    analytics: Arc<dyn AnalyticsSink>,
    navigator: Arc<dyn Navigator>,
}

impl GradingOrchestrator {
    pub fn new(
        api: Arc<dyn GradeApi>,
        registry: Arc<MutationRegistry>,
        analytics: Arc<dyn AnalyticsSink>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            api,
            registry,
            analytics,
            navigator,
        }
    }

    pub fn registry(&self) -> &Arc<MutationRegistry> {
        &self.registry
    }

    /// 在注册表中登记一个新请求
    pub fn begin(&self) -> MutationHandle {
        self.registry.start(RESUME_CHECK_KEY)
    }

    /// 登记并执行一次评分请求
    pub async fn submit(&self, input: GradeInput) -> AppResult<GradingResult> {
        let handle = self.begin();
        self.run(&handle, input).await
    }

    /// 执行已登记的请求
    ///
    /// 请求被取消时不写入结果，也不触发成功/失败事件和跳转
    pub async fn run(&self, handle: &MutationHandle, input: GradeInput) -> AppResult<GradingResult> {
        info!("📤 提交简历评分 {} {}", handle.id, input);
        self.analytics.send_event(SUBMISSION_EVENT, json!({}));

        let result = tokio::select! {
            biased;
            _ = handle.token.cancelled() => {
                debug!("请求 {} 在完成前被取消", handle.id);
                return Err(self.cancelled());
            }
            result = self.api.grade(&input) => result,
        };

        match result {
            Ok(data) => {
                if !self
                    .registry
                    .commit(handle, MutationOutcome::Success(data.clone()))
                {
                    return Err(self.cancelled());
                }
                info!(
                    "✓ 评分完成 {}: {} (red {} / yellow {})",
                    handle.id,
                    data.grade,
                    data.red_flags.len(),
                    data.yellow_flags.len()
                );
                self.analytics.send_event(SUCCESS_EVENT, data.to_json());
                Ok(data)
            }
            Err(e) => {
                let message = e.user_message();
                let outcome = MutationOutcome::Error(MutationError {
                    message: message.clone(),
                });
                if !self.registry.commit(handle, outcome) {
                    return Err(self.cancelled());
                }
                warn!("❌ 评分失败 {}: {}", handle.id, e);
                self.analytics
                    .send_event(ERROR_EVENT, json!({ "message": message }));
                self.navigator.push(INTAKE_ROUTE);
                Err(e)
            }
        }
    }

    fn cancelled(&self) -> AppError {
        AppError::Cancelled {
            key: RESUME_CHECK_KEY.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::{HistoryNavigator, RecordingAnalytics};
    use crate::models::{Grade, MutationStatus};
    use async_trait::async_trait;
    use serde_json::Map;
    use std::sync::Mutex;
    use tokio::sync::Notify;

    /// 记录调用顺序的假评分接口
    struct FakeGradeApi {
        log: Arc<Mutex<Vec<String>>>,
        analytics: Arc<RecordingAnalytics>,
        response: Result<GradingResult, String>,
        gate: Option<Arc<Notify>>,
    }

    #[async_trait]
    impl GradeApi for FakeGradeApi {
        async fn grade(&self, input: &GradeInput) -> AppResult<GradingResult> {
            let events_before = self.analytics.names().len();
            self.log
                .lock()
                .unwrap()
                .push(format!("network:{}:{}", input.url().unwrap_or("file"), events_before));
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            match &self.response {
                Ok(data) => Ok(data.clone()),
                Err(message) => Err(AppError::bad_response("/api/grade", 400, message.clone())),
            }
        }
    }

    fn sample() -> GradingResult {
        GradingResult {
            grade: Grade::A,
            red_flags: vec![],
            yellow_flags: vec!["X".to_string()],
            extra: Map::new(),
        }
    }

    struct Harness {
        orchestrator: GradingOrchestrator,
        log: Arc<Mutex<Vec<String>>>,
        analytics: Arc<RecordingAnalytics>,
        navigator: Arc<HistoryNavigator>,
        registry: Arc<MutationRegistry>,
    }

    fn harness(response: Result<GradingResult, String>, gate: Option<Arc<Notify>>) -> Harness {
        let log = Arc::new(Mutex::new(Vec::new()));
        let analytics = Arc::new(RecordingAnalytics::new());
        let navigator = Arc::new(HistoryNavigator::new());
        let registry = MutationRegistry::new();
        let api = Arc::new(FakeGradeApi {
            log: log.clone(),
            analytics: analytics.clone(),
            response,
            gate,
        });
        let orchestrator = GradingOrchestrator::new(api, registry.clone(), analytics.clone(), navigator.clone());
        Harness {
            orchestrator,
            log,
            analytics,
            navigator,
            registry,
        }
    }

    #[tokio::test]
    async fn test_success_fires_events_in_order() {
        let h = harness(Ok(sample()), None);

        let result = h
            .orchestrator
            .submit(GradeInput::Url("https://x/cv.pdf".to_string()))
            .await
            .unwrap();
        assert_eq!(result, sample());

        // 开始事件在网络请求之前
        assert_eq!(*h.log.lock().unwrap(), vec!["network:https://x/cv.pdf:1".to_string()]);
        assert_eq!(h.analytics.names(), vec![SUBMISSION_EVENT, SUCCESS_EVENT]);
        assert_eq!(h.analytics.events()[1].1, sample().to_json());
        assert!(h.navigator.history().is_empty());

        let record = h.registry.latest(RESUME_CHECK_KEY).unwrap();
        assert_eq!(record.status, MutationStatus::Success);
    }

    #[tokio::test]
    async fn test_failure_records_error_and_redirects() {
        let h = harness(Err("bad file".to_string()), None);

        let err = h
            .orchestrator
            .submit(GradeInput::Url("https://x/cv.pdf".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "bad file");

        assert_eq!(h.analytics.names(), vec![SUBMISSION_EVENT, ERROR_EVENT]);
        assert_eq!(h.analytics.events()[1].1, json!({ "message": "bad file" }));
        assert_eq!(h.navigator.history(), vec![INTAKE_ROUTE.to_string()]);
        assert_eq!(
            h.registry.latest_error(RESUME_CHECK_KEY).map(|e| e.message),
            Some("bad file".to_string())
        );
    }

    #[tokio::test]
    async fn test_cancelled_request_has_no_side_effects() {
        let gate = Arc::new(Notify::new());
        let h = harness(Err("bad file".to_string()), Some(gate.clone()));

        let handle = h.orchestrator.begin();
        let orchestrator = h.orchestrator.clone();
        let task_handle = handle.clone();
        let task = tokio::spawn(async move {
            orchestrator
                .run(&task_handle, GradeInput::Url("https://x/cv.pdf".to_string()))
                .await
        });

        tokio::task::yield_now().await;
        h.registry.cancel(&handle);
        gate.notify_one();

        let err = task.await.unwrap().unwrap_err();
        assert!(matches!(err, AppError::Cancelled { .. }));
        assert!(h.navigator.history().is_empty());
        assert!(!h.analytics.names().contains(&ERROR_EVENT.to_string()));
        let record = h.registry.latest(RESUME_CHECK_KEY).unwrap();
        assert_eq!(record.status, MutationStatus::Idle);
        assert!(record.error.is_none());
    }
}

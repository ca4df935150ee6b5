//! 统计事件
//!
//! 外部统计服务不在本项目范围内，这里只定义发送事件的能力

use serde_json::Value as JsonValue;
use std::sync::Mutex;
use tracing::info;

/// 开始提交
pub const SUBMISSION_EVENT: &str = "resume-checker-submission";
/// 评分成功
pub const SUCCESS_EVENT: &str = "resume-checker-success";
/// 评分失败
pub const ERROR_EVENT: &str = "resume-checker-error";

/// 统计事件发送能力
pub trait AnalyticsSink: Send + Sync {
    fn send_event(&self, name: &str, params: JsonValue);
}

/// 把事件写成结构化日志
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAnalytics;

impl AnalyticsSink for TracingAnalytics {
    fn send_event(&self, name: &str, params: JsonValue) {
        info!(target: "analytics", event = name, params = %params, "📈 统计事件");
    }
}

/// 在内存中记录事件
#[derive(Debug, Default)]
pub struct RecordingAnalytics {
    events: Mutex<Vec<(String, JsonValue)>>,
}

impl RecordingAnalytics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<(String, JsonValue)> {
        match self.events.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// 只返回事件名
    pub fn names(&self) -> Vec<String> {
        self.events().into_iter().map(|(name, _)| name).collect()
    }
}

impl AnalyticsSink for RecordingAnalytics {
    fn send_event(&self, name: &str, params: JsonValue) {
        let mut guard = match self.events.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.push((name.to_string(), params));
    }
}

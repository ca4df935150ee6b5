//! 共享表单状态
//!
//! 提交页写入、评分页读取，只存在于内存中，进程结束即丢失

use crate::models::SubmissionState;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// 共享表单状态存储
///
/// Clone 后共享同一份状态
#[derive(Debug, Clone, Default)]
pub struct FormStateStore {
    inner: Arc<RwLock<SubmissionState>>,
}

impl FormStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 读取当前状态的快照
    pub fn read(&self) -> SubmissionState {
        match self.inner.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// 整体替换状态（不做合并）
    pub fn write(&self, state: SubmissionState) {
        debug!(
            "写入表单状态: url={:?}, 文件={}",
            state.url,
            state.form_data.is_some()
        );
        let mut guard = match self.inner.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = state;
    }
}

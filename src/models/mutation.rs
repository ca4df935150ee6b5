//! 请求（mutation）状态模型

use crate::models::grading::GradingResult;
use std::fmt::Display;

/// 请求编号，在注册表内唯一
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MutationId(pub u64);

impl Display for MutationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 请求生命周期状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationStatus {
    Idle,
    Pending,
    Success,
    Error,
}

impl MutationStatus {
    pub fn is_pending(self) -> bool {
        self == MutationStatus::Pending
    }
}

/// 请求失败信息（只保留展示给用户的文字）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationError {
    pub message: String,
}

impl Display for MutationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// 单次请求的记录
///
/// 创建时为 Pending，之后只会变为 Success 或 Error 一次，取消时变为 Idle
#[derive(Debug, Clone, PartialEq)]
pub struct MutationRecord {
    pub id: MutationId,
    pub status: MutationStatus,
    pub data: Option<GradingResult>,
    pub error: Option<MutationError>,
}

impl MutationRecord {
    pub fn pending(id: MutationId) -> Self {
        Self {
            id,
            status: MutationStatus::Pending,
            data: None,
            error: None,
        }
    }
}

/// 请求的最终结果
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome {
    Success(GradingResult),
    Error(MutationError),
}

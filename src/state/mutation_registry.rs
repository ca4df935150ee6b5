//! 请求状态注册表
//!
//! 按固定的 key 保存请求记录，任何持有注册表的组件都可以读取或订阅，
//! 例如提交页的错误横幅可以看到评分页发起的请求失败。

use crate::models::{MutationError, MutationId, MutationOutcome, MutationRecord, MutationStatus};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// 简历评分请求使用的 key
pub const RESUME_CHECK_KEY: &str = "resume-check";

/// 每个 key 保留的最多记录数
const MAX_RECORDS_PER_KEY: usize = 16;

/// 已登记请求的句柄
///
/// 提交结果前必须检查 token，已取消的请求不会写回注册表
#[derive(Debug, Clone)]
pub struct MutationHandle {
    pub key: String,
    pub id: MutationId,
    pub token: CancellationToken,
}

impl MutationHandle {
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

struct Entry {
    record: MutationRecord,
    token: CancellationToken,
}

struct KeyState {
    entries: Vec<Entry>,
    latest: watch::Sender<Option<MutationRecord>>,
}

impl KeyState {
    fn new() -> Self {
        let (latest, _) = watch::channel(None);
        Self {
            entries: Vec::new(),
            latest,
        }
    }

    fn publish(&self) {
        let latest = self.entries.last().map(|e| e.record.clone());
        self.latest.send_replace(latest);
    }
}

/// 请求状态注册表
///
/// 通过 `Arc` 显式传递给需要的组件
#[derive(Default)]
pub struct MutationRegistry {
    keys: Mutex<HashMap<String, KeyState>>,
    next_id: AtomicU64,
}

impl MutationRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, KeyState>> {
        match self.keys.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// 登记一个新的 Pending 请求
    pub fn start(&self, key: &str) -> MutationHandle {
        let id = MutationId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        let token = CancellationToken::new();

        let mut keys = self.lock();
        let state = keys.entry(key.to_string()).or_insert_with(KeyState::new);
        state.entries.push(Entry {
            record: MutationRecord::pending(id),
            token: token.clone(),
        });
        if state.entries.len() > MAX_RECORDS_PER_KEY {
            // 只淘汰不再进行中的旧记录
            if let Some(pos) = state.entries.iter().position(|e| !e.record.status.is_pending()) {
                state.entries.remove(pos);
            }
        }
        state.publish();

        debug!("登记请求 {} {}", key, id);
        MutationHandle {
            key: key.to_string(),
            id,
            token,
        }
    }

    /// 写入请求结果
    ///
    /// # 返回
    /// 已取消、已结束或已被丢弃的请求返回 false，状态不变
    pub fn commit(&self, handle: &MutationHandle, outcome: MutationOutcome) -> bool {
        if handle.is_cancelled() {
            debug!("请求 {} {} 已取消，忽略结果", handle.key, handle.id);
            return false;
        }

        let mut keys = self.lock();
        let Some(state) = keys.get_mut(&handle.key) else {
            return false;
        };
        let Some(entry) = state.entries.iter_mut().find(|e| e.record.id == handle.id) else {
            return false;
        };
        if entry.record.status != MutationStatus::Pending {
            return false;
        }

        match outcome {
            MutationOutcome::Success(data) => {
                entry.record.status = MutationStatus::Success;
                entry.record.data = Some(data);
            }
            MutationOutcome::Error(error) => {
                entry.record.status = MutationStatus::Error;
                entry.record.error = Some(error);
            }
        }
        state.publish();
        true
    }

    /// 取消请求
    ///
    /// 仍在 Pending 的记录变为 Idle 并保留为最新记录，之后不能再写入结果；
    /// 已结束的记录保持不变
    pub fn cancel(&self, handle: &MutationHandle) {
        handle.token.cancel();

        let mut keys = self.lock();
        let Some(state) = keys.get_mut(&handle.key) else {
            return;
        };
        let Some(entry) = state
            .entries
            .iter_mut()
            .find(|e| e.record.id == handle.id && e.record.status.is_pending())
        else {
            return;
        };
        entry.record.status = MutationStatus::Idle;
        debug!("放弃未完成的请求 {} {}", handle.key, handle.id);
        state.publish();
    }

    /// 按时间顺序返回某个 key 下的所有记录
    pub fn records(&self, key: &str) -> Vec<MutationRecord> {
        self.lock()
            .get(key)
            .map(|state| state.entries.iter().map(|e| e.record.clone()).collect())
            .unwrap_or_default()
    }

    /// 查找单条记录
    pub fn get(&self, key: &str, id: MutationId) -> Option<MutationRecord> {
        self.lock().get(key).and_then(|state| {
            state
                .entries
                .iter()
                .find(|e| e.record.id == id)
                .map(|e| e.record.clone())
        })
    }

    /// 最新一条记录
    pub fn latest(&self, key: &str) -> Option<MutationRecord> {
        self.lock()
            .get(key)
            .and_then(|state| state.entries.last().map(|e| e.record.clone()))
    }

    /// 最新一条记录的错误（最新的请求成功、仍在进行或已放弃时为 None）
    pub fn latest_error(&self, key: &str) -> Option<MutationError> {
        self.latest(key).and_then(|record| record.error)
    }

    /// 订阅某个 key 的最新记录
    pub fn subscribe(&self, key: &str) -> watch::Receiver<Option<MutationRecord>> {
        let mut keys = self.lock();
        keys.entry(key.to_string())
            .or_insert_with(KeyState::new)
            .latest
            .subscribe()
    }
}

//! 项目分析查询 - 业务能力层
//!
//! 不会自动发起请求，只有调用方显式触发时才查询；
//! 结果按 (仓库名, 所有者, token) 缓存，失败时有限次重试

use crate::clients::AnalysisApi;
use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult, GENERIC_ANALYSIS_ERROR};
use crate::models::{ProjectAnalysisResult, RepoOwner, SelectedRepo};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::Mutex as AsyncMutex;
use tokio::time::{sleep, Instant};
use tracing::{debug, info, warn};

/// 重试间隔上限
const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

/// 第 `attempt` 次失败后的等待时间（从 0 开始）
pub fn retry_delay(attempt: u32) -> Duration {
    let millis = 1000u64.saturating_mul(1u64 << attempt.min(16));
    Duration::from_millis(millis).min(MAX_RETRY_DELAY)
}

/// 缓存 key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct QueryKey {
    repo: String,
    owner: RepoOwner,
    token: String,
}

struct CacheEntry {
    data: ProjectAnalysisResult,
    fetched_at: Instant,
    /// 每次成功请求递增，用来判断等待期间是否已有新结果
    generation: u64,
}

/// 查询状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    Idle,
    Pending,
    Success,
    Error,
}

/// 查询当前的状态快照
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState {
    pub status: QueryStatus,
    pub data: Option<ProjectAnalysisResult>,
    pub error: Option<String>,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            status: QueryStatus::Idle,
            data: None,
            error: None,
        }
    }
}

impl QueryState {
    pub fn is_loading(&self) -> bool {
        self.status == QueryStatus::Pending
    }

    pub fn is_success(&self) -> bool {
        self.status == QueryStatus::Success
    }

    pub fn is_error(&self) -> bool {
        self.status == QueryStatus::Error
    }
}

/// 项目分析查询
pub struct ProjectAnalysisQuery {
    api: Arc<dyn AnalysisApi>,
    stale_time: Duration,
    max_retries: u32,
    cache: Mutex<HashMap<QueryKey, CacheEntry>>,
    /// 同一个 key 同时只有一个请求在进行
    in_flight: Mutex<HashMap<QueryKey, Arc<AsyncMutex<()>>>>,
    generation: AtomicU64,
    state: Mutex<QueryState>,
}

impl ProjectAnalysisQuery {
    pub fn new(api: Arc<dyn AnalysisApi>, config: &Config) -> Self {
        Self {
            api,
            stale_time: config.analysis_stale_time(),
            max_retries: config.analysis_max_retries,
            cache: Mutex::new(HashMap::new()),
            in_flight: Mutex::new(HashMap::new()),
            generation: AtomicU64::new(0),
            state: Mutex::new(QueryState::default()),
        }
    }

    fn cache(&self) -> MutexGuard<'_, HashMap<QueryKey, CacheEntry>> {
        match self.cache.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn fetch_lock(&self, key: &QueryKey) -> Arc<AsyncMutex<()>> {
        let mut in_flight = match self.in_flight.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        in_flight.entry(key.clone()).or_default().clone()
    }

    fn fresh(&self, key: &QueryKey) -> Option<ProjectAnalysisResult> {
        self.cache().get(key).and_then(|entry| {
            (entry.fetched_at.elapsed() < self.stale_time).then(|| entry.data.clone())
        })
    }

    fn cached_generation(&self, key: &QueryKey) -> Option<u64> {
        self.cache().get(key).map(|entry| entry.generation)
    }

    fn state_mut(&self) -> MutexGuard<'_, QueryState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// 当前状态
    pub fn state(&self) -> QueryState {
        self.state_mut().clone()
    }

    /// 触发查询，缓存仍新鲜时直接返回缓存
    ///
    /// 没有选中仓库时不发请求，返回 None
    pub async fn trigger(&self, selected: Option<&SelectedRepo>, token: &str) -> AppResult<Option<ProjectAnalysisResult>> {
        let Some(repo) = selected else {
            return Ok(self.settle_empty());
        };
        let key = QueryKey {
            repo: repo.name.clone(),
            owner: repo.owner.clone(),
            token: token.to_string(),
        };

        if let Some(data) = self.fresh(&key) {
            debug!("项目分析命中缓存: {}/{}", repo.owner.login, repo.name);
            self.settle_success(&data);
            return Ok(Some(data));
        }

        let lock = self.fetch_lock(&key);
        let _guard = lock.lock().await;
        // 等待期间同一个 key 的请求可能已经完成
        if let Some(data) = self.fresh(&key) {
            debug!("复用进行中请求的结果: {}/{}", repo.owner.login, repo.name);
            self.settle_success(&data);
            return Ok(Some(data));
        }

        self.fetch(key).await.map(Some)
    }

    /// 忽略缓存重新查询
    pub async fn refetch(&self, selected: Option<&SelectedRepo>, token: &str) -> AppResult<Option<ProjectAnalysisResult>> {
        let Some(repo) = selected else {
            return Ok(self.settle_empty());
        };
        let key = QueryKey {
            repo: repo.name.clone(),
            owner: repo.owner.clone(),
            token: token.to_string(),
        };

        let seen = self.cached_generation(&key);
        let lock = self.fetch_lock(&key);
        let _guard = lock.lock().await;
        // 等待期间已有请求成功时直接使用它的结果
        let newer = self.cache().get(&key).and_then(|entry| {
            (Some(entry.generation) != seen).then(|| entry.data.clone())
        });
        if let Some(data) = newer {
            self.settle_success(&data);
            return Ok(Some(data));
        }

        self.fetch(key).await.map(Some)
    }

    async fn fetch(&self, key: QueryKey) -> AppResult<ProjectAnalysisResult> {
        {
            let mut state = self.state_mut();
            state.status = QueryStatus::Pending;
            state.error = None;
        }
        info!("🔍 分析项目 {}/{}", key.owner.login, key.repo);

        let mut attempt = 0;
        let result = loop {
            match self.api.analyze_project(&key.repo, &key.owner, &key.token).await {
                Ok(data) => break Ok(data),
                Err(e) if attempt < self.max_retries => {
                    let delay = retry_delay(attempt);
                    warn!(
                        "项目分析失败 (尝试 {}/{}): {}，{:?} 后重试",
                        attempt + 1,
                        self.max_retries + 1,
                        e,
                        delay
                    );
                    attempt += 1;
                    sleep(delay).await;
                }
                Err(e) => break Err(e),
            }
        };

        match result {
            Ok(data) => {
                self.cache().insert(
                    key,
                    CacheEntry {
                        data: data.clone(),
                        fetched_at: Instant::now(),
                        generation: self.generation.fetch_add(1, Ordering::Relaxed) + 1,
                    },
                );
                self.settle_success(&data);
                Ok(data)
            }
            Err(e) => {
                let message = analysis_error_message(&e);
                warn!("❌ 项目分析失败: {}", message);
                let mut state = self.state_mut();
                state.status = QueryStatus::Error;
                state.error = Some(message);
                Err(e)
            }
        }
    }

    fn settle_success(&self, data: &ProjectAnalysisResult) {
        let mut state = self.state_mut();
        state.status = QueryStatus::Success;
        state.data = Some(data.clone());
        state.error = None;
    }

    fn settle_empty(&self) -> Option<ProjectAnalysisResult> {
        let mut state = self.state_mut();
        state.status = QueryStatus::Success;
        state.data = None;
        state.error = None;
        None
    }
}

/// 服务器给出的 message，或通用提示
pub fn analysis_error_message(error: &AppError) -> String {
    match error {
        AppError::Api(ApiError::BadResponse { message, .. }) => message.clone(),
        _ => GENERIC_ANALYSIS_ERROR.to_string(),
    }
}

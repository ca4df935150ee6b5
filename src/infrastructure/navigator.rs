//! 页面导航
//!
//! 只暴露 push 能力，路由表在这里集中定义

use std::sync::Mutex;
use tracing::info;

/// 提交页路由
pub const INTAKE_ROUTE: &str = "/resume-checker";

/// 评分页路由
pub const REVIEW_ROUTE: &str = "/resume-checker/review";

/// 导航能力
pub trait Navigator: Send + Sync {
    /// 跳转到指定路由
    fn push(&self, route: &str);
}

/// 带 `url` 查询参数的评分页路由（按 encodeURIComponent 编码）
pub fn review_route_with_url(url: &str) -> String {
    format!("{}?url={}", REVIEW_ROUTE, urlencoding::encode(url))
}

/// 从路由中取出 `url` 查询参数
pub fn query_url(route: &str) -> Option<String> {
    let (_, query) = route.split_once('?')?;
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(name, _)| *name == "url")
        .and_then(|(_, value)| urlencoding::decode(value).ok())
        .map(|value| value.into_owned())
        .filter(|value| !value.is_empty())
}

/// 内存中的导航历史
#[derive(Debug, Default)]
pub struct HistoryNavigator {
    history: Mutex<Vec<String>>,
}

impl HistoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从指定路由开始
    pub fn starting_at(route: impl Into<String>) -> Self {
        Self {
            history: Mutex::new(vec![route.into()]),
        }
    }

    /// 当前路由
    pub fn current(&self) -> Option<String> {
        self.history().last().cloned()
    }

    /// 全部导航历史
    pub fn history(&self) -> Vec<String> {
        match self.history.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Navigator for HistoryNavigator {
    fn push(&self, route: &str) {
        info!("🧭 跳转: {}", route);
        let mut guard = match self.history.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.push(route.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_route_encodes_like_encode_uri_component() {
        assert_eq!(
            review_route_with_url("public/s_resume.pdf"),
            "/resume-checker/review?url=public%2Fs_resume.pdf"
        );
        assert_eq!(
            review_route_with_url("https://x.com/a b.pdf"),
            "/resume-checker/review?url=https%3A%2F%2Fx.com%2Fa%20b.pdf"
        );
    }

    #[test]
    fn test_query_url_round_trip() {
        let route = review_route_with_url("https://x.com/cv.pdf?v=1");
        assert_eq!(query_url(&route).as_deref(), Some("https://x.com/cv.pdf?v=1"));
        assert_eq!(query_url(REVIEW_ROUTE), None);
        assert_eq!(query_url("/resume-checker/review?url="), None);
        assert_eq!(query_url("/r?x=1&url=public%2Fa_resume.pdf").as_deref(), Some("public/a_resume.pdf"));
    }

    #[test]
    fn test_history_navigator_records_pushes() {
        let nav = HistoryNavigator::starting_at(INTAKE_ROUTE);
        nav.push(REVIEW_ROUTE);
        assert_eq!(nav.current().as_deref(), Some(REVIEW_ROUTE));
        assert_eq!(nav.history(), vec![INTAKE_ROUTE.to_string(), REVIEW_ROUTE.to_string()]);
    }
}

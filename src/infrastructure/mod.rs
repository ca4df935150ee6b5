pub mod analytics;
pub mod http;
pub mod navigator;

pub use analytics::{AnalyticsSink, RecordingAnalytics, TracingAnalytics};
pub use http::HttpClient;
pub use navigator::{HistoryNavigator, Navigator, INTAKE_ROUTE, REVIEW_ROUTE};

//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 发起评分请求并维护请求生命周期，是提交页和评分页共同依赖的"指挥中心"。
//!
//! ## 层次关系
//!
//! ```text
//! workflow::ReviewController (解析来源，驱动请求)
//!     ↓
//! orchestrator::GradingOrchestrator (一次请求 + 副作用)
//!     ↓
//! clients (GradeApi)        state (MutationRegistry)
//!     ↓
//! infrastructure (HttpClient / AnalyticsSink / Navigator)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单次请求**：一次 submit 只发出一个网络请求
//! 2. **状态共享**：请求状态按 key 写入注册表，任何组件都能读取
//! 3. **可取消**：结果写入前检查取消令牌

pub mod grading;

pub use grading::GradingOrchestrator;

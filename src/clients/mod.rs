pub mod analysis_client;
pub mod grade_client;

pub use analysis_client::{AnalysisApi, AnalysisClient};
pub use grade_client::{GradeApi, GradeClient};

pub mod analysis;
pub mod examples;
pub mod grade;
pub mod grading;
pub mod mutation;
pub mod submission;

pub use analysis::{AnalyzeProjectRequest, ProjectAnalysis, ProjectAnalysisResult, RepoOwner, SelectedRepo};
pub use examples::{ExampleResume, EXAMPLE_RESUMES};
pub use grade::Grade;
pub use grading::GradingResult;
pub use mutation::{MutationError, MutationId, MutationOutcome, MutationRecord, MutationStatus};
pub use submission::{FilePayload, GradeInput, SelectedFile, SubmissionState};

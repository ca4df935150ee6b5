pub mod intake;
pub mod project_analysis;

pub use intake::{IntakeForm, IntakeOutcome, IntakeService, PasteEvent};
pub use project_analysis::{ProjectAnalysisQuery, QueryState, QueryStatus};

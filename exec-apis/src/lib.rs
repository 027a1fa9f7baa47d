//! Types exchanged with the code execution service and with host pages.
pub mod answer;
pub mod language;
pub mod result;
pub mod submission;

pub use language::{engine_id_for, Language};
pub use result::{ExecutionResult, TestOutcome};
pub use submission::{Submission, SubmissionContext};

#![forbid(unsafe_code)]

pub mod error;
pub mod flow;
pub mod http_reporter;
pub mod player;
pub mod reporting;
pub mod telemetry;

pub use answer_info_core::EligibilityConfig;

pub use error::{FlowError, ReportingError};
pub use flow::{AnswerDetailsFlow, SubmittedDetails};
pub use http_reporter::{HttpAnswerDetailsReporter, ReportingConfig};
pub use player::ExercisePlayer;
pub use reporting::{AnswerDetailsReporter, RecordingReporter};

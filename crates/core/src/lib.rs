#![forbid(unsafe_code)]

pub mod config;
pub mod eligibility;
pub mod error;
pub mod model;
pub mod policy;

pub use config::{ConfigError, EligibilityConfig, PolicyStrategy, ProbabilityTiers};
pub use eligibility::{AnswerInfoEligibility, RecordedSubmission, SessionState, Verdict};
pub use error::Error;
pub use policy::{AskOncePolicy, SolicitationPolicy, TieredProbabilityPolicy};

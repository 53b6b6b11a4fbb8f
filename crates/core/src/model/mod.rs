mod answer;
mod decision;
mod ids;
pub mod interaction;
mod outcome;
mod report;

pub use answer::AnswerValue;
pub use decision::{Decision, FixedRuleContext, RuleContext};
pub use ids::{ExplorationId, InteractionKindId, ParseIdError, StepId};
pub use outcome::OutcomeTier;
pub use report::AnswerDetailsReport;

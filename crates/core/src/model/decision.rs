use std::fmt;
use std::sync::Arc;

use crate::model::{AnswerValue, InteractionKindId, OutcomeTier, StepId};

/// Opaque handle to the rule-classification machinery of a step.
///
/// The eligibility core never inspects it; only the tiered solicitation
/// policy asks it to classify the learner's answer.
pub trait RuleContext: Send + Sync + fmt::Debug {
    /// Classify `answer` against the step's outcomes.
    fn classify(&self, answer: &AnswerValue) -> OutcomeTier;
}

/// Rule context with a fixed classification, for hosts without rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedRuleContext(pub OutcomeTier);

impl RuleContext for FixedRuleContext {
    fn classify(&self, _answer: &AnswerValue) -> OutcomeTier {
        self.0
    }
}

/// Result of one eligibility evaluation with the context needed to submit later.
#[derive(Debug, Clone)]
pub struct Decision {
    pub eligible: bool,
    pub step_id: StepId,
    pub interaction_kind: InteractionKindId,
    pub answer: AnswerValue,
    pub rule_context: Arc<dyn RuleContext>,
}

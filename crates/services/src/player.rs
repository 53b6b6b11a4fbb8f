use std::sync::Arc;

use answer_info_core::model::{ExplorationId, InteractionKindId, RuleContext, StepId};

/// Read-only view of the exercise player the answer-details flow needs.
pub trait ExercisePlayer {
    fn exploration_id(&self) -> ExplorationId;

    fn current_step_id(&self) -> StepId;

    fn current_interaction_kind(&self) -> InteractionKindId;

    /// Classification handle for the step currently on screen.
    fn current_rule_context(&self) -> Arc<dyn RuleContext>;
}

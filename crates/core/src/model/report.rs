use serde::{Deserialize, Serialize};

use crate::model::{AnswerValue, ExplorationId, InteractionKindId, StepId};

/// Answer details ready to be handed to a reporting client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerDetailsReport {
    pub exploration_id: ExplorationId,
    pub step_id: StepId,
    pub interaction_kind: InteractionKindId,
    pub answer: AnswerValue,
    pub answer_details: String,
}

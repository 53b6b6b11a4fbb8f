use std::sync::Arc;

use answer_info_core::model::{AnswerValue, RuleContext};
use answer_info_core::{AnswerInfoEligibility, EligibilityConfig, RecordedSubmission};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::error::FlowError;
use crate::player::ExercisePlayer;
use crate::reporting::AnswerDetailsReporter;

/// Outcome of a learner confirming their answer details.
#[derive(Debug)]
pub struct SubmittedDetails {
    /// Answer the player should now submit as usual.
    pub answer: AnswerValue,
    pub rule_context: Arc<dyn RuleContext>,
    /// Background delivery; awaiting it is optional.
    pub delivery: JoinHandle<()>,
}

/// Wires one player session to the eligibility core and a reporter.
pub struct AnswerDetailsFlow {
    eligibility: AnswerInfoEligibility,
    reporter: Arc<dyn AnswerDetailsReporter>,
    runtime: Handle,
}

impl AnswerDetailsFlow {
    /// Start the flow for a new player session.
    ///
    /// Deliveries are spawned on the current tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::NoRuntime` if called outside of a tokio runtime.
    pub fn start(
        player: &dyn ExercisePlayer,
        config: EligibilityConfig,
        reporter: Arc<dyn AnswerDetailsReporter>,
    ) -> Result<Self, FlowError> {
        let runtime = Handle::try_current()?;
        Ok(Self::with_eligibility(
            AnswerInfoEligibility::new(player.exploration_id(), config),
            reporter,
            runtime,
        ))
    }

    #[must_use]
    pub fn with_eligibility(
        eligibility: AnswerInfoEligibility,
        reporter: Arc<dyn AnswerDetailsReporter>,
        runtime: Handle,
    ) -> Self {
        Self {
            eligibility,
            reporter,
            runtime,
        }
    }

    /// Evaluate the step the player is on for the answer just given.
    pub fn evaluate_current(&mut self, player: &dyn ExercisePlayer, answer: AnswerValue) -> bool {
        self.eligibility.evaluate(
            player.current_step_id(),
            player.current_interaction_kind(),
            answer,
            player.current_rule_context(),
        )
    }

    /// Record the learner's answer details and send them in the background.
    ///
    /// Returns `None` when no prompt was pending. Delivery failures are logged
    /// and dropped.
    pub fn submit_details(&mut self, answer_details: impl Into<String>) -> Option<SubmittedDetails> {
        let RecordedSubmission {
            report,
            answer,
            rule_context,
        } = self.eligibility.record_submission(answer_details)?;

        let reporter = Arc::clone(&self.reporter);
        let delivery = self.runtime.spawn(async move {
            if let Err(err) = reporter.submit_answer_details(&report).await {
                warn!(
                    exploration = %report.exploration_id,
                    step = %report.step_id,
                    error = %err,
                    "dropping answer details"
                );
            }
        });

        Some(SubmittedDetails {
            answer,
            rule_context,
            delivery,
        })
    }

    /// Learner left the prompt without confirming.
    pub fn navigate_away(&mut self) {
        self.eligibility.discard_pending();
    }

    /// Learner restarted the exploration.
    pub fn restart(&mut self) {
        self.eligibility.reset_session_count();
    }

    #[must_use]
    pub fn can_ask(&self) -> bool {
        self.eligibility.can_ask()
    }

    #[must_use]
    pub fn eligibility(&self) -> &AnswerInfoEligibility {
        &self.eligibility
    }
}

//! Session-scoped decision whether to ask a learner for answer details.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::EligibilityConfig;
use crate::model::{
    AnswerDetailsReport, AnswerValue, Decision, ExplorationId, InteractionKindId, RuleContext,
    StepId,
};
use crate::policy::{self, SolicitationPolicy};

/// Why an evaluation did or did not end in a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Eligible,
    CapReached,
    ExcludedInteraction,
    AlreadyVisited,
    DeclinedByPolicy,
}

impl Verdict {
    #[must_use]
    pub fn is_eligible(self) -> bool {
        matches!(self, Verdict::Eligible)
    }
}

/// Mutable state owned by one exercise-player session.
#[derive(Debug, Default)]
pub struct SessionState {
    submitted_count: u32,
    visited_step_ids: HashSet<StepId>,
    pending_decision: Option<Decision>,
}

/// What a submission hands back: the report to deliver and the answer the
/// player should resume submitting.
#[derive(Debug, Clone)]
pub struct RecordedSubmission {
    pub report: AnswerDetailsReport,
    pub answer: AnswerValue,
    pub rule_context: Arc<dyn RuleContext>,
}

/// Decides, once per step, whether to prompt for answer details.
///
/// Created when a player session starts and dropped when it ends; nothing is
/// shared between sessions.
pub struct AnswerInfoEligibility {
    exploration_id: ExplorationId,
    config: EligibilityConfig,
    policy: Box<dyn SolicitationPolicy>,
    state: SessionState,
}

impl fmt::Debug for AnswerInfoEligibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnswerInfoEligibility")
            .field("exploration_id", &self.exploration_id)
            .field("config", &self.config)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl AnswerInfoEligibility {
    /// New session using the policy selected by `config`.
    #[must_use]
    pub fn new(exploration_id: ExplorationId, config: EligibilityConfig) -> Self {
        let policy = policy::from_config(&config);
        Self::with_policy(exploration_id, config, policy)
    }

    /// New session with an explicit solicitation policy.
    #[must_use]
    pub fn with_policy(
        exploration_id: ExplorationId,
        config: EligibilityConfig,
        policy: Box<dyn SolicitationPolicy>,
    ) -> Self {
        Self {
            exploration_id,
            config,
            policy,
            state: SessionState::default(),
        }
    }

    /// Evaluate the step just answered. Returns true if the learner should be
    /// prompted.
    pub fn evaluate(
        &mut self,
        step_id: StepId,
        interaction_kind: InteractionKindId,
        answer: AnswerValue,
        rule_context: Arc<dyn RuleContext>,
    ) -> bool {
        self.evaluate_verdict(step_id, interaction_kind, answer, rule_context)
            .is_eligible()
    }

    /// Same as [`Self::evaluate`] but reports which rule decided.
    pub fn evaluate_verdict(
        &mut self,
        step_id: StepId,
        interaction_kind: InteractionKindId,
        answer: AnswerValue,
        rule_context: Arc<dyn RuleContext>,
    ) -> Verdict {
        // A newer step supersedes whatever was pending.
        self.state.pending_decision = None;

        let verdict = if self.state.submitted_count >= self.config.submission_cap() {
            Verdict::CapReached
        } else if self.config.is_excluded(&interaction_kind) {
            Verdict::ExcludedInteraction
        } else if self.state.visited_step_ids.contains(&step_id) {
            Verdict::AlreadyVisited
        } else {
            self.state.visited_step_ids.insert(step_id.clone());
            if self.policy.admits(&answer, rule_context.as_ref()) {
                Verdict::Eligible
            } else {
                Verdict::DeclinedByPolicy
            }
        };

        debug!(
            step = %step_id,
            interaction = %interaction_kind,
            ?verdict,
            submitted = self.state.submitted_count,
            "evaluated answer details eligibility"
        );

        if verdict.is_eligible() {
            self.state.pending_decision = Some(Decision {
                eligible: true,
                step_id,
                interaction_kind,
                answer,
                rule_context,
            });
        }
        verdict
    }

    /// Record the learner's elaboration for the pending decision.
    ///
    /// Returns `None`, leaving state untouched, when nothing eligible is pending.
    pub fn record_submission(
        &mut self,
        elaboration_text: impl Into<String>,
    ) -> Option<RecordedSubmission> {
        let decision = self.state.pending_decision.take_if(|d| d.eligible)?;

        self.state.submitted_count = self.state.submitted_count.saturating_add(1);
        info!(
            step = %decision.step_id,
            submitted = self.state.submitted_count,
            "answer details submitted"
        );

        let report = AnswerDetailsReport {
            exploration_id: self.exploration_id.clone(),
            step_id: decision.step_id,
            interaction_kind: decision.interaction_kind,
            answer: decision.answer.clone(),
            answer_details: elaboration_text.into(),
        };
        Some(RecordedSubmission {
            report,
            answer: decision.answer,
            rule_context: decision.rule_context,
        })
    }

    /// Start counting submissions from zero again. Visited steps are kept.
    pub fn reset_session_count(&mut self) {
        self.state.submitted_count = 0;
    }

    /// Drop the pending decision without touching counters, e.g. when the
    /// learner leaves the prompt.
    pub fn discard_pending(&mut self) {
        self.state.pending_decision = None;
    }

    /// True while an eligible decision waits for the learner's elaboration.
    #[must_use]
    pub fn can_ask(&self) -> bool {
        self.state
            .pending_decision
            .as_ref()
            .is_some_and(|d| d.eligible)
    }

    #[must_use]
    pub fn pending_decision(&self) -> Option<&Decision> {
        self.state.pending_decision.as_ref()
    }

    #[must_use]
    pub fn submitted_count(&self) -> u32 {
        self.state.submitted_count
    }

    #[must_use]
    pub fn has_visited(&self, step_id: &StepId) -> bool {
        self.state.visited_step_ids.contains(step_id)
    }

    #[must_use]
    pub fn visited_count(&self) -> usize {
        self.state.visited_step_ids.len()
    }

    #[must_use]
    pub fn exploration_id(&self) -> &ExplorationId {
        &self.exploration_id
    }

    #[must_use]
    pub fn config(&self) -> &EligibilityConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProbabilityTiers;
    use crate::model::{FixedRuleContext, OutcomeTier};

    fn step(id: &str) -> StepId {
        StepId::new(id).unwrap()
    }

    fn kind(id: &str) -> InteractionKindId {
        InteractionKindId::new(id).unwrap()
    }

    fn ctx() -> Arc<dyn RuleContext> {
        Arc::new(FixedRuleContext(OutcomeTier::DefaultOutcome))
    }

    fn session() -> AnswerInfoEligibility {
        AnswerInfoEligibility::new(
            ExplorationId::new("exp").unwrap(),
            EligibilityConfig::new(10, [kind("EndExploration")]).unwrap(),
        )
    }

    /// Policy that refuses everything.
    struct Never;

    impl SolicitationPolicy for Never {
        fn admits(&mut self, _answer: &AnswerValue, _ctx: &dyn RuleContext) -> bool {
            false
        }
    }

    #[test]
    fn eligible_evaluation_stores_pending_decision() {
        let mut eligibility = session();
        let verdict =
            eligibility.evaluate_verdict(step("A"), kind("TextInput"), "hi".into(), ctx());

        assert_eq!(verdict, Verdict::Eligible);
        assert!(eligibility.can_ask());
        let pending = eligibility.pending_decision().unwrap();
        assert_eq!(pending.step_id, step("A"));
        assert_eq!(pending.answer, AnswerValue::text("hi"));
    }

    #[test]
    fn ineligible_evaluation_discards_older_pending_decision() {
        let mut eligibility = session();
        assert!(eligibility.evaluate(step("A"), kind("TextInput"), "hi".into(), ctx()));
        assert!(!eligibility.evaluate(step("B"), kind("EndExploration"), "x".into(), ctx()));

        assert!(eligibility.pending_decision().is_none());
        assert!(eligibility.record_submission("late").is_none());
        assert_eq!(eligibility.submitted_count(), 0);
    }

    #[test]
    fn record_submission_builds_report() {
        let mut eligibility = session();
        eligibility.evaluate(step("A"), kind("TextInput"), "42".into(), ctx());

        let recorded = eligibility.record_submission("I guessed").unwrap();
        assert_eq!(recorded.report.exploration_id.as_str(), "exp");
        assert_eq!(recorded.report.step_id, step("A"));
        assert_eq!(recorded.report.interaction_kind, kind("TextInput"));
        assert_eq!(recorded.report.answer_details, "I guessed");
        assert_eq!(recorded.answer, AnswerValue::text("42"));
        assert_eq!(eligibility.submitted_count(), 1);
        assert!(!eligibility.can_ask());
    }

    #[test]
    fn record_without_pending_is_noop() {
        let mut eligibility = session();
        assert!(eligibility.record_submission("").is_none());
        assert_eq!(eligibility.submitted_count(), 0);
    }

    #[test]
    fn policy_refusal_still_marks_step_visited() {
        let mut eligibility = AnswerInfoEligibility::with_policy(
            ExplorationId::new("exp").unwrap(),
            EligibilityConfig::default(),
            Box::new(Never),
        );
        let verdict =
            eligibility.evaluate_verdict(step("A"), kind("TextInput"), "x".into(), ctx());
        assert_eq!(verdict, Verdict::DeclinedByPolicy);
        assert!(eligibility.has_visited(&step("A")));
        assert!(!eligibility.can_ask());

        let again = eligibility.evaluate_verdict(step("A"), kind("TextInput"), "x".into(), ctx());
        assert_eq!(again, Verdict::AlreadyVisited);
    }

    #[test]
    fn unrecognized_kind_is_ineligible() {
        let mut eligibility = session();
        let verdict =
            eligibility.evaluate_verdict(step("A"), kind("HologramInput"), "x".into(), ctx());
        assert_eq!(verdict, Verdict::ExcludedInteraction);
        assert!(!eligibility.has_visited(&step("A")));
    }

    #[test]
    fn discard_pending_keeps_counters() {
        let mut eligibility = session();
        eligibility.evaluate(step("A"), kind("TextInput"), "x".into(), ctx());
        eligibility.discard_pending();

        assert!(!eligibility.can_ask());
        assert!(eligibility.has_visited(&step("A")));
        assert_eq!(eligibility.submitted_count(), 0);
    }

    #[test]
    fn tiered_config_with_certain_tier_behaves_like_ask_once() {
        let config = EligibilityConfig::default()
            .with_tiers(ProbabilityTiers {
                default_outcome: 1.0,
                labelled_correct: 1.0,
                other_outcome: 1.0,
            })
            .unwrap()
            .with_seed(3);
        let mut eligibility = AnswerInfoEligibility::new(ExplorationId::new("exp").unwrap(), config);

        assert!(eligibility.evaluate(step("A"), kind("NumericInput"), "3".into(), ctx()));
        assert!(!eligibility.evaluate(step("A"), kind("NumericInput"), "3".into(), ctx()));
    }
}

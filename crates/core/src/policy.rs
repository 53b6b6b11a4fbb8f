//! Solicitation policies consulted once a step passed the structural checks.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{EligibilityConfig, PolicyStrategy, ProbabilityTiers};
use crate::model::{AnswerValue, RuleContext};

/// Final say on whether to ask for answer details on an eligible step.
pub trait SolicitationPolicy: Send {
    /// Returns true when the learner should be prompted.
    fn admits(&mut self, answer: &AnswerValue, rule_context: &dyn RuleContext) -> bool;
}

/// Deterministic policy: every structurally eligible step is asked once.
#[derive(Debug, Clone, Copy, Default)]
pub struct AskOncePolicy;

impl SolicitationPolicy for AskOncePolicy {
    fn admits(&mut self, _answer: &AnswerValue, _rule_context: &dyn RuleContext) -> bool {
        true
    }
}

/// Asks with a probability that depends on the answer's outcome tier.
///
/// The draw is an integer in `0..=100` scaled to a percentage and compared
/// against the tier threshold with `<=`, so a threshold of `0.0` still admits
/// a draw of exactly zero.
#[derive(Debug, Clone)]
pub struct TieredProbabilityPolicy {
    tiers: ProbabilityTiers,
    rng: StdRng,
}

impl TieredProbabilityPolicy {
    /// Policy drawing from OS entropy.
    #[must_use]
    pub fn new(tiers: ProbabilityTiers) -> Self {
        Self {
            tiers,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Policy with a reproducible draw sequence.
    #[must_use]
    pub fn seeded(tiers: ProbabilityTiers, seed: u64) -> Self {
        Self {
            tiers,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn draw(&mut self) -> f64 {
        f64::from(self.rng.random_range(0_u8..=100)) / 100.0
    }
}

impl SolicitationPolicy for TieredProbabilityPolicy {
    fn admits(&mut self, answer: &AnswerValue, rule_context: &dyn RuleContext) -> bool {
        let tier = rule_context.classify(answer);
        let threshold = self.tiers.threshold(tier);
        let draw = self.draw();
        tracing::trace!(?tier, threshold, draw, "tiered solicitation draw");
        draw <= threshold
    }
}

/// Build the policy selected by `config`.
#[must_use]
pub fn from_config(config: &EligibilityConfig) -> Box<dyn SolicitationPolicy> {
    match config.strategy() {
        PolicyStrategy::AskOnce => Box::new(AskOncePolicy),
        PolicyStrategy::Tiered => match config.seed() {
            Some(seed) => Box::new(TieredProbabilityPolicy::seeded(config.tiers(), seed)),
            None => Box::new(TieredProbabilityPolicy::new(config.tiers())),
        },
    }
}

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::interaction::{INTERACTIONS_WITHOUT_ANSWER_DETAILS, KNOWN_INTERACTIONS, kind_set};
use crate::model::{InteractionKindId, OutcomeTier};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("submission cap must be > 0")]
    InvalidSubmissionCap,

    #[error("{tier:?} probability must be in [0, 1], got {provided}")]
    InvalidProbability { tier: OutcomeTier, provided: f64 },
}

//
// ─── PROBABILITY TIERS ─────────────────────────────────────────────────────────
//

/// Chance of asking for answer details, per outcome tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbabilityTiers {
    pub default_outcome: f64,
    pub labelled_correct: f64,
    pub other_outcome: f64,
}

impl Default for ProbabilityTiers {
    fn default() -> Self {
        Self {
            default_outcome: 0.25,
            labelled_correct: 0.10,
            other_outcome: 0.05,
        }
    }
}

impl ProbabilityTiers {
    #[must_use]
    pub fn threshold(&self, tier: OutcomeTier) -> f64 {
        match tier {
            OutcomeTier::DefaultOutcome => self.default_outcome,
            OutcomeTier::LabelledCorrect => self.labelled_correct,
            OutcomeTier::OtherOutcome => self.other_outcome,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for tier in [
            OutcomeTier::DefaultOutcome,
            OutcomeTier::LabelledCorrect,
            OutcomeTier::OtherOutcome,
        ] {
            let provided = self.threshold(tier);
            if !(0.0..=1.0).contains(&provided) {
                return Err(ConfigError::InvalidProbability { tier, provided });
            }
        }
        Ok(())
    }
}

//
// ─── STRATEGY ──────────────────────────────────────────────────────────────────
//

/// Which solicitation policy runs once a step is structurally eligible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyStrategy {
    /// Ask on every structurally eligible step.
    #[default]
    AskOnce,
    /// Ask with a probability that depends on the answer's outcome tier.
    Tiered,
}

//
// ─── CONFIG ────────────────────────────────────────────────────────────────────
//

/// Settings for one `AnswerInfoEligibility` session.
///
/// Deserialization runs [`EligibilityConfig::validate`]; missing fields take
/// their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawEligibilityConfig")]
pub struct EligibilityConfig {
    submission_cap: u32,
    excluded_kinds: BTreeSet<InteractionKindId>,
    recognized_kinds: BTreeSet<InteractionKindId>,
    tiers: ProbabilityTiers,
    strategy: PolicyStrategy,
    seed: Option<u64>,
}

impl Default for EligibilityConfig {
    /// Ten submissions per session, the platform exclusion list, ask-once policy.
    fn default() -> Self {
        Self {
            submission_cap: 10,
            excluded_kinds: kind_set(INTERACTIONS_WITHOUT_ANSWER_DETAILS.iter().copied()),
            recognized_kinds: kind_set(KNOWN_INTERACTIONS.iter().copied()),
            tiers: ProbabilityTiers::default(),
            strategy: PolicyStrategy::AskOnce,
            seed: None,
        }
    }
}

/// Unchecked wire shape of `EligibilityConfig`.
#[derive(Deserialize)]
#[serde(default)]
struct RawEligibilityConfig {
    submission_cap: u32,
    excluded_kinds: BTreeSet<InteractionKindId>,
    recognized_kinds: BTreeSet<InteractionKindId>,
    tiers: ProbabilityTiers,
    strategy: PolicyStrategy,
    seed: Option<u64>,
}

impl Default for RawEligibilityConfig {
    fn default() -> Self {
        let EligibilityConfig {
            submission_cap,
            excluded_kinds,
            recognized_kinds,
            tiers,
            strategy,
            seed,
        } = EligibilityConfig::default();
        Self {
            submission_cap,
            excluded_kinds,
            recognized_kinds,
            tiers,
            strategy,
            seed,
        }
    }
}

impl TryFrom<RawEligibilityConfig> for EligibilityConfig {
    type Error = ConfigError;

    fn try_from(raw: RawEligibilityConfig) -> Result<Self, Self::Error> {
        let config = Self {
            submission_cap: raw.submission_cap,
            excluded_kinds: raw.excluded_kinds,
            recognized_kinds: raw.recognized_kinds,
            tiers: raw.tiers,
            strategy: raw.strategy,
            seed: raw.seed,
        };
        config.validate()?;
        Ok(config)
    }
}

impl EligibilityConfig {
    /// Creates a config with the given cap and exclusion set; everything else default.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidSubmissionCap` if `submission_cap` is zero.
    pub fn new(
        submission_cap: u32,
        excluded_kinds: impl IntoIterator<Item = InteractionKindId>,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            submission_cap,
            excluded_kinds: excluded_kinds.into_iter().collect(),
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Switch to the tiered probability policy.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidProbability` if any threshold is outside `[0, 1]`.
    pub fn with_tiers(mut self, tiers: ProbabilityTiers) -> Result<Self, ConfigError> {
        tiers.validate()?;
        self.tiers = tiers;
        self.strategy = PolicyStrategy::Tiered;
        Ok(self)
    }

    /// Fix the RNG seed used by the tiered policy.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replace the set of interaction kinds the player knows about.
    #[must_use]
    pub fn with_recognized_kinds(
        mut self,
        kinds: impl IntoIterator<Item = InteractionKindId>,
    ) -> Self {
        self.recognized_kinds = kinds.into_iter().collect();
        self
    }

    /// Check invariants.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for a zero cap or out-of-range thresholds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.submission_cap == 0 {
            return Err(ConfigError::InvalidSubmissionCap);
        }
        self.tiers.validate()
    }

    #[must_use]
    pub fn submission_cap(&self) -> u32 {
        self.submission_cap
    }

    #[must_use]
    pub fn tiers(&self) -> ProbabilityTiers {
        self.tiers
    }

    #[must_use]
    pub fn strategy(&self) -> PolicyStrategy {
        self.strategy
    }

    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// True when answer details make no sense for `kind`, including kinds the
    /// player does not know.
    #[must_use]
    pub fn is_excluded(&self, kind: &InteractionKindId) -> bool {
        self.excluded_kinds.contains(kind) || !self.recognized_kinds.contains(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(id: &str) -> InteractionKindId {
        InteractionKindId::new(id).unwrap()
    }

    #[test]
    fn default_config_excludes_continue_but_not_text_input() {
        let config = EligibilityConfig::default();
        assert_eq!(config.submission_cap(), 10);
        assert!(config.is_excluded(&kind("Continue")));
        assert!(config.is_excluded(&kind("EndExploration")));
        assert!(!config.is_excluded(&kind("TextInput")));
        assert_eq!(config.strategy(), PolicyStrategy::AskOnce);
    }

    #[test]
    fn unknown_kind_is_excluded() {
        let config = EligibilityConfig::default();
        assert!(config.is_excluded(&kind("HologramInput")));
    }

    #[test]
    fn zero_cap_is_rejected() {
        let err = EligibilityConfig::new(0, Vec::new()).unwrap_err();
        assert_eq!(err, ConfigError::InvalidSubmissionCap);
    }

    #[test]
    fn out_of_range_tier_is_rejected() {
        let tiers = ProbabilityTiers {
            labelled_correct: 1.5,
            ..ProbabilityTiers::default()
        };
        let err = EligibilityConfig::default().with_tiers(tiers).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidProbability {
                tier: OutcomeTier::LabelledCorrect,
                ..
            }
        ));
    }

    #[test]
    fn config_loads_from_partial_json() {
        let config: EligibilityConfig = serde_json::from_str(
            r#"{"submission_cap": 2, "excluded_kinds": ["Continue"], "strategy": "tiered", "seed": 7}"#,
        )
        .unwrap();
        config.validate().unwrap();
        assert_eq!(config.submission_cap(), 2);
        assert_eq!(config.strategy(), PolicyStrategy::Tiered);
        assert_eq!(config.seed(), Some(7));
        assert!(!config.is_excluded(&kind("EndExploration")));
        assert_eq!(config.tiers(), ProbabilityTiers::default());
    }

    #[test]
    fn json_with_zero_cap_is_rejected() {
        let err = serde_json::from_str::<EligibilityConfig>(r#"{"submission_cap": 0}"#)
            .unwrap_err();
        assert!(err.to_string().contains("submission cap must be > 0"));
    }

    #[test]
    fn json_with_out_of_range_tier_is_rejected() {
        let err = serde_json::from_str::<EligibilityConfig>(
            r#"{"submission_cap": 3, "tiers": {"default_outcome": 7.5}}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("DefaultOutcome probability must be in [0, 1]"));
    }

    #[test]
    fn serialized_config_loads_back() {
        let config = EligibilityConfig::new(4, [kind("Continue")]).unwrap().with_seed(9);
        let json = serde_json::to_string(&config).unwrap();
        let loaded: EligibilityConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, config);
    }
}

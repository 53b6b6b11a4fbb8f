use serde::{Deserialize, Serialize};

/// Which kind of outcome a learner's answer was classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeTier {
    /// No rule matched; the answer fell through to the step's catch-all outcome.
    DefaultOutcome,
    /// A rule matched an outcome that is labelled as correct.
    LabelledCorrect,
    /// A rule matched some other, non-correct outcome.
    OtherOutcome,
}

impl OutcomeTier {
    /// Derive the tier from a classification result.
    #[must_use]
    pub fn classify(matched_default: bool, labelled_as_correct: bool) -> Self {
        if matched_default {
            Self::DefaultOutcome
        } else if labelled_as_correct {
            Self::LabelledCorrect
        } else {
            Self::OtherOutcome
        }
    }
}

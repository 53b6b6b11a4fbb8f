use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw answer a learner submitted to a step.
///
/// The shape depends on the interaction kind (a string for `TextInput`, a
/// number for `NumericInput`, a list for `ItemSelectionInput`, ...), so the
/// value is kept as JSON and passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerValue(Value);

impl AnswerValue {
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self(Value::String(text.into()))
    }

    #[must_use]
    pub fn as_json(&self) -> &Value {
        &self.0
    }

    #[must_use]
    pub fn into_json(self) -> Value {
        self.0
    }
}

impl From<Value> for AnswerValue {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

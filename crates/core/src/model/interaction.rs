//! Interaction catalogue used to decide which widgets can carry answer details.

use crate::model::ids::InteractionKindId;

/// Every interaction id the exercise player can render.
pub const KNOWN_INTERACTIONS: &[&str] = &[
    "AlgebraicExpressionInput",
    "CodeRepl",
    "Continue",
    "DragAndDropSortInput",
    "EndExploration",
    "FractionInput",
    "GraphInput",
    "ImageClickInput",
    "InteractiveMap",
    "ItemSelectionInput",
    "LogicProof",
    "MathExpressionInput",
    "MultipleChoiceInput",
    "MusicNotesInput",
    "NumberWithUnits",
    "NumericInput",
    "PencilCodeEditor",
    "SetInput",
    "TextInput",
];

/// Interactions where a free-text explanation adds nothing.
pub const INTERACTIONS_WITHOUT_ANSWER_DETAILS: &[&str] = &[
    "Continue",
    "EndExploration",
    "ImageClickInput",
    "ItemSelectionInput",
    "MultipleChoiceInput",
];

pub(crate) fn kind_set<I>(ids: I) -> std::collections::BTreeSet<InteractionKindId>
where
    I: IntoIterator<Item = &'static str>,
{
    ids.into_iter()
        .filter_map(|id| InteractionKindId::new(id).ok())
        .collect()
}

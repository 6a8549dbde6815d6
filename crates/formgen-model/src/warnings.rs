use serde::{Deserialize, Serialize};

/// Category of a recoverable anomaly recorded during compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// Two rows classified to the same identifier; the later one was suffixed.
    DuplicateIdentifier,
    /// A referenced option set does not exist in the index.
    MissingOptionSet,
    /// Skip-logic text referenced a label no question has been allocated for.
    UnresolvedSkipLogicOperand,
    /// Skip-logic text used a comparison other than `!==`.
    UnsupportedSkipLogicOperator,
    /// Skip-logic text matched none of the recognized shapes.
    UnparseableSkipLogic,
    /// The row carried no rendering kind and was skipped.
    MissingRendering,
    /// A lower/upper limit cell did not parse as a number.
    InvalidNumericLimit,
    /// The validation cell did not parse as JSON.
    InvalidValidators,
}

/// A non-fatal anomaly detected while compiling one form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormWarning {
    pub kind: WarningKind,
    pub message: String,
    /// Identifier of the affected question, when one was allocated.
    pub question_id: Option<String>,
}

impl FormWarning {
    pub fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        FormWarning {
            kind,
            message: message.into(),
            question_id: None,
        }
    }

    pub fn for_question(kind: WarningKind, message: impl Into<String>, question_id: &str) -> Self {
        FormWarning {
            kind,
            message: message.into(),
            question_id: Some(question_id.to_string()),
        }
    }
}

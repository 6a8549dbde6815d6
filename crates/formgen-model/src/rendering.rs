//! Rendering kinds for form questions.
//!
//! The rendering column names the UI widget a question uses. It determines
//! the canonical `questionOptions.rendering` string, whether the question
//! takes answers, which numeric constraints apply, and which operator shape
//! compiled skip logic uses.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// UI widget category for a question.
///
/// Parsed case-insensitively from the raw rendering cell. Any value that is
/// not a known widget becomes [`RenderingKind::Workspace`], which renders as
/// a workspace-launcher button instead of an inline widget.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RenderingKind {
    Radio,
    MultiCheckbox,
    InlineMultiCheckbox,
    /// Yes/no pair, rendered as a radio group.
    Boolean,
    Numeric,
    /// Whole-number input.
    Number,
    /// Fractional-number input, rendered as a number widget.
    DecimalNumber,
    Text,
    TextArea,
    Date,
    Time,
    Select,
    Checkbox,
    Toggle,
    Markdown,
    /// Named workspace launched from a button.
    Workspace(String),
}

impl RenderingKind {
    /// Returns the canonical rendering string emitted into `questionOptions`.
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderingKind::Radio | RenderingKind::Boolean => "radio",
            RenderingKind::MultiCheckbox | RenderingKind::InlineMultiCheckbox => "multiCheckbox",
            RenderingKind::Numeric => "numeric",
            RenderingKind::Number | RenderingKind::DecimalNumber => "number",
            RenderingKind::Text => "text",
            RenderingKind::TextArea => "textarea",
            RenderingKind::Date => "date",
            RenderingKind::Time => "time",
            RenderingKind::Select => "select",
            RenderingKind::Checkbox => "checkbox",
            RenderingKind::Toggle => "toggle",
            RenderingKind::Markdown => "markdown",
            RenderingKind::Workspace(_) => "workspace-launcher",
        }
    }

    /// Returns true for renderings whose value is a set of selections.
    /// Skip logic against these uses membership clauses instead of equality.
    pub fn is_multi_valued(&self) -> bool {
        matches!(
            self,
            RenderingKind::MultiCheckbox | RenderingKind::InlineMultiCheckbox
        )
    }

    /// Returns true for renderings that accept min/max bounds.
    pub fn supports_numeric_bounds(&self) -> bool {
        matches!(
            self,
            RenderingKind::Numeric | RenderingKind::Number | RenderingKind::DecimalNumber
        )
    }

    /// Returns true for renderings that may carry an answer list.
    pub fn allows_answers(&self) -> bool {
        !matches!(self, RenderingKind::Markdown | RenderingKind::Workspace(_))
    }

    /// Step attached to whole-number inputs.
    pub fn step(&self) -> Option<u32> {
        match self {
            RenderingKind::Number => Some(1),
            _ => None,
        }
    }

    /// Whether fractional input is rejected, for renderings where this is
    /// meaningful.
    pub fn disallow_decimals(&self) -> Option<bool> {
        match self {
            RenderingKind::Number => Some(true),
            RenderingKind::DecimalNumber => Some(false),
            _ => None,
        }
    }

    /// The workspace name, for workspace-launcher questions.
    pub fn workspace_name(&self) -> Option<&str> {
        match self {
            RenderingKind::Workspace(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for RenderingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RenderingKind {
    type Err = String;

    /// Parse a raw rendering cell. Unknown non-empty values become
    /// [`RenderingKind::Workspace`]; only an empty value is an error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();

        match normalized.as_str() {
            "" => Err("rendering is empty".to_string()),
            "radio" => Ok(RenderingKind::Radio),
            "multicheckbox" => Ok(RenderingKind::MultiCheckbox),
            "inlinemulticheckbox" => Ok(RenderingKind::InlineMultiCheckbox),
            "boolean" => Ok(RenderingKind::Boolean),
            "numeric" => Ok(RenderingKind::Numeric),
            "number" => Ok(RenderingKind::Number),
            "decimalnumber" => Ok(RenderingKind::DecimalNumber),
            "text" => Ok(RenderingKind::Text),
            "textarea" => Ok(RenderingKind::TextArea),
            "date" => Ok(RenderingKind::Date),
            "time" => Ok(RenderingKind::Time),
            "select" => Ok(RenderingKind::Select),
            "checkbox" => Ok(RenderingKind::Checkbox),
            "toggle" => Ok(RenderingKind::Toggle),
            "markdown" => Ok(RenderingKind::Markdown),
            _ => Ok(RenderingKind::Workspace(normalized)),
        }
    }
}

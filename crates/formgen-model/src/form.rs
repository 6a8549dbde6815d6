//! The assembled form schema.
//!
//! These types serialize directly into the JSON document the form engine
//! consumes; field order and naming follow that contract. Fields marked
//! `serde(skip)` are compile-time metadata and never appear in the output.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A complete form: envelope metadata plus the page tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    pub name: String,
    pub description: String,
    pub version: String,
    pub published: bool,
    pub uuid: String,
    pub processor: String,
    pub encounter: String,
    pub retired: bool,
    pub referenced_forms: Vec<String>,
    pub pages: Vec<Page>,
}

impl Form {
    /// Questions across all pages and sections, in assembly order.
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.pages
            .iter()
            .flat_map(|page| page.sections.iter())
            .flat_map(|section| section.questions.iter())
    }

    pub fn section_count(&self) -> usize {
        self.pages.iter().map(|page| page.sections.len()).sum()
    }

    pub fn question_count(&self) -> usize {
        self.questions().count()
    }

    pub fn answer_count(&self) -> usize {
        self.questions()
            .map(|question| {
                question
                    .question_options
                    .answers
                    .as_ref()
                    .map_or(0, Vec::len)
            })
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub label: String,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub label: String,
    pub is_expanded: bool,
    pub questions: Vec<Question>,
}

/// One compiled question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub label: String,
    /// `obs` for observation questions, `markdown` for display-only blocks,
    /// absent for workspace launchers.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub question_type: Option<String>,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_multi_checkbox: Option<bool>,
    /// Markdown body lines, for markdown questions only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Vec<String>>,
    pub question_options: QuestionOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validators: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// Tooltip shown next to the question.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide: Option<HideExpression>,
    /// The label this question's identifier was allocated from, kept
    /// unchanged even when the identifier itself was suffixed.
    #[serde(skip)]
    pub original_label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOptions {
    pub rendering: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concept: Option<String>,
    /// Ordered answers resolved from the option set; omitted when empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answers: Option<Vec<AnswerOption>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disallow_decimals: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calculate: Option<Calculation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Calculation {
    pub calculate_expression: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HideExpression {
    pub hide_when_expression: String,
}

/// One selectable answer attached to a question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub label: String,
    pub concept: String,
    /// Language code to translated answer label, carried for the
    /// translation extractor.
    #[serde(skip)]
    pub translations: BTreeMap<String, String>,
}

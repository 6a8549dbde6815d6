//! Input records handed to the compiler by the spreadsheet-reading layer.
//!
//! Column-name mapping is the reader's responsibility; by the time rows reach
//! this crate every field is already typed and named. Blank cells arrive as
//! `None`. Rows are never mutated after construction.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One metadata row describing a single question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormRow {
    /// Question text; also the identifier source when no explicit ID is set.
    pub question: String,
    /// Display label used instead of the question text, when present.
    pub label: Option<String>,
    /// Explicit identifier source overriding the question text.
    pub question_id: Option<String>,
    /// External concept identifier for the question.
    pub external_id: Option<String>,
    pub datatype: Option<String>,
    /// Raw rendering cell; parsed into a `RenderingKind` during assembly.
    pub rendering: Option<String>,
    /// Name of the option set answering this question.
    pub option_set: Option<String>,
    pub page: String,
    pub section: String,
    /// Raw conditional-visibility text.
    pub skip_logic: Option<String>,
    pub tooltip: Option<String>,
    pub mandatory: bool,
    pub default_value: Option<String>,
    /// Calculation expression evaluated by the form engine.
    pub calculation: Option<String>,
    /// Validator definitions as a raw JSON string.
    pub validation: Option<String>,
    pub lower_limit: Option<String>,
    pub upper_limit: Option<String>,
    /// Language code to translated question label.
    pub question_translations: BTreeMap<String, String>,
    /// Language code to translated section label.
    pub section_translations: BTreeMap<String, String>,
    /// Language code to translated tooltip.
    pub tooltip_translations: BTreeMap<String, String>,
}

impl FormRow {
    pub fn new(question: &str, page: &str, section: &str) -> Self {
        FormRow {
            question: question.to_string(),
            page: page.to_string(),
            section: section.to_string(),
            ..FormRow::default()
        }
    }

    /// Rows without question text carry nothing the compiler can use.
    pub fn is_blank(&self) -> bool {
        self.question.trim().is_empty()
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn with_question_id(mut self, question_id: &str) -> Self {
        self.question_id = Some(question_id.to_string());
        self
    }

    pub fn with_external_id(mut self, external_id: &str) -> Self {
        self.external_id = Some(external_id.to_string());
        self
    }

    pub fn with_datatype(mut self, datatype: &str) -> Self {
        self.datatype = Some(datatype.to_string());
        self
    }

    pub fn with_rendering(mut self, rendering: &str) -> Self {
        self.rendering = Some(rendering.to_string());
        self
    }

    pub fn with_option_set(mut self, option_set: &str) -> Self {
        self.option_set = Some(option_set.to_string());
        self
    }

    pub fn with_skip_logic(mut self, skip_logic: &str) -> Self {
        self.skip_logic = Some(skip_logic.to_string());
        self
    }

    pub fn with_tooltip(mut self, tooltip: &str) -> Self {
        self.tooltip = Some(tooltip.to_string());
        self
    }

    pub fn with_mandatory(mut self, mandatory: bool) -> Self {
        self.mandatory = mandatory;
        self
    }

    pub fn with_default_value(mut self, default_value: &str) -> Self {
        self.default_value = Some(default_value.to_string());
        self
    }

    pub fn with_calculation(mut self, calculation: &str) -> Self {
        self.calculation = Some(calculation.to_string());
        self
    }

    pub fn with_validation(mut self, validation: &str) -> Self {
        self.validation = Some(validation.to_string());
        self
    }

    pub fn with_limits(mut self, lower: &str, upper: &str) -> Self {
        self.lower_limit = Some(lower.to_string());
        self.upper_limit = Some(upper.to_string());
        self
    }

    pub fn with_question_translation(mut self, language: &str, text: &str) -> Self {
        self.question_translations
            .insert(language.to_string(), text.to_string());
        self
    }

    pub fn with_section_translation(mut self, language: &str, text: &str) -> Self {
        self.section_translations
            .insert(language.to_string(), text.to_string());
        self
    }

    pub fn with_tooltip_translation(mut self, language: &str, text: &str) -> Self {
        self.tooltip_translations
            .insert(language.to_string(), text.to_string());
        self
    }
}

/// One row of the option-set sheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionSetRow {
    /// Name of the option set this entry belongs to.
    pub set_name: String,
    /// Raw order key; numeric, free text, or blank.
    pub order: Option<String>,
    /// Answer label shown to the user.
    pub label: String,
    /// External concept identifier for the answer.
    pub external_id: Option<String>,
    /// Language code to translated answer label.
    pub translations: BTreeMap<String, String>,
}

impl OptionSetRow {
    pub fn new(set_name: &str, label: &str) -> Self {
        OptionSetRow {
            set_name: set_name.to_string(),
            label: label.to_string(),
            ..OptionSetRow::default()
        }
    }

    pub fn with_order(mut self, order: &str) -> Self {
        self.order = Some(order.to_string());
        self
    }

    pub fn with_external_id(mut self, external_id: &str) -> Self {
        self.external_id = Some(external_id.to_string());
        self
    }

    pub fn with_translation(mut self, language: &str, text: &str) -> Self {
        self.translations
            .insert(language.to_string(), text.to_string());
        self
    }
}

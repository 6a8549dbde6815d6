//! Single-pass form assembly.
//!
//! Rows are consumed strictly in sheet order. Page and section containers
//! open whenever the page or section cell differs from the immediately
//! preceding row (run-length grouping); a label seen again later opens a new
//! container rather than reusing the earlier one. Identifier allocation,
//! skip-logic resolution, and option-set lookup all happen inside the same
//! pass, so skip logic can only reference questions that appear earlier in
//! the sheet. There is no fix-up pass for forward references.
//!
//! Row-level failures degrade to warnings; no row's failure blocks another
//! row from assembling.

use tracing::{debug, warn};

use formgen_model::{
    AnswerOption, Calculation, Form, FormRow, FormWarning, HideExpression, OptionSetRow, Page,
    Question, QuestionOptions, RenderingKind, Section, WarningKind,
};

use crate::ids::{IdAllocator, classify};
use crate::options::{OptionSet, OptionSetIndex};
use crate::pipeline::{CompileOptions, FormStats};
use crate::skip_logic::{self, SkipLogicOutcome};

/// Output of one assembly pass.
#[derive(Debug)]
pub struct Assembly {
    pub form: Form,
    /// Anomalies recorded during the pass, in row order.
    pub warnings: Vec<FormWarning>,
    pub stats: FormStats,
}

/// Builds the page/section/question tree for one form.
///
/// Holds only shared references; the per-form identifier registry lives
/// inside [`SchemaAssembler::assemble`], so one assembler may serve many
/// forms and many threads.
#[derive(Debug, Clone, Copy)]
pub struct SchemaAssembler<'a> {
    option_sets: &'a OptionSetIndex,
    options: &'a CompileOptions,
}

impl<'a> SchemaAssembler<'a> {
    pub fn new(option_sets: &'a OptionSetIndex, options: &'a CompileOptions) -> Self {
        SchemaAssembler {
            option_sets,
            options,
        }
    }

    /// Assembles `rows` into a form named `name`.
    ///
    /// Blank rows are skipped silently; rows without a rendering are skipped
    /// with a warning. The returned tree may contain empty sections when
    /// every row of a section was skipped.
    pub fn assemble(&self, name: &str, rows: &[FormRow]) -> Assembly {
        let mut form = self.options.form_envelope(name);
        let mut warnings = Vec::new();
        let mut allocator = IdAllocator::new();
        let mut current_page: Option<Page> = None;
        let mut current_section: Option<Section> = None;

        for row in rows {
            if row.is_blank() {
                continue;
            }
            let page_changed = current_page
                .as_ref()
                .is_none_or(|page| page.label != row.page);
            if page_changed {
                close_page(&mut form, &mut current_page, &mut current_section);
                current_page = Some(Page {
                    label: row.page.clone(),
                    sections: Vec::new(),
                });
            }
            let section_changed = page_changed
                || current_section
                    .as_ref()
                    .is_none_or(|section| section.label != row.section);
            if section_changed {
                close_section(&mut current_page, &mut current_section);
                current_section = Some(Section {
                    label: row.section.clone(),
                    is_expanded: false,
                    questions: Vec::new(),
                });
            }
            if let Some(question) = self.build_question(row, &mut allocator, &mut warnings) {
                if let Some(section) = current_section.as_mut() {
                    section.questions.push(question);
                }
            }
        }
        close_page(&mut form, &mut current_page, &mut current_section);

        let stats = FormStats {
            pages: form.pages.len(),
            sections: form.section_count(),
            questions: form.question_count(),
            answers: form.answer_count(),
        };
        debug!(
            form = %name,
            pages = stats.pages,
            sections = stats.sections,
            questions = stats.questions,
            answers = stats.answers,
            warnings = warnings.len(),
            "assembled form"
        );
        Assembly {
            form,
            warnings,
            stats,
        }
    }

    fn build_question(
        &self,
        row: &FormRow,
        allocator: &mut IdAllocator,
        warnings: &mut Vec<FormWarning>,
    ) -> Option<Question> {
        let Some(kind) =
            non_blank(&row.rendering).and_then(|cell| cell.parse::<RenderingKind>().ok())
        else {
            warn!(question = %row.question, "row has no rendering, skipping");
            warnings.push(FormWarning::new(
                WarningKind::MissingRendering,
                format!("question '{}' has no rendering and was skipped", row.question.trim()),
            ));
            return None;
        };

        let id_source = non_blank(&row.question_id).unwrap_or(row.question.trim());
        let allocation = allocator.allocate(id_source, kind.clone());
        if allocation.was_suffixed {
            warn!(id = %allocation.id, source = %id_source, "identifier collision, suffixed");
            warnings.push(FormWarning::for_question(
                WarningKind::DuplicateIdentifier,
                format!("identifier for '{id_source}' was taken, renamed to '{}'", allocation.id),
                &allocation.id,
            ));
        }
        let label = non_blank(&row.label).unwrap_or(row.question.trim()).to_string();

        let hide = non_blank(&row.skip_logic)
            .and_then(|raw| self.compile_skip_logic(raw, &allocation.id, allocator, warnings));

        let (min, max) = if kind.supports_numeric_bounds() {
            (
                parse_limit(&row.lower_limit, "lower", &allocation.id, warnings),
                parse_limit(&row.upper_limit, "upper", &allocation.id, warnings),
            )
        } else {
            (None, None)
        };

        let answers = match non_blank(&row.option_set) {
            Some(set_name) if kind.allows_answers() => match self.option_sets.lookup(set_name) {
                Some(set) => build_answers(set, &allocation.id),
                None => {
                    warn!(question = %allocation.id, set = %set_name, "option set not found");
                    warnings.push(FormWarning::for_question(
                        WarningKind::MissingOptionSet,
                        format!("option set '{set_name}' not found"),
                        &allocation.id,
                    ));
                    None
                }
            },
            _ => None,
        };

        let validators = non_blank(&row.validation).and_then(|text| {
            match serde_json::from_str::<serde_json::Value>(text) {
                Ok(value) => Some(value),
                Err(err) => {
                    warn!(question = %allocation.id, error = %err, "validators are not valid JSON");
                    warnings.push(FormWarning::for_question(
                        WarningKind::InvalidValidators,
                        format!("validators are not valid JSON: {err}"),
                        &allocation.id,
                    ));
                    None
                }
            }
        });

        let concept = match kind {
            RenderingKind::Markdown | RenderingKind::Workspace(_) => None,
            _ => Some(
                non_blank(&row.external_id)
                    .unwrap_or(&allocation.id)
                    .to_string(),
            ),
        };
        let (question_type, value) = match kind {
            RenderingKind::Markdown => (
                Some("markdown".to_string()),
                Some(vec![format!("## {label}")]),
            ),
            RenderingKind::Workspace(_) => (None, None),
            _ => (Some("obs".to_string()), None),
        };

        Some(Question {
            id: allocation.id,
            label,
            question_type,
            required: row.mandatory,
            inline_multi_checkbox: (kind == RenderingKind::InlineMultiCheckbox).then_some(true),
            value,
            question_options: QuestionOptions {
                rendering: kind.as_str().to_string(),
                concept,
                answers,
                min,
                max,
                step: kind.step(),
                disallow_decimals: kind.disallow_decimals(),
                calculate: non_blank(&row.calculation).map(|expression| Calculation {
                    calculate_expression: expression.to_string(),
                }),
                button_label: kind
                    .workspace_name()
                    .map(|workspace| workspace_button_label(workspace).to_string()),
                workspace_name: kind.workspace_name().map(str::to_string),
            },
            validators,
            default: non_blank(&row.default_value).map(str::to_string),
            question_info: non_blank(&row.tooltip).map(str::to_string),
            hide,
            original_label: allocation.original_label,
        })
    }

    fn compile_skip_logic(
        &self,
        raw: &str,
        question_id: &str,
        allocator: &IdAllocator,
        warnings: &mut Vec<FormWarning>,
    ) -> Option<HideExpression> {
        match skip_logic::compile(raw, allocator) {
            SkipLogicOutcome::Compiled(condition) => Some(HideExpression {
                hide_when_expression: condition.to_expression(),
            }),
            SkipLogicOutcome::UnsupportedOperator(operator) => {
                warn!(question = %question_id, operator = %operator, "unsupported skip-logic operator");
                warnings.push(FormWarning::for_question(
                    WarningKind::UnsupportedSkipLogicOperator,
                    format!("operator '{operator}' is not supported, only '!==' compiles"),
                    question_id,
                ));
                None
            }
            SkipLogicOutcome::UnresolvedOperand(operand) => {
                warn!(question = %question_id, operand = %operand, "unresolved skip-logic operand");
                warnings.push(FormWarning::for_question(
                    WarningKind::UnresolvedSkipLogicOperand,
                    format!("skip logic references '{operand}' which matches no question"),
                    question_id,
                ));
                None
            }
            SkipLogicOutcome::Unparseable => {
                warn!(question = %question_id, text = %raw, "unparseable skip logic");
                warnings.push(FormWarning::for_question(
                    WarningKind::UnparseableSkipLogic,
                    format!("skip logic text could not be parsed: {raw}"),
                    question_id,
                ));
                None
            }
        }
    }
}

fn close_section(page: &mut Option<Page>, section: &mut Option<Section>) {
    if let Some(section) = section.take() {
        if let Some(page) = page.as_mut() {
            page.sections.push(section);
        }
    }
}

fn close_page(form: &mut Form, page: &mut Option<Page>, section: &mut Option<Section>) {
    close_section(page, section);
    if let Some(page) = page.take() {
        form.pages.push(page);
    }
}

fn build_answers(set: &OptionSet, question_id: &str) -> Option<Vec<AnswerOption>> {
    if set.members.is_empty() {
        return None;
    }
    let answers = set
        .members
        .iter()
        .enumerate()
        .map(|(index, member)| AnswerOption {
            label: member.label.clone(),
            concept: answer_concept(member, question_id, index),
            translations: member.translations.clone(),
        })
        .collect();
    Some(answers)
}

/// Concept for one answer: the external ID when usable, otherwise classified
/// from the label. `Other` answers and unclassifiable labels get tokens
/// derived from the owning question so they stay unique within the form.
fn answer_concept(member: &OptionSetRow, question_id: &str, index: usize) -> String {
    if let Some(external) = non_blank(&member.external_id) {
        if external != "#N/A" {
            return external.to_string();
        }
    }
    let classified = classify(&member.label);
    if classified == "other" {
        return format!("{question_id}Other");
    }
    if classified.is_empty() {
        return format!("{question_id}Option{}", index + 1);
    }
    classified
}

fn parse_limit(
    cell: &Option<String>,
    side: &str,
    question_id: &str,
    warnings: &mut Vec<FormWarning>,
) -> Option<f64> {
    let text = non_blank(cell)?;
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            warn!(question = %question_id, side, limit = %text, "limit is not a number");
            warnings.push(FormWarning::for_question(
                WarningKind::InvalidNumericLimit,
                format!("{side} limit '{text}' is not a number"),
                question_id,
            ));
            None
        }
    }
}

fn workspace_button_label(workspace: &str) -> &'static str {
    match workspace {
        "immunization-form-workspace" => "Capture patient immunizations",
        "order-basket" => "Order medications",
        "appointments-form-workspace" => "Set the next appointment date",
        "patient-vitals-biometrics-form-workspace" => "Capture patient vitals",
        "medications-form-workspace" => "Active medications",
        _ => "Open Workspace",
    }
}

/// Trimmed cell text, or `None` when the cell is absent or whitespace.
fn non_blank(cell: &Option<String>) -> Option<&str> {
    cell.as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
}

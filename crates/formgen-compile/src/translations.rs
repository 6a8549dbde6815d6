//! Translation-table derivation.
//!
//! One table per language. Keys are the English texts the form displays:
//! section labels, question labels, tooltips (taken from the rows) and
//! answer labels (taken from the assembled tree, so only answers that made
//! it into the form are translated). Labels without a translation for the
//! requested language are left out entirely rather than carried as empty
//! entries. On conflicting translations for the same label, the first
//! occurrence in row order wins.

use tracing::debug;

use formgen_model::{Form, FormRow, TranslationTable};

/// Derives the translation table for one language.
pub fn extract(rows: &[FormRow], form: &Form, language: &str) -> TranslationTable {
    let mut table = TranslationTable::new(&form.name, language);

    for row in rows {
        if row.is_blank() {
            continue;
        }
        insert(
            &mut table,
            row.section.trim(),
            row.section_translations.get(language),
        );
        let label = match row.label.as_deref().map(str::trim) {
            Some(label) if !label.is_empty() => label,
            _ => row.question.trim(),
        };
        insert(&mut table, label, row.question_translations.get(language));
        if let Some(tooltip) = row.tooltip.as_deref().map(str::trim) {
            insert(&mut table, tooltip, row.tooltip_translations.get(language));
        }
    }

    for question in form.questions() {
        if let Some(answers) = &question.question_options.answers {
            for answer in answers {
                insert(&mut table, &answer.label, answer.translations.get(language));
            }
        }
    }

    debug!(
        form = %form.name,
        language,
        entries = table.len(),
        "extracted translations"
    );
    table
}

fn insert(table: &mut TranslationTable, label: &str, translation: Option<&String>) {
    let Some(translation) = translation else {
        return;
    };
    let sanitized = sanitize(translation);
    let inserted = table.insert_first(label, &sanitized);
    if !inserted && !label.is_empty() && table.get(label) != Some(sanitized.as_str()) {
        debug!(label = %label, "conflicting translation ignored, first occurrence kept");
    }
}

/// Strips quote characters and maps backslashes to forward slashes, so the
/// value embeds safely in the engine's translation JSON.
fn sanitize(text: &str) -> String {
    text.replace(['"', '\''], "").replace('\\', "/")
}

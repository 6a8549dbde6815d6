//! Per-form compilation entry point.
//!
//! [`FormCompiler`] owns the immutable option-set index and the compile
//! options, and is shared across forms. Per-form state (the identifier
//! registry, the warning list) lives inside each `compile_form` call, so a
//! single compiler value can serve many threads; `compile_forms` itself
//! runs sequentially and leaves fan-out to the caller.

use serde::{Deserialize, Serialize};
use tracing::debug;

use formgen_model::{Form, FormRow, FormWarning, FormgenError, Result, TranslationTable};

use crate::assemble::{Assembly, SchemaAssembler};
use crate::options::OptionSetIndex;
use crate::translations;

/// Compiler configuration: target languages plus the form-envelope values.
///
/// `Default` matches the envelope the form engine expects for clinical
/// consultation forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompileOptions {
    /// Languages to derive translation tables for, one table each.
    pub languages: Vec<String>,
    /// Prefix of the generated form description.
    pub description_prefix: String,
    pub version: String,
    pub processor: String,
    pub encounter: String,
    pub published: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            languages: Vec::new(),
            description_prefix: "MSF Form - ".to_string(),
            version: "1".to_string(),
            processor: "EncounterFormProcessor".to_string(),
            encounter: "Consultation".to_string(),
            published: true,
        }
    }
}

impl CompileOptions {
    pub fn with_language(mut self, language: &str) -> Self {
        self.languages.push(language.to_string());
        self
    }

    /// Empty form shell carrying the envelope metadata, before any pages.
    pub(crate) fn form_envelope(&self, name: &str) -> Form {
        Form {
            name: name.to_string(),
            description: format!("{}{name}", self.description_prefix),
            version: self.version.clone(),
            published: self.published,
            uuid: String::new(),
            processor: self.processor.clone(),
            encounter: self.encounter.clone(),
            retired: false,
            referenced_forms: Vec::new(),
            pages: Vec::new(),
        }
    }
}

/// Size tallies for one compiled form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormStats {
    pub pages: usize,
    pub sections: usize,
    pub questions: usize,
    pub answers: usize,
}

/// Everything one form compiles to.
#[derive(Debug)]
pub struct CompiledForm {
    pub form: Form,
    /// One table per configured language, in configuration order.
    pub translations: Vec<TranslationTable>,
    /// Non-fatal anomalies, in row order.
    pub warnings: Vec<FormWarning>,
    pub stats: FormStats,
}

impl CompiledForm {
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Compiles form sheets against a shared option-set index.
#[derive(Debug)]
pub struct FormCompiler {
    option_sets: OptionSetIndex,
    options: CompileOptions,
}

impl FormCompiler {
    pub fn new(option_sets: OptionSetIndex, options: CompileOptions) -> Self {
        FormCompiler {
            option_sets,
            options,
        }
    }

    pub fn option_sets(&self) -> &OptionSetIndex {
        &self.option_sets
    }

    /// Compiles one form sheet.
    ///
    /// The only failure mode is a sheet with no usable rows; every anomaly
    /// past that point degrades to a warning on the result.
    pub fn compile_form(&self, name: &str, rows: &[FormRow]) -> Result<CompiledForm> {
        if rows.iter().all(FormRow::is_blank) {
            return Err(FormgenError::EmptyForm(name.to_string()));
        }
        let assembler = SchemaAssembler::new(&self.option_sets, &self.options);
        let Assembly {
            form,
            warnings,
            stats,
        } = assembler.assemble(name, rows);
        let translations = self
            .options
            .languages
            .iter()
            .map(|language| translations::extract(rows, &form, language))
            .collect();
        debug!(
            form = %name,
            languages = self.options.languages.len(),
            warnings = warnings.len(),
            "compiled form"
        );
        Ok(CompiledForm {
            form,
            translations,
            warnings,
            stats,
        })
    }

    /// Compiles a batch of named sheets, one result per sheet.
    pub fn compile_forms(&self, sheets: &[(String, Vec<FormRow>)]) -> Vec<Result<CompiledForm>> {
        sheets
            .iter()
            .map(|(name, rows)| self.compile_form(name, rows))
            .collect()
    }
}

//! Derived label-translation tables.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Translation document for one form and one language.
///
/// Keys are original label texts; the `BTreeMap` gives lexicographic key
/// order on serialization. Conflicting translations for the same label keep
/// the first occurrence inserted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationTable {
    pub uuid: String,
    pub form: String,
    pub description: String,
    pub language: String,
    pub translations: BTreeMap<String, String>,
}

impl TranslationTable {
    pub fn new(form: &str, language: &str) -> Self {
        TranslationTable {
            uuid: String::new(),
            form: form.to_string(),
            description: format!("{} Translations for '{form}'", capitalize(language)),
            language: language.to_string(),
            translations: BTreeMap::new(),
        }
    }

    /// Inserts unless the label is already present; the first occurrence
    /// wins. Empty labels are ignored. Returns whether the entry was added.
    pub fn insert_first(&mut self, label: &str, translation: &str) -> bool {
        if label.is_empty() || self.translations.contains_key(label) {
            return false;
        }
        self.translations
            .insert(label.to_string(), translation.to_string());
        true
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.translations.get(label).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.translations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.translations.is_empty()
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

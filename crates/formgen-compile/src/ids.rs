//! Question identifier classification and form-scoped allocation.
//!
//! Raw label/ID strings are classified by an ordered list of rules, first
//! match wins:
//!
//! 1. pure integers pass through untouched (they are answer values, not
//!    prefixes);
//! 2. a leading integer, a dash, and one trailing word fuse into
//!    `<digits><word>` (`"1 - type"` becomes `1type`);
//! 3. letter-led compounds containing a dash with tokens on both sides are
//!    kept verbatim (`"Type 1 - Gynaecology"`);
//! 4. ordinal prefixes (`"1. "`, `"1.1 "`) are stripped and the remainder
//!    camel-cased;
//! 5. everything else is reduced to a camel-cased token.
//!
//! Uniqueness within one form is the allocator's job: a taken candidate gets
//! an incrementing `_1`, `_2`, ... suffix and the caller records a warning.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use formgen_model::RenderingKind;

static DIGIT_DASH_WORD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s*-\s*([A-Za-z]+)$").unwrap());

static ORDINAL_PREFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(?:\.\d+)*[.\s]+(.*)$").unwrap());

static RANGE_TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+ ?- ?\d+|[<>] \d+").unwrap());

static PAREN_SEGMENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\(.*?\)").unwrap());

/// Classifies a raw label or explicit ID into an identifier candidate.
///
/// Returns an empty string when nothing usable remains after cleaning; the
/// allocator substitutes a mechanically generated token in that case.
pub fn classify(raw: &str) -> String {
    let trimmed = raw.trim();
    if is_pure_integer(trimmed) {
        return trimmed.to_string();
    }
    if let Some(fused) = digit_dash_word(trimmed) {
        return fused;
    }
    if is_letter_led_compound(trimmed) {
        return trimmed.to_string();
    }
    if let Some(rest) = strip_ordinal_prefix(trimmed) {
        return fallback_token(rest);
    }
    fallback_token(trimmed)
}

/// Outcome of a single allocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    /// The reserved, form-unique identifier.
    pub id: String,
    /// The raw string the identifier was allocated from, unchanged.
    pub original_label: String,
    /// True when a suffix was appended to avoid a collision.
    pub was_suffixed: bool,
}

/// A resolved skip-logic operand reference.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOperand {
    pub id: String,
    pub rendering: RenderingKind,
}

/// Lookup seam between skip-logic compilation and the identifier registry.
pub trait OperandResolver {
    /// Case-insensitive, trimmed match against the labels and identifiers
    /// allocated so far. `None` means the reference cannot be resolved.
    fn resolve_operand(&self, label: &str) -> Option<ResolvedOperand>;
}

#[derive(Debug, Clone)]
struct AllocatedId {
    source: String,
    id: String,
    rendering: RenderingKind,
}

/// Form-scoped identifier registry.
///
/// Allocation order matters: skip logic resolves only against identifiers
/// allocated earlier in the same pass, so the assembler must allocate in row
/// order. Registries for different forms are independent.
#[derive(Debug, Default)]
pub struct IdAllocator {
    used: BTreeSet<String>,
    entries: Vec<AllocatedId>,
    generated: usize,
}

impl IdAllocator {
    pub fn new() -> Self {
        IdAllocator::default()
    }

    /// Classifies `raw` and reserves a unique identifier for it.
    ///
    /// Never fails: an empty classification falls back to a generated
    /// `question_<n>` token, and collisions are suffixed until free.
    pub fn allocate(&mut self, raw: &str, rendering: RenderingKind) -> Allocation {
        let mut candidate = classify(raw);
        if candidate.is_empty() {
            self.generated += 1;
            candidate = format!("question_{}", self.generated);
        }
        let (id, was_suffixed) = self.reserve(candidate);
        self.used.insert(id.clone());
        self.entries.push(AllocatedId {
            source: raw.trim().to_string(),
            id: id.clone(),
            rendering,
        });
        Allocation {
            id,
            original_label: raw.to_string(),
            was_suffixed,
        }
    }

    fn reserve(&self, candidate: String) -> (String, bool) {
        if !self.used.contains(&candidate) {
            return (candidate, false);
        }
        let mut suffix = 1;
        loop {
            let suffixed = format!("{candidate}_{suffix}");
            if !self.used.contains(&suffixed) {
                return (suffixed, true);
            }
            suffix += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl OperandResolver for IdAllocator {
    fn resolve_operand(&self, label: &str) -> Option<ResolvedOperand> {
        let needle = label.trim().to_lowercase();
        self.entries
            .iter()
            .find(|entry| {
                entry.source.to_lowercase() == needle || entry.id.to_lowercase() == needle
            })
            .map(|entry| ResolvedOperand {
                id: entry.id.clone(),
                rendering: entry.rendering.clone(),
            })
    }
}

fn is_pure_integer(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|ch| ch.is_ascii_digit())
}

fn digit_dash_word(text: &str) -> Option<String> {
    let caps = DIGIT_DASH_WORD_REGEX.captures(text)?;
    let digits = caps.get(1)?.as_str();
    let word = caps.get(2)?.as_str().to_lowercase();
    Some(format!("{digits}{word}"))
}

fn is_letter_led_compound(text: &str) -> bool {
    let leads_with_letter = text.chars().next().is_some_and(char::is_alphabetic);
    if !leads_with_letter {
        return false;
    }
    text.match_indices('-').any(|(index, _)| {
        let before = &text[..index];
        let after = &text[index + 1..];
        before.chars().any(char::is_alphanumeric) && after.chars().any(char::is_alphanumeric)
    })
}

fn strip_ordinal_prefix(text: &str) -> Option<&str> {
    let caps = ORDINAL_PREFIX_REGEX.captures(text)?;
    let rest = caps.get(1)?.as_str().trim_start();
    // A dash after the prefix means a compound, not an ordinal label.
    if rest.is_empty() || rest.starts_with('-') {
        return None;
    }
    Some(rest)
}

/// Reduces free text to a compact camel-cased token.
fn fallback_token(text: &str) -> String {
    let mut cleaned = PAREN_SEGMENT_REGEX.replace_all(text, "").into_owned();
    cleaned = cleaned.replace('/', " Or ");
    if RANGE_TOKEN_REGEX.is_match(&cleaned) {
        // Ranges like "12-17" keep their dash as a word: "12To17".
        cleaned = cleaned.replace('-', "To");
    } else {
        cleaned = cleaned.replace('-', " ");
        cleaned = cleaned.replace('_', " ");
    }
    cleaned = cleaned.replace('<', " Less Than ");
    cleaned = cleaned.replace('>', " More Than ");
    let mut token = camel_case(&cleaned);
    token = token.replace('+', "Plus");
    token.retain(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-');
    collapse_underscores(&token)
}

/// First word fully lowercased, each following word capitalized.
fn camel_case(text: &str) -> String {
    let mut words = text.split_whitespace();
    let Some(first) = words.next() else {
        return String::new();
    };
    let mut token = first.to_lowercase();
    for word in words {
        token.push_str(&capitalize(word));
    }
    token
}

/// Uppercase first character, lowercase the rest.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn collapse_underscores(token: &str) -> String {
    let mut collapsed = String::with_capacity(token.len());
    let mut previous_was_underscore = false;
    for ch in token.trim_matches('_').chars() {
        if ch == '_' {
            if !previous_was_underscore {
                collapsed.push(ch);
            }
            previous_was_underscore = true;
        } else {
            collapsed.push(ch);
            previous_was_underscore = false;
        }
    }
    collapsed
}

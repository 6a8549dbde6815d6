//! Property-based tests for the laws the compiler guarantees: identifier
//! classification and uniqueness, option-set ordering, skip-logic parsing
//! totality, and translation-key ordering.

use proptest::prelude::*;

use formgen_compile::{
    CompileOptions, FormCompiler, IdAllocator, OptionSetIndex, SkipLogicOutcome, classify,
    skip_logic,
};
use formgen_model::{FormRow, OptionSetRow, RenderingKind};

/// Printable ASCII, the realistic spreadsheet-cell alphabet.
fn cell_text() -> impl Strategy<Value = String> {
    "[ -~]{0,32}"
}

/// Order keys: integers, decimals, free text, blanks, or absent.
fn order_key() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        (0u32..10_000).prop_map(|n| Some(n.to_string())),
        (0u32..10_000, 0u32..100).prop_map(|(whole, frac)| Some(format!("{whole}.{frac:02}"))),
        "[a-z]{1,8}".prop_map(Some),
        Just(Some("   ".to_string())),
        Just(None),
    ]
}

fn parse_order(key: Option<&str>) -> Option<f64> {
    let trimmed = key?.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

proptest! {
    /// A leading integer, a dash, and one trailing word always fuse into
    /// the digits plus the lowercased word, whatever the spacing.
    #[test]
    fn digit_dash_word_always_fuses(
        digits in 0u32..100_000,
        word in "[A-Za-z]{1,12}",
        pad in " {0,3}",
    ) {
        let id = classify(&format!("{digits}{pad}-{pad}{word}"));
        prop_assert_eq!(id, format!("{digits}{}", word.to_lowercase()));
    }

    /// Letter-led compounds with a dash between tokens pass through verbatim.
    #[test]
    fn letter_led_compounds_stay_verbatim(
        lead in "[A-Za-z]{1,8}",
        tail in "[A-Za-z0-9]{1,8}",
    ) {
        let raw = format!("{lead} - {tail}");
        prop_assert_eq!(classify(&raw), raw);
    }

    /// Classification is total and deterministic over arbitrary cell text.
    #[test]
    fn classification_is_deterministic(input in cell_text()) {
        prop_assert_eq!(classify(&input), classify(&input));
    }

    /// Allocation never yields an empty or duplicate identifier, whatever
    /// the input labels.
    #[test]
    fn allocated_identifiers_are_unique_and_non_empty(
        labels in prop::collection::vec(cell_text(), 1..40),
    ) {
        let mut allocator = IdAllocator::new();
        let ids: Vec<String> = labels
            .iter()
            .map(|raw| allocator.allocate(raw, RenderingKind::Text).id)
            .collect();
        prop_assert!(ids.iter().all(|id| !id.is_empty()));
        let unique: std::collections::BTreeSet<&String> = ids.iter().collect();
        prop_assert_eq!(unique.len(), ids.len());
    }

    /// Sorted sets put numeric order keys first, ascending by value, and
    /// keep non-numeric entries in input order behind them. Sorting the
    /// already-sorted members changes nothing.
    #[test]
    fn option_sort_is_two_tier_stable_and_idempotent(
        keys in prop::collection::vec(order_key(), 1..30),
    ) {
        let rows: Vec<OptionSetRow> = keys
            .iter()
            .enumerate()
            .map(|(position, key)| {
                let mut row = OptionSetRow::new("set", &format!("label-{position:02}"));
                row.order = key.clone();
                row
            })
            .collect();
        let index = OptionSetIndex::build(rows);
        let members = index
            .lookup("set")
            .map(|set| set.members.clone())
            .unwrap_or_default();
        prop_assert_eq!(members.len(), keys.len());

        let parsed: Vec<Option<f64>> = members
            .iter()
            .map(|member| parse_order(member.order.as_deref()))
            .collect();
        let numeric_len = parsed.iter().take_while(|value| value.is_some()).count();
        prop_assert!(parsed[numeric_len..].iter().all(Option::is_none));
        prop_assert!(parsed[..numeric_len].windows(2).all(|pair| pair[0] <= pair[1]));
        // Tail labels carry their input position; stability keeps them sorted.
        let tail: Vec<&str> = members[numeric_len..]
            .iter()
            .map(|member| member.label.as_str())
            .collect();
        prop_assert!(tail.windows(2).all(|pair| pair[0] < pair[1]));

        let resorted = OptionSetIndex::build(members.clone());
        let relabels: Vec<String> = resorted
            .lookup("set")
            .map(|set| set.members.iter().map(|m| m.label.clone()).collect())
            .unwrap_or_default();
        let labels: Vec<String> = members.iter().map(|m| m.label.clone()).collect();
        prop_assert_eq!(labels, relabels);
    }

    /// Skip-logic compilation is total, and against an empty registry it can
    /// refuse but never compile.
    #[test]
    fn skip_logic_never_compiles_against_empty_registry(input in cell_text()) {
        let allocator = IdAllocator::new();
        let outcome = skip_logic::compile(&input, &allocator);
        prop_assert!(!matches!(outcome, SkipLogicOutcome::Compiled(_)));
    }

    /// Translation keys iterate strictly increasing: unique and sorted.
    #[test]
    fn translation_keys_are_sorted_and_unique(
        entries in prop::collection::vec(("[A-Za-z]{1,10}", "[a-z]{1,10}"), 1..30),
    ) {
        let rows: Vec<FormRow> = entries
            .iter()
            .map(|(label, translated)| {
                FormRow::new(label, "P1", "S1")
                    .with_rendering("text")
                    .with_question_translation("fr", translated)
            })
            .collect();
        let compiler = FormCompiler::new(
            OptionSetIndex::build(Vec::new()),
            CompileOptions::default().with_language("fr"),
        );
        let compiled = compiler.compile_form("F01", &rows).expect("fixture compiles");
        let keys: Vec<&String> = compiled.translations[0].translations.keys().collect();
        prop_assert!(keys.windows(2).all(|pair| pair[0] < pair[1]));
    }
}

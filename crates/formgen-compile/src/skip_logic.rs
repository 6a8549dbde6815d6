//! Raw skip-logic parsing.
//!
//! Two textual shapes are recognized, both with the operand in square
//! brackets:
//!
//! ```text
//! [Number of fetuses] !== '1', '2', '3'
//! [BCG] !== {'Unknown', 'Not vaccinated'}
//! ```
//!
//! Brace-set members may be quoted with either `'` or `"`.
//!
//! Only the `!==` operator compiles; `==` and `<>` are refused with a
//! warning so the sheet author can see the row was understood but not
//! supported. A refusal never aborts the form, the question simply carries
//! no visibility expression.

use std::sync::LazyLock;

use regex::Regex;

use formgen_model::{ConditionOperator, SkipLogicCondition};

use crate::ids::OperandResolver;

static COMMA_LIST_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]]+)\]\s*(!==|==|<>)\s*'[^']*'(?:\s*,\s*'[^']*')*").unwrap()
});

static BRACE_SET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\s*(!==|==|<>)\s*\{(.+?)\}").unwrap());

static QUOTED_VALUE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"'([^']*)'").unwrap());

/// Result of compiling one raw skip-logic cell.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipLogicOutcome {
    Compiled(SkipLogicCondition),
    /// The expression parsed but used an operator other than `!==`.
    UnsupportedOperator(String),
    /// The bracketed operand matched no known question label or identifier.
    UnresolvedOperand(String),
    /// The cell matched neither recognized shape.
    Unparseable,
}

/// Compiles a raw skip-logic cell against the identifiers allocated so far.
pub fn compile(raw: &str, resolver: &dyn OperandResolver) -> SkipLogicOutcome {
    let Some((operand, operator, values)) = parse(raw) else {
        return SkipLogicOutcome::Unparseable;
    };
    if operator != "!==" {
        return SkipLogicOutcome::UnsupportedOperator(operator);
    }
    let Some(resolved) = resolver.resolve_operand(&operand) else {
        return SkipLogicOutcome::UnresolvedOperand(operand);
    };
    SkipLogicOutcome::Compiled(SkipLogicCondition {
        operand_id: resolved.id,
        operator: ConditionOperator::NotEqualsAny,
        values,
        operand_rendering: resolved.rendering,
    })
}

fn parse(raw: &str) -> Option<(String, String, Vec<String>)> {
    if let Some(caps) = COMMA_LIST_REGEX.captures(raw) {
        let span = caps.get(0)?.as_str();
        let operand = caps.get(1)?.as_str().to_string();
        let operator = caps.get(2)?.as_str().to_string();
        let values = QUOTED_VALUE_REGEX
            .captures_iter(span)
            .filter_map(|caps| caps.get(1))
            .map(|value| value.as_str().to_string())
            .collect();
        return Some((operand, operator, values));
    }
    if let Some(caps) = BRACE_SET_REGEX.captures(raw) {
        let operand = caps.get(1)?.as_str().to_string();
        let operator = caps.get(2)?.as_str().to_string();
        let values = caps
            .get(3)?
            .as_str()
            .split(',')
            .map(|value| value.trim().trim_matches(['\'', '"']).to_string())
            .collect();
        return Some((operand, operator, values));
    }
    None
}

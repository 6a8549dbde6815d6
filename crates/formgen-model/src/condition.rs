//! Compiled skip-logic conditions.

use serde::{Deserialize, Serialize};

use crate::rendering::RenderingKind;

/// Comparison semantics of a condition.
///
/// The raw-text parser only ever produces [`ConditionOperator::NotEqualsAny`]
/// ("hide unless the value is one of the listed options"); the positive form
/// exists for callers constructing conditions programmatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConditionOperator {
    EqualsAny,
    NotEqualsAny,
}

/// A parsed and resolved visibility condition.
///
/// `values` keep their stated order and are not de-duplicated. The operand's
/// rendering kind decides whether the rendered expression compares scalar
/// equality or set membership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkipLogicCondition {
    /// Final identifier of the referenced question.
    pub operand_id: String,
    pub operator: ConditionOperator,
    pub values: Vec<String>,
    pub operand_rendering: RenderingKind,
}

impl SkipLogicCondition {
    /// Renders the boolean expression attached to the question.
    ///
    /// One clause per value, joined with `&&` for the negated operator and
    /// `||` for the positive one. No surrounding parentheses are emitted.
    pub fn to_expression(&self) -> String {
        let clauses: Vec<String> = self.values.iter().map(|value| self.clause(value)).collect();
        let joiner = match self.operator {
            ConditionOperator::NotEqualsAny => " && ",
            ConditionOperator::EqualsAny => " || ",
        };
        clauses.join(joiner)
    }

    fn clause(&self, value: &str) -> String {
        if self.operand_rendering.is_multi_valued() {
            match self.operator {
                ConditionOperator::NotEqualsAny => {
                    format!("!includes({}, '{}')", self.operand_id, value)
                }
                ConditionOperator::EqualsAny => {
                    format!("includes({}, '{}')", self.operand_id, value)
                }
            }
        } else {
            let operator = match self.operator {
                ConditionOperator::NotEqualsAny => "!==",
                ConditionOperator::EqualsAny => "==",
            };
            format!("{} {} '{}'", self.operand_id, operator, value)
        }
    }
}

pub mod condition;
pub mod error;
pub mod form;
pub mod rendering;
pub mod row;
pub mod translation;
pub mod warnings;

pub use condition::{ConditionOperator, SkipLogicCondition};
pub use error::{FormgenError, Result};
pub use form::{
    AnswerOption, Calculation, Form, HideExpression, Page, Question, QuestionOptions, Section,
};
pub use rendering::RenderingKind;
pub use row::{FormRow, OptionSetRow};
pub use translation::TranslationTable;
pub use warnings::{FormWarning, WarningKind};

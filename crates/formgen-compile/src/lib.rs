//! Form metadata compilation.
//!
//! Turns tabular form-metadata rows into the form engine's JSON schema:
//! option sets are indexed and sorted once, question identifiers are
//! classified and made unique per form, skip-logic text compiles to boolean
//! visibility expressions, rows assemble into a page/section/question tree,
//! and label-translation tables are derived per language.

pub mod assemble;
pub mod ids;
pub mod options;
pub mod pipeline;
pub mod skip_logic;
pub mod translations;

pub use assemble::{Assembly, SchemaAssembler};
pub use ids::{Allocation, IdAllocator, OperandResolver, ResolvedOperand, classify};
pub use options::{OptionSet, OptionSetIndex};
pub use pipeline::{CompileOptions, CompiledForm, FormCompiler, FormStats};
pub use skip_logic::SkipLogicOutcome;

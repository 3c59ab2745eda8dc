#![doc = include_str!("../README.md")]

/// Grammar construction: rule names, operator trees, start rule.
pub mod grammar;
/// The operator AST (the fixed, seventeen-variant set) and its builder functions.
pub mod operator;
/// Failure diagnostics: `Expected`, `Sample`, `FailureReason`, `ParseError`.
pub mod error;
/// Line/column resolution for a linear code-point offset.
pub mod position;
/// `Parser`, `ParseOutcome`, and the `parse` entry point.
pub mod parser;
/// The shape of a successful match, and the `Adapter` that reduces it.
pub mod token;

mod interpreter;
mod state;

pub use crate::{
    error::{Expected, FailureReason, ParseError, Sample},
    grammar::{Grammar, GrammarBuilder},
    operator::{
        action, and, any, call, call_as, choice, label, match_str, maybe, neg_pre_exec, next_char,
        not, pre_exec, regex, sequence, some, text_of, ActionFn, ActionOutcome, Operator,
        PreExecFn, PreExecOutcome,
    },
    parser::{ParseOutcome, Parser},
    position::Position,
    state::MatchState,
    token::{Adapter, MatchToken},
};

/// Commonly used items, for a single glob import.
pub mod prelude {
    pub use crate::{
        action, and, any, call, call_as, choice, label, match_str, maybe, neg_pre_exec, next_char,
        not, pre_exec, regex, sequence, some, text_of, ActionFn, ActionOutcome, Expected,
        FailureReason, Grammar, GrammarBuilder, MatchState, MatchToken, Operator, ParseError,
        ParseOutcome, Parser, Position, PreExecFn, PreExecOutcome, Sample,
    };
}

//! The top-level driver: resolve the start rule, run it, and enforce
//! whole-input consumption.

use crate::error::FailureReason;
use crate::grammar::Grammar;
use crate::interpreter::eval_operator;
use crate::position::{resolve_position, Position};
use crate::state::RunContext;
use crate::token::Adapter;

/// The result of a parse: either the fully adapted value, or a located failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome<U> {
    /// The start rule matched and consumed the entire input.
    Matched(U),
    /// The parse failed, or succeeded without consuming all of the input.
    Failed(FailureReason, Position),
}

impl<U> ParseOutcome<U> {
    /// `true` if this outcome is [`ParseOutcome::Matched`].
    pub fn is_matched(&self) -> bool {
        matches!(self, ParseOutcome::Matched(_))
    }

    /// The matched value, if any.
    pub fn matched(self) -> Option<U> {
        match self {
            ParseOutcome::Matched(v) => Some(v),
            ParseOutcome::Failed(..) => None,
        }
    }
}

/// A grammar paired with the adapter that reduces its matches to `U`.
///
/// This is the engine's whole public surface for running a parse: construct a
/// [`Grammar`], pick an adapter, and call [`Parser::parse`].
pub struct Parser<U> {
    grammar: Grammar<U>,
    adapter: Box<Adapter<U>>,
}

impl<U> Parser<U> {
    /// Pair a grammar with the adapter used to reduce its matches.
    pub fn new(grammar: Grammar<U>, adapter: impl Fn(crate::token::MatchToken<U>) -> U + 'static) -> Self {
        Self {
            grammar,
            adapter: Box::new(adapter),
        }
    }

    /// The grammar this parser runs.
    pub fn grammar(&self) -> &Grammar<U> {
        &self.grammar
    }

    /// Mutable access to the grammar, e.g. to call [`Grammar::set_start_rule`].
    pub fn grammar_mut(&mut self) -> &mut Grammar<U> {
        &mut self.grammar
    }

    /// Run the grammar's start rule against `input`.
    ///
    /// Returns `Matched(value)` iff the start rule succeeds and consumes the
    /// entire input; otherwise returns a `Failed` outcome located at the
    /// triggering position.
    ///
    /// A grammar that recurses through `Call`/`CallAs` without consuming any
    /// input (directly or indirectly left-recursive) will recurse the host
    /// stack without bound; this engine does not detect or guard against it,
    /// the same way it does not attempt left-recursion support in general.
    pub fn parse(&self, input: &str) -> ParseOutcome<U>
    where
        U: Clone,
    {
        let start_rule = self.grammar.get_start_rule();
        let Some(start_op) = self.grammar.get_rule(start_rule) else {
            return ParseOutcome::Failed(FailureReason::NoStartRule, Position::new(0, 0));
        };

        let ctx = RunContext::new(input, &self.grammar, self.adapter.as_ref());

        match eval_operator(start_op, &ctx, 0) {
            Ok(m) if m.pos == ctx.len() => ParseOutcome::Matched(m.token),
            Ok(m) => {
                let reason = FailureReason::expected_end_of_input(&ctx.chars, m.pos);
                ParseOutcome::Failed(reason, resolve_position(&ctx.chars, m.pos))
            }
            Err(failure) => {
                ParseOutcome::Failed(failure.reason, resolve_position(&ctx.chars, failure.pos))
            }
        }
    }
}

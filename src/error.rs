//! Failure diagnostics: what was expected, what was found, and why.

use std::fmt;

use crate::position::Position;

/// What an operator expected to find at the position it failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expected {
    /// A specific literal string.
    Value(String),
    /// Any single character (or, for an [`Action`](crate::operator::Operator::Action)
    /// callback's `Fail` outcome, "anything" in the general sense).
    Any,
    /// A named rule that does not exist in the grammar.
    RuleDefinition(String),
    /// A regex pattern, by its description or its literal source text.
    Regex(String),
    /// The end of input.
    EndOfInput,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Value(s) => write!(f, "{s:?}"),
            Expected::Any => write!(f, "any character"),
            Expected::RuleDefinition(name) => write!(f, "rule {name:?} to be defined"),
            Expected::Regex(desc) => write!(f, "a match for {desc}"),
            Expected::EndOfInput => write!(f, "end of input"),
        }
    }
}

/// What was actually found at the position an expectation was checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sample {
    /// A single character (stored as a `String` since the empty string is also a
    /// valid sample, for an `Action`'s `Fail` outcome).
    Value(String),
    /// The run ran out of input.
    EndOfInput,
}

impl Sample {
    /// Sample the character at `pos`, or `EndOfInput` if `pos` is at or past the
    /// end of `chars`.
    pub(crate) fn at(chars: &[char], pos: usize) -> Self {
        match chars.get(pos) {
            Some(c) => Sample::Value(c.to_string()),
            None => Sample::EndOfInput,
        }
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sample::Value(s) if s.is_empty() => write!(f, "nothing"),
            Sample::Value(s) => write!(f, "{s:?}"),
            Sample::EndOfInput => write!(f, "end of input"),
        }
    }
}

/// Why a parse step failed.
///
/// Aggregates (`FollowingRule`, `FollowingNestedOperator`) preserve the full causal
/// chain; nothing is flattened or discarded on the way up.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FailureReason {
    /// A concrete expectation did not hold.
    #[error("expected {0}, found {1}")]
    ByExpectation(Expected, Sample),
    /// Failure occurred while evaluating a named rule.
    #[error("in rule {0:?}: {1}")]
    FollowingRule(String, Box<FailureReason>),
    /// Every alternative of a `Choice` (or similar composite) failed.
    #[error("none of the alternatives matched (found {1}): {0:?}")]
    FollowingNestedOperator(Vec<FailureReason>, Sample),
    /// The grammar has no rule bound to its start-rule name.
    #[error("grammar has no start rule")]
    NoStartRule,
}

impl FailureReason {
    /// Build `ByExpectation(Expected::Value(value), sample_at(pos))`.
    pub(crate) fn expected_value(value: impl Into<String>, chars: &[char], pos: usize) -> Self {
        FailureReason::ByExpectation(Expected::Value(value.into()), Sample::at(chars, pos))
    }

    /// Build `ByExpectation(Expected::Any, sample_at(pos))`.
    pub(crate) fn expected_any(chars: &[char], pos: usize) -> Self {
        FailureReason::ByExpectation(Expected::Any, Sample::at(chars, pos))
    }

    /// Build `ByExpectation(Expected::RuleDefinition(name), sample_at(pos))`.
    pub(crate) fn expected_rule_definition(name: impl Into<String>, chars: &[char], pos: usize) -> Self {
        FailureReason::ByExpectation(Expected::RuleDefinition(name.into()), Sample::at(chars, pos))
    }

    /// Build `ByExpectation(Expected::Regex(desc), sample_at(pos))`.
    pub(crate) fn expected_regex(desc: impl Into<String>, chars: &[char], pos: usize) -> Self {
        FailureReason::ByExpectation(Expected::Regex(desc.into()), Sample::at(chars, pos))
    }

    /// Build `ByExpectation(Expected::EndOfInput, sample_at(pos))`.
    pub(crate) fn expected_end_of_input(chars: &[char], pos: usize) -> Self {
        FailureReason::ByExpectation(Expected::EndOfInput, Sample::at(chars, pos))
    }
}

/// A fully located parse failure, suitable for handing to a caller-owned
/// pretty-printer. Implements [`std::error::Error`] so it can be propagated with
/// `?` from a binary that embeds this crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{reason} at {position:?}")]
pub struct ParseError {
    /// Why the parse failed.
    pub reason: FailureReason,
    /// Where, in (line, column) terms, it failed.
    pub position: Position,
}

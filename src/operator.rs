//! The closed, seventeen-variant operator AST and its builder functions.

use std::rc::Rc;

use regex::Regex;

use crate::state::MatchState;

/// What an [`Operator::Action`] callback tells the interpreter to do with its
/// inner operator's already-adapted result.
pub enum ActionOutcome<U> {
    /// Replace the token with this value.
    Pass(U),
    /// Keep the inner operator's token unchanged.
    PassThrough,
    /// Turn the whole `Action` into a failure.
    Fail,
}

/// What an [`Operator::PreExec`] / [`Operator::NegPreExec`] predicate decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreExecOutcome {
    /// Allow parsing to continue.
    Continue,
    /// Stop parsing here.
    Halt,
}

/// An [`Operator::Action`] callback: given the inner operator's result and a view
/// of the run at that point, decide what the `Action` itself should produce.
pub type ActionFn<U> = Rc<dyn Fn(U, &MatchState<'_, U>) -> ActionOutcome<U>>;

/// An [`Operator::PreExec`] / [`Operator::NegPreExec`] predicate over the current
/// run state.
pub type PreExecFn<U> = Rc<dyn Fn(&MatchState<'_, U>) -> PreExecOutcome>;

/// One node of a grammar's operator tree.
///
/// This set is closed by design: the specification fixes it at exactly these
/// seventeen variants, so the interpreter's dispatch over them can stay an
/// exhaustive `match` rather than an open trait hierarchy.
pub enum Operator<U> {
    /// Consume and match any single character.
    NextChar,
    /// Match a literal string exactly.
    Match(String),
    /// Match an anchored regular expression; the second field is a
    /// human-readable description used in diagnostics (falling back to the
    /// pattern's source text when none is given).
    Regex(Regex, String),
    /// Run `a`, discard its token, and yield the literal substring it consumed.
    TextOf(Box<Operator<U>>),
    /// Run `a`; never fails. On `a`'s failure, yields an empty lexeme without
    /// advancing.
    Maybe(Box<Operator<U>>),
    /// Run `a` one or more times, greedily.
    Some(Box<Operator<U>>),
    /// Run `a` zero or more times, greedily; never fails.
    Any(Box<Operator<U>>),
    /// Lookahead: succeed iff `a` succeeds, without consuming input.
    And(Box<Operator<U>>),
    /// Lookahead: succeed iff `a` fails, without consuming input.
    Not(Box<Operator<U>>),
    /// Run each child operator in order; fail as soon as one does.
    Sequence(Vec<Operator<U>>),
    /// Try each child in order, returning the first success; fail only if all do.
    Choice(Vec<Operator<U>>),
    /// Run `a`, then let a callback inspect and transform (or reject) its result.
    Action(Box<Operator<U>>, ActionFn<U>),
    /// Consult a predicate over the current state without consuming input.
    PreExec(PreExecFn<U>),
    /// Like `PreExec`, but with the predicate's outcome inverted.
    NegPreExec(PreExecFn<U>),
    /// Run `a` and, on success, bind its token to `name` in the run-global label
    /// map.
    Label(String, Box<Operator<U>>),
    /// Invoke the grammar rule named `name`, wrapping its result as `InRule(name, _)`.
    Call(String),
    /// Invoke the grammar rule named `target`, but wrap the result as
    /// `InRule(alias, _)` instead of `InRule(target, _)`.
    CallAs(String, String),
}

/// Consume and match any single character.
pub fn next_char<U>() -> Operator<U> {
    Operator::NextChar
}

/// Match a literal string exactly.
pub fn match_str<U>(s: impl Into<String>) -> Operator<U> {
    Operator::Match(s.into())
}

/// Match an anchored regular expression at the current position.
///
/// `pattern` is compiled with an implicit `^` anchor prepended, since the engine
/// always matches at the current position rather than searching ahead for the
/// next occurrence. `desc` overrides the pattern's source text in diagnostics.
///
/// # Panics
///
/// Panics if `pattern` is not a valid regular expression. Grammars are
/// constructed once, ahead of time, by the host program, so a malformed pattern
/// is a programmer error rather than a run-time condition to recover from.
pub fn regex<U>(pattern: &str, desc: Option<&str>) -> Operator<U> {
    let anchored = Regex::new(&format!("^(?:{pattern})")).expect("invalid regex pattern");
    let label = desc.map(str::to_owned).unwrap_or_else(|| pattern.to_owned());
    Operator::Regex(anchored, label)
}

/// Run `a`, discard its token, and yield the literal substring it consumed.
pub fn text_of<U>(a: Operator<U>) -> Operator<U> {
    Operator::TextOf(Box::new(a))
}

/// Run `a` if possible; never fails.
pub fn maybe<U>(a: Operator<U>) -> Operator<U> {
    Operator::Maybe(Box::new(a))
}

/// Run `a` one or more times, greedily.
pub fn some<U>(a: Operator<U>) -> Operator<U> {
    Operator::Some(Box::new(a))
}

/// Run `a` zero or more times, greedily; never fails.
pub fn any<U>(a: Operator<U>) -> Operator<U> {
    Operator::Any(Box::new(a))
}

/// Lookahead: succeed iff `a` succeeds, without consuming input.
pub fn and<U>(a: Operator<U>) -> Operator<U> {
    Operator::And(Box::new(a))
}

/// Lookahead: succeed iff `a` fails, without consuming input.
pub fn not<U>(a: Operator<U>) -> Operator<U> {
    Operator::Not(Box::new(a))
}

/// Run each child operator in order; fail as soon as one does.
pub fn sequence<U>(ops: Vec<Operator<U>>) -> Operator<U> {
    Operator::Sequence(ops)
}

/// Try each child in order, returning the first success.
pub fn choice<U>(ops: Vec<Operator<U>>) -> Operator<U> {
    Operator::Choice(ops)
}

/// Run `a`, then let `f` inspect and transform (or reject) its result.
pub fn action<U>(a: Operator<U>, f: ActionFn<U>) -> Operator<U> {
    Operator::Action(Box::new(a), f)
}

/// Consult a predicate over the current state without consuming input.
pub fn pre_exec<U>(f: PreExecFn<U>) -> Operator<U> {
    Operator::PreExec(f)
}

/// Like [`pre_exec`], but with the predicate's outcome inverted.
pub fn neg_pre_exec<U>(f: PreExecFn<U>) -> Operator<U> {
    Operator::NegPreExec(f)
}

/// Run `a` and, on success, bind its token to `name` in the run-global label map.
pub fn label<U>(name: impl Into<String>, a: Operator<U>) -> Operator<U> {
    Operator::Label(name.into(), Box::new(a))
}

/// Invoke the grammar rule named `name`.
pub fn call<U>(name: impl Into<String>) -> Operator<U> {
    Operator::Call(name.into())
}

/// Invoke the grammar rule named `target`, reporting it under `alias` instead.
pub fn call_as<U>(alias: impl Into<String>, target: impl Into<String>) -> Operator<U> {
    Operator::CallAs(alias.into(), target.into())
}

//! The recursive dispatcher that walks an [`Operator`] tree over a [`RunContext`].
//!
//! This is the hard part of the engine: composing child results, backtracking on
//! alternation, capturing labels, matching regexes, and invoking user callbacks,
//! all while keeping every operator's own position bookkeeping local to itself.

use crate::error::{Expected, FailureReason, Sample};
use crate::operator::{ActionFn, ActionOutcome, Operator, PreExecFn, PreExecOutcome};
use crate::state::{MatchState, RunContext};
use crate::token::MatchToken;

/// A successful step: the already-adapted token, and the position just past what
/// was consumed.
pub(crate) struct Matched<U> {
    pub(crate) token: U,
    pub(crate) pos: usize,
}

/// A failed step.
///
/// `pos` is purely diagnostic — it is the position a failure is *reported* at
/// (used for the `Sample` inside `reason`, and ultimately for line/column
/// resolution), not a cursor the caller resumes from. Every operator that fails
/// leaves the caller's own notion of "current position" untouched, simply by
/// never handing it a new one; there is nothing here to explicitly roll back.
pub(crate) struct NotMatched {
    pub(crate) reason: FailureReason,
    pub(crate) pos: usize,
}

pub(crate) type EvalResult<U> = Result<Matched<U>, NotMatched>;

fn matched<U>(token: U, pos: usize) -> EvalResult<U> {
    Ok(Matched { token, pos })
}

fn not_matched<U>(reason: FailureReason, pos: usize) -> EvalResult<U> {
    Err(NotMatched { reason, pos })
}

/// Evaluate `op` against `ctx` starting at code-point offset `pos`.
pub(crate) fn eval_operator<U: Clone>(
    op: &Operator<U>,
    ctx: &RunContext<'_, U>,
    pos: usize,
) -> EvalResult<U> {
    match op {
        Operator::NextChar => eval_next_char(ctx, pos),
        Operator::Match(s) => eval_match(ctx, pos, s),
        Operator::Regex(re, desc) => eval_regex(ctx, pos, re, desc),
        Operator::TextOf(a) => eval_text_of(a, ctx, pos),
        Operator::Maybe(a) => eval_maybe(a, ctx, pos),
        Operator::Some(a) => eval_repeat(a, ctx, pos, true),
        Operator::Any(a) => eval_repeat(a, ctx, pos, false),
        Operator::And(a) => eval_and(a, ctx, pos),
        Operator::Not(a) => eval_not(a, ctx, pos),
        Operator::Sequence(ops) => eval_sequence(ops, ctx, pos),
        Operator::Choice(ops) => eval_choice(ops, ctx, pos),
        Operator::Action(a, f) => eval_action(a, f, ctx, pos),
        Operator::PreExec(f) => eval_pre_exec(f, ctx, pos, false),
        Operator::NegPreExec(f) => eval_pre_exec(f, ctx, pos, true),
        Operator::Label(name, a) => eval_label(name, a, ctx, pos),
        Operator::Call(name) => eval_call(name, name, ctx, pos),
        Operator::CallAs(alias, target) => eval_call(alias, target, ctx, pos),
    }
}

fn eval_next_char<U: Clone>(ctx: &RunContext<'_, U>, pos: usize) -> EvalResult<U> {
    match ctx.chars.get(pos) {
        Some(c) => matched((ctx.adapter)(MatchToken::Lexeme(c.to_string())), pos + 1),
        None => not_matched(FailureReason::expected_any(&ctx.chars, pos), pos),
    }
}

fn eval_match<U: Clone>(ctx: &RunContext<'_, U>, pos: usize, s: &str) -> EvalResult<U> {
    let n = s.chars().count();
    let end = pos + n;
    if end <= ctx.len() && ctx.slice(pos, end) == s {
        matched((ctx.adapter)(MatchToken::Lexeme(s.to_owned())), end)
    } else {
        not_matched(FailureReason::expected_value(s.to_owned(), &ctx.chars, pos), pos)
    }
}

fn eval_regex<U: Clone>(
    ctx: &RunContext<'_, U>,
    pos: usize,
    re: &regex::Regex,
    desc: &str,
) -> EvalResult<U> {
    let remainder = ctx.remainder(pos);
    match re.find(remainder) {
        Some(m) if m.start() == 0 => {
            let text = m.as_str().to_owned();
            let advanced = text.chars().count();
            matched((ctx.adapter)(MatchToken::Lexeme(text)), pos + advanced)
        }
        _ => not_matched(FailureReason::expected_regex(desc.to_owned(), &ctx.chars, pos), pos),
    }
}

fn eval_text_of<U: Clone>(a: &Operator<U>, ctx: &RunContext<'_, U>, pos: usize) -> EvalResult<U> {
    let inner = eval_operator(a, ctx, pos)?;
    let text = ctx.slice(pos, inner.pos).to_owned();
    matched((ctx.adapter)(MatchToken::Lexeme(text)), inner.pos)
}

fn eval_maybe<U: Clone>(a: &Operator<U>, ctx: &RunContext<'_, U>, pos: usize) -> EvalResult<U> {
    match eval_operator(a, ctx, pos) {
        Ok(m) => Ok(m),
        Err(_) => matched((ctx.adapter)(MatchToken::Lexeme(String::new())), pos),
    }
}

fn eval_repeat<U: Clone>(
    a: &Operator<U>,
    ctx: &RunContext<'_, U>,
    pos: usize,
    require_at_least_one: bool,
) -> EvalResult<U> {
    let mut tokens = Vec::new();
    let mut cur = pos;
    loop {
        match eval_operator(a, ctx, cur) {
            Ok(m) => {
                tokens.push(m.token);
                cur = m.pos;
            }
            Err(first_failure) if tokens.is_empty() && require_at_least_one => {
                return Err(first_failure);
            }
            Err(_) => break,
        }
    }
    matched((ctx.adapter)(MatchToken::Children(tokens)), cur)
}

fn eval_and<U: Clone>(a: &Operator<U>, ctx: &RunContext<'_, U>, pos: usize) -> EvalResult<U> {
    match eval_operator(a, ctx, pos) {
        Ok(_) => matched((ctx.adapter)(MatchToken::Lexeme(String::new())), pos),
        Err(failure) => Err(failure),
    }
}

fn eval_not<U: Clone>(a: &Operator<U>, ctx: &RunContext<'_, U>, pos: usize) -> EvalResult<U> {
    match eval_operator(a, ctx, pos) {
        Ok(_) => not_matched(FailureReason::expected_end_of_input(&ctx.chars, pos), pos),
        Err(_) => matched((ctx.adapter)(MatchToken::Lexeme(String::new())), pos),
    }
}

fn eval_sequence<U: Clone>(
    ops: &[Operator<U>],
    ctx: &RunContext<'_, U>,
    pos: usize,
) -> EvalResult<U> {
    let mut tokens = Vec::with_capacity(ops.len());
    let mut cur = pos;
    for op in ops {
        let m = eval_operator(op, ctx, cur)?;
        cur = m.pos;
        tokens.push(m.token);
    }
    matched((ctx.adapter)(MatchToken::Children(tokens)), cur)
}

fn eval_choice<U: Clone>(
    ops: &[Operator<U>],
    ctx: &RunContext<'_, U>,
    pos: usize,
) -> EvalResult<U> {
    let mut reasons = Vec::with_capacity(ops.len());
    for op in ops {
        match eval_operator(op, ctx, pos) {
            Ok(m) => return Ok(m),
            Err(failure) => {
                log::trace!("choice alternative failed at {pos}: {}", failure.reason);
                reasons.push(failure.reason)
            }
        }
    }
    not_matched(
        FailureReason::FollowingNestedOperator(reasons, ctx.sample_at(pos)),
        pos,
    )
}

fn eval_action<U: Clone>(
    a: &Operator<U>,
    f: &ActionFn<U>,
    ctx: &RunContext<'_, U>,
    pos: usize,
) -> EvalResult<U> {
    let inner = eval_operator(a, ctx, pos)?;
    let state = MatchState {
        pos: inner.pos,
        labels: &ctx.labels,
    };
    match f(inner.token.clone(), &state) {
        ActionOutcome::Pass(value) => matched(value, inner.pos),
        ActionOutcome::PassThrough => matched(inner.token, inner.pos),
        ActionOutcome::Fail => not_matched(
            FailureReason::ByExpectation(Expected::Any, Sample::Value(String::new())),
            inner.pos,
        ),
    }
}

fn eval_pre_exec<U: Clone>(
    f: &PreExecFn<U>,
    ctx: &RunContext<'_, U>,
    pos: usize,
    invert: bool,
) -> EvalResult<U> {
    let state = MatchState {
        pos,
        labels: &ctx.labels,
    };
    let outcome = f(&state);
    let should_continue = match (outcome, invert) {
        (PreExecOutcome::Continue, false) => true,
        (PreExecOutcome::Halt, false) => false,
        (PreExecOutcome::Halt, true) => true,
        (PreExecOutcome::Continue, true) => false,
    };
    if should_continue {
        matched((ctx.adapter)(MatchToken::Lexeme(String::new())), pos)
    } else {
        not_matched(FailureReason::expected_end_of_input(&ctx.chars, pos), pos)
    }
}

fn eval_label<U: Clone>(
    name: &str,
    a: &Operator<U>,
    ctx: &RunContext<'_, U>,
    pos: usize,
) -> EvalResult<U> {
    let inner = eval_operator(a, ctx, pos)?;
    ctx.labels.borrow_mut().insert(name.to_owned(), inner.token.clone());
    matched(inner.token, inner.pos)
}

fn eval_call<U: Clone>(
    report_as: &str,
    target: &str,
    ctx: &RunContext<'_, U>,
    pos: usize,
) -> EvalResult<U> {
    let Some(rule) = ctx.grammar.get_rule(target) else {
        return not_matched(
            FailureReason::expected_rule_definition(target.to_owned(), &ctx.chars, pos),
            pos,
        );
    };
    log::trace!("entering rule {report_as:?} at {pos}");
    match eval_operator(rule, ctx, pos) {
        Ok(m) => {
            log::trace!("rule {report_as:?} matched up to {}", m.pos);
            let wrapped = (ctx.adapter)(MatchToken::InRule(report_as.to_owned(), Box::new(m.token)));
            matched(wrapped, m.pos)
        }
        Err(failure) => {
            log::debug!("rule {report_as:?} failed at {}", failure.pos);
            Err(NotMatched {
                reason: FailureReason::FollowingRule(report_as.to_owned(), Box::new(failure.reason)),
                pos: failure.pos,
            })
        }
    }
}

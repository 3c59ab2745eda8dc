//! End-to-end scenarios (S1–S6) exercising the interpreter's documented behavior.

use std::rc::Rc;

use pegtree::prelude::*;
use pegtree::token::MatchToken;
use pretty_assertions::assert_eq;

/// A token shape that mirrors the engine's own `MatchToken` vocabulary exactly,
/// so tests can assert against the literal trees described in the scenarios.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Tok {
    Lexeme(String),
    Children(Vec<Tok>),
    InRule(String, Box<Tok>),
}

fn identity_adapter(token: MatchToken<Tok>) -> Tok {
    match token {
        MatchToken::Lexeme(s) => Tok::Lexeme(s),
        MatchToken::Children(cs) => Tok::Children(cs),
        MatchToken::InRule(name, inner) => Tok::InRule(name, inner),
        MatchToken::Custom(v) => v,
    }
}

fn lexeme(s: &str) -> Tok {
    Tok::Lexeme(s.to_string())
}

fn children(ts: Vec<Tok>) -> Tok {
    Tok::Children(ts)
}

fn parser_with(start: Operator<Tok>) -> Parser<Tok> {
    let grammar = Grammar::builder().rule("start", start).build();
    Parser::new(grammar, identity_adapter)
}

// S1 — literal match, with a mid-string failure sample and an
// expected-end-of-input failure on trailing input.
#[test]
fn s1_literal_match() {
    let parser = parser_with(match_str("abc"));

    assert_eq!(parser.parse("abc"), ParseOutcome::Matched(lexeme("abc")));

    assert_eq!(
        parser.parse("ab"),
        ParseOutcome::Failed(
            FailureReason::ByExpectation(Expected::Value("abc".into()), Sample::Value("a".into())),
            Position::new(0, 0),
        )
    );

    assert_eq!(
        parser.parse("abcd"),
        ParseOutcome::Failed(
            FailureReason::ByExpectation(Expected::EndOfInput, Sample::Value("d".into())),
            Position::new(0, 3),
        )
    );
}

// S2 — choice samples the character at its own entry position, not any
// individual alternative's.
#[test]
fn s2_choice_of_literals() {
    let parser = parser_with(choice(vec![match_str("a"), match_str("b"), match_str("c")]));

    assert_eq!(parser.parse("a"), ParseOutcome::Matched(lexeme("a")));
    assert_eq!(parser.parse("b"), ParseOutcome::Matched(lexeme("b")));
    assert_eq!(parser.parse("c"), ParseOutcome::Matched(lexeme("c")));

    assert_eq!(
        parser.parse("d"),
        ParseOutcome::Failed(
            FailureReason::FollowingNestedOperator(
                vec![
                    FailureReason::ByExpectation(Expected::Value("a".into()), Sample::Value("d".into())),
                    FailureReason::ByExpectation(Expected::Value("b".into()), Sample::Value("d".into())),
                    FailureReason::ByExpectation(Expected::Value("c".into()), Sample::Value("d".into())),
                ],
                Sample::Value("d".into()),
            ),
            Position::new(0, 0),
        )
    );
}

// S3 — sequence composition and `Maybe`'s total (never-fails) behavior.
#[test]
fn s3_sequence_with_maybe() {
    let parser = parser_with(sequence(vec![
        match_str("f"),
        match_str("o"),
        maybe(match_str("o")),
    ]));

    assert_eq!(
        parser.parse("foo"),
        ParseOutcome::Matched(children(vec![lexeme("f"), lexeme("o"), lexeme("o")]))
    );
    assert_eq!(
        parser.parse("fo"),
        ParseOutcome::Matched(children(vec![lexeme("f"), lexeme("o"), lexeme("")]))
    );
}

// S4 — `Some` over a regex, greedy repetition and first-iteration failure.
#[test]
fn s4_some_of_regex() {
    let parser = parser_with(some(regex("[0-9]", None)));

    assert_eq!(
        parser.parse("249"),
        ParseOutcome::Matched(children(vec![lexeme("2"), lexeme("4"), lexeme("9")]))
    );

    assert_eq!(
        parser.parse("abc"),
        ParseOutcome::Failed(
            FailureReason::ByExpectation(Expected::Regex("[0-9]".into()), Sample::Value("a".into())),
            Position::new(0, 0),
        )
    );
}

// S5 — `Call` wraps success and failure with the rule name; the start rule
// being itself a `Call` produces exactly one wrapping layer.
#[test]
fn s5_call_wraps_with_rule_name() {
    let grammar = Grammar::builder()
        .rule("test", match_str("foo"))
        .rule("start", call("test"))
        .build();
    let parser = Parser::new(grammar, identity_adapter);

    assert_eq!(
        parser.parse("foo"),
        ParseOutcome::Matched(Tok::InRule("test".into(), Box::new(lexeme("foo"))))
    );

    assert_eq!(
        parser.parse("bar"),
        ParseOutcome::Failed(
            FailureReason::FollowingRule(
                "test".into(),
                Box::new(FailureReason::ByExpectation(
                    Expected::Value("foo".into()),
                    Sample::Value("b".into())
                )),
            ),
            Position::new(0, 0),
        )
    );
}

// S6 — a label bound inside a sequence is visible to a later `Action` in the
// same sequence.
#[test]
fn s6_label_visible_to_later_action() {
    let pass_through_label = Rc::new(|_token: Tok, state: &MatchState<'_, Tok>| {
        ActionOutcome::Pass(state.label("a").expect("label a should be bound"))
    });

    let start = sequence(vec![
        label("a", match_str("foo")),
        match_str("bar"),
        action(match_str("x"), pass_through_label),
    ]);
    let parser = parser_with(start);

    assert_eq!(
        parser.parse("foobarx"),
        ParseOutcome::Matched(children(vec![lexeme("foo"), lexeme("bar"), lexeme("foo")]))
    );
}

#[test]
fn label_survives_backtracking_across_a_failed_alternative() {
    // Bind "a" inside the first, failing, alternative of a choice; the label
    // should still be readable afterwards, per the committed global-label policy.
    let read_label = Rc::new(|_token: Tok, state: &MatchState<'_, Tok>| match state.label("a") {
        Some(v) => ActionOutcome::Pass(v),
        None => ActionOutcome::Fail,
    });

    let start = sequence(vec![
        choice(vec![
            sequence(vec![label("a", match_str("x")), match_str("never")]),
            match_str("x"),
        ]),
        action(match_str("z"), read_label),
    ]);
    let parser = parser_with(start);

    // The first alternative binds "a" to Lexeme("x") but then fails on
    // "never", so the choice backtracks to its second alternative, which
    // matches "x" again from the choice's entry position. "a" remains bound
    // afterwards because labels are global to the run.
    assert_eq!(
        parser.parse("xz"),
        ParseOutcome::Matched(children(vec![lexeme("x"), lexeme("x")]))
    );
}

#[test]
fn not_and_and_never_advance_the_cursor() {
    let start = sequence(vec![and(match_str("a")), not(match_str("b")), match_str("a")]);
    let parser = parser_with(start);

    assert_eq!(
        parser.parse("a"),
        ParseOutcome::Matched(children(vec![lexeme(""), lexeme(""), lexeme("a")]))
    );
}

#[test]
fn missing_rule_definition_is_reported() {
    let parser = parser_with(call("missing"));
    match parser.parse("x") {
        ParseOutcome::Failed(FailureReason::ByExpectation(Expected::RuleDefinition(name), _), _) => {
            assert_eq!(name, "missing");
        }
        other => panic!("expected a missing rule-definition failure, got {other:?}"),
    }
}

// `PreExec` gates on the position it observes without consuming input; here it
// only allows the match to continue once at least two characters have been read.
#[test]
fn pre_exec_gates_on_position() {
    let past_second_char = Rc::new(|state: &MatchState<'_, Tok>| {
        if state.position() >= 2 {
            PreExecOutcome::Continue
        } else {
            PreExecOutcome::Halt
        }
    });

    let start = sequence(vec![
        any(match_str("a")),
        pre_exec(past_second_char),
        match_str("b"),
    ]);
    let parser = parser_with(start);

    assert_eq!(
        parser.parse("aab"),
        ParseOutcome::Matched(children(vec![
            children(vec![lexeme("a"), lexeme("a")]),
            lexeme(""),
            lexeme("b"),
        ]))
    );

    match parser.parse("ab") {
        ParseOutcome::Failed(FailureReason::ByExpectation(Expected::EndOfInput, _), _) => {}
        other => panic!("expected the pre_exec gate to reject position 1, got {other:?}"),
    }
}

// `NegPreExec` inverts the predicate's outcome: here it only allows the match to
// continue while the gate predicate says `Halt` (position has not yet reached 2).
#[test]
fn neg_pre_exec_inverts_the_predicate() {
    let past_second_char = Rc::new(|state: &MatchState<'_, Tok>| {
        if state.position() >= 2 {
            PreExecOutcome::Continue
        } else {
            PreExecOutcome::Halt
        }
    });

    let start = sequence(vec![
        any(match_str("a")),
        neg_pre_exec(past_second_char),
        match_str("b"),
    ]);
    let parser = parser_with(start);

    // One leading "a" keeps position at 1 when the gate runs, so `NegPreExec`
    // (wanting `Halt`) lets the match continue.
    assert_eq!(
        parser.parse("ab"),
        ParseOutcome::Matched(children(vec![children(vec![lexeme("a")]), lexeme(""), lexeme("b")]))
    );

    // Two leading "a"s push position to 2, so the gate now reports `Continue`,
    // which `NegPreExec` rejects.
    match parser.parse("aab") {
        ParseOutcome::Failed(FailureReason::ByExpectation(Expected::EndOfInput, _), _) => {}
        other => panic!("expected the neg_pre_exec gate to reject position 2, got {other:?}"),
    }
}

// `CallAs` wraps a successful match as `InRule(alias, _)`, not `InRule(target, _)`
// — the alias is what diagnostics and the match tree see, the target is only
// used to look the rule up.
#[test]
fn call_as_wraps_with_the_alias_not_the_target() {
    let grammar = Grammar::builder()
        .rule("digit", regex("[0-9]", None))
        .rule("start", call_as("number", "digit"))
        .build();
    let parser = Parser::new(grammar, identity_adapter);

    assert_eq!(
        parser.parse("7"),
        ParseOutcome::Matched(Tok::InRule("number".into(), Box::new(lexeme("7"))))
    );

    assert_eq!(
        parser.parse("x"),
        ParseOutcome::Failed(
            FailureReason::FollowingRule(
                "number".into(),
                Box::new(FailureReason::ByExpectation(
                    Expected::Regex("[0-9]".into()),
                    Sample::Value("x".into())
                )),
            ),
            Position::new(0, 0),
        )
    );
}

// `set_start_rule` retargets which rule `parse` runs from, per spec.md §6's
// "introspection helpers (optional but tested)".
#[test]
fn set_start_rule_retargets_the_parse() {
    let mut grammar = Grammar::builder()
        .rule("start", match_str("default"))
        .rule("other", match_str("alternate"))
        .build();
    assert_eq!(grammar.get_start_rule(), "start");

    grammar.set_start_rule("other");
    assert_eq!(grammar.get_start_rule(), "other");

    let parser = Parser::new(grammar, identity_adapter);

    assert_eq!(parser.parse("alternate"), ParseOutcome::Matched(lexeme("alternate")));
    assert!(!parser.parse("default").is_matched());
}

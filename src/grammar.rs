//! A named mapping from rule name to operator tree, with a designated start rule.

use std::collections::HashMap;

use crate::operator::Operator;

/// The default start-rule name, used when a [`GrammarBuilder`] is not told
/// otherwise.
pub const DEFAULT_START_RULE: &str = "start";

/// A grammar: a mapping from rule name to operator tree, plus the name of the
/// rule evaluation begins at.
///
/// The grammar is logically immutable for the duration of a parse run — it is
/// borrowed read-only by every recursive step of the interpreter.
pub struct Grammar<U> {
    rules: HashMap<String, Operator<U>>,
    start_rule: String,
}

impl<U> Grammar<U> {
    /// Start building a grammar.
    pub fn builder() -> GrammarBuilder<U> {
        GrammarBuilder::new()
    }

    /// Look up a rule's operator tree by name.
    pub fn get_rule(&self, name: &str) -> Option<&Operator<U>> {
        self.rules.get(name)
    }

    /// The name of the rule evaluation begins at.
    pub fn get_start_rule(&self) -> &str {
        &self.start_rule
    }

    /// Change which rule evaluation begins at.
    ///
    /// This does not validate that `name` is actually defined; a missing start
    /// rule is reported as a parse failure (`FailureReason::NoStartRule`) rather
    /// than rejected eagerly here, since a grammar's rules may legitimately be
    /// added after the start rule is chosen.
    pub fn set_start_rule(&mut self, name: impl Into<String>) {
        self.start_rule = name.into();
    }
}

/// Incrementally assembles a [`Grammar`] from `(rule_name, operator_tree)` pairs.
pub struct GrammarBuilder<U> {
    rules: HashMap<String, Operator<U>>,
    start_rule: String,
}

impl<U> GrammarBuilder<U> {
    /// An empty builder, with the default start-rule name (`"start"`).
    pub fn new() -> Self {
        Self {
            rules: HashMap::new(),
            start_rule: DEFAULT_START_RULE.to_owned(),
        }
    }

    /// Bind a rule name to an operator tree, overwriting any prior binding.
    pub fn rule(mut self, name: impl Into<String>, operator: Operator<U>) -> Self {
        self.rules.insert(name.into(), operator);
        self
    }

    /// Bind every `(rule_name, operator_tree)` pair in `rules`.
    pub fn rules(mut self, rules: impl IntoIterator<Item = (String, Operator<U>)>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Override the start-rule name (default `"start"`).
    pub fn start(mut self, name: impl Into<String>) -> Self {
        self.start_rule = name.into();
        self
    }

    /// Finish building the grammar.
    pub fn build(self) -> Grammar<U> {
        Grammar {
            rules: self.rules,
            start_rule: self.start_rule,
        }
    }
}

impl<U> Default for GrammarBuilder<U> {
    fn default() -> Self {
        Self::new()
    }
}

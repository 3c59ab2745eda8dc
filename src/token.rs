//! The shape of a successful match, before a caller's [`Adapter`] reduces it.

/// One successful match, in the engine's own vocabulary.
///
/// Every atomic or composite operator that succeeds produces a `MatchToken` and
/// immediately hands it to the run's [`Adapter`] to be reduced to the caller's
/// result type `U`. Composite variants (`Children`, `InRule`) therefore never
/// nest raw `MatchToken`s inside themselves — their children have already been
/// reduced to `U` by the time the parent sees them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchToken<U> {
    /// A literal matched substring.
    Lexeme(String),
    /// The already-adapted results of a sequence of sub-matches.
    Children(Vec<U>),
    /// The already-adapted result of a named rule invocation.
    InRule(String, Box<U>),
    /// An arbitrary user-domain value, produced by an [`Action`](crate::operator::Operator::Action)
    /// callback's `Pass` outcome. Adapters are expected to project this variant
    /// back out trivially.
    Custom(U),
}

/// A pure projection from the engine's [`MatchToken`] vocabulary to a caller's
/// result type `U`.
///
/// This is a capability (a plain function value), not a trait the caller's type
/// must implement — see the design note in the specification about preferring
/// composition over inheritance here. The interpreter carries `U`-typed values in
/// every internal result slot; `Adapter` is the single place a raw `MatchToken` is
/// ever constructed or consumed.
pub type Adapter<U> = dyn Fn(MatchToken<U>) -> U;

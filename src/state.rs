//! The input cursor and label map threaded through a single parse run.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::Sample;
use crate::grammar::Grammar;
use crate::token::Adapter;

/// Everything a single `parse` call needs that does not change as the cursor
/// advances: the input (as both code points and UTF-8 byte offsets, so `Regex`
/// and substring slicing never have to re-scan for character boundaries), the
/// grammar being evaluated, the adapter reducing raw matches to `U`, and the
/// run-global label map.
///
/// The label map uses interior mutability deliberately: per the committed policy
/// in the specification, labels are global to the run and are never rolled back
/// on backtracking, so there is nothing to save or restore around it.
pub(crate) struct RunContext<'g, U> {
    pub(crate) input: &'g str,
    pub(crate) chars: Vec<char>,
    pub(crate) byte_offsets: Vec<usize>,
    pub(crate) grammar: &'g Grammar<U>,
    pub(crate) adapter: &'g Adapter<U>,
    pub(crate) labels: RefCell<HashMap<String, U>>,
}

impl<'g, U> RunContext<'g, U> {
    pub(crate) fn new(input: &'g str, grammar: &'g Grammar<U>, adapter: &'g Adapter<U>) -> Self {
        let chars: Vec<char> = input.chars().collect();
        let mut byte_offsets = Vec::with_capacity(chars.len() + 1);
        let mut iter = input.char_indices().map(|(i, _)| i);
        for _ in 0..chars.len() {
            byte_offsets.push(iter.next().unwrap());
        }
        byte_offsets.push(input.len());

        Self {
            input,
            chars,
            byte_offsets,
            grammar,
            adapter,
            labels: RefCell::new(HashMap::new()),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.chars.len()
    }

    pub(crate) fn sample_at(&self, pos: usize) -> Sample {
        Sample::at(&self.chars, pos)
    }

    /// The substring `[start, end)`, in code-point terms, as a `&str`.
    pub(crate) fn slice(&self, start: usize, end: usize) -> &str {
        &self.input[self.byte_offsets[start]..self.byte_offsets[end]]
    }

    /// Everything from `pos` to the end of input, for anchored regex matching.
    pub(crate) fn remainder(&self, pos: usize) -> &str {
        &self.input[self.byte_offsets[pos]..]
    }
}

/// A read-only view of the run handed to [`Action`](crate::operator::Operator::Action),
/// [`PreExec`](crate::operator::Operator::PreExec) and
/// [`NegPreExec`](crate::operator::Operator::NegPreExec) callbacks.
///
/// Callbacks may read the current position and any label bound so far; they must
/// not, and cannot through this type, mutate the grammar or the cursor.
pub struct MatchState<'a, U> {
    pub(crate) pos: usize,
    pub(crate) labels: &'a RefCell<HashMap<String, U>>,
}

impl<'a, U> MatchState<'a, U> {
    /// The code-point offset the callback is observing the run at.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Read a previously bound label's value, if any.
    pub fn label(&self, name: &str) -> Option<U>
    where
        U: Clone,
    {
        self.labels.borrow().get(name).cloned()
    }
}

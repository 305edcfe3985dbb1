//! The accumulating run state and the result model
//!
//! A running case threads a [`RunState`] through its steps. Keys are either a
//! step's zero-based position or a step-declared name (an HTTP step records
//! its response under `response_name`); values are arbitrary JSON trees.
//! Keys are only ever added, never removed.

use std::fmt;

use serde_json::{json, Value};
use thiserror::Error;

use super::path::{self, LookupError};

/// A key in the run state: a step position or a step-declared name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum StateKey {
    /// Zero-based step position, e.g. the per-step success marker
    Index(usize),
    /// Step-declared symbolic name, e.g. an HTTP step's `response_name`
    Name(String),
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateKey::Index(i) => write!(f, "{i}"),
            StateKey::Name(name) => f.write_str(name),
        }
    }
}

impl From<usize> for StateKey {
    fn from(index: usize) -> Self {
        StateKey::Index(index)
    }
}

impl From<&str> for StateKey {
    fn from(name: &str) -> Self {
        StateKey::Name(name.to_string())
    }
}

/// The marker a step records at its own index on success.
pub fn success_marker() -> Value {
    json!({"success": true})
}

/// The key-value state accumulated across a case's steps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunState {
    entries: std::collections::BTreeMap<StateKey, Value>,
}

impl RunState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, key: &StateKey) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: impl Into<StateKey>, value: Value) {
        self.entries.insert(key.into(), value);
    }

    /// Record the success marker for the step at `index`.
    pub fn record_success(&mut self, index: usize) {
        self.insert(index, success_marker());
    }

    /// Resolve a dotted path against this state.
    ///
    /// The first segment selects a state entry by name (falling back to a
    /// step index if the segment is numeric); the remaining segments descend
    /// into that entry's value tree.
    pub fn resolve(&self, full_path: &str) -> Result<&Value, LookupError> {
        let (head, rest) = match full_path.split_once('.') {
            Some((head, rest)) => (head, rest),
            None => (full_path, ""),
        };

        let root = self
            .get(&StateKey::Name(head.to_string()))
            .or_else(|| {
                head.parse::<usize>()
                    .ok()
                    .and_then(|i| self.get(&StateKey::Index(i)))
            })
            .ok_or_else(|| LookupError::new(head, full_path))?;

        path::resolve(rest, root).map_err(|e| e.within(full_path))
    }
}

/// A terminal failure: the failing step's kind, position, and diagnostics.
///
/// Immutable once produced; evaluation stops at the step that produced it.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("step {step} ({kind}): {details}")]
pub struct RunError {
    /// Tag of the failing step's kind
    pub kind: &'static str,
    /// Zero-based index of the failing step
    pub step: usize,
    /// Arbitrary diagnostic payload
    pub details: Value,
}

/// The outcome of evaluating a case: the final state, or the first failure.
pub type RunResult = Result<RunState, RunError>;

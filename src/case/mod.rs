//! The test-case interpreter core
//!
//! A [`Case`] is an ordered sequence of typed [`Step`]s evaluated against an
//! accumulating [`RunState`]. Evaluation is a fold with short-circuit: the
//! first failing step produces a terminal [`RunError`] and no later step
//! runs, not even for side effects.

pub mod path;
pub mod state;
pub mod step;

pub use path::LookupError;
pub use state::{RunError, RunResult, RunState, StateKey};
pub use step::Step;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::collab::Runtime;
use crate::common::Result;

/// A named, ordered sequence of steps with descriptive tags.
///
/// Constructed once from a case record and never mutated afterward;
/// evaluation reads the case without altering it, so re-evaluation is legal
/// and deterministic given identical collaborator responses.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Case {
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Case {
    /// Build a case from its untyped JSON record.
    ///
    /// Fails on an unknown step `type` tag or a step record missing required
    /// fields; a malformed record never yields a partially-built case.
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Evaluate against an empty initial state.
    pub fn evaluate(&self, runtime: &Runtime) -> RunResult {
        self.evaluate_from(RunState::new(), runtime)
    }

    /// Fold the step sequence over `state` in declared order.
    ///
    /// Each step receives its zero-based index and the state so far; the
    /// first `RunError` is returned immediately. An empty case returns the
    /// initial state unchanged.
    pub fn evaluate_from(&self, mut state: RunState, runtime: &Runtime) -> RunResult {
        for (index, step) in self.steps.iter().enumerate() {
            debug!(case = %self.name, index, kind = step.tag(), "running step");
            state = step.evaluate(index, state, runtime)?;
        }
        Ok(state)
    }
}

//! stepwise - a declarative end-to-end test case runner
//!
//! A case is an ordered sequence of typed steps (HTTP calls, process
//! execution, assertions) evaluated against an accumulating key-value state.
//! Evaluation short-circuits at the first failing step, producing either the
//! final state or an error naming the failing step's kind, position, and
//! diagnostics.

pub mod case;
pub mod collab;
pub mod common;
pub mod runner;

// Re-export commonly used types for tests
pub use case::{Case, RunError, RunResult, RunState, StateKey, Step};
pub use collab::Runtime;
pub use common::{Error, Result};

//! Step variants and their evaluation contracts
//!
//! A step is one unit of a case: an HTTP call, a process execution, or an
//! assertion against the accumulated state. The set of kinds is closed; the
//! `type` tag in a step record selects the variant during deserialization,
//! and evaluation is a single exhaustive match, so adding a kind without
//! handling it everywhere is a compile error.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::collab::{PageResponse, ProcessRunner, Runtime};
use crate::common::{Error, Result};

use super::path::LookupError;
use super::state::{RunError, RunResult, RunState};

/// One unit of a case's operation set.
///
/// The serde tag doubles as the step's kind tag: it drives deserialization
/// dispatch and attributes failures in [`RunError::kind`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Step {
    /// GET a URL and record the response under `response_name`
    GetUrl { url: String, response_name: String },
    /// POST `body` to a URL and record the response under `response_name`
    PostUrl {
        url: String,
        body: Value,
        response_name: String,
    },
    /// PATCH `body` to a URL and record the response under `response_name`
    PatchUrl {
        url: String,
        body: Value,
        response_name: String,
    },
    /// Run a shell command (split on whitespace); non-zero exit fails
    Exec { command: String },
    /// Resolve `actual` against the state and compare with `expected`
    AssertEq { actual: String, expected: Value },
    /// Resolve `container` against the state and check it contains `content`
    AssertContains { container: String, content: String },
}

impl Step {
    /// The kind tag, as written in case files and in failure attribution.
    pub fn tag(&self) -> &'static str {
        match self {
            Step::GetUrl { .. } => "get_url",
            Step::PostUrl { .. } => "post_url",
            Step::PatchUrl { .. } => "patch_url",
            Step::Exec { .. } => "exec",
            Step::AssertEq { .. } => "assert_eq",
            Step::AssertContains { .. } => "assert_contains",
        }
    }

    /// Evaluate this step at `index`, either extending `state` or producing
    /// the terminal failure that halts the case.
    ///
    /// Collaborator faults (transport errors, spawn failures) are converted
    /// here; they never cross the evaluator boundary unconverted.
    pub fn evaluate(&self, index: usize, state: RunState, runtime: &Runtime) -> RunResult {
        match self {
            Step::GetUrl { url, response_name } => {
                self.record_response(index, state, runtime.http().get(url), response_name)
            }
            Step::PostUrl {
                url,
                body,
                response_name,
            } => self.record_response(index, state, runtime.http().post(url, body), response_name),
            Step::PatchUrl {
                url,
                body,
                response_name,
            } => self.record_response(index, state, runtime.http().patch(url, body), response_name),
            Step::Exec { command } => self.run_command(index, state, command, runtime.process()),
            Step::AssertEq { actual, expected } => self.check_eq(index, state, actual, expected),
            Step::AssertContains { container, content } => {
                self.check_contains(index, state, container, content)
            }
        }
    }

    fn fail(&self, index: usize, details: Value) -> RunError {
        RunError {
            kind: self.tag(),
            step: index,
            details,
        }
    }

    fn lookup_failure(&self, index: usize, lookup: LookupError) -> RunError {
        self.fail(
            index,
            json!({"missing": lookup.segment, "path": lookup.path}),
        )
    }

    fn record_response(
        &self,
        index: usize,
        mut state: RunState,
        response: Result<PageResponse>,
        response_name: &str,
    ) -> RunResult {
        match response {
            Ok(page) => {
                state.insert(response_name, page.to_value());
                state.record_success(index);
                Ok(state)
            }
            Err(fault) => Err(self.fail(index, json!({"fault": fault.to_string()}))),
        }
    }

    fn run_command(
        &self,
        index: usize,
        mut state: RunState,
        command: &str,
        process: &dyn ProcessRunner,
    ) -> RunResult {
        let mut parts = command.split_whitespace();
        let Some(program) = parts.next() else {
            return Err(self.fail(
                index,
                json!({"command": command, "fault": Error::EmptyCommand.to_string()}),
            ));
        };
        let args: Vec<&str> = parts.collect();

        match process.run(program, &args) {
            Ok(output) if output.success() => {
                state.record_success(index);
                Ok(state)
            }
            Ok(output) => Err(self.fail(
                index,
                json!({
                    "command": command,
                    "exit_code": output.exit_code,
                    "stderr": output.stderr,
                }),
            )),
            Err(fault) => Err(self.fail(
                index,
                json!({"command": command, "fault": fault.to_string()}),
            )),
        }
    }

    fn check_eq(
        &self,
        index: usize,
        mut state: RunState,
        actual_path: &str,
        expected: &Value,
    ) -> RunResult {
        let actual = match state.resolve(actual_path) {
            Ok(value) => value.clone(),
            Err(lookup) => return Err(self.lookup_failure(index, lookup)),
        };

        if &actual == expected {
            state.record_success(index);
            Ok(state)
        } else {
            Err(self.fail(index, json!({"expected": expected, "actual": actual})))
        }
    }

    fn check_contains(
        &self,
        index: usize,
        mut state: RunState,
        container_path: &str,
        content: &str,
    ) -> RunResult {
        let container = match state.resolve(container_path) {
            Ok(value) => value.clone(),
            Err(lookup) => return Err(self.lookup_failure(index, lookup)),
        };

        let found = match &container {
            Value::String(text) => text.contains(content),
            Value::Array(items) => items.iter().any(|item| item == &json!(content)),
            _ => false,
        };

        if found {
            state.record_success(index);
            Ok(state)
        } else {
            Err(self.fail(index, json!({"content": content, "container": container})))
        }
    }
}

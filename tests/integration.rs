//! End-to-end tests for the case interpreter
//!
//! These run real fixture case files through the full load -> evaluate path.
//! The HTTP collaborator is stubbed (with a call counter, so the
//! short-circuit contract is observable); exec steps spawn real processes.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde_json::{json, Value};

use stepwise::case::state::success_marker;
use stepwise::case::StateKey;
use stepwise::collab::{HttpClient, PageResponse, ShellRunner};
use stepwise::runner::{self, Outcome};
use stepwise::{Case, Error, Result, Runtime};

const LOGIN_HTML: &str = r#"
<html>
    <head><title>Login to continue</title></head>
    <body>
        You really want to login
    </body>
</html>
"#;

/// Stub transport serving a fixed HTML page, counting calls.
struct StubServer {
    status_code: u16,
    html: &'static str,
    calls: Arc<AtomicUsize>,
}

impl StubServer {
    fn runtime(status_code: u16, html: &'static str) -> (Runtime, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let runtime = Runtime::new(
            Box::new(StubServer {
                status_code,
                html,
                calls: Arc::clone(&calls),
            }),
            Box::new(ShellRunner),
        );
        (runtime, calls)
    }
}

impl HttpClient for StubServer {
    fn get(&self, _url: &str) -> Result<PageResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(PageResponse::from_html(self.status_code, self.html))
    }

    fn post(&self, url: &str, _body: &Value) -> Result<PageResponse> {
        self.get(url)
    }

    fn patch(&self, url: &str, _body: &Value) -> Result<PageResponse> {
        self.get(url)
    }
}

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

#[test]
fn login_case_passes_end_to_end() {
    let case = runner::load_case(&fixture("login.e2e.json")).unwrap();
    assert_eq!(case.name, "Login screen");
    assert_eq!(case.tags, vec!["no-auth"]);

    let (runtime, calls) = StubServer::runtime(200, LOGIN_HTML);
    let state = case.evaluate(&runtime).unwrap();

    // one success marker per step, plus the recorded response
    for index in 0..4 {
        assert_eq!(state.get(&StateKey::Index(index)), Some(&success_marker()));
    }
    assert_eq!(state.len(), 5);

    assert_eq!(
        state.resolve("login_response.status_code").unwrap(),
        &json!(200)
    );
    assert_eq!(
        state.resolve("login_response.html.title").unwrap(),
        &json!("Login to continue")
    );
    let content = state.resolve("login_response.html.content").unwrap();
    assert!(content
        .as_str()
        .unwrap()
        .contains("You really want to login"));

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn wrong_status_fails_at_the_first_assertion() {
    let case = runner::load_case(&fixture("login.e2e.json")).unwrap();
    let (runtime, calls) = StubServer::runtime(500, LOGIN_HTML);

    let err = case.evaluate(&runtime).unwrap_err();
    assert_eq!(err.step, 1);
    assert_eq!(err.kind, "assert_eq");
    assert_eq!(err.details, json!({"expected": 200, "actual": 500}));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn unknown_step_type_fails_at_load_time() {
    let err = runner::load_case(&fixture("unknown_step.e2e.json")).unwrap_err();
    assert!(matches!(err, Error::CaseParse { .. }));
    assert!(err.to_string().contains("frobnicate"));
}

#[test]
fn exec_nonzero_exit_fails() {
    // regression: a failing exec step must halt the case, never be masked
    // by the success marker
    let case = Case::from_value(json!({
        "name": "exec failure",
        "steps": [
            {"type": "exec", "command": "true"},
            {"type": "exec", "command": "false"},
            {"type": "exec", "command": "true"},
        ],
    }))
    .unwrap();

    let err = case.evaluate(&Runtime::live()).unwrap_err();
    assert_eq!(err.step, 1);
    assert_eq!(err.kind, "exec");
    assert_eq!(err.details["exit_code"], json!(1));
}

#[test]
fn exec_success_records_marker() {
    let case = Case::from_value(json!({
        "name": "exec ok",
        "steps": [{"type": "exec", "command": "echo hello"}],
    }))
    .unwrap();

    let state = case.evaluate(&Runtime::live()).unwrap();
    assert_eq!(state.get(&StateKey::Index(0)), Some(&success_marker()));
    assert_eq!(state.len(), 1);
}

#[test]
fn run_path_reports_every_case_under_a_directory() {
    let dir = tempfile::tempdir().unwrap();

    std::fs::write(
        dir.path().join("a_passing.e2e.json"),
        json!({
            "name": "passing",
            "steps": [{"type": "exec", "command": "true"}],
        })
        .to_string(),
    )
    .unwrap();
    std::fs::write(
        dir.path().join("b_failing.e2e.json"),
        json!({
            "name": "failing",
            "steps": [{"type": "exec", "command": "false"}],
        })
        .to_string(),
    )
    .unwrap();
    std::fs::write(dir.path().join("c_broken.e2e.json"), "{not json").unwrap();

    let reports = runner::run_path(dir.path(), &Runtime::live()).unwrap();
    assert_eq!(reports.len(), 3);

    assert!(matches!(reports[0].outcome, Outcome::Passed));
    match &reports[1].outcome {
        Outcome::Failed(err) => {
            assert_eq!(err.kind, "exec");
            assert_eq!(err.step, 0);
        }
        other => panic!("expected a step failure, got {other:?}"),
    }
    assert!(matches!(reports[2].outcome, Outcome::LoadError(_)));

    assert!(!runner::all_passed(&reports));
}

//! External collaborators
//!
//! Everything a step reaches outside the process for lives behind a trait
//! here, so the interpreter core stays pure and tests can substitute stubs.

pub mod http;
pub mod process;

pub use http::{HttpClient, PageResponse, WebClient};
pub use process::{ExecOutput, ProcessRunner, ShellRunner};

/// The collaborator bundle handed to step evaluation.
pub struct Runtime {
    http: Box<dyn HttpClient>,
    process: Box<dyn ProcessRunner>,
}

impl Runtime {
    pub fn new(http: Box<dyn HttpClient>, process: Box<dyn ProcessRunner>) -> Self {
        Self { http, process }
    }

    /// The live runtime: real HTTP transport, real process spawns.
    pub fn live() -> Self {
        Self::new(Box::new(WebClient::new()), Box::new(ShellRunner))
    }

    pub fn http(&self) -> &dyn HttpClient {
        self.http.as_ref()
    }

    pub fn process(&self) -> &dyn ProcessRunner {
        self.process.as_ref()
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::live()
    }
}

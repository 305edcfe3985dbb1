//! Case-file discovery and per-case reporting
//!
//! Given a path, collects every `*.e2e.json` under it (or the file itself),
//! loads each into a [`Case`], evaluates it, and prints one report line per
//! case.

use std::path::{Path, PathBuf};

use colored::Colorize;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::case::{Case, RunError};
use crate::collab::Runtime;
use crate::common::{Error, Result};

/// File suffix that marks a case file during directory discovery.
pub const CASE_FILE_SUFFIX: &str = ".e2e.json";

/// Per-case outcome as reported to the user.
///
/// A file that fails to parse gets its own report line instead of aborting
/// the whole run; the process still exits non-zero.
#[derive(Debug)]
pub enum Outcome {
    Passed,
    Failed(RunError),
    LoadError(Error),
}

impl Outcome {
    pub fn passed(&self) -> bool {
        matches!(self, Outcome::Passed)
    }
}

/// One evaluated case file and its outcome.
#[derive(Debug)]
pub struct CaseReport {
    pub path: PathBuf,
    pub outcome: Outcome,
}

/// Collect the case files under `path`, sorted for a deterministic run
/// order. A file path is returned as-is without suffix filtering.
pub fn discover(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|p| {
            p.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.ends_with(CASE_FILE_SUFFIX))
        })
        .collect();
    files.sort();

    if files.is_empty() {
        return Err(Error::NoCasesFound {
            path: path.display().to_string(),
            suffix: CASE_FILE_SUFFIX.to_string(),
        });
    }
    Ok(files)
}

/// Load a single case file.
pub fn load_case(path: &Path) -> Result<Case> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::file_read(path, e))?;
    serde_json::from_str(&content).map_err(|e| Error::case_parse(path, e))
}

/// Discover, load, and evaluate every case under `path`.
pub fn run_path(path: &Path, runtime: &Runtime) -> Result<Vec<CaseReport>> {
    let files = discover(path)?;
    let mut reports = Vec::with_capacity(files.len());

    for file in files {
        let outcome = match load_case(&file) {
            Ok(case) => {
                info!(case = %case.name, file = %file.display(), "running case");
                match case.evaluate(runtime) {
                    Ok(_) => Outcome::Passed,
                    Err(err) => Outcome::Failed(err),
                }
            }
            Err(err) => {
                warn!(file = %file.display(), %err, "failed to load case");
                Outcome::LoadError(err)
            }
        };
        reports.push(CaseReport {
            path: file,
            outcome,
        });
    }
    Ok(reports)
}

/// Print one line for a case: `<path> - PASSED` or the failure.
pub fn print_report(report: &CaseReport) {
    let path = report.path.display();
    match &report.outcome {
        Outcome::Passed => {
            println!("{path} - {}", "PASSED".green().bold());
        }
        Outcome::Failed(err) => {
            println!(
                "{path} - {} at step {} ({}): {}",
                "FAILED".red().bold(),
                err.step,
                err.kind,
                err.details
            );
        }
        Outcome::LoadError(err) => {
            println!("{path} - {}: {err}", "LOAD ERROR".red().bold());
        }
    }
}

pub fn all_passed(reports: &[CaseReport]) -> bool {
    reports.iter().all(|report| report.outcome.passed())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn discover_returns_single_file_as_is() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("anything.json");
        fs::write(&file, "{}").unwrap();

        let found = discover(&file).unwrap();
        assert_eq!(found, vec![file]);
    }

    #[test]
    fn discover_walks_directories_recursively_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("b.e2e.json"), "{}").unwrap();
        fs::write(dir.path().join("nested/a.e2e.json"), "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::write(dir.path().join("other.json"), "{}").unwrap();

        let found = discover(dir.path()).unwrap();
        assert_eq!(
            found,
            vec![
                dir.path().join("b.e2e.json"),
                dir.path().join("nested/a.e2e.json"),
            ]
        );
    }

    #[test]
    fn discover_empty_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = discover(dir.path()).unwrap_err();
        assert!(matches!(err, Error::NoCasesFound { .. }));
    }

    #[test]
    fn load_case_reports_parse_errors_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("bad.e2e.json");
        fs::write(&file, "{not json").unwrap();

        let err = load_case(&file).unwrap_err();
        assert!(matches!(err, Error::CaseParse { .. }));
        assert!(err.to_string().contains("bad.e2e.json"));
    }

    #[test]
    fn load_case_missing_file_is_a_read_error() {
        let err = load_case(Path::new("/nonexistent/case.e2e.json")).unwrap_err();
        assert!(matches!(err, Error::FileRead { .. }));
    }
}

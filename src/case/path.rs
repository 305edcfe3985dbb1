//! Dotted-path lookup into JSON value trees
//!
//! Paths are split on `.` and resolved one segment at a time: objects are
//! indexed by key, arrays by numeric segment. Resolution never mutates its
//! input; an empty path returns the root unchanged.

use serde_json::Value;
use thiserror::Error;

/// A path segment that could not be resolved.
///
/// Carries the full original path alongside the missing segment so the
/// diagnostic reads well even for deeply nested lookups.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no entry '{segment}' while resolving '{path}'")]
pub struct LookupError {
    /// The single segment that could not be found
    pub segment: String,
    /// The full dotted path being resolved
    pub path: String,
}

impl LookupError {
    pub(crate) fn new(segment: &str, path: &str) -> Self {
        Self {
            segment: segment.to_string(),
            path: path.to_string(),
        }
    }

    /// Re-attribute this error to the full path it was part of.
    ///
    /// Used when a sub-tree resolution is one leg of a longer path.
    pub(crate) fn within(mut self, path: &str) -> Self {
        self.path = path.to_string();
        self
    }
}

/// Resolve a dotted path against a nested value.
///
/// ```
/// use serde_json::json;
/// use stepwise::case::path::resolve;
///
/// let root = json!({"k0": {"k1": {"k2": 42}}});
/// assert_eq!(resolve("k0.k1.k2", &root).unwrap(), &json!(42));
/// assert_eq!(resolve("", &root).unwrap(), &root);
/// ```
pub fn resolve<'a>(path: &str, root: &'a Value) -> Result<&'a Value, LookupError> {
    if path.is_empty() {
        return Ok(root);
    }

    let mut current = root;
    for segment in path.split('.') {
        current = index(current, segment).ok_or_else(|| LookupError::new(segment, path))?;
    }
    Ok(current)
}

/// Index one level down: object by key, array by numeric segment.
fn index<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

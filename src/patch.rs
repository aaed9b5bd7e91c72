//! Dotted-path partial updates for the readiness assessment.
//!
//! Paths address the serialized field names, e.g.
//! `traumaDesignation.verificationBodies.acs`. A path that does not resolve
//! inside the record is a hard error; nothing is ever created or silently
//! dropped. The input record is never mutated, so callers keep a pristine
//! copy until they decide to persist the returned one.

use serde_json::Value;
use thiserror::Error;

use crate::assessment::ReadinessAssessment;

#[derive(Error, Debug)]
pub enum PatchError {
    #[error("invalid field path '{path}': no field '{segment}' at that position")]
    InvalidPath { path: String, segment: String },
    #[error("value does not fit the field at '{path}': {source}")]
    InvalidValue {
        path: String,
        source: serde_json::Error,
    },
}

/// Replaces the leaf (or sub-object) at `path` with `value` and returns the
/// updated record. All sibling branches are carried over untouched.
pub fn set_field(
    assessment: &ReadinessAssessment,
    path: &str,
    value: Value,
) -> Result<ReadinessAssessment, PatchError> {
    let mut root = serde_json::to_value(assessment).map_err(|source| PatchError::InvalidValue {
        path: path.to_string(),
        source,
    })?;

    let slot = resolve_mut(&mut root, path)?;
    *slot = value;

    serde_json::from_value(root).map_err(|source| PatchError::InvalidValue {
        path: path.to_string(),
        source,
    })
}

/// Reads the value at `path` from the record.
pub fn get_field(assessment: &ReadinessAssessment, path: &str) -> Result<Value, PatchError> {
    let mut root = serde_json::to_value(assessment).map_err(|source| PatchError::InvalidValue {
        path: path.to_string(),
        source,
    })?;
    Ok(resolve_mut(&mut root, path)?.take())
}

fn resolve_mut<'a>(root: &'a mut Value, path: &str) -> Result<&'a mut Value, PatchError> {
    let invalid = |segment: &str| PatchError::InvalidPath {
        path: path.to_string(),
        segment: segment.to_string(),
    };

    if path.is_empty() {
        return Err(invalid(""));
    }

    let mut current = root;
    for segment in path.split('.') {
        current = current
            .as_object_mut()
            .and_then(|obj| obj.get_mut(segment))
            .ok_or_else(|| invalid(segment))?;
    }
    Ok(current)
}

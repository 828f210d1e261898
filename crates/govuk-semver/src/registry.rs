//! Candidate versions from package registry listings
//!
//! Accepts either a bare JSON array of version strings or an npm-style
//! package document, whose `versions` member is keyed by version.

use serde_json::Value;

use crate::VersionError;

/// Collect candidate version strings from a listing
pub fn candidates(document: &Value) -> Result<Vec<String>, VersionError> {
    match document {
        Value::Array(items) => items.iter().map(as_version_string).collect(),
        Value::Object(map) => match map.get("versions") {
            Some(Value::Object(versions)) => Ok(versions.keys().cloned().collect()),
            Some(Value::Array(items)) => items.iter().map(as_version_string).collect(),
            Some(other) => Err(VersionError::TypeMismatch(other.to_string())),
            None => Err(VersionError::TypeMismatch("package document without \"versions\"".to_string())),
        },
        other => Err(VersionError::TypeMismatch(other.to_string())),
    }
}

/// Look up a dist-tag (`latest`, `next`, ...) in a package document
pub fn dist_tag<'a>(document: &'a Value, tag: &str) -> Option<&'a str> {
    document.get("dist-tags")?.get(tag)?.as_str()
}

fn as_version_string(value: &Value) -> Result<String, VersionError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| VersionError::TypeMismatch(value.to_string()))
}

// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Input field model.
//!
//! Values under validation are either plain text or file-upload
//! descriptors. The typed [`Field`] view replaces positional parameter
//! arrays: a rule always receives the field name and the value under test
//! as named fields, never by index.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A raw input value for one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A plain scalar value, already extracted to text.
    Text(String),
    /// An uploaded-file descriptor.
    File(FileUpload),
}

impl Value {
    /// A text value.
    pub fn text(value: impl Into<String>) -> Self {
        Value::Text(value.into())
    }

    /// A file-upload value with the given original file name.
    pub fn file(name: impl Into<String>) -> Self {
        Value::File(FileUpload {
            name: name.into(),
            size: None,
        })
    }

    /// The text content, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            Value::File(_) => None,
        }
    }

    /// True for a text value with zero length.
    pub fn is_empty_text(&self) -> bool {
        matches!(self, Value::Text(s) if s.is_empty())
    }
}

/// An uploaded-file descriptor. Carries at least the original file name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileUpload {
    /// Original file name; empty when no file was submitted.
    pub name: String,

    /// Size in bytes, when known.
    #[serde(default)]
    pub size: Option<u64>,
}

/// Input data for one validation pass: field name to raw value.
///
/// A `BTreeMap` keeps iteration order deterministic, so repeated passes
/// over the same data produce identical reports.
pub type FieldData = BTreeMap<String, Value>;

/// One field under evaluation: the name and the value under test.
#[derive(Debug, Clone, Copy)]
pub struct Field<'a> {
    /// Field name, used for lookups and `:field:` message substitution.
    pub name: &'a str,
    /// The value under test.
    pub value: &'a Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_text() {
        let value = Value::text("hello");
        assert_eq!(value.as_text(), Some("hello"));
        assert!(!value.is_empty_text());
    }

    #[test]
    fn test_value_empty_text() {
        assert!(Value::text("").is_empty_text());
        assert!(!Value::file("").is_empty_text());
    }

    #[test]
    fn test_value_file_has_no_text() {
        let value = Value::file("avatar.png");
        assert_eq!(value.as_text(), None);
    }

    #[test]
    fn test_value_deserialize_untagged() {
        let text: Value = serde_json::from_str("\"a@b.com\"").unwrap();
        assert_eq!(text, Value::text("a@b.com"));

        let file: Value = serde_json::from_str(r#"{"name": "cv.pdf", "size": 1024}"#).unwrap();
        match file {
            Value::File(upload) => {
                assert_eq!(upload.name, "cv.pdf");
                assert_eq!(upload.size, Some(1024));
            }
            Value::Text(_) => panic!("expected file descriptor"),
        }
    }
}

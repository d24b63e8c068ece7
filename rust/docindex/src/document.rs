//! Documents: JSON objects mapping field names to values.

use std::borrow::Cow;

use docindex_common::{Result, error::Error};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single document.
///
/// Only scalar field values (strings, numbers and booleans) take part in
/// indexing; `null`, arrays and nested objects are carried along untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(Map<String, Value>);

impl Document {
    /// Converts a JSON value into a document. Fails for anything but an object.
    pub fn from_value(value: Value) -> Result<Document> {
        match value {
            Value::Object(fields) => Ok(Document(fields)),
            other => Err(Error::invalid_format_msg(
                "document",
                format!("expected a JSON object, found {}", value_kind(&other)),
            )),
        }
    }

    /// Text of a scalar field, or `None` when the field is missing or not a scalar.
    pub fn field_text(&self, field: &str) -> Option<Cow<'_, str>> {
        match self.0.get(field)? {
            Value::String(s) => Some(Cow::Borrowed(s.as_str())),
            Value::Number(n) => Some(Cow::Owned(n.to_string())),
            Value::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// The document reference stored in `ref_field`: a non-blank string, or a
    /// number rendered as text.
    pub fn ref_value(&self, ref_field: &str) -> Option<Cow<'_, str>> {
        match self.0.get(ref_field)? {
            Value::String(s) if !s.trim().is_empty() => Some(Cow::Borrowed(s.as_str())),
            Value::Number(n) => Some(Cow::Owned(n.to_string())),
            _ => None,
        }
    }
}

impl From<Map<String, Value>> for Document {
    fn from(fields: Map<String, Value>) -> Document {
        Document(fields)
    }
}

/// Flattens one stored submission into documents: an object is one document,
/// an array contributes each of its elements.
///
/// `source` names the submission in the error raised for any other shape.
pub fn flatten_value(value: Value, source: &str) -> Result<Vec<Document>> {
    match value {
        Value::Object(fields) => Ok(vec![Document(fields)]),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::Object(fields) => Ok(Document(fields)),
                other => Err(Error::invalid_format_msg(
                    source,
                    format!("element {i} is {}, expected an object", value_kind(&other)),
                )),
            })
            .collect(),
        other => Err(Error::invalid_format_msg(
            source,
            format!(
                "expected an object or an array of objects, found {}",
                value_kind(&other)
            ),
        )),
    }
}

pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

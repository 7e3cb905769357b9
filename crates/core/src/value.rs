//! Argument value model.
//!
//! A parameter is read from its source as a [`RawParam`] and turned into an
//! [`ArgValue`] by the coercer bound at registration time.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// A parameter value as read from the request, before coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum RawParam {
    /// The source had no value for this parameter.
    Absent,
    /// A textual value (path segment, query-string entry, or text body).
    Text(String),
    /// An already-structured value (a JSON request body).
    Json(serde_json::Value),
}

impl RawParam {
    /// Whether the value is absent or an empty string.
    ///
    /// Coercers treat both the same way, matching the query-string world
    /// where `?flag=` and a missing `flag` are indistinguishable in intent.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Absent => true,
            Self::Text(s) => s.is_empty(),
            Self::Json(v) => v.is_null(),
        }
    }
}

/// A coerced handler argument.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ArgValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Date(DateTime<Utc>),
    Json(serde_json::Value),
}

impl ArgValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(v) => Some(v),
            _ => None,
        }
    }
}

/// Request-time coercion failure.
///
/// Rendered by the router as a 400 rather than letting garbage reach the
/// handler.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("expected {expected}, got {got}")]
pub struct CoerceError {
    pub expected: &'static str,
    pub got: String,
}

impl CoerceError {
    pub fn new(expected: &'static str, got: impl Into<String>) -> Self {
        Self {
            expected,
            got: got.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_covers_absent_empty_and_json_null() {
        assert!(RawParam::Absent.is_blank());
        assert!(RawParam::Text(String::new()).is_blank());
        assert!(RawParam::Json(serde_json::Value::Null).is_blank());
        assert!(!RawParam::Text("x".to_string()).is_blank());
        assert!(!RawParam::Json(serde_json::json!({})).is_blank());
    }

    #[test]
    fn accessors_reject_mismatched_variants() {
        assert_eq!(ArgValue::Int(7).as_i64(), Some(7));
        assert_eq!(ArgValue::Int(7).as_str(), None);
        assert_eq!(ArgValue::Str("a".to_string()).as_str(), Some("a"));
        assert_eq!(ArgValue::Null.as_bool(), None);
    }

    #[test]
    fn ints_widen_to_float_but_not_the_reverse() {
        assert_eq!(ArgValue::Int(2).as_f64(), Some(2.0));
        assert_eq!(ArgValue::Float(2.5).as_i64(), None);
    }

    #[test]
    fn arg_values_serialize_untagged() {
        assert_eq!(
            serde_json::to_value(ArgValue::Int(3)).unwrap(),
            serde_json::json!(3)
        );
        assert_eq!(
            serde_json::to_value(ArgValue::Null).unwrap(),
            serde_json::Value::Null
        );
    }
}

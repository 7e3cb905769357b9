//! Type coercers and the process-wide suffix registry.
//!
//! The registry is seeded with the built-in suffixes on first use. Callers
//! can add (or replace) entries with [`register_coercer`]; lookups clone the
//! `Arc`, so replacing an entry never affects routes that were already wired.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, RwLock};

use chrono::{DateTime, Utc};

use crate::error::ConventionError;
use crate::value::{ArgValue, CoerceError, RawParam};

/// A coercer turns a raw parameter into a handler argument.
pub type Coercer = Arc<dyn Fn(RawParam) -> Result<ArgValue, CoerceError> + Send + Sync>;

static REGISTRY: LazyLock<RwLock<HashMap<String, Coercer>>> =
    LazyLock::new(|| RwLock::new(builtin_coercers()));

/// Look up the coercer registered for a type suffix (case-insensitive).
pub fn lookup_coercer(suffix: &str) -> Option<Coercer> {
    // A panic elsewhere can poison the lock; the map itself stays valid.
    let registry = REGISTRY
        .read()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    registry.get(&suffix.to_ascii_lowercase()).cloned()
}

/// Register a coercer for a type suffix, replacing any existing entry.
///
/// The suffix is lowercased, so `register_coercer("UUID", ..)` and a
/// `qs_id_uuid` parameter token refer to the same entry.
pub fn register_coercer(
    suffix: &str,
    coercer: impl Fn(RawParam) -> Result<ArgValue, CoerceError> + Send + Sync + 'static,
) -> Result<(), ConventionError> {
    if suffix.trim().is_empty() {
        return Err(ConventionError::EmptySuffix);
    }
    let suffix = suffix.to_ascii_lowercase();
    tracing::debug!(suffix = %suffix, "registering type coercer");
    let mut registry = REGISTRY
        .write()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    registry.insert(suffix, Arc::new(coercer));
    Ok(())
}

fn builtin_coercers() -> HashMap<String, Coercer> {
    let mut map: HashMap<String, Coercer> = HashMap::new();
    let mut put = |suffixes: &[&str], coercer: Coercer| {
        for s in suffixes {
            map.insert((*s).to_string(), coercer.clone());
        }
    };

    put(&["i", "int", "integer"], Arc::new(coerce_int));
    put(
        &["f", "float", "f32", "double", "f64", "n", "number"],
        Arc::new(coerce_float),
    );
    put(&["b", "bool", "boolean"], Arc::new(coerce_bool));
    put(&["o", "obj", "object"], Arc::new(coerce_object));
    put(&["d", "date"], Arc::new(coerce_date));
    put(&["s", "str", "string"], Arc::new(coerce_string));
    put(&["raw"], Arc::new(coerce_raw));
    map
}

fn coerce_int(raw: RawParam) -> Result<ArgValue, CoerceError> {
    if raw.is_blank() {
        return Ok(ArgValue::Int(0));
    }
    match raw {
        RawParam::Text(s) => s
            .trim()
            .parse::<i64>()
            .map(ArgValue::Int)
            .map_err(|_| CoerceError::new("integer", s)),
        RawParam::Json(v) => match v.as_i64() {
            Some(i) => Ok(ArgValue::Int(i)),
            None => match v.as_str() {
                Some(s) => coerce_int(RawParam::Text(s.to_string())),
                None => Err(CoerceError::new("integer", v.to_string())),
            },
        },
        RawParam::Absent => unreachable!("blank handled above"),
    }
}

fn coerce_float(raw: RawParam) -> Result<ArgValue, CoerceError> {
    if raw.is_blank() {
        return Ok(ArgValue::Float(0.0));
    }
    match raw {
        RawParam::Text(s) => s
            .trim()
            .parse::<f64>()
            .map(ArgValue::Float)
            .map_err(|_| CoerceError::new("number", s)),
        RawParam::Json(v) => match v.as_f64() {
            Some(f) => Ok(ArgValue::Float(f)),
            None => match v.as_str() {
                Some(s) => coerce_float(RawParam::Text(s.to_string())),
                None => Err(CoerceError::new("number", v.to_string())),
            },
        },
        RawParam::Absent => unreachable!("blank handled above"),
    }
}

fn coerce_bool(raw: RawParam) -> Result<ArgValue, CoerceError> {
    if raw.is_blank() {
        return Ok(ArgValue::Bool(false));
    }
    match raw {
        RawParam::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(ArgValue::Bool(true)),
            "false" | "0" | "no" | "off" => Ok(ArgValue::Bool(false)),
            _ => Err(CoerceError::new("boolean", s)),
        },
        RawParam::Json(v) => match v {
            serde_json::Value::Bool(b) => Ok(ArgValue::Bool(b)),
            serde_json::Value::String(s) => coerce_bool(RawParam::Text(s)),
            other => Err(CoerceError::new("boolean", other.to_string())),
        },
        RawParam::Absent => unreachable!("blank handled above"),
    }
}

fn coerce_object(raw: RawParam) -> Result<ArgValue, CoerceError> {
    match raw {
        RawParam::Absent => Ok(ArgValue::Null),
        RawParam::Text(s) => {
            if s.is_empty() {
                return Ok(ArgValue::Null);
            }
            serde_json::from_str(&s)
                .map(ArgValue::Json)
                .map_err(|_| CoerceError::new("JSON", s))
        }
        RawParam::Json(v) => Ok(ArgValue::Json(v)),
    }
}

fn coerce_date(raw: RawParam) -> Result<ArgValue, CoerceError> {
    if raw.is_blank() {
        return Ok(ArgValue::Null);
    }
    let text = match raw {
        RawParam::Text(s) => s,
        RawParam::Json(v) => match v.as_str() {
            Some(s) => s.to_string(),
            None => return Err(CoerceError::new("RFC 3339 date", v.to_string())),
        },
        RawParam::Absent => unreachable!("blank handled above"),
    };
    DateTime::parse_from_rfc3339(text.trim())
        .map(|d| ArgValue::Date(d.with_timezone(&Utc)))
        .map_err(|_| CoerceError::new("RFC 3339 date", text))
}

fn coerce_string(raw: RawParam) -> Result<ArgValue, CoerceError> {
    match raw {
        RawParam::Absent => Ok(ArgValue::Null),
        RawParam::Text(s) => Ok(ArgValue::Str(s)),
        RawParam::Json(v) => match v {
            serde_json::Value::Null => Ok(ArgValue::Null),
            serde_json::Value::String(s) => Ok(ArgValue::Str(s)),
            other => Ok(ArgValue::Str(other.to_string())),
        },
    }
}

fn coerce_raw(raw: RawParam) -> Result<ArgValue, CoerceError> {
    match raw {
        RawParam::Absent => Ok(ArgValue::Null),
        RawParam::Text(s) => Ok(ArgValue::Str(s)),
        RawParam::Json(v) => Ok(ArgValue::Json(v)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(suffix: &str, raw: RawParam) -> Result<ArgValue, CoerceError> {
        lookup_coercer(suffix).expect("builtin suffix")(raw)
    }

    #[test]
    fn int_defaults_to_zero_when_blank() {
        assert_eq!(run("int", RawParam::Absent).unwrap(), ArgValue::Int(0));
        assert_eq!(
            run("i", RawParam::Text(String::new())).unwrap(),
            ArgValue::Int(0)
        );
    }

    #[test]
    fn int_parses_text_and_rejects_garbage() {
        assert_eq!(
            run("integer", RawParam::Text(" 42 ".to_string())).unwrap(),
            ArgValue::Int(42)
        );
        assert!(run("int", RawParam::Text("forty".to_string())).is_err());
    }

    #[test]
    fn float_aliases_all_resolve() {
        for alias in ["f", "float", "f32", "double", "f64", "n", "number"] {
            assert_eq!(
                run(alias, RawParam::Text("2.5".to_string())).unwrap(),
                ArgValue::Float(2.5)
            );
        }
    }

    #[test]
    fn bool_accepts_canonical_forms_only() {
        assert_eq!(
            run("bool", RawParam::Text("TRUE".to_string())).unwrap(),
            ArgValue::Bool(true)
        );
        assert_eq!(
            run("b", RawParam::Text("off".to_string())).unwrap(),
            ArgValue::Bool(false)
        );
        assert_eq!(run("boolean", RawParam::Absent).unwrap(), ArgValue::Bool(false));
        assert!(run("bool", RawParam::Text("maybe".to_string())).is_err());
    }

    #[test]
    fn object_parses_strings_and_passes_json_through() {
        assert_eq!(
            run("obj", RawParam::Text(r#"{"a":1}"#.to_string())).unwrap(),
            ArgValue::Json(json!({"a": 1}))
        );
        assert_eq!(
            run("object", RawParam::Json(json!([1, 2]))).unwrap(),
            ArgValue::Json(json!([1, 2]))
        );
        assert_eq!(run("o", RawParam::Absent).unwrap(), ArgValue::Null);
        assert!(run("obj", RawParam::Text("{not json".to_string())).is_err());
    }

    #[test]
    fn date_parses_rfc3339_into_utc() {
        let v = run("date", RawParam::Text("2024-05-03T12:00:00+02:00".to_string())).unwrap();
        let d = v.as_date().unwrap();
        assert_eq!(d.to_rfc3339(), "2024-05-03T10:00:00+00:00");
        assert_eq!(run("d", RawParam::Absent).unwrap(), ArgValue::Null);
        assert!(run("date", RawParam::Text("yesterday".to_string())).is_err());
    }

    #[test]
    fn string_keeps_empty_and_absent_distinct() {
        assert_eq!(run("s", RawParam::Absent).unwrap(), ArgValue::Null);
        assert_eq!(
            run("str", RawParam::Text(String::new())).unwrap(),
            ArgValue::Str(String::new())
        );
        assert_eq!(
            run("string", RawParam::Json(json!(7))).unwrap(),
            ArgValue::Str("7".to_string())
        );
    }

    #[test]
    fn raw_is_identity() {
        assert_eq!(
            run("raw", RawParam::Text("as-is".to_string())).unwrap(),
            ArgValue::Str("as-is".to_string())
        );
        assert_eq!(
            run("raw", RawParam::Json(json!({"k": true}))).unwrap(),
            ArgValue::Json(json!({"k": true}))
        );
    }

    #[test]
    fn custom_coercers_can_be_registered_and_replace_builtins() {
        register_coercer("Upper", |raw| match raw {
            RawParam::Text(s) => Ok(ArgValue::Str(s.to_ascii_uppercase())),
            other => Ok(ArgValue::Str(format!("{other:?}"))),
        })
        .unwrap();

        let v = run("upper", RawParam::Text("abc".to_string())).unwrap();
        assert_eq!(v, ArgValue::Str("ABC".to_string()));
    }

    #[test]
    fn empty_suffix_is_rejected() {
        let err = register_coercer("  ", |raw| coerce_raw(raw)).unwrap_err();
        assert_eq!(err, ConventionError::EmptySuffix);
    }
}

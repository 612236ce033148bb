//! Error rendering for display surfaces.

use serde_json::{Map, Value};
use std::error::Error;

/// Shown if an error cannot be serialized.
const FALLBACK_MESSAGE: &str = "unknown error";

/// Upper bound on the source chain walk.
const MAX_CAUSES: usize = 32;

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}

/// Normalizes an error payload to a displayable string.
///
/// Strings pass through unchanged (including the empty string). Absent and
/// falsy payloads (`null`, `false`, `0`) have no message. Anything else is
/// rendered as JSON.
#[must_use]
pub fn error_message(error: Option<&Value>) -> Option<String> {
    match error? {
        Value::String(s) => Some(s.clone()),
        value if is_falsy(value) => None,
        value => Some(serde_json::to_string(value).unwrap_or_else(|_| FALLBACK_MESSAGE.to_string())),
    }
}

/// Renders a native error as JSON with its message and source chain.
///
/// `{"message": "...", "causes": ["...", ...]}`; `causes` is omitted when the
/// error has no source.
#[must_use]
pub fn describe_error(error: &(dyn Error + 'static)) -> String {
    let mut causes = Vec::new();
    let mut source = error.source();
    while let Some(cause) = source {
        if causes.len() == MAX_CAUSES {
            break;
        }
        causes.push(Value::String(cause.to_string()));
        source = cause.source();
    }

    let mut body = Map::new();
    body.insert("message".to_string(), Value::String(error.to_string()));
    if !causes.is_empty() {
        body.insert("causes".to_string(), Value::Array(causes));
    }

    serde_json::to_string(&Value::Object(body)).unwrap_or_else(|_| error.to_string())
}

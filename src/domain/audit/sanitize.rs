// src/domain/audit/sanitize.rs
use serde_json::Value;

const SENSITIVE_KEYS: &[&str] = &["password", "new_password", "current_password"];

const REDACTED: &str = "[REDACTED]";

/// Replaces the value of any top-level key on the sensitive list
/// (case-insensitive match) with a redaction marker. Non-object values are
/// passed through untouched.
pub fn sanitize_metadata(metadata: Value) -> Value {
    match metadata {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| {
                    if is_sensitive(&key) {
                        (key, Value::String(REDACTED.into()))
                    } else {
                        (key, value)
                    }
                })
                .collect(),
        ),
        other => other,
    }
}

fn is_sensitive(key: &str) -> bool {
    SENSITIVE_KEYS
        .iter()
        .any(|sensitive| key.eq_ignore_ascii_case(sensitive))
}

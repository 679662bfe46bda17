use serde_json::Value;

/// Turns a raw field into a typed scalar. Rules, first match wins:
///
/// 1. an optional `-` followed by ASCII digits that fits in `i64` becomes an
///    integer (leading zeros are dropped, so `"007"` is `7`);
/// 2. exactly `"true"` or `"false"` becomes a boolean;
/// 3. anything else is kept as the original string.
///
/// There is no float or null handling; `"3.14"` and `""` stay strings.
pub fn coerce(raw: &str) -> Value {
    if let Some(n) = parse_integer(raw) {
        return Value::from(n);
    }
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::String(raw.to_string()),
    }
}

fn parse_integer(raw: &str) -> Option<i64> {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// The string a coerced scalar would have been read from.
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

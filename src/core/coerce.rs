use serde::Deserialize;
use serde::de::IgnoredAny;

pub const DEFAULT_AGE: i32 = 30;

/// A single form field as submitted: JSON numbers arrive as `Number`, query
/// strings and text inputs as `Text`. Booleans, arrays and objects land in
/// `Other` and coerce like any other unparseable value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

/// Coerces a monetary field the way a browser form does with
/// `parseFloat(x) || 0`: the longest numeric prefix wins, anything else is 0.
pub fn coerce_amount(field: Option<&FieldValue>) -> f64 {
    let parsed = match field {
        None | Some(FieldValue::Other(_)) => return 0.0,
        Some(FieldValue::Number(v)) => *v,
        Some(FieldValue::Text(text)) => {
            let prefix = float_prefix(text.trim_start());
            if prefix.is_empty() {
                return 0.0;
            }
            prefix.parse::<f64>().unwrap_or(0.0)
        }
    };
    // JSON cannot carry non-finite numbers, so they collapse to 0 like NaN does.
    if parsed == 0.0 || !parsed.is_finite() {
        0.0
    } else {
        parsed
    }
}

/// Coerces the age field with `parseInt(x) || 30` semantics. Fractions are
/// truncated; missing, unparseable or zero ages fall back to [`DEFAULT_AGE`].
pub fn coerce_age(field: Option<&FieldValue>) -> i32 {
    let parsed = match field {
        None => None,
        Some(FieldValue::Number(v)) if v.is_finite() => Some(v.trunc() as i64),
        Some(FieldValue::Number(_) | FieldValue::Other(_)) => None,
        Some(FieldValue::Text(text)) => int_prefix(text.trim_start()),
    };
    match parsed {
        Some(age) if age != 0 => age.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32,
        _ => DEFAULT_AGE,
    }
}

fn float_prefix(text: &str) -> &str {
    let bytes = text.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }
    &text[..end]
}

fn int_prefix(text: &str) -> Option<i64> {
    let bytes = text.as_bytes();
    let (negative, start) = match bytes.first() {
        Some(b'-') => (true, 1),
        Some(b'+') => (false, 1),
        _ => (false, 0),
    };
    let mut end = start;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    if end == start {
        return None;
    }
    let magnitude = text[start..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

//! Cell coercion.
//!
//! Turns untyped cells into numbers or comparison labels. Nothing here fails:
//! a cell that cannot be coerced becomes NaN (numbers) or `None` (labels).

use serde_json::Value;

use crate::table::Column;

/// Keys consulted, in order, when a structured cell carries its own label.
const TAG_KEYS: [&str; 2] = ["value", "tag"];

/// Coerces a cell to `f64`.
///
/// Numbers pass through, booleans become 1 or 0, strings are trimmed and
/// parsed. Everything else, including `null`, is NaN.
pub fn to_numeric(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(f64::NAN),
        Value::Null | Value::Array(_) | Value::Object(_) => f64::NAN,
    }
}

/// Coerces an optional cell; a missing key is NaN.
pub fn to_numeric_opt(value: Option<&Value>) -> f64 {
    value.map(to_numeric).unwrap_or(f64::NAN)
}

/// Normalizes a categorical cell to a trimmed, lowercase label.
///
/// An object with a `value` or `tag` field is labelled by that field;
/// otherwise the cell itself is stringified. `null`, and structured cells
/// without a label, have no label.
pub fn normalize_label(value: &Value) -> Option<String> {
    let base = match value {
        Value::Object(obj) => TAG_KEYS.iter().find_map(|k| obj.get(*k))?,
        other => other,
    };

    let raw = match base {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    Some(raw.trim().to_lowercase())
}

/// Normalizes an optional cell; a missing key has no label.
pub fn normalize_label_opt(value: Option<&Value>) -> Option<String> {
    value.and_then(normalize_label)
}

/// Coerces a whole column to numbers. Computed columns pass through.
pub fn numeric_column(column: &Column) -> Vec<f64> {
    match column {
        Column::Values(cells) => cells.iter().map(to_numeric).collect(),
        Column::Scores(scores) => scores.clone(),
    }
}

/// Normalizes a whole column to labels. Undefined scores have no label.
pub fn label_column(column: &Column) -> Vec<Option<String>> {
    match column {
        Column::Values(cells) => cells.iter().map(normalize_label).collect(),
        Column::Scores(scores) => scores
            .iter()
            .map(|&x| normalize_label(&Value::from(x)))
            .collect(),
    }
}

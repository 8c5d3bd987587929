use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A request field whose JSON type is not trusted.
///
/// Request bodies arrive from browsers and form builders that send numbers as
/// strings, empty strings for untouched inputs and the occasional `null`.
/// Every field keeps the raw value and is resolved through an explicit
/// default-resolution function instead of being coerced on the way in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Loose(pub Value);

impl Loose {
    /// `null`, `false`, `0` and `""` are treated as "not provided".
    pub fn is_truthy(&self) -> bool {
        match &self.0 {
            Value::Null => false,
            Value::Bool(flag) => *flag,
            Value::Number(number) => number.as_f64().map(|n| n != 0.0).unwrap_or(true),
            Value::String(text) => !text.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        }
    }

    /// Render the value as prompt text.
    pub fn to_text(&self) -> String {
        render_value(&self.0)
    }

    /// Numeric reading of the value: numbers as-is, strings trimmed then parsed.
    /// Non-finite results are discarded.
    pub fn as_number(&self) -> Option<f64> {
        let number = match &self.0 {
            Value::Number(number) => number.as_f64(),
            Value::String(text) => text.trim().parse::<f64>().ok(),
            _ => None,
        }?;
        number.is_finite().then_some(number)
    }
}

impl From<&str> for Loose {
    fn from(value: &str) -> Self {
        Loose(Value::String(value.to_string()))
    }
}

impl From<String> for Loose {
    fn from(value: String) -> Self {
        Loose(Value::String(value))
    }
}

/// Resolve an optional field to its text, or to `default` when it is missing or falsy.
pub fn resolve_text(field: Option<&Loose>, default: &str) -> String {
    field
        .filter(|value| value.is_truthy())
        .map(Loose::to_text)
        .unwrap_or_else(|| default.to_string())
}

/// Resolve an optional field to its text only when it carries a value.
pub fn provided_text(field: Option<&Loose>) -> Option<String> {
    field.filter(|value| value.is_truthy()).map(Loose::to_text)
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => render_number(number),
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(render_value)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => value.to_string(),
    }
}

fn render_number(number: &serde_json::Number) -> String {
    if number.is_f64() {
        if let Some(float) = number.as_f64() {
            // 5.0 renders as "5", matching what a person typed.
            if float.fract() == 0.0 && float.abs() < 1e15 {
                return format!("{}", float as i64);
            }
            return format!("{float}");
        }
    }
    number.to_string()
}

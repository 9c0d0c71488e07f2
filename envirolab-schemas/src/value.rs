//! Scalar values held by report forms and parameter rows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single form value. Values are kept as authored; rendering never
/// reformats numbers or converts units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Date(NaiveDate),
    Text(String),
}

impl FieldValue {
    pub fn empty() -> Self {
        FieldValue::Text(String::new())
    }

    /// Text that is empty or whitespace only. Numbers and dates are never blank.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(text) => text.trim().is_empty(),
            FieldValue::Number(_) | FieldValue::Date(_) => false,
        }
    }

    /// True for numbers and for text that parses as a finite number.
    pub fn is_numeric(&self) -> bool {
        match self {
            FieldValue::Number(n) => n.is_finite(),
            FieldValue::Text(text) => text.trim().parse::<f64>().map_or(false, f64::is_finite),
            FieldValue::Date(_) => false,
        }
    }

    /// The string form handed to a renderer.
    pub fn render(&self) -> String {
        match self {
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Date(date) => date.format("%Y-%m-%d").to_string(),
            FieldValue::Text(text) => text.clone(),
        }
    }

    /// Coerces an arbitrary YAML node into a form value.
    ///
    /// Numbers become text so they are never reformatted later (quote them in
    /// the YAML to keep trailing zeros), ISO dates become dates, and anything
    /// that is not a scalar is written back out as YAML text.
    pub fn from_yaml(value: &serde_yaml::Value) -> Self {
        use serde_yaml::Value;

        match value {
            Value::Null => FieldValue::empty(),
            Value::Bool(flag) => FieldValue::Text(flag.to_string()),
            Value::Number(number) => FieldValue::Text(number.to_string()),
            Value::String(text) => match NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d") {
                Ok(date) => FieldValue::Date(date),
                Err(_) => FieldValue::Text(text.clone()),
            },
            Value::Tagged(tagged) => FieldValue::from_yaml(&tagged.value),
            other => FieldValue::Text(
                serde_yaml::to_string(other)
                    .map(|s| s.trim_end().to_string())
                    .unwrap_or_default(),
            ),
        }
    }

    pub fn to_yaml(&self) -> serde_yaml::Value {
        serde_yaml::Value::String(self.render())
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::empty()
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
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

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Date(value)
    }
}

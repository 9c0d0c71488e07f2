use crate::value::FieldValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const PARAMETER: &str = "parameter";
pub const METHOD: &str = "method";
pub const UNIT: &str = "unit";
pub const RESULT: &str = "result";
pub const STANDARD_LIMIT: &str = "standardLimit";

/// One measured-quantity record within a report's parameter table.
///
/// Cells are keyed by column; the owning table's schema decides which
/// columns exist and the order they render in. Rows are plain values, so
/// copying a row never aliases another report's data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterRow {
    cells: BTreeMap<String, FieldValue>,
}

impl ParameterRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// A row in the standard `{parameter, method, unit, result, standardLimit}` shape.
    pub fn standard(
        parameter: &str,
        method: &str,
        unit: &str,
        result: impl Into<FieldValue>,
        standard_limit: &str,
    ) -> Self {
        Self::new()
            .with(PARAMETER, parameter)
            .with(METHOD, method)
            .with(UNIT, unit)
            .with(RESULT, result)
            .with(STANDARD_LIMIT, standard_limit)
    }

    pub fn with(mut self, column: &str, value: impl Into<FieldValue>) -> Self {
        self.set(column, value);
        self
    }

    pub fn set(&mut self, column: &str, value: impl Into<FieldValue>) {
        self.cells.insert(column.to_string(), value.into());
    }

    pub fn get(&self, column: &str) -> Option<&FieldValue> {
        self.cells.get(column)
    }

    pub fn parameter(&self) -> Option<&FieldValue> {
        self.get(PARAMETER)
    }

    pub fn result(&self) -> Option<&FieldValue> {
        self.get(RESULT)
    }

    pub fn cells(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, FieldValue)> for ParameterRow {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

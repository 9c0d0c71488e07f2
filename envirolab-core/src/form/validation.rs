//! Required-field and parameter-result checks run before submission.

use envirolab_schemas::{parameter::ParameterRow, schema::ReportSchema, value::FieldValue};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

pub const REQUIRED: &str = "Required";
pub const NOT_A_NUMBER: &str = "Must be a number";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFailure {
    /// `issuedTo` for scalar fields, `airParameters[2].result` for row cells.
    pub path: String,
    pub message: String,
}

/// The outcome of validating a form. An empty report means the form may be submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    failures: Vec<FieldFailure>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failures(&self) -> &[FieldFailure] {
        &self.failures
    }

    pub fn paths(&self) -> BTreeSet<&str> {
        self.failures.iter().map(|f| f.path.as_str()).collect()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.failures.iter().any(|f| f.path == path)
    }

    pub fn message_for(&self, path: &str) -> Option<&str> {
        self.failures
            .iter()
            .find(|f| f.path == path)
            .map(|f| f.message.as_str())
    }

    fn push(&mut self, path: String, message: &str) {
        self.failures.push(FieldFailure {
            path,
            message: message.to_string(),
        });
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} field(s) failed validation", self.failures.len())?;
        for (i, failure) in self.failures.iter().enumerate() {
            let sep = if i == 0 { ": " } else { ", " };
            write!(f, "{sep}{} ({})", failure.path, failure.message)?;
        }
        Ok(())
    }
}

pub fn row_path(table: &str, index: usize, column: &str) -> String {
    format!("{table}[{index}].{column}")
}

pub(crate) fn validate(
    schema: &ReportSchema,
    values: &BTreeMap<String, FieldValue>,
    tables: &BTreeMap<String, Vec<ParameterRow>>,
) -> ValidationReport {
    let mut report = ValidationReport::default();

    for field in schema.required_fields() {
        if values.get(&field.key).map_or(true, FieldValue::is_blank) {
            report.push(field.key.clone(), REQUIRED);
        }
    }

    for table in &schema.tables {
        let Some(rows) = tables.get(&table.key) else {
            continue;
        };
        for (index, row) in rows.iter().enumerate() {
            for column in &table.result_rule.columns {
                let path = row_path(&table.key, index, column);
                match row.get(column) {
                    None => report.push(path, REQUIRED),
                    Some(value) if value.is_blank() => report.push(path, REQUIRED),
                    Some(value) if table.result_rule.numeric && !value.is_numeric() => {
                        report.push(path, NOT_A_NUMBER)
                    }
                    Some(_) => {}
                }
            }
        }
    }

    report
}

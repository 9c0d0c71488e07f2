use crate::kind::ReportKind;
use crate::parameter::ParameterRow;
use crate::value::FieldValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An immutable copy of a report's field values and parameter rows, taken at
/// submission time. There are no mutating accessors; editing resumes only by
/// mounting a new form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSnapshot {
    kind: ReportKind,
    values: BTreeMap<String, FieldValue>,
    tables: BTreeMap<String, Vec<ParameterRow>>,
    submitted_at: DateTime<Utc>,
}

impl ReportSnapshot {
    pub fn new(
        kind: ReportKind,
        values: BTreeMap<String, FieldValue>,
        tables: BTreeMap<String, Vec<ParameterRow>>,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            kind,
            values,
            tables,
            submitted_at,
        }
    }

    pub fn kind(&self) -> ReportKind {
        self.kind
    }

    pub fn value(&self, key: &str) -> Option<&FieldValue> {
        self.values.get(key)
    }

    /// `None` when the table is absent from the snapshot altogether.
    pub fn rows(&self, table: &str) -> Option<&[ParameterRow]> {
        self.tables.get(table).map(Vec::as_slice)
    }

    pub fn values(&self) -> &BTreeMap<String, FieldValue> {
        &self.values
    }

    pub fn tables(&self) -> &BTreeMap<String, Vec<ParameterRow>> {
        &self.tables
    }

    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }
}

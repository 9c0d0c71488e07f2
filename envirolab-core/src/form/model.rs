use super::validation::{self, ValidationReport};
use super::Rejected;
use crate::{
    clock::{Clock, Identifiers},
    error::CoreError,
};
use envirolab_schemas::{
    file_formats::FormInputFile,
    kind::ReportKind,
    parameter::ParameterRow,
    schema::{DefaultValue, FieldRole, IdentifierField, ReportSchema},
    snapshot::ReportSnapshot,
    value::FieldValue,
};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Editable state for one report.
///
/// A form is mounted from a schema, edited field by field, and consumed by
/// [`FormModel::submit`]. Every operation is driven by the schema, so the same
/// type serves all report kinds.
#[derive(Debug, Clone)]
pub struct FormModel {
    schema: ReportSchema,
    clock: Arc<dyn Clock>,
    values: BTreeMap<String, FieldValue>,
    tables: BTreeMap<String, Vec<ParameterRow>>,
}

impl FormModel {
    /// Mounts a form: applies every field default, generates the report
    /// identifiers and copies each table's default rows.
    pub fn new(schema: ReportSchema, clock: Arc<dyn Clock>) -> Self {
        let today = clock.today();
        let ids = Identifiers::generate(schema.identifier_prefix.as_deref(), clock.now_millis());

        let values = schema
            .fields
            .iter()
            .map(|field| {
                let value = match (&field.role, &field.default) {
                    (FieldRole::Identifier(which), _) => identifier_value(&ids, *which),
                    (_, DefaultValue::Empty) => FieldValue::empty(),
                    (_, DefaultValue::Text(text)) => FieldValue::Text(text.clone()),
                    (_, DefaultValue::Today) => FieldValue::Date(today),
                };
                (field.key.clone(), value)
            })
            .collect();

        let tables = schema
            .tables
            .iter()
            .map(|table| (table.key.clone(), table.default_rows.clone()))
            .collect();

        tracing::debug!(kind = %schema.kind, report_no = %ids.report_no, "mounted report form");

        Self {
            schema,
            clock,
            values,
            tables,
        }
    }

    pub fn kind(&self) -> ReportKind {
        self.schema.kind
    }

    pub fn schema(&self) -> &ReportSchema {
        &self.schema
    }

    pub fn value(&self, key: &str) -> Option<&FieldValue> {
        self.values.get(key)
    }

    pub fn values(&self) -> &BTreeMap<String, FieldValue> {
        &self.values
    }

    pub fn rows(&self, table: &str) -> Option<&[ParameterRow]> {
        self.tables.get(table).map(Vec::as_slice)
    }

    pub fn report_no(&self) -> Option<&FieldValue> {
        self.schema
            .identifier_key(IdentifierField::ReportNo)
            .and_then(|key| self.values.get(key))
    }

    /// Sets a scalar field. Identifier fields are read-only and edits to them
    /// are ignored.
    pub fn set_field(&mut self, key: &str, value: impl Into<FieldValue>) {
        match self.schema.field(key) {
            Some(spec) if spec.is_read_only() => {
                tracing::debug!(field = key, "ignoring edit to read-only field");
                return;
            }
            Some(_) => {}
            None => tracing::debug!(field = key, "storing field not declared by the schema"),
        }
        self.values.insert(key.to_string(), value.into());
    }

    /// Sets one cell of one parameter row.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not a valid row index for `table`.
    pub fn set_parameter_field(
        &mut self,
        table: &str,
        index: usize,
        column: &str,
        value: impl Into<FieldValue>,
    ) -> Result<(), CoreError> {
        let rows = self.rows_mut(table)?;
        assert!(
            index < rows.len(),
            "parameter row index {index} out of range for '{table}' ({} rows)",
            rows.len()
        );
        rows[index].set(column, value);
        Ok(())
    }

    /// Appends a blank row shaped by the table's schema and returns its index.
    pub fn add_parameter_row(&mut self, table: &str) -> Result<usize, CoreError> {
        let new_row = self
            .schema
            .table(table)
            .ok_or_else(|| CoreError::UnknownTable(table.to_string()))?
            .new_row
            .clone();
        let rows = self.rows_mut(table)?;
        rows.push(new_row);
        Ok(rows.len() - 1)
    }

    /// Removes a row unless it is the last one left, in which case nothing
    /// happens and `false` is returned.
    ///
    /// # Panics
    ///
    /// Panics if the table has more than one row and `index` is out of range.
    pub fn remove_parameter_row(&mut self, table: &str, index: usize) -> Result<bool, CoreError> {
        let rows = self.rows_mut(table)?;
        if rows.len() <= 1 {
            tracing::debug!(table, "refusing to remove the last parameter row");
            return Ok(false);
        }
        assert!(
            index < rows.len(),
            "parameter row index {index} out of range for '{table}' ({} rows)",
            rows.len()
        );
        rows.remove(index);
        Ok(true)
    }

    pub fn validate(&self) -> ValidationReport {
        validation::validate(&self.schema, &self.values, &self.tables)
    }

    /// Validates and freezes the form into a snapshot.
    ///
    /// Blank stamped dates take the submission date and missing identifiers
    /// are generated. On failure the form comes back inside [`Rejected`].
    pub fn submit(self) -> Result<ReportSnapshot, Rejected> {
        let report = self.validate();
        if !report.is_valid() {
            tracing::info!(kind = %self.schema.kind, failures = report.len(), "submission blocked by validation");
            return Err(Rejected {
                form: Box::new(self),
                report,
            });
        }

        let FormModel {
            schema,
            clock,
            mut values,
            tables,
        } = self;

        let submitted_at = clock.now();
        let ids = Identifiers::generate(
            schema.identifier_prefix.as_deref(),
            submitted_at.timestamp_millis(),
        );

        for field in &schema.fields {
            let blank = values.get(&field.key).map_or(true, FieldValue::is_blank);
            if !blank {
                continue;
            }
            match field.role {
                FieldRole::Stamped => {
                    values.insert(field.key.clone(), FieldValue::Date(submitted_at.date_naive()));
                }
                FieldRole::Identifier(which) => {
                    values.insert(field.key.clone(), identifier_value(&ids, which));
                }
                FieldRole::Authored => {}
            }
        }

        let report_no = schema
            .identifier_key(IdentifierField::ReportNo)
            .and_then(|key| values.get(key))
            .map(FieldValue::render)
            .unwrap_or_default();
        tracing::info!(kind = %schema.kind, %report_no, "report submitted");

        Ok(ReportSnapshot::new(schema.kind, values, tables, submitted_at))
    }

    /// Applies authored YAML input: scalar fields through [`FormModel::set_field`],
    /// tables replaced wholesale. Cells missing from an input row keep the
    /// table's blank-row value.
    pub fn apply_input(&mut self, input: &FormInputFile) -> Result<(), CoreError> {
        if input.kind != self.schema.kind {
            return Err(CoreError::KindMismatch {
                expected: self.schema.kind,
                found: input.kind,
            });
        }

        for (key, value) in &input.fields {
            self.set_field(key, FieldValue::from_yaml(value));
        }

        for (key, rows) in &input.tables {
            let spec = self
                .schema
                .table(key)
                .ok_or_else(|| CoreError::UnknownTable(key.clone()))?;
            let rows: Vec<ParameterRow> = rows
                .iter()
                .map(|cells| {
                    let mut row = spec.new_row.clone();
                    for (column, value) in cells {
                        row.set(column, FieldValue::from_yaml(value));
                    }
                    row
                })
                .collect();
            if rows.is_empty() {
                tracing::warn!(table = %key, "form input leaves parameter table empty");
            }
            self.tables.insert(key.clone(), rows);
        }

        Ok(())
    }

    /// The current state as authorable YAML input.
    pub fn to_input(&self) -> FormInputFile {
        FormInputFile {
            kind: self.schema.kind,
            fields: self
                .values
                .iter()
                .map(|(key, value)| (key.clone(), value.to_yaml()))
                .collect(),
            tables: self
                .tables
                .iter()
                .map(|(key, rows)| {
                    let rows = rows
                        .iter()
                        .map(|row| {
                            row.cells()
                                .map(|(column, value)| (column.to_string(), value.to_yaml()))
                                .collect()
                        })
                        .collect();
                    (key.clone(), rows)
                })
                .collect(),
        }
    }

    fn rows_mut(&mut self, table: &str) -> Result<&mut Vec<ParameterRow>, CoreError> {
        self.tables
            .get_mut(table)
            .ok_or_else(|| CoreError::UnknownTable(table.to_string()))
    }
}

fn identifier_value(ids: &Identifiers, which: IdentifierField) -> FieldValue {
    match which {
        IdentifierField::ReportNo => FieldValue::Text(ids.report_no.clone()),
        IdentifierField::SampleRegNo => FieldValue::Text(ids.sample_reg_no.clone()),
    }
}

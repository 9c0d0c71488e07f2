use super::model::FormModel;
use crate::{
    clock::{Clock, SystemClock},
    error::CoreError,
};
use envirolab_schemas::{file_formats::FormInputFile, schema::ReportSchema, value::FieldValue};
use std::sync::Arc;

/// A fluent builder for mounting a `FormModel`.
///
/// Only the schema is mandatory. The clock defaults to the system clock, and
/// any input or lab defaults are applied on top of the schema defaults in the
/// order: schema, lab default `issuedTo`, authored input.
#[derive(Default)]
pub struct FormBuilder {
    schema: Option<ReportSchema>,
    clock: Option<Arc<dyn Clock>>,
    input: Option<FormInputFile>,
    default_issued_to: Option<String>,
}

impl FormBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the schema the form is mounted from.
    pub fn with_schema(mut self, schema: ReportSchema) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Sets the time source used for default dates and identifiers.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Authored values applied after mounting.
    pub fn with_input(mut self, input: FormInputFile) -> Self {
        self.input = Some(input);
        self
    }

    /// Overrides the built-in `issuedTo` default, e.g. from a lab profile.
    pub fn with_default_issued_to(mut self, issued_to: &str) -> Self {
        self.default_issued_to = Some(issued_to.to_string());
        self
    }

    /// Consumes the builder and returns a mounted form.
    ///
    /// # Errors
    ///
    /// Returns a `CoreError` if no schema was provided, or if the input is for
    /// another report kind or names a table the schema does not declare.
    pub fn build(self) -> Result<FormModel, CoreError> {
        let schema = self.schema.ok_or(CoreError::SchemaNotDefined)?;
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));

        let mut form = FormModel::new(schema, clock);

        if let Some(issued_to) = self.default_issued_to {
            if form.schema().field("issuedTo").is_some() {
                form.set_field("issuedTo", FieldValue::Text(issued_to));
            }
        }

        if let Some(input) = &self.input {
            form.apply_input(input)?;
        }

        Ok(form)
    }
}

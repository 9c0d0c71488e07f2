use envirolab_schemas::kind::ReportKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("No schema registered for report kind '{0}'")]
    SchemaNotFound(ReportKind),

    #[error("Report schema is missing")]
    SchemaNotDefined,

    #[error("Form input is for a '{found}' report but the form is a '{expected}' report")]
    KindMismatch {
        expected: ReportKind,
        found: ReportKind,
    },

    #[error("Parameter table '{0}' is not defined for this report kind")]
    UnknownTable(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

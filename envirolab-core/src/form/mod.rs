pub mod builder;
pub mod model;
pub mod validation;

use model::FormModel;
use thiserror::Error;
use validation::ValidationReport;

/// A submission that failed validation. The form is handed back untouched so
/// editing can resume.
#[derive(Debug, Error)]
#[error("Report submission rejected: {report}")]
pub struct Rejected {
    pub form: Box<FormModel>,
    pub report: ValidationReport,
}

use crate::{
    config::LabProfile,
    render::{self, OutputFormat},
};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use envirolab_core::{
    catalog::Catalog,
    clock::Clock,
    form::{builder::FormBuilder, model::FormModel, validation::ValidationReport},
    projector::DocumentProjector,
    sample::record_sample,
};
use envirolab_schemas::{
    file_formats::FormInputFile,
    kind::ReportKind,
    sample::{SampleRecord, SampleType},
};
use std::{fs, path::Path, sync::Arc};

/// Everything a command needs besides its own arguments.
pub struct Session {
    pub catalog: Catalog,
    pub profile: LabProfile,
    pub clock: Arc<dyn Clock>,
}

impl Session {
    fn mount(&self, kind: ReportKind, input: Option<FormInputFile>) -> Result<FormModel> {
        let schema = self.catalog.schema(kind)?.clone();
        let mut builder = FormBuilder::new()
            .with_schema(schema)
            .with_clock(self.clock.clone())
            .with_default_issued_to(&self.profile.default_issued_to);
        if let Some(input) = input {
            builder = builder.with_input(input);
        }
        Ok(builder.build()?)
    }
}

pub fn read_input(path: &Path) -> Result<FormInputFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read form input: {:?}", path))?;
    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse form input from {:?}", path))
}

/// A freshly mounted form of `kind`, as YAML ready to be filled in.
pub fn template(session: &Session, kind: ReportKind) -> Result<String> {
    let form = session.mount(kind, None)?;
    serde_yaml::to_string(&form.to_input()).context("Failed to serialise form template")
}

pub fn validate(session: &Session, input: FormInputFile) -> Result<ValidationReport> {
    let form = session.mount(input.kind, Some(input))?;
    Ok(form.validate())
}

/// Mounts, submits and projects the input, then renders it in `format`.
pub fn generate(session: &Session, input: FormInputFile, format: OutputFormat) -> Result<String> {
    let kind = input.kind;
    let snapshot = session.mount(kind, Some(input))?.submit()?;
    let document = DocumentProjector::new(&session.catalog).project(kind, Some(&snapshot));
    render::render(&document, format, &session.profile)
}

pub fn sample(
    session: &Session,
    company: &str,
    sample_type: SampleType,
    date: Option<NaiveDate>,
) -> Result<SampleRecord> {
    Ok(record_sample(company, sample_type, date, session.clock.as_ref())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use envirolab_core::clock::FixedClock;
    use envirolab_core::form::Rejected;

    const WATER_INPUT: &str = r#"
kind: water
fields:
  issuedTo: Acme Labs
  customerRefNo: PO-2291 dated 2024-05-20
  remarks: ""
tables:
  waterParameters:
    - parameter: pH
      method: IS 3025 (Part 11):1983
      result: 7.4
      standardLimit: 6.5-8.5
  organolepticParameters:
    - parameter: Odour
      instrument: Sensory
      method: IS 3025 (Part 5):2015
      acceptableLimit: Unobjectionable
      permissibleLimit: Unobjectionable
      result: Unobjectionable
"#;

    fn session() -> Session {
        Session {
            catalog: Catalog::builtin(),
            profile: LabProfile::default(),
            clock: Arc::new(FixedClock::at_millis(1_717_171_717_123)),
        }
    }

    fn water_input() -> FormInputFile {
        serde_yaml::from_str(WATER_INPUT).expect("valid input")
    }

    #[test]
    fn test_read_input_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("water.yaml");
        fs::write(&path, WATER_INPUT).expect("write input");

        let input = read_input(&path).expect("valid input");
        assert_eq!(input, water_input());
    }

    #[test]
    fn test_template_parses_back_as_input() {
        let session = session();
        let yaml = template(&session, ReportKind::Noise).expect("template renders");
        let input: FormInputFile = serde_yaml::from_str(&yaml).expect("template is valid input");

        assert_eq!(input.kind, ReportKind::Noise);
        assert_eq!(input.tables["noiseMeasurements"].len(), 8);
    }

    #[test]
    fn test_generate_water_markdown() {
        let session = session();
        let md = generate(&session, water_input(), OutputFormat::Markdown).expect("valid report");

        assert!(md.starts_with("# WATER QUALITY TEST REPORT"));
        assert!(md.contains("**Issued To:** Acme Labs"));
        assert!(md.contains("**Report No.:** RPT-1717171717123"));
        assert!(md.contains("| Odour | Sensory |"));
        assert!(md.contains("**Remarks:** No remarks provided."));
    }

    #[test]
    fn test_generate_water_without_readings() {
        let session = session();
        let input: FormInputFile = serde_yaml::from_str(
            r#"
kind: water
fields:
  issuedTo: Acme Labs
  customerRefNo: PO-2291
  remarks: ""
tables:
  organolepticParameters:
    - parameter: Odour
      result: Unobjectionable
"#,
        )
        .expect("valid input");

        let md = generate(&session, input, OutputFormat::Markdown).expect("valid report");

        assert!(md.contains("**Issued To:** Acme Labs"));
        assert!(md.contains("| Odour | - | - | - | - | Unobjectionable |"));
        assert!(md.contains("| pH | - | IS 3025 (Part 11):1983 | 6.5-8.5 |"));
        assert!(md.contains("**Remarks:** No remarks provided."));
    }

    #[test]
    fn test_generate_rejects_invalid_input() {
        let session = session();
        let mut input = water_input();
        input
            .fields
            .insert("issuedTo".to_string(), serde_yaml::Value::Null);

        let err = generate(&session, input, OutputFormat::Json).expect_err("issuedTo is required");
        let rejected = err.downcast_ref::<Rejected>().expect("rejection is surfaced");
        assert!(rejected.report.contains("issuedTo"));
    }

    #[test]
    fn test_validate_reports_numeric_results() {
        let session = session();
        let input: FormInputFile = serde_yaml::from_str(
            r#"
kind: air
fields:
  location: Plant gate
tables:
  airParameters:
    - parameter: PM10
      result: high
"#,
        )
        .expect("valid input");

        let report = validate(&session, input).expect("input matches a kind");
        assert_eq!(report.len(), 1);
        assert_eq!(report.message_for("airParameters[0].result"), Some("Must be a number"));
    }

    #[test]
    fn test_sample_uses_context_clock() {
        let record = sample(&session(), "Greenfield Mills", SampleType::Soil, None)
            .expect("company provided");
        assert_eq!(record.sample_code, "GRE-7123");
    }
}

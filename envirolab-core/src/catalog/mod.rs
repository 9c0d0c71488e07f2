//! Built-in report schemas, one module per report kind.

mod air;
mod noise;
mod soil;
mod water;

pub use air::AIR_PARAMETERS;
pub use noise::NOISE_MEASUREMENTS;
pub use soil::SOIL_PARAMETERS;
pub use water::{ORGANOLEPTIC_PARAMETERS, WATER_PARAMETERS};

use crate::error::CoreError;
use envirolab_schemas::{
    kind::ReportKind,
    parameter::{METHOD, PARAMETER, RESULT, STANDARD_LIMIT, UNIT},
    schema::{
        ColumnSpec, FieldRef, FieldSpec, IdentifierField, ReportSchema, ResultRule,
        SectionTemplate,
    },
};
use std::collections::HashMap;

pub const DEFAULT_ISSUED_TO: &str = "KEC International Limited, 9th Floor, DLF 9, DLF Cyber City, Phase III, Gurugram, Haryana - 122002";
pub const DEFAULT_SUBMITTED_BY: &str = "KEC International Private Limited";

/// The set of schemas available to forms and the projector, keyed by kind.
#[derive(Debug, Clone)]
pub struct Catalog {
    schemas: HashMap<ReportKind, ReportSchema>,
}

impl Catalog {
    pub fn builtin() -> Self {
        let schemas = [water::schema(), air::schema(), soil::schema(), noise::schema()]
            .into_iter()
            .map(|s| (s.kind, s))
            .collect();
        Self { schemas }
    }

    /// Replaces the schema for `schema.kind`, e.g. with one loaded from YAML.
    pub fn with_schema(mut self, schema: ReportSchema) -> Self {
        tracing::debug!(kind = %schema.kind, "overriding built-in report schema");
        self.schemas.insert(schema.kind, schema);
        self
    }

    pub fn schema(&self, kind: ReportKind) -> Result<&ReportSchema, CoreError> {
        self.schemas.get(&kind).ok_or(CoreError::SchemaNotFound(kind))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

// Fields shared by every report header.

fn header_fields(customer_ref_required: bool) -> Vec<FieldSpec> {
    let customer_ref = FieldSpec::text("customerRefNo", "Customer Ref. No. & Date");
    vec![
        FieldSpec::text("issuedTo", "Issued To")
            .default_text(DEFAULT_ISSUED_TO)
            .required(),
        FieldSpec::identifier("sampleRegNo", "Sample Reg. No.", IdentifierField::SampleRegNo),
        FieldSpec::stamped("sampleRegDate", "Sample Reg. Date"),
        FieldSpec::stamped("reportDate", "Report Date"),
        FieldSpec::identifier("reportNo", "Report No.", IdentifierField::ReportNo),
        if customer_ref_required {
            customer_ref.required()
        } else {
            customer_ref
        },
    ]
}

fn remarks_field() -> FieldSpec {
    FieldSpec::text("remarks", "Additional Notes")
}

fn header_section() -> SectionTemplate {
    SectionTemplate::Fields {
        title: "Header Information".to_string(),
        fields: vec![
            FieldRef::new("Issued To", "issuedTo"),
            FieldRef::new("Sample Reg. No.", "sampleRegNo"),
            FieldRef::new("Sample Reg. Date", "sampleRegDate"),
            FieldRef::new("Report Date", "reportDate"),
            FieldRef::new("Report No.", "reportNo"),
            FieldRef::new("Customer Ref. No.", "customerRefNo"),
        ],
    }
}

fn remarks_section() -> SectionTemplate {
    SectionTemplate::Fields {
        title: "Remarks".to_string(),
        fields: vec![FieldRef::new("Remarks", "remarks")],
    }
}

fn fields_section(title: &str, fields: &[(&str, &str)]) -> SectionTemplate {
    SectionTemplate::Fields {
        title: title.to_string(),
        fields: fields
            .iter()
            .map(|(label, path)| FieldRef::new(label, path))
            .collect(),
    }
}

fn table_section(title: &str, table: &str) -> SectionTemplate {
    SectionTemplate::Table {
        title: title.to_string(),
        table: table.to_string(),
    }
}

fn interpretation_section(paragraph: &str) -> SectionTemplate {
    SectionTemplate::Text {
        title: "INTERPRETATION OF RESULTS".to_string(),
        paragraphs: vec![paragraph.to_string()],
    }
}

/// Parameter | Method | Unit | Result | Standard Limit*
fn standard_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new(PARAMETER, "Parameter", 25),
        ColumnSpec::new(METHOD, "Method", 25),
        ColumnSpec::new(UNIT, "Unit", 15),
        ColumnSpec::new(RESULT, "Result", 15),
        ColumnSpec::new(STANDARD_LIMIT, "Standard Limit*", 20),
    ]
}

fn result_rule(columns: &[&str], numeric: bool) -> ResultRule {
    ResultRule {
        columns: columns.iter().map(|c| c.to_string()).collect(),
        numeric,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use envirolab_schemas::schema::{FieldRole, SectionTemplate};

    #[test]
    fn test_builtin_has_every_kind() {
        let catalog = Catalog::builtin();
        for kind in ReportKind::ALL {
            let schema = catalog.schema(kind).expect("schema registered");
            assert_eq!(schema.kind, kind);
        }
    }

    #[test]
    fn test_sections_reference_declared_fields_and_tables() {
        let catalog = Catalog::builtin();
        for kind in ReportKind::ALL {
            let schema = catalog.schema(kind).expect("schema registered");
            for section in &schema.sections {
                match section {
                    SectionTemplate::Fields { fields, .. } => {
                        for field in fields {
                            assert!(
                                schema.field(&field.path).is_some(),
                                "{kind}: section field '{}' is not declared",
                                field.path
                            );
                        }
                    }
                    SectionTemplate::Table { table, .. } => {
                        assert!(schema.table(table).is_some(), "{kind}: table '{table}' is not declared");
                    }
                    SectionTemplate::Text { .. } => {}
                }
            }
        }
    }

    #[test]
    fn test_required_fields_are_user_authored() {
        let catalog = Catalog::builtin();
        for kind in ReportKind::ALL {
            let schema = catalog.schema(kind).expect("schema registered");
            for field in schema.required_fields() {
                assert_eq!(field.role, FieldRole::Authored, "{kind}: {}", field.key);
            }
        }
    }

    #[test]
    fn test_result_rule_columns_exist_in_rows() {
        let catalog = Catalog::builtin();
        for kind in ReportKind::ALL {
            let schema = catalog.schema(kind).expect("schema registered");
            for table in &schema.tables {
                assert!(!table.default_rows.is_empty(), "{kind}: {} has no default rows", table.key);
                for column in &table.result_rule.columns {
                    assert!(table.new_row.get(column).is_some(), "{kind}: new row lacks '{column}'");
                }
            }
        }
    }

    #[test]
    fn test_noise_background_label_matches_document_line() {
        let schema = noise::schema();
        let label = &schema.field("backgroundNoise").expect("field declared").label;
        let line = schema
            .sections
            .iter()
            .find_map(|section| match section {
                SectionTemplate::Fields { fields, .. } => {
                    fields.iter().find(|f| f.path == "backgroundNoise")
                }
                _ => None,
            })
            .expect("background noise is projected");
        assert_eq!(&line.label, label);
        assert_eq!(label, "Background Noise Level (dB(A))");
    }

    #[test]
    fn test_identifier_prefixes() {
        let catalog = Catalog::builtin();
        let prefix = |kind| {
            catalog
                .schema(kind)
                .expect("schema registered")
                .identifier_prefix
                .clone()
        };
        assert_eq!(prefix(ReportKind::Water), None);
        assert_eq!(prefix(ReportKind::Air).as_deref(), Some("AIR"));
        assert_eq!(prefix(ReportKind::Soil).as_deref(), Some("SOIL"));
        assert_eq!(prefix(ReportKind::Noise).as_deref(), Some("NOISE"));
    }

    #[test]
    fn test_with_schema_replaces_kind() {
        let mut custom = water::schema();
        custom.title = "POTABLE WATER REPORT".to_string();
        let catalog = Catalog::builtin().with_schema(custom);
        assert_eq!(
            catalog.schema(ReportKind::Water).expect("schema registered").title,
            "POTABLE WATER REPORT"
        );
    }
}

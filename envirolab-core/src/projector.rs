//! Turns a submitted report into a renderer-agnostic [`Document`].
//!
//! Projection never fails. Missing values take the schema's fallbacks, empty
//! tables get a placeholder row, and a missing snapshot yields a one-section
//! error document.

use crate::catalog::Catalog;
use envirolab_schemas::{
    document::{Document, FieldLine, Section, SectionBody, Table},
    kind::ReportKind,
    schema::{FieldRef, ReportSchema, SectionTemplate, TableSpec},
    snapshot::ReportSnapshot,
    value::FieldValue,
};

pub const ERROR_SECTION: &str = "Error";

pub struct DocumentProjector<'a> {
    catalog: &'a Catalog,
}

impl<'a> DocumentProjector<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    pub fn project(&self, kind: ReportKind, snapshot: Option<&ReportSnapshot>) -> Document {
        let Some(snapshot) = snapshot else {
            tracing::warn!(%kind, "no snapshot to project");
            return unavailable(kind);
        };
        if snapshot.kind() != kind {
            tracing::warn!(%kind, found = %snapshot.kind(), "snapshot is for another report kind");
            return unavailable(kind);
        }
        let schema = match self.catalog.schema(kind) {
            Ok(schema) => schema,
            Err(e) => {
                tracing::warn!(%kind, error = %e, "cannot project report");
                return unavailable(kind);
            }
        };

        let sections = schema
            .sections
            .iter()
            .map(|template| project_section(schema, template, snapshot))
            .collect();

        tracing::info!(%kind, "projected report document");
        Document {
            title: schema.title.clone(),
            sections,
        }
    }
}

fn unavailable(kind: ReportKind) -> Document {
    Document {
        title: format!("{} Report", capitalised(kind.as_str())),
        sections: vec![Section {
            title: ERROR_SECTION.to_string(),
            body: SectionBody::Text {
                paragraphs: vec![format!("No data available for the {kind} report.")],
            },
        }],
    }
}

fn capitalised(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn project_section(
    schema: &ReportSchema,
    template: &SectionTemplate,
    snapshot: &ReportSnapshot,
) -> Section {
    let body = match template {
        SectionTemplate::Fields { fields, .. } => SectionBody::Fields {
            fields: fields
                .iter()
                .map(|field| field_line(schema, field, snapshot))
                .collect(),
        },
        SectionTemplate::Table { table, .. } => match schema.table(table) {
            Some(spec) => SectionBody::Table(project_table(schema, spec, snapshot)),
            None => {
                tracing::warn!(table = %table, "section names a table the schema does not declare");
                SectionBody::Text {
                    paragraphs: vec![format!("No data available. {table} is not defined")],
                }
            }
        },
        SectionTemplate::Text { paragraphs, .. } => SectionBody::Text {
            paragraphs: paragraphs.clone(),
        },
    };

    Section {
        title: template.title().to_string(),
        body,
    }
}

fn field_line(schema: &ReportSchema, field: &FieldRef, snapshot: &ReportSnapshot) -> FieldLine {
    let value = present(snapshot.value(&field.path))
        .unwrap_or_else(|| schema.fallbacks.scalar_for(&field.path).to_string());
    FieldLine {
        label: field.label.clone(),
        value,
    }
}

fn project_table(schema: &ReportSchema, spec: &TableSpec, snapshot: &ReportSnapshot) -> Table {
    let header = spec.columns.iter().map(|c| c.header.clone()).collect();
    let widths = spec.columns.iter().map(|c| c.width).collect();

    let rows = match snapshot.rows(&spec.key) {
        Some(rows) if !rows.is_empty() => rows
            .iter()
            .map(|row| {
                spec.columns
                    .iter()
                    .map(|column| {
                        present(row.get(&column.key)).unwrap_or_else(|| {
                            schema.fallbacks.cell_for(&spec.key, &column.key).to_string()
                        })
                    })
                    .collect()
            })
            .collect(),
        Some(_) => {
            tracing::warn!(table = %spec.key, "parameter table is empty, rendering placeholder");
            vec![vec![placeholder(spec, "is empty")]]
        }
        None => {
            tracing::warn!(table = %spec.key, "parameter table is absent, rendering placeholder");
            vec![vec![placeholder(spec, "is absent")]]
        }
    };

    Table {
        header,
        widths,
        rows,
        note: spec.note.clone(),
    }
}

fn placeholder(spec: &TableSpec, state: &str) -> String {
    format!("No {} available. {} {state}", spec.noun, spec.key)
}

fn present(value: Option<&FieldValue>) -> Option<String> {
    value.filter(|v| !v.is_blank()).map(FieldValue::render)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{AIR_PARAMETERS, NOISE_MEASUREMENTS, ORGANOLEPTIC_PARAMETERS};
    use crate::clock::FixedClock;
    use crate::form::model::FormModel;
    use chrono::{TimeZone, Utc};
    use envirolab_schemas::parameter::ParameterRow;
    use std::sync::Arc;

    fn snapshot(
        kind: ReportKind,
        values: &[(&str, FieldValue)],
        tables: Vec<(&str, Vec<ParameterRow>)>,
    ) -> ReportSnapshot {
        ReportSnapshot::new(
            kind,
            values
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            tables
                .into_iter()
                .map(|(k, rows)| (k.to_string(), rows))
                .collect(),
            Utc.timestamp_millis_opt(1_717_171_717_123).unwrap(),
        )
    }

    #[test]
    fn test_missing_snapshot_projects_error_document() {
        let catalog = Catalog::builtin();
        let doc = DocumentProjector::new(&catalog).project(ReportKind::Noise, None);

        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].title, ERROR_SECTION);
        assert_eq!(
            doc.sections[0].body,
            SectionBody::Text {
                paragraphs: vec!["No data available for the noise report.".to_string()]
            }
        );
    }

    #[test]
    fn test_water_end_to_end() {
        let catalog = Catalog::builtin();
        let schema = catalog.schema(ReportKind::Water).unwrap().clone();
        let mut form = FormModel::new(schema, Arc::new(FixedClock::at_millis(1_717_171_717_123)));

        form.set_field("issuedTo", "Acme Labs");
        form.set_field("customerRefNo", "PO-991");
        form.set_field("remarks", "");
        while form.rows(ORGANOLEPTIC_PARAMETERS).unwrap().len() > 1 {
            form.remove_parameter_row(ORGANOLEPTIC_PARAMETERS, 0).unwrap();
        }
        form.set_parameter_field(ORGANOLEPTIC_PARAMETERS, 0, "parameter", "Odour")
            .unwrap();
        form.set_parameter_field(ORGANOLEPTIC_PARAMETERS, 0, "result", "Unobjectionable")
            .unwrap();

        let snapshot = form
            .submit()
            .expect("water readings are optional, only the organoleptic result is required");
        let doc = DocumentProjector::new(&catalog).project(ReportKind::Water, Some(&snapshot));

        let header = doc.section("Header Information").unwrap();
        assert_eq!(header.field_value("Issued To"), Some("Acme Labs"));
        assert_eq!(header.field_value("Report No."), Some("RPT-1717171717123"));

        let table = doc
            .section("ORGANOLEPTIC & PHYSICAL PARAMETERS")
            .and_then(Section::table)
            .unwrap();
        assert_eq!(table.rows.len(), 1);
        assert!(!table.is_placeholder());
        assert_eq!(table.rows[0].first().map(String::as_str), Some("Odour"));
        assert_eq!(table.rows[0].last().map(String::as_str), Some("Unobjectionable"));

        let remarks = doc.section("Remarks").unwrap();
        assert_eq!(remarks.field_value("Remarks"), Some("No remarks provided."));

        let readings = doc
            .section("WATER ANALYSIS PARAMETERS")
            .and_then(Section::table)
            .unwrap();
        assert_eq!(readings.rows[0][..2], ["pH".to_string(), "-".to_string()]);
    }

    #[test]
    fn test_blank_scalars_and_cells_take_fallbacks() {
        let catalog = Catalog::builtin();
        let row = ParameterRow::new()
            .with("parameter", "PM10")
            .with("result", 41.5)
            .with("unit", "  ");
        let snap = snapshot(
            ReportKind::Air,
            &[("issuedTo", FieldValue::from("Acme Labs")), ("location", FieldValue::empty())],
            vec![(AIR_PARAMETERS, vec![row])],
        );

        let doc = DocumentProjector::new(&catalog).project(ReportKind::Air, Some(&snap));

        let sampling = doc.section("SAMPLING INFORMATION").unwrap();
        assert_eq!(sampling.field_value("Location"), Some("N/A"));
        assert_eq!(sampling.field_value("Temperature (°C)"), Some("N/A"));

        let table = doc.section("AIR QUALITY PARAMETERS").and_then(Section::table).unwrap();
        assert_eq!(table.rows, vec![vec!["PM10", "-", "-", "41.5", "-"]]);
        assert_eq!(
            table.note.as_deref(),
            Some("* As per National Ambient Air Quality Standards (NAAQS)")
        );
    }

    #[test]
    fn test_empty_and_absent_tables_are_distinguished() {
        let catalog = Catalog::builtin();
        let projector = DocumentProjector::new(&catalog);

        let empty = snapshot(ReportKind::Noise, &[], vec![(NOISE_MEASUREMENTS, vec![])]);
        let absent = snapshot(ReportKind::Noise, &[], vec![]);

        let placeholder = |snap: &ReportSnapshot| {
            let doc = projector.project(ReportKind::Noise, Some(snap));
            let table = doc
                .section("NOISE LEVEL MEASUREMENTS (in dB(A))")
                .and_then(Section::table)
                .cloned()
                .unwrap();
            assert!(table.is_placeholder());
            table.rows[0][0].clone()
        };

        let empty_text = placeholder(&empty);
        let absent_text = placeholder(&absent);
        assert!(empty_text.ends_with("noiseMeasurements is empty"), "{empty_text}");
        assert!(absent_text.ends_with("noiseMeasurements is absent"), "{absent_text}");
        assert_ne!(empty_text, absent_text);
    }

    #[test]
    fn test_values_render_as_authored() {
        let catalog = Catalog::builtin();
        let row = ParameterRow::new()
            .with("parameter", "pH")
            .with("result", "7.20");
        let snap = snapshot(
            ReportKind::Soil,
            &[("reportNo", FieldValue::from("SOIL-RPT-5"))],
            vec![("soilParameters", vec![row])],
        );

        let doc = DocumentProjector::new(&catalog).project(ReportKind::Soil, Some(&snap));

        let table = doc.section("SOIL ANALYSIS RESULTS").and_then(Section::table).unwrap();
        assert_eq!(table.rows[0][3], "7.20");
        assert_eq!(
            doc.section("Header Information").unwrap().field_value("Report No."),
            Some("SOIL-RPT-5")
        );
    }

    #[test]
    fn test_section_order_follows_schema() {
        let catalog = Catalog::builtin();
        let snap = snapshot(ReportKind::Air, &[], vec![]);
        let doc = DocumentProjector::new(&catalog).project(ReportKind::Air, Some(&snap));

        let titles: Vec<&str> = doc.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Header Information",
                "SAMPLING INFORMATION",
                "AIR QUALITY PARAMETERS",
                "INTERPRETATION OF RESULTS",
                "Remarks",
            ]
        );
        assert_eq!(doc.title, "AIR QUALITY TEST REPORT");
    }

    #[test]
    fn test_mismatched_snapshot_kind_projects_error_document() {
        let catalog = Catalog::builtin();
        let snap = snapshot(ReportKind::Soil, &[], vec![]);
        let doc = DocumentProjector::new(&catalog).project(ReportKind::Water, Some(&snap));
        assert_eq!(doc.sections[0].title, ERROR_SECTION);
    }

    #[test]
    fn test_custom_fallback_per_path() {
        let mut schema = Catalog::builtin().schema(ReportKind::Air).unwrap().clone();
        schema
            .fallbacks
            .by_path
            .insert("temperature".to_string(), "Not specified".to_string());
        let catalog = Catalog::builtin().with_schema(schema);
        let snap = snapshot(ReportKind::Air, &[], vec![(AIR_PARAMETERS, vec![])]);

        let doc = DocumentProjector::new(&catalog).project(ReportKind::Air, Some(&snap));

        let sampling = doc.section("SAMPLING INFORMATION").unwrap();
        assert_eq!(sampling.field_value("Temperature (°C)"), Some("Not specified"));
        assert_eq!(sampling.field_value("Humidity (%)"), Some("N/A"));
    }
}

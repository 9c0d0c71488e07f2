use super::{
    fields_section, header_fields, header_section, interpretation_section, remarks_field,
    remarks_section, result_rule, table_section, DEFAULT_SUBMITTED_BY,
};
use envirolab_schemas::{
    kind::ReportKind,
    parameter::ParameterRow,
    schema::{ColumnSpec, Fallbacks, FieldSpec, ReportSchema, TableSpec},
};

pub const NOISE_MEASUREMENTS: &str = "noiseMeasurements";

const HOURLY_READINGS: [&str; 8] = [
    "09:00", "10:00", "11:00", "12:00", "13:00", "14:00", "15:00", "16:00",
];

pub(super) fn schema() -> ReportSchema {
    let mut fields = header_fields(true);
    fields.extend([
        FieldSpec::text("monitoringLocation", "Monitoring Location").required(),
        FieldSpec::date("monitoringDate", "Monitoring Date").required(),
        FieldSpec::text("startTime", "Start Time")
            .default_text("09:00")
            .required(),
        FieldSpec::text("endTime", "End Time")
            .default_text("17:00")
            .required(),
        FieldSpec::text("monitoringDuration", "Monitoring Duration")
            .default_text("8 hours")
            .required(),
        FieldSpec::text("weatherCondition", "Weather Condition")
            .default_text("Clear")
            .required(),
        FieldSpec::text("temperature", "Temperature (°C)"),
        FieldSpec::text("humidity", "Humidity (%)"),
        FieldSpec::text("windSpeed", "Wind Speed (km/h)"),
        FieldSpec::text("backgroundNoise", "Background Noise Level (dB(A))"),
        FieldSpec::text("testRequestSubmittedBy", "Test Request Submitted By")
            .default_text(DEFAULT_SUBMITTED_BY)
            .required(),
        remarks_field(),
    ]);

    ReportSchema {
        kind: ReportKind::Noise,
        title: "NOISE LEVEL MONITORING REPORT".to_string(),
        identifier_prefix: Some("NOISE".to_string()),
        fields,
        tables: vec![noise_measurements()],
        sections: vec![
            header_section(),
            fields_section(
                "PART A: MONITORING DETAILS",
                &[
                    ("Monitoring Location", "monitoringLocation"),
                    ("Monitoring Date", "monitoringDate"),
                    ("Start Time", "startTime"),
                    ("End Time", "endTime"),
                    ("Monitoring Duration", "monitoringDuration"),
                    ("Weather Condition", "weatherCondition"),
                    ("Temperature (°C)", "temperature"),
                    ("Humidity (%)", "humidity"),
                    ("Wind Speed (km/h)", "windSpeed"),
                    ("Background Noise Level (dB(A))", "backgroundNoise"),
                ],
            ),
            table_section("NOISE LEVEL MEASUREMENTS (in dB(A))", NOISE_MEASUREMENTS),
            interpretation_section(
                "The noise levels were measured in accordance with standard procedures. The \
                 results indicate the noise levels at the specified location during the \
                 monitoring period. Values are compared against the applicable regulatory \
                 standards for the area.",
            ),
            remarks_section(),
        ],
        fallbacks: Fallbacks::default(),
    }
}

fn measurement(time: &str) -> ParameterRow {
    ParameterRow::new()
        .with("time", time)
        .with("lAeq", "")
        .with("lMax", "")
        .with("lMin", "")
        .with("location", "")
        .with("backgroundNoise", "")
}

fn noise_measurements() -> TableSpec {
    TableSpec {
        key: NOISE_MEASUREMENTS.to_string(),
        title: "Noise Level Measurements".to_string(),
        noun: "noise level measurements".to_string(),
        columns: vec![
            ColumnSpec::new("time", "Time", 16),
            ColumnSpec::new("lAeq", "LAeq", 16),
            ColumnSpec::new("lMax", "LMax", 16),
            ColumnSpec::new("lMin", "LMin", 16),
            ColumnSpec::new("location", "Location", 20),
            ColumnSpec::new("backgroundNoise", "Background Noise", 16),
        ],
        result_rule: result_rule(&["lAeq", "lMax", "lMin"], true),
        default_rows: HOURLY_READINGS.iter().map(|time| measurement(time)).collect(),
        new_row: measurement(""),
        note: None,
    }
}

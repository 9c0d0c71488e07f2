use super::{
    fields_section, header_fields, header_section, interpretation_section, remarks_field,
    remarks_section, result_rule, standard_columns, table_section,
};
use envirolab_schemas::{
    kind::ReportKind,
    parameter::{ParameterRow, RESULT},
    schema::{Fallbacks, FieldSpec, ReportSchema, TableSpec},
};

pub const AIR_PARAMETERS: &str = "airParameters";

pub(super) fn schema() -> ReportSchema {
    let mut fields = header_fields(false);
    fields.extend([
        FieldSpec::text("location", "Location").required(),
        FieldSpec::date("samplingDate", "Sampling Date").required(),
        FieldSpec::text("samplingDuration", "Sampling Duration")
            .default_text("24 hours")
            .required(),
        FieldSpec::text("weatherCondition", "Weather Condition")
            .default_text("Clear")
            .required(),
        FieldSpec::text("temperature", "Temperature (°C)"),
        FieldSpec::text("humidity", "Humidity (%)"),
        FieldSpec::text("windSpeed", "Wind Speed (km/h)"),
        remarks_field(),
    ]);

    ReportSchema {
        kind: ReportKind::Air,
        title: "AIR QUALITY TEST REPORT".to_string(),
        identifier_prefix: Some("AIR".to_string()),
        fields,
        tables: vec![air_parameters()],
        sections: vec![
            header_section(),
            fields_section(
                "SAMPLING INFORMATION",
                &[
                    ("Location", "location"),
                    ("Sampling Date", "samplingDate"),
                    ("Sampling Duration", "samplingDuration"),
                    ("Weather Condition", "weatherCondition"),
                    ("Temperature (°C)", "temperature"),
                    ("Humidity (%)", "humidity"),
                    ("Wind Speed (km/h)", "windSpeed"),
                ],
            ),
            table_section("AIR QUALITY PARAMETERS", AIR_PARAMETERS),
            interpretation_section(
                "The air quality monitoring was conducted in accordance with standard procedures. \
                 The results indicate the concentration of various air pollutants at the sampling \
                 location. These values can be compared against the National Ambient Air Quality \
                 Standards (NAAQS) for air quality assessment.",
            ),
            remarks_section(),
        ],
        fallbacks: Fallbacks::default(),
    }
}

fn air_parameters() -> TableSpec {
    let row = |parameter: &str, method: &str, unit: &str, limit: &str| {
        ParameterRow::standard(parameter, method, unit, "", limit)
    };

    TableSpec {
        key: AIR_PARAMETERS.to_string(),
        title: "Air Quality Parameters".to_string(),
        noun: "air quality parameters".to_string(),
        columns: standard_columns(),
        result_rule: result_rule(&[RESULT], true),
        default_rows: vec![
            row("Particulate Matter (PM2.5)", "Beta Attenuation Monitor", "µg/m³", "60"),
            row("Particulate Matter (PM10)", "Beta Attenuation Monitor", "µg/m³", "100"),
            row("Nitrogen Dioxide (NO₂)", "Chemiluminescence", "ppb", "80"),
            row("Sulfur Dioxide (SO₂)", "UV Fluorescence", "ppb", "80"),
            row("Carbon Monoxide (CO)", "Non-Dispersive Infrared", "ppm", "4"),
            row("Ozone (O₃)", "UV Photometric", "ppb", "100"),
        ],
        new_row: row("", "", "", ""),
        note: Some("* As per National Ambient Air Quality Standards (NAAQS)".to_string()),
    }
}

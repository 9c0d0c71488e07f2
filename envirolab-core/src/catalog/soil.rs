use super::{
    fields_section, header_fields, header_section, interpretation_section, remarks_field,
    remarks_section, result_rule, standard_columns, table_section, DEFAULT_SUBMITTED_BY,
};
use envirolab_schemas::{
    kind::ReportKind,
    parameter::{ParameterRow, RESULT},
    schema::{Fallbacks, FieldSpec, ReportSchema, TableSpec},
};

pub const SOIL_PARAMETERS: &str = "soilParameters";

pub(super) fn schema() -> ReportSchema {
    let mut fields = header_fields(true);
    fields.extend([
        FieldSpec::text("natureOfSample", "Nature of Sample")
            .default_text("Soil Sample")
            .required(),
        FieldSpec::text("sampleCondition", "Sample Condition")
            .default_text("Good")
            .required(),
        FieldSpec::text("sampleSource", "Sample Source").default_text("Surface Soil"),
        FieldSpec::text("sampleDepth", "Sample Depth").default_text("0-15 cm"),
        FieldSpec::text("sampleQuantity", "Sample Quantity")
            .default_text("1 kg")
            .required(),
        FieldSpec::text("modeOfPacking", "Mode of Packing")
            .default_text("Sealed in plastic bags")
            .required(),
        FieldSpec::date("dateOfCollection", "Date of Collection").required(),
        FieldSpec::date("dateOfReceipt", "Date of Receipt").required(),
        FieldSpec::date("dateOfAnalysis", "Date of Analysis").required(),
        FieldSpec::text("testRequestSubmittedBy", "Test Request Submitted By")
            .default_text(DEFAULT_SUBMITTED_BY)
            .required(),
        FieldSpec::text("location", "Location").required(),
        FieldSpec::text("gpsCoordinates", "GPS Coordinates"),
        remarks_field(),
    ]);

    ReportSchema {
        kind: ReportKind::Soil,
        title: "SOIL ANALYSIS REPORT".to_string(),
        identifier_prefix: Some("SOIL".to_string()),
        fields,
        tables: vec![soil_parameters()],
        sections: vec![
            header_section(),
            fields_section(
                "PART A: SAMPLE DETAILS",
                &[
                    ("Nature of Sample", "natureOfSample"),
                    ("Sample Condition", "sampleCondition"),
                    ("Sample Source", "sampleSource"),
                    ("Sample Depth", "sampleDepth"),
                    ("Sample Quantity", "sampleQuantity"),
                    ("Location", "location"),
                    ("GPS Coordinates", "gpsCoordinates"),
                    ("Date of Collection", "dateOfCollection"),
                    ("Date of Receipt", "dateOfReceipt"),
                    ("Date of Analysis", "dateOfAnalysis"),
                ],
            ),
            table_section("SOIL ANALYSIS RESULTS", SOIL_PARAMETERS),
            interpretation_section(
                "The soil analysis was conducted in accordance with standard procedures. The \
                 results indicate the concentration of various parameters in the soil sample. \
                 These values can be compared against the relevant agricultural or environmental \
                 standards for soil quality assessment.",
            ),
            remarks_section(),
        ],
        fallbacks: Fallbacks::default(),
    }
}

fn soil_parameters() -> TableSpec {
    let row = |parameter: &str, method: &str, unit: &str, limit: &str| {
        ParameterRow::standard(parameter, method, unit, "", limit)
    };

    TableSpec {
        key: SOIL_PARAMETERS.to_string(),
        title: "Soil Analysis Parameters".to_string(),
        noun: "soil parameters".to_string(),
        columns: standard_columns(),
        result_rule: result_rule(&[RESULT], false),
        default_rows: vec![
            row("pH", "IS 2720 (Part 26): 1987", "-", "6.5 - 8.5"),
            row("Electrical Conductivity", "IS 14767: 2000", "dS/m", "< 4.0"),
            row("Organic Carbon", "Walkley & Black", "%", "0.5 - 2.0"),
            row("Available Nitrogen", "Kjeldahl", "kg/ha", "> 280"),
            row("Available Phosphorus", "Olsen's", "kg/ha", "> 10"),
            row("Available Potassium", "Flame Photometry", "kg/ha", "> 125"),
        ],
        new_row: row("", "IS 2720", "", ""),
        note: Some("* As per applicable standards and guidelines".to_string()),
    }
}

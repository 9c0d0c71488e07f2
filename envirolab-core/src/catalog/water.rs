use super::{
    fields_section, header_fields, header_section, remarks_field, remarks_section, result_rule,
    table_section, DEFAULT_SUBMITTED_BY,
};
use envirolab_schemas::{
    kind::ReportKind,
    parameter::{ParameterRow, METHOD, PARAMETER, RESULT, STANDARD_LIMIT},
    schema::{ColumnSpec, Fallbacks, FieldSpec, ReportSchema, TableSpec},
};

pub const WATER_PARAMETERS: &str = "waterParameters";
pub const ORGANOLEPTIC_PARAMETERS: &str = "organolepticParameters";

pub(super) fn schema() -> ReportSchema {
    let mut fields = header_fields(true);
    fields.extend([
        FieldSpec::text("natureOfSample", "Nature of Sample")
            .default_text("Ground Water")
            .required(),
        FieldSpec::text("sampleCondition", "Sample Condition")
            .default_text("Good")
            .required(),
        FieldSpec::text("gradeVariety", "Grade/Variety").default_text("NA"),
        FieldSpec::text("brandName", "Brand Name").default_text("NA"),
        FieldSpec::text("sampleQuantity", "Sample Quantity")
            .default_text("6 Ltr")
            .required(),
        FieldSpec::text("batchSizeLocation", "Batch Size/Location").default_text("NA"),
        FieldSpec::text("modeOfPacking", "Mode of Packing")
            .default_text("Packed in bottles")
            .required(),
        FieldSpec::date("dateOfReceipt", "Date of Receipt").required(),
        FieldSpec::date("dateOfStart", "Date of Start").required(),
        FieldSpec::text("dateOfCompletion", "Date of Completion").default_text("NA"),
        FieldSpec::text("sealStatus", "Seal Status").default_text("NA"),
        FieldSpec::text("iosSignature", "IO's Signature").default_text("NA"),
        FieldSpec::text("testRequestSubmittedBy", "Test Request Submitted By")
            .default_text(DEFAULT_SUBMITTED_BY)
            .required(),
        FieldSpec::text("manufacturedBy", "Manufactured By").default_text("NA"),
        FieldSpec::text("suppliedBy", "Supplied By").default_text("NA"),
        remarks_field(),
    ]);

    ReportSchema {
        kind: ReportKind::Water,
        title: "WATER QUALITY TEST REPORT".to_string(),
        identifier_prefix: None,
        fields,
        tables: vec![water_parameters(), organoleptic_parameters()],
        sections: vec![
            header_section(),
            fields_section(
                "PART A: PARTICULARS OF SAMPLE SUBMITTED",
                &[
                    ("Nature of Sample", "natureOfSample"),
                    ("Sample Condition", "sampleCondition"),
                    ("Grade/Variety", "gradeVariety"),
                    ("Brand Name", "brandName"),
                    ("Sample Quantity", "sampleQuantity"),
                    ("Batch Size/Location", "batchSizeLocation"),
                    ("Mode of Packing", "modeOfPacking"),
                    ("Date of Receipt", "dateOfReceipt"),
                    ("Date of Start", "dateOfStart"),
                    ("Date of Completion", "dateOfCompletion"),
                    ("Seal Status", "sealStatus"),
                    ("Test Request Submitted By", "testRequestSubmittedBy"),
                ],
            ),
            table_section("WATER ANALYSIS PARAMETERS", WATER_PARAMETERS),
            table_section("ORGANOLEPTIC & PHYSICAL PARAMETERS", ORGANOLEPTIC_PARAMETERS),
            remarks_section(),
        ],
        fallbacks: Fallbacks::default(),
    }
}

fn water_row(parameter: &str, method: &str, limit: &str) -> ParameterRow {
    ParameterRow::new()
        .with(PARAMETER, parameter)
        .with(METHOD, method)
        .with(RESULT, "")
        .with(STANDARD_LIMIT, limit)
}

fn water_parameters() -> TableSpec {
    TableSpec {
        key: WATER_PARAMETERS.to_string(),
        title: "Water Analysis Parameters".to_string(),
        noun: "water analysis parameters".to_string(),
        columns: vec![
            ColumnSpec::new(PARAMETER, "Parameter", 30),
            ColumnSpec::new(RESULT, "Result", 20),
            ColumnSpec::new(METHOD, "Method", 30),
            ColumnSpec::new(STANDARD_LIMIT, "Permissible Limit", 20),
        ],
        // Readings are optional here; only organoleptic results gate submission.
        result_rule: result_rule(&[], false),
        default_rows: vec![
            water_row("pH", "IS 3025 (Part 11):1983", "6.5-8.5"),
            water_row("Turbidity (NTU)", "IS 3025 (Part 10):1991", "5"),
            water_row("Total Dissolved Solids (mg/L)", "IS 3025 (Part 16):1984", "500"),
            water_row("Total Hardness (as CaCO3) (mg/L)", "IS 3025 (Part 21):2009", "200"),
            water_row("Chlorides (as Cl) (mg/L)", "IS 3025 (Part 32):1988", "250"),
        ],
        new_row: water_row("", "", ""),
        note: None,
    }
}

fn organoleptic_row(
    parameter: &str,
    instrument: &str,
    method: &str,
    acceptable: &str,
    permissible: &str,
    result: &str,
) -> ParameterRow {
    ParameterRow::new()
        .with(PARAMETER, parameter)
        .with("instrument", instrument)
        .with(METHOD, method)
        .with("acceptableLimit", acceptable)
        .with("permissibleLimit", permissible)
        .with(RESULT, result)
}

fn organoleptic_parameters() -> TableSpec {
    TableSpec {
        key: ORGANOLEPTIC_PARAMETERS.to_string(),
        title: "Organoleptic & Physical Parameters".to_string(),
        noun: "organoleptic parameters".to_string(),
        columns: vec![
            ColumnSpec::new(PARAMETER, "Parameter", 22),
            ColumnSpec::new("instrument", "Instrument", 15),
            ColumnSpec::new(METHOD, "Method", 20),
            ColumnSpec::new("acceptableLimit", "Acceptable Limit", 13),
            ColumnSpec::new("permissibleLimit", "Permissible Limit", 13),
            ColumnSpec::new(RESULT, "Result", 17),
        ],
        result_rule: result_rule(&[RESULT], false),
        default_rows: vec![
            organoleptic_row(
                "Colour (Hazen Unit)",
                "Turbidity meter",
                "IS 3025 (Part 4): 1983 (RA 2018)",
                "5.0",
                "15.0",
                "1.0",
            ),
            organoleptic_row(
                "Odour",
                "Sensory",
                "IS 3025 (Part 5): 2015",
                "Unobjectionable",
                "Unobjectionable",
                "Unobjectionable",
            ),
        ],
        new_row: organoleptic_row("", "", "", "", "", ""),
        note: None,
    }
}

use crate::config::LabProfile;
use anyhow::{Context, Result};
use clap::ValueEnum;
use envirolab_schemas::document::{Document, SectionBody, Table};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
    Csv,
}

pub fn render(document: &Document, format: OutputFormat, profile: &LabProfile) -> Result<String> {
    match format {
        OutputFormat::Markdown => Ok(to_markdown(document, profile)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(document).context("Failed to serialise document as JSON")
        }
        OutputFormat::Csv => to_csv(document),
    }
}

/// A printable report: headings, `**Label:** value` lines, pipe tables and the
/// signatory footer.
pub fn to_markdown(document: &Document, profile: &LabProfile) -> String {
    let mut out = format!("# {}\n", document.title);

    for section in &document.sections {
        out.push_str(&format!("\n## {}\n\n", section.title));
        match &section.body {
            SectionBody::Fields { fields } => {
                for line in fields {
                    out.push_str(&format!("**{}:** {}  \n", line.label, line.value));
                }
            }
            SectionBody::Table(table) => out.push_str(&markdown_table(table)),
            SectionBody::Text { paragraphs } => {
                out.push_str(&paragraphs.join("\n\n"));
                out.push('\n');
            }
        }
    }

    out.push_str(&format!(
        "\n---\n\nFor {}\n\n\n{}\n",
        profile.organisation, profile.signatory
    ));
    out
}

fn markdown_table(table: &Table) -> String {
    let mut out = markdown_row(table.header.iter().map(String::as_str));
    out.push_str(&markdown_row(table.header.iter().map(|_| "---")));

    if table.is_placeholder() {
        let text = table.rows[0][0].as_str();
        let padding = table.header.len().saturating_sub(1);
        out.push_str(&markdown_row(
            std::iter::once(text).chain(std::iter::repeat("").take(padding)),
        ));
    } else {
        for row in &table.rows {
            out.push_str(&markdown_row(row.iter().map(String::as_str)));
        }
    }

    if let Some(note) = &table.note {
        out.push_str(&format!("\n_{}_\n", note));
    }
    out
}

fn markdown_row<'a>(cells: impl Iterator<Item = &'a str>) -> String {
    let cells: Vec<String> = cells.map(|c| c.replace('|', "\\|")).collect();
    format!("| {} |\n", cells.join(" | "))
}

/// One block per table section: the section title, the header, then the rows.
pub fn to_csv(document: &Document) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());

    for section in &document.sections {
        let SectionBody::Table(table) = &section.body else {
            continue;
        };
        writer.write_record([section.title.as_str()])?;
        writer.write_record(&table.header)?;
        for row in &table.rows {
            writer.write_record(row)?;
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV output: {}", e))?;
    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use envirolab_schemas::document::{FieldLine, Section};

    fn document() -> Document {
        Document {
            title: "NOISE LEVEL MONITORING REPORT".to_string(),
            sections: vec![
                Section {
                    title: "Header Information".to_string(),
                    body: SectionBody::Fields {
                        fields: vec![FieldLine {
                            label: "Issued To".to_string(),
                            value: "Acme Labs".to_string(),
                        }],
                    },
                },
                Section {
                    title: "NOISE LEVEL MEASUREMENTS (in dB(A))".to_string(),
                    body: SectionBody::Table(Table {
                        header: vec!["Time".to_string(), "LAeq".to_string()],
                        widths: vec![50, 50],
                        rows: vec![
                            vec!["09:00".to_string(), "55.2".to_string()],
                            vec!["10:00".to_string(), "a|b".to_string()],
                        ],
                        note: Some("* Day-time limit 75 dB(A)".to_string()),
                    }),
                },
                Section {
                    title: "Remarks".to_string(),
                    body: SectionBody::Fields {
                        fields: vec![FieldLine {
                            label: "Remarks".to_string(),
                            value: "No remarks provided.".to_string(),
                        }],
                    },
                },
            ],
        }
    }

    #[test]
    fn test_markdown_layout() {
        let md = to_markdown(&document(), &LabProfile::default());

        assert!(md.starts_with("# NOISE LEVEL MONITORING REPORT\n"));
        assert!(md.contains("## Header Information\n\n**Issued To:** Acme Labs"));
        assert!(md.contains("| Time | LAeq |\n| --- | --- |\n| 09:00 | 55.2 |\n"));
        assert!(md.contains("| 10:00 | a\\|b |"));
        assert!(md.contains("_* Day-time limit 75 dB(A)_"));
        assert!(md.contains("**Remarks:** No remarks provided."));
        assert!(md.trim_end().ends_with("For KEC International Limited\n\n\nAuthorized Signatory"));
    }

    #[test]
    fn test_markdown_placeholder_row_spans_table() {
        let table = Table {
            header: vec!["Parameter".to_string(), "Result".to_string(), "Unit".to_string()],
            widths: vec![40, 30, 30],
            rows: vec![vec!["No soil parameters available. soilParameters is empty".to_string()]],
            note: None,
        };
        let md = markdown_table(&table);
        assert!(md.ends_with("| No soil parameters available. soilParameters is empty |  |  |\n"));
    }

    #[test]
    fn test_csv_has_one_block_per_table() {
        let csv = to_csv(&document()).expect("csv renders");
        assert_eq!(
            csv,
            "NOISE LEVEL MEASUREMENTS (in dB(A))\nTime,LAeq\n09:00,55.2\n10:00,a|b\n"
        );
    }

    #[test]
    fn test_json_keeps_section_shape() {
        let json = render(&document(), OutputFormat::Json, &LabProfile::default())
            .expect("json renders");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");

        assert_eq!(value["sections"][0]["fields"][0]["label"], "Issued To");
        assert_eq!(value["sections"][1]["header"][1], "LAeq");
        assert_eq!(value["sections"][1]["rows"][0][1], "55.2");
    }
}

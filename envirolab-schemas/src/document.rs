//! The renderer-agnostic output of projection.
//!
//! Serialised as JSON this is the contract with external renderers: an ordered
//! list of sections, each `{title, fields: [{label, value}]}`,
//! `{title, header, widths, rows, note}` or `{title, paragraphs}`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    pub sections: Vec<Section>,
}

impl Document {
    pub fn section(&self, title: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.title == title)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    #[serde(flatten)]
    pub body: SectionBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SectionBody {
    Fields { fields: Vec<FieldLine> },
    Table(Table),
    Text { paragraphs: Vec<String> },
}

impl Section {
    pub fn fields(&self) -> Option<&[FieldLine]> {
        match &self.body {
            SectionBody::Fields { fields } => Some(fields),
            _ => None,
        }
    }

    pub fn table(&self) -> Option<&Table> {
        match &self.body {
            SectionBody::Table(table) => Some(table),
            _ => None,
        }
    }

    /// Value of the first field line with the given label.
    pub fn field_value(&self, label: &str) -> Option<&str> {
        self.fields()?
            .iter()
            .find(|line| line.label == label)
            .map(|line| line.value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldLine {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub header: Vec<String>,
    pub widths: Vec<u8>,
    /// Data rows, or a single one-cell placeholder row spanning the table.
    pub rows: Vec<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Table {
    pub fn is_placeholder(&self) -> bool {
        self.rows.len() == 1 && self.rows[0].len() == 1 && self.header.len() > 1
    }
}
